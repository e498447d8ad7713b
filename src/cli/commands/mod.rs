//! CLI command definitions and dispatch.
//!
//! Each subcommand is implemented in its own submodule:
//! - `fetch`: Lyrics pipeline over a music directory
//! - `identify`: Show the resolved identity of one file
//! - `covers`: Extract embedded cover art to `cover.jpg`
//! - `config`: Show or save persistent defaults

mod config;
mod covers;
mod fetch;
mod identify;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::lyrics::ResultSelection;
use crate::output::OutputMode;

pub use config::{ConfigAction, cmd_config};
pub use covers::cmd_covers;
pub use fetch::cmd_fetch;
pub use identify::cmd_identify;

/// Lyrics Minder CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Fetch synced lyrics for every audio file under a directory
    Fetch {
        /// Music directory (defaults to `root_directory` from the config file)
        root: Option<PathBuf>,
        #[command(flatten)]
        overrides: RunOverrides,
        /// Resolve and look up lyrics without writing anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Show the title / artist / album / duration resolved for a file
    Identify {
        /// Path to the audio file
        path: PathBuf,
    },
    /// Extract embedded cover art to cover.jpg next to each file
    Covers {
        /// Music directory
        root: PathBuf,
    },
    /// Show or save the persistent configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Run settings that override the config file.
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct RunOverrides {
    /// Where lyrics go: next to the file (sidecar) or into its tags (embed)
    #[arg(short, long, value_enum, env = "LYRICS_MINDER_MODE")]
    pub mode: Option<OutputMode>,
    /// Per-request timeout in seconds
    #[arg(long, env = "LYRICS_MINDER_TIMEOUT")]
    pub timeout: Option<u64>,
    /// Which search result supplies the lyrics
    #[arg(long, value_enum)]
    pub selection: Option<ResultSelection>,
    /// Lyrics service base URL
    #[arg(long, env = "LYRICS_MINDER_BASE_URL")]
    pub base_url: Option<String>,
}

impl RunOverrides {
    /// Apply every override that was given on top of `defaults`.
    pub fn apply(&self, defaults: &mut crate::config::RunDefaults) {
        if let Some(mode) = self.mode {
            defaults.output_mode = mode;
        }
        if let Some(timeout) = self.timeout {
            defaults.http_timeout_secs = timeout;
        }
        if let Some(selection) = self.selection {
            defaults.selection = selection;
        }
        if let Some(ref base_url) = self.base_url {
            defaults.lyrics_base_url = base_url.clone();
        }
    }
}

/// Run the specified CLI command.
///
/// Individual file failures never make this return `Err`; only problems
/// that stop the whole command do.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let config_path = cli.config.as_deref();

    match &cli.command {
        Commands::Fetch {
            root,
            overrides,
            dry_run,
        } => cmd_fetch(config_path, root.as_deref(), overrides, *dry_run),
        Commands::Identify { path } => cmd_identify(path),
        Commands::Covers { root } => cmd_covers(root),
        Commands::Config { action } => cmd_config(config_path, action),
    }
}
