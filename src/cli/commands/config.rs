//! Persistent configuration commands.

use std::path::{Path, PathBuf};

use clap::Subcommand;

use super::RunOverrides;
use crate::config::{self, Config};

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Print the config file location
    Path,
    /// Write the configuration, with any given overrides, to the config file
    Save {
        /// Default music directory
        #[arg(long)]
        root: Option<PathBuf>,
        #[command(flatten)]
        overrides: RunOverrides,
    },
}

/// Apply a `config` subcommand against the file at `config_path` (or the default one).
pub fn apply_action(config_path: Option<&Path>, action: &ConfigAction) -> anyhow::Result<String> {
    match action {
        ConfigAction::Show => Ok(config::to_toml(&config::load(config_path))?),
        ConfigAction::Path => {
            let path = match config_path {
                Some(path) => path.to_path_buf(),
                None => config::config_path().ok_or(config::ConfigError::NoConfigDir)?,
            };
            Ok(path.display().to_string())
        }
        ConfigAction::Save { root, overrides } => {
            let mut config: Config = config::load(config_path);
            if let Some(root) = root {
                config.run.root_directory = Some(root.clone());
            }
            overrides.apply(&mut config.run);
            let written = config::save(&config, config_path)?;
            Ok(format!("Saved config to {}", written.display()))
        }
    }
}

pub fn cmd_config(config_path: Option<&Path>, action: &ConfigAction) -> anyhow::Result<()> {
    println!("{}", apply_action(config_path, action)?);
    Ok(())
}
