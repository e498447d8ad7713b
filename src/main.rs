//! Lyrics Minder - synced lyrics for a local music library.
//!
//! Walks a music directory, works out each track's title and artist from its
//! tags (or its filename), looks up time-synced lyrics on LRCLIB and writes
//! them either as `.lrc` sidecar files or into the audio file's own tags.

pub mod cli;
pub mod config;
pub mod cover;
pub mod error;
pub mod lyrics;
pub mod metadata;
pub mod output;
pub mod pipeline;
pub mod scanner;
#[cfg(test)]
pub mod test_utils;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Log targets enabled at `info` unless `RUST_LOG` says otherwise.
const LOG_TARGETS: &[&str] = &[
    "lyrics_minder",
    "metadata",
    "lyrics",
    "output",
    "pipeline",
    "scanner",
    "cover",
];

/// `RUST_LOG` when it is set and parses, otherwise `info` for our targets.
fn env_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| {
            let defaults: Vec<String> = LOG_TARGETS.iter().map(|t| format!("{t}=info")).collect();
            EnvFilter::new(defaults.join(","))
        })
}

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging
    let rust_log = std::env::var("RUST_LOG").ok();
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(env_filter(rust_log.as_deref()))
        .init();

    cli::run_command(&args)
}
