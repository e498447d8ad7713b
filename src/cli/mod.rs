//! Command-line interface for lyrics-minder.
//!
//! This module provides CLI commands for fetching synced lyrics, inspecting
//! resolved metadata, extracting cover art and managing configuration.

mod commands;

pub use commands::{Cli, Commands, run_command};
