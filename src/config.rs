//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\lyrics-minder\config.toml
//! - macOS: ~/Library/Application Support/lyrics-minder/config.toml
//! - Linux: ~/.config/lyrics-minder/config.toml
//!
//! The file only holds defaults. Command-line flags and environment
//! variables override them for a single run, producing a [`RunConfig`].

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::lyrics::ResultSelection;
use crate::lyrics::client::DEFAULT_BASE_URL;
use crate::output::OutputMode;

/// Default bound on each remote request.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Persistent configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Defaults for `fetch` runs
    pub run: RunDefaults,
}

/// Run settings that can be stored in the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunDefaults {
    /// Music directory used when none is given on the command line
    pub root_directory: Option<PathBuf>,

    pub output_mode: OutputMode,

    /// Per-request timeout for lyrics lookups, in seconds
    pub http_timeout_secs: u64,

    pub selection: ResultSelection,

    pub lyrics_base_url: String,
}

impl Default for RunDefaults {
    fn default() -> Self {
        Self {
            root_directory: None,
            output_mode: OutputMode::default(),
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            selection: ResultSelection::default(),
            lyrics_base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Fully resolved settings for one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub root_directory: PathBuf,
    pub output_mode: OutputMode,
    pub http_timeout_secs: u64,
    pub selection: ResultSelection,
    pub lyrics_base_url: String,
    pub dry_run: bool,
}

impl RunConfig {
    /// Run over `root_directory` with every other setting at its default.
    pub fn new(root_directory: impl Into<PathBuf>) -> Self {
        Self::from_defaults(&RunDefaults::default(), root_directory)
    }

    pub fn from_defaults(defaults: &RunDefaults, root_directory: impl Into<PathBuf>) -> Self {
        Self {
            root_directory: root_directory.into(),
            output_mode: defaults.output_mode,
            http_timeout_secs: defaults.http_timeout_secs,
            selection: defaults.selection,
            lyrics_base_url: defaults.lyrics_base_url.clone(),
            dry_run: false,
        }
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// Reject settings that would make every lookup fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "http_timeout_secs must be at least 1".to_string(),
            ));
        }
        if !(self.lyrics_base_url.starts_with("http://")
            || self.lyrics_base_url.starts_with("https://"))
        {
            return Err(ConfigError::Invalid(format!(
                "lyrics_base_url must be an http(s) URL, got {:?}",
                self.lyrics_base_url
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("lyrics-minder"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Read and parse a config file.
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let contents =
        std::fs::read_to_string(path).map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
    toml::from_str(&contents).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))
}

/// Load configuration from `path`, or the default location.
///
/// Returns default config if the file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load(path: Option<&Path>) -> Config {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match config_path() {
            Some(path) => path,
            None => {
                tracing::warn!("Could not determine config directory, using defaults");
                return Config::default();
            }
        },
    };

    if !path.exists() {
        tracing::debug!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match load_from(&path) {
        Ok(config) => {
            tracing::debug!("Loaded config from {:?}", path);
            config
        }
        Err(e) => {
            tracing::warn!("{}; using default configuration", e);
            Config::default()
        }
    }
}

/// Save configuration to `path`, or the default location.
///
/// Creates the parent directory if it doesn't exist. Returns the path written.
pub fn save(config: &Config, path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => config_path().ok_or(ConfigError::NoConfigDir)?,
    };

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::CreateDir(dir.to_path_buf(), e))?;
    }

    let contents = to_toml(config)?;

    // Write atomically (write to temp, then rename)
    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, &contents).map_err(|e| ConfigError::Write(temp_path.clone(), e))?;
    std::fs::rename(&temp_path, &path)
        .map_err(|e| ConfigError::Rename(temp_path, path.clone(), e))?;

    tracing::info!("Saved config to {:?}", path);
    Ok(path)
}

/// Pretty TOML for `config`.
pub fn to_toml(config: &Config) -> Result<String, ConfigError> {
    toml::to_string_pretty(config).map_err(ConfigError::Serialize)
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to create config directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to read config file {0}: {1}")]
    Read(PathBuf, std::io::Error),

    #[error("Failed to parse config file {0}: {1}")]
    Parse(PathBuf, toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),

    #[error("Failed to write config to {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

// ============================================================================
// Tests
// ============================================================================
