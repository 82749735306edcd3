//! Configuration management.
//!
//! Sampling options are all optional so that partial inputs from different
//! layers (config file, environment, command line, library callers) can be
//! merged field by field before being resolved against the built-in defaults.

mod file_config;

pub use file_config::ConfigFileError;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default minimum word length
pub const DEFAULT_MIN_LENGTH: usize = 3;

/// Default word list location
pub const DEFAULT_FILE_URL: &str = "https://www.eecis.udel.edu/~lliao/cis320f05/dictionary.txt";

/// File name of the cached word list inside the temp directory
pub const DEFAULT_FILE_NAME: &str = "names.txt";

/// Default number of draws before giving up on finding a long enough word
pub const DEFAULT_MAX_ATTEMPTS: usize = 100;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Sampling options
    #[serde(default)]
    pub sampler: SamplerOptions,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Partially specified sampling options.
///
/// Any field left as `None` falls back to its default when resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplerOptions {
    /// Minimum accepted word length in characters (0 accepts any line)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,

    /// URL the word list is downloaded from on a cache miss
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,

    /// Where the word list is cached
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_path: Option<PathBuf>,

    /// Keep the cached file after sampling instead of deleting it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keep_file: Option<bool>,

    /// Number of draws before giving up
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_attempts: Option<usize>,
}

impl SamplerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_length(mut self, min_length: usize) -> Self {
        self.min_length = Some(min_length);
        self
    }

    pub fn file_url(mut self, url: impl Into<String>) -> Self {
        self.file_url = Some(url.into());
        self
    }

    pub fn destination_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.destination_path = Some(path.into());
        self
    }

    pub fn keep_file(mut self, keep: bool) -> Self {
        self.keep_file = Some(keep);
        self
    }

    pub fn max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = Some(attempts);
        self
    }

    /// Layer `other` on top of `self`: fields set in `other` win.
    pub fn merge(self, other: SamplerOptions) -> Self {
        Self {
            min_length: other.min_length.or(self.min_length),
            file_url: other.file_url.or(self.file_url),
            destination_path: other.destination_path.or(self.destination_path),
            keep_file: other.keep_file.or(self.keep_file),
            max_attempts: other.max_attempts.or(self.max_attempts),
        }
    }

    /// Fill every unset field with its default.
    pub fn resolve(self) -> SamplerConfig {
        SamplerConfig {
            min_length: self.min_length.unwrap_or(DEFAULT_MIN_LENGTH),
            file_url: self
                .file_url
                .unwrap_or_else(|| DEFAULT_FILE_URL.to_string()),
            destination_path: self.destination_path.unwrap_or_else(default_destination),
            keep_file: self.keep_file.unwrap_or(false),
            max_attempts: self.max_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS),
        }
    }
}

/// Fully resolved sampling configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplerConfig {
    pub min_length: usize,
    pub file_url: String,
    pub destination_path: PathBuf,
    pub keep_file: bool,
    pub max_attempts: usize,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        SamplerOptions::default().resolve()
    }
}

impl SamplerConfig {
    /// Check that the configuration can be used for a download.
    pub fn validate(&self) -> Result<(), OptionsError> {
        let url = url::Url::parse(&self.file_url)
            .map_err(|e| OptionsError::InvalidUrl(format!("{}: {}", self.file_url, e)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(OptionsError::InvalidUrl(format!(
                "{}: only http and https are supported",
                self.file_url
            )));
        }

        if self.destination_path.as_os_str().is_empty() {
            return Err(OptionsError::EmptyDestination);
        }

        Ok(())
    }
}

/// Invalid sampling options
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum OptionsError {
    #[error("Invalid file URL {0}")]
    InvalidUrl(String),

    #[error("Destination path is empty")]
    EmptyDestination,
}

/// HTTP client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User agent sent with the download request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    /// Connection timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Overall request timeout in seconds (unbounded when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: None,
            connect_timeout_secs: default_connect_timeout(),
            timeout_secs: None,
        }
    }
}

fn default_connect_timeout() -> u64 {
    10
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// `"json"` for JSON lines, anything else for the compact text format
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: None,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Default cache location: `names.txt` in the system temp directory
pub fn default_destination() -> PathBuf {
    std::env::temp_dir().join(DEFAULT_FILE_NAME)
}

/// Load configuration from an optional file, with `WORDPICK_*` environment
/// overrides applied on top either way.
///
/// Nested keys use a double underscore, e.g. `WORDPICK_SAMPLER__MIN_LENGTH=5`.
/// A file that is named but missing is an error.
pub fn load_config(path: Option<&Path>) -> Result<Config, config::ConfigError> {
    let mut builder = config::Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(config::File::from(path));
    }

    let settings = builder
        .add_source(
            config::Environment::with_prefix("WORDPICK")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

/// Look for a config file in the working directory, then the user config dir
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from("wordpick.toml");
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("wordpick").join("config.toml"))
        .filter(|path| path.is_file())
}

/// Default location for `wordpick init-config`
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("wordpick").join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("wordpick.toml"))
}
