//! Configuration file support for wordpick.
//!
//! Plain TOML reading and writing, used to generate a starter file. Runtime
//! loading with environment overrides goes through [`super::load_config`].
//!
//! # Configuration File Format
//!
//! ```toml
//! [sampler]
//! min_length = 3
//! file_url = "https://www.eecis.udel.edu/~lliao/cis320f05/dictionary.txt"
//! destination_path = "/tmp/names.txt"
//! keep_file = false
//! max_attempts = 100
//!
//! [http]
//! connect_timeout_secs = 10
//! # timeout_secs = 300
//! # user_agent = "wordpick/0.1.0"
//!
//! [logging]
//! level = "warn"
//! # format = "json"
//! ```

use std::path::Path;

use super::{Config, SamplerOptions};

impl Config {
    /// Load configuration from a TOML file, without environment overrides
    pub fn load_toml(path: &Path) -> Result<Self, ConfigFileError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigFileError::Io(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigFileError::Parse(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories
    pub fn save_toml(&self, path: &Path) -> Result<(), ConfigFileError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigFileError::Serialize(e.to_string()))?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ConfigFileError::Io(e.to_string()))?;
        }

        std::fs::write(path, content).map_err(|e| ConfigFileError::Io(e.to_string()))
    }

    /// Configuration with every sampler option spelled out at its default
    pub fn starter() -> Self {
        let resolved = SamplerOptions::default().resolve();

        Self {
            sampler: SamplerOptions {
                min_length: Some(resolved.min_length),
                file_url: Some(resolved.file_url),
                destination_path: Some(resolved.destination_path),
                keep_file: Some(resolved.keep_file),
                max_attempts: Some(resolved.max_attempts),
            },
            ..Self::default()
        }
    }
}

/// Configuration file errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serialize error: {0}")]
    Serialize(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn test_starter_save_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::starter();
        config.save_toml(&path).unwrap();

        let loaded = Config::load_toml(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.sampler.min_length, Some(3));
        assert_eq!(loaded.sampler.max_attempts, Some(100));
    }

    #[test]
    fn test_partial_file_leaves_options_unset() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[sampler]\nmin_length = 8\n").unwrap();

        let config = Config::load_toml(&path).unwrap();
        assert_eq!(config.sampler.min_length, Some(8));
        assert_eq!(config.sampler.keep_file, None);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_config_file_nonexistent() {
        let path = PathBuf::from("/nonexistent/config.toml");
        assert!(matches!(
            Config::load_toml(&path),
            Err(ConfigFileError::Io(_))
        ));
    }

    #[test]
    fn test_config_file_invalid_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("invalid.toml");

        std::fs::write(&path, "invalid = toml = content").unwrap();

        assert!(matches!(
            Config::load_toml(&path),
            Err(ConfigFileError::Parse(_))
        ));
    }
}
