//! Configuration file handling.
//!
//! This module provides loading and saving of wiki-versions configuration
//! from a TOML file. Every field is optional; a missing file means defaults.
//!
//! # Configuration Location
//!
//! The configuration file is stored at:
//! - Linux: `~/.config/wiki-versions/config.toml`
//! - macOS: `~/Library/Application Support/wiki-versions/config.toml`
//! - Windows: `%APPDATA%\wiki-versions\config.toml`
//!
//! # Example Configuration
//!
//! ```toml
//! root_package = "wiki"
//! server_package = "wiki-server"
//! client_package = "wiki-client"
//! security_prefix = "wiki-security"
//! plugin_prefix = "wiki-plugin"
//! lookup_timeout_secs = 10
//! indent = 1
//! default_format = "json"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::collector::{Category, PLUGIN_PREFIX, SECURITY_PREFIX};
use crate::platform::config_dir;
use crate::resolver::DEFAULT_LOOKUP_TIMEOUT;

/// Application configuration.
///
/// # Example
///
/// ```no_run
/// use wiki_versions::Config;
///
/// // Load from file (or use defaults if file doesn't exist)
/// let config = Config::load().unwrap();
///
/// println!("Lookup timeout: {} seconds", config.lookup_timeout_secs);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Package whose `package.json` is looked up in `node_modules` before
    /// falling back to the working directory.
    ///
    /// Default: "wiki"
    pub root_package: String,

    /// Default: "wiki-server"
    pub server_package: String,

    /// Default: "wiki-client"
    pub client_package: String,

    /// Dependencies starting with this prefix are reported under `security`.
    ///
    /// Default: "wiki-security"
    pub security_prefix: String,

    /// Dependencies starting with this prefix are reported under `plugins`.
    ///
    /// Default: "wiki-plugin"
    pub plugin_prefix: String,

    /// Upper bound on a single package lookup, in seconds.
    ///
    /// Default: 10
    pub lookup_timeout_secs: u64,

    /// Spaces per indentation level in JSON output.
    ///
    /// Default: 1
    pub indent: usize,

    /// Output format when no `--format` flag is provided.
    ///
    /// Valid values: "json", "table"
    /// Default: "json"
    pub default_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_package: "wiki".to_string(),
            server_package: "wiki-server".to_string(),
            client_package: "wiki-client".to_string(),
            security_prefix: SECURITY_PREFIX.to_string(),
            plugin_prefix: PLUGIN_PREFIX.to_string(),
            lookup_timeout_secs: DEFAULT_LOOKUP_TIMEOUT.as_secs(),
            indent: 1,
            default_format: "json".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from the config file.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`, or defaults if it doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        Ok(config)
    }

    /// Saves the configuration to the config file.
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Returns the path to the configuration file.
    pub fn config_path() -> PathBuf {
        config_dir().join("config.toml")
    }

    /// Generates a string containing the default configuration.
    pub fn generate_default_config() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }

    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_secs(self.lookup_timeout_secs)
    }

    pub fn security_category(&self) -> Category {
        Category::new(&self.security_prefix)
    }

    pub fn plugin_category(&self) -> Category {
        Category::new(&self.plugin_prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert_eq!(config.root_package, "wiki");
        assert_eq!(config.server_package, "wiki-server");
        assert_eq!(config.client_package, "wiki-client");
        assert_eq!(config.lookup_timeout(), Duration::from_secs(10));
        assert_eq!(config.indent, 1);
        assert_eq!(config.default_format, "json");
        assert_eq!(config.security_category(), Category::security());
        assert_eq!(config.plugin_category(), Category::plugins());
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let temp = TempDir::new().unwrap();
        let config = Config::load_from(&temp.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_partial_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "lookup_timeout_secs = 3\nplugin_prefix = \"fedwiki-plugin\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.lookup_timeout_secs, 3);
        assert_eq!(config.plugin_category().prefix, "fedwiki-plugin");
        assert_eq!(config.security_prefix, "wiki-security");
    }

    #[test]
    fn test_load_invalid_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "indent = \"wide\"").unwrap();

        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_save_then_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.toml");

        let config = Config {
            indent: 2,
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_generate_default_config() {
        let text = Config::generate_default_config();
        assert!(text.contains("root_package = \"wiki\""));
        assert!(text.contains("lookup_timeout_secs = 10"));
    }
}
