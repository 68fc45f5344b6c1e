use crate::paths;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Seconds between automatic panel refreshes
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Directory holding UCI package files (defaults to /etc/config)
    #[serde(default = "default_uci_config_dir")]
    pub uci_config_dir: String,

    /// tail binary used to read the log file
    #[serde(default = "default_tail_bin")]
    pub tail_bin: String,

    /// logread binary used to query the system log
    #[serde(default = "default_logread_bin")]
    pub logread_bin: String,

    /// Tag passed to `logread -e` to filter syslog entries
    #[serde(default = "default_syslog_tag")]
    pub syslog_tag: String,
}

fn default_poll_interval_secs() -> u64 {
    5
}

fn default_uci_config_dir() -> String {
    "/etc/config".to_string()
}

fn default_tail_bin() -> String {
    "/usr/bin/tail".to_string()
}

fn default_logread_bin() -> String {
    "/sbin/logread".to_string()
}

fn default_syslog_tag() -> String {
    "aria2".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
            uci_config_dir: default_uci_config_dir(),
            tail_bin: default_tail_bin(),
            logread_bin: default_logread_bin(),
            syslog_tag: default_syslog_tag(),
        }
    }
}

impl Config {
    /// Load config from file, or return default if file doesn't exist.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Save config to file.
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_file_path()?;
        paths::ensure_config_dir()?;

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(&config_path, contents)
            .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

        Ok(())
    }

    /// Get the config file path.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(paths::config_dir()?.join("config.toml"))
    }

    /// UCI config directory with ~ expanded.
    pub fn uci_config_dir(&self) -> PathBuf {
        paths::expand_tilde(&self.uci_config_dir)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.poll_interval_secs == 0 {
            anyhow::bail!("poll_interval_secs must be at least 1");
        }

        let uci_dir = self.uci_config_dir();
        if !uci_dir.is_dir() {
            anyhow::bail!(
                "UCI config directory does not exist: {}",
                uci_dir.display()
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.poll_interval_secs, 5);
        assert_eq!(config.uci_config_dir, "/etc/config");
        assert_eq!(config.tail_bin, "/usr/bin/tail");
        assert_eq!(config.logread_bin, "/sbin/logread");
        assert_eq!(config.syslog_tag, "aria2");
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("poll_interval_secs"));
        assert!(toml_str.contains("/etc/config"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
poll_interval_secs = 10
syslog_tag = "aria2c"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.poll_interval_secs, 10);
        assert_eq!(config.syslog_tag, "aria2c");
        // Unset fields keep their defaults
        assert_eq!(config.tail_bin, "/usr/bin/tail");
    }

    #[test]
    fn test_validate_rejects_zero_interval() {
        let config = Config {
            poll_interval_secs: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_missing_uci_dir() {
        let config = Config {
            uci_config_dir: "/nonexistent/uci/dir".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
