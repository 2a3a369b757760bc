//! Configuration management for the delivery list generator.
//!
//! This module handles loading and parsing configuration from TOML files.
//! Every setting has a default, so running without a config file targets
//! Qiuwen Baike with the stock subscriber list header.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Header markup written to the `description` field of the delivery list.
pub const DEFAULT_DESCRIPTION: &str = "{{DISPLAYTITLE|《求闻》订阅列表}}{{/header}}[[Category:《求闻》]]<!-- \n请各位将自己的用户讨论页/接收页面放在页面的最下方，另起一行，谢谢！--><!-- \n請各位將自己的用戶討論頁/接收頁面放在頁面的最下方，另起一行，謝謝！-->";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Wiki API settings
    #[serde(default)]
    pub wiki: WikiConfig,

    /// Delivery list settings
    #[serde(default)]
    pub delivery: DeliveryConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log directory path
    pub log_dir: String,

    /// Default log level (trace, debug, info, warn, error)
    pub default_level: String,

    /// Enable console output
    pub console: bool,

    /// Enable file output
    pub file: bool,

    /// Enable JSON formatting for file logs
    pub json_format: bool,
}

/// Wiki API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WikiConfig {
    /// Full URL of the wiki's `api.php`
    pub api_url: String,

    /// Client name and version, first part of the User-Agent
    pub client_name: String,

    /// Operator contact embedded in the User-Agent
    pub contact: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Minimum spacing between user list page requests in milliseconds
    pub page_delay_ms: u64,
}

/// Delivery list configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryConfig {
    /// Opt-out category, including the `Category:` prefix
    pub exclude_category: String,

    /// Namespace the opt-out category members are taken from
    pub category_namespace: u32,

    /// Group excluded server-side and re-checked per user
    pub bot_group: String,

    /// Output file path
    pub output_path: String,

    /// Wiki markup written as the list description
    pub description: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: "logs".to_string(),
            default_level: "info".to_string(),
            console: true,
            file: false,
            json_format: false,
        }
    }
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            api_url: "https://www.qiuwenbaike.cn/w/api.php".to_string(),
            client_name: "Qiuwen/1.1 QiuwenMassMessageGenerator/1.2".to_string(),
            contact: "mailto:zorua@vip.qq.com".to_string(),
            timeout_secs: 30,
            page_delay_ms: 200,
        }
    }
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            exclude_category: "Category:求闻百科维护脚本".to_string(),
            category_namespace: 2,
            bot_group: "bot".to_string(),
            output_path: "massmessage_list.json".to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
        }
    }
}

/// Where a loaded configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Parsed from the file at this path
    File(PathBuf),
    /// The file at this path did not exist, defaults were used
    Defaults(PathBuf),
}

impl Config {
    /// Load configuration from a TOML file, reporting where it came from
    ///
    /// Does not log, so it can run before logging is initialized.
    pub fn load(path: impl AsRef<Path>) -> Result<(Self, ConfigSource)> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok((Self::default(), ConfigSource::Defaults(path.to_path_buf())));
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok((config, ConfigSource::File(path.to_path_buf())))
    }

    /// Load configuration from a TOML file
    ///
    /// If the file doesn't exist, returns the default configuration.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let (config, source) = Self::load(path)?;
        source.log();
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content = toml::to_string_pretty(self)
            .context("Failed to serialize configuration")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        tracing::info!(
            path = %path.display(),
            "Configuration saved successfully"
        );

        Ok(())
    }

    /// User-Agent sent with every API request
    ///
    /// Follows the `<client>/<version> (<contact>) <library>/<version>` shape
    /// the Wikimedia User-Agent policy asks for; `product` is the trailing
    /// `<library>/<version>` token.
    pub fn user_agent(&self, product: &str) -> String {
        format!("{} ({}) {}", self.wiki.client_name, self.wiki.contact, product)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.wiki.timeout_secs)
    }

    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.wiki.page_delay_ms)
    }

    /// Get the path for the log directory
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.logging.log_dir)
    }

    /// Get the path for the delivery list file
    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(&self.delivery.output_path)
    }
}

impl ConfigSource {
    /// Report the source through the current tracing subscriber
    pub fn log(&self) {
        match self {
            ConfigSource::File(path) => tracing::info!(
                path = %path.display(),
                "Configuration loaded successfully"
            ),
            ConfigSource::Defaults(path) => tracing::warn!(
                path = %path.display(),
                "Config file not found, using defaults"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.wiki.api_url, "https://www.qiuwenbaike.cn/w/api.php");
        assert_eq!(config.delivery.exclude_category, "Category:求闻百科维护脚本");
        assert_eq!(config.delivery.category_namespace, 2);
        assert_eq!(config.delivery.bot_group, "bot");
        assert_eq!(config.page_delay(), Duration::from_millis(200));
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_user_agent_contains_contact() {
        let ua = Config::default().user_agent("massmessage-list/0.1.0");
        assert_eq!(
            ua,
            "Qiuwen/1.1 QiuwenMassMessageGenerator/1.2 (mailto:zorua@vip.qq.com) massmessage-list/0.1.0"
        );
    }

    #[test]
    fn test_save_and_load_config() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");

        let mut original_config = Config::default();
        original_config.wiki.page_delay_ms = 0;
        original_config.save(&config_path)?;

        assert!(config_path.exists());

        let loaded_config = Config::from_file(&config_path)?;
        assert_eq!(loaded_config.wiki.page_delay_ms, 0);
        assert_eq!(
            loaded_config.delivery.description,
            original_config.delivery.description
        );

        Ok(())
    }

    #[test]
    fn test_partial_config_uses_section_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_path,
            "[delivery]\nexclude_category = \"Category:Opt-out\"\ncategory_namespace = 2\nbot_group = \"bot\"\noutput_path = \"out.json\"\ndescription = \"list\"\n",
        )?;

        let config = Config::from_file(&config_path)?;
        assert_eq!(config.delivery.exclude_category, "Category:Opt-out");
        assert_eq!(config.output_path(), PathBuf::from("out.json"));
        assert_eq!(config.wiki.timeout_secs, 30);

        Ok(())
    }

    #[test]
    fn test_load_reports_source() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let missing = temp_dir.path().join("missing.toml");

        let (config, source) = Config::load(&missing)?;
        assert_eq!(source, ConfigSource::Defaults(missing));
        assert_eq!(config.delivery.bot_group, "bot");

        let present = temp_dir.path().join("config.toml");
        Config::default().save(&present)?;
        let (_, source) = Config::load(&present)?;
        assert_eq!(source, ConfigSource::File(present));

        Ok(())
    }

    #[test]
    fn test_log_dir_follows_logging_section() {
        let mut config = Config::default();
        assert_eq!(config.log_dir(), PathBuf::from("logs"));

        config.logging.log_dir = "/var/log/massmessage".to_string();
        assert_eq!(config.log_dir(), PathBuf::from("/var/log/massmessage"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.delivery.output_path, "massmessage_list.json");
    }
}
