// ⚙️ Configuration
// Optional TOML file; every key has a default so a missing file is fine

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_LINK_URL: &str = "https://github.com/SPRHackz";
pub const CONFIG_ENV: &str = "BMI_CALCULATOR_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Opened by the footer link
    pub link_url: String,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// No file means no logging in the interactive UI
    pub file: Option<PathBuf>,
    /// `EnvFilter` directive, `RUST_LOG` wins when set
    pub filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            link_url: DEFAULT_LINK_URL.to_string(),
            log: LogConfig::default(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            file: None,
            filter: "info".to_string(),
        }
    }
}

impl Config {
    /// `$BMI_CALCULATOR_CONFIG`, else `<config_dir>/bmi-calculator/config.toml`
    pub fn config_path() -> PathBuf {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return PathBuf::from(path);
        }
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("bmi-calculator").join("config.toml")
    }

    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();

        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
            path: path.clone(),
            source: e,
        })?;

        toml::from_str::<Config>(&content)
            .map_err(|e| ConfigError::ParseError { path, source: e })
            .and_then(|config| {
                config.validate()?;
                Ok(config)
            })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|e| ConfigError::ParseError {
            path: PathBuf::from("<inline>"),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.link_url.starts_with("https://") || self.link_url.starts_with("http://")) {
            return Err(ConfigError::ValidationError {
                message: format!("link_url must be an http(s) URL, got '{}'", self.link_url),
            });
        }

        if self.log.filter.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "log.filter must not be empty".to_string(),
            });
        }

        Ok(())
    }
}
