use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::exam::SubmitFailurePolicy;

fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("examdesk")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// The single storage slot for the in-progress exam.
    pub path: PathBuf,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            path: data_dir().join("exam-cache.json"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub dir: PathBuf,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: data_dir().join("logs"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    pub submit: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { submit: 30 }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmitConfig {
    pub failure_policy: SubmitFailurePolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub cache: CacheConfig,
    pub outbox_path: PathBuf,
    pub log: LogConfig,
    pub timeouts: TimeoutConfig,
    pub submit: SubmitConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache: CacheConfig::default(),
            outbox_path: data_dir().join("outbox"),
            log: LogConfig::default(),
            timeouts: TimeoutConfig::default(),
            submit: SubmitConfig::default(),
        }
    }
}

impl Config {
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let path = config_path.unwrap_or_else(Self::default_config_path);

        if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn default_config_path() -> PathBuf {
        if let Some(config_path) = std::env::var_os("EXAMDESK_CONFIG") {
            PathBuf::from(config_path)
        } else {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("examdesk")
                .join("config.yaml")
        }
    }

    pub fn with_cache_path(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.cache.path = path;
        }
        self
    }

    pub fn with_outbox_path(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.outbox_path = path;
        }
        self
    }

    pub fn submit_timeout(&self) -> Duration {
        Duration::from_secs(self.timeouts.submit)
    }
}
