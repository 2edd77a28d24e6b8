// ABOUTME: Persistent application configuration for mechta
// Loaded from ~/.mechta/config.toml with env-variable overrides

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const DEFAULT_API_URL: &str = "https://api.mechtaai.ru";
const API_URL_ENV: &str = "MECHTA_API_URL";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the MechtaAI API
    #[serde(default = "default_api_url")]
    pub api_base_url: String,

    /// Page size used by the history viewer
    #[serde(default = "default_page_size")]
    pub history_page_size: u32,

    /// How often the QR login status is polled, in seconds
    #[serde(default = "default_login_poll_secs")]
    pub login_poll_interval_secs: u64,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_page_size() -> u32 {
    20
}

fn default_login_poll_secs() -> u64 {
    2
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_url(),
            history_page_size: default_page_size(),
            login_poll_interval_secs: default_login_poll_secs(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the user config file, applying env overrides.
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Ok(path) if path.exists() => {
                let content = fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read config from {}", path.display()))?;
                toml::from_str(&content)
                    .with_context(|| format!("Failed to parse config from {}", path.display()))?
            }
            _ => Self::default(),
        };

        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                config.api_base_url = url;
            }
        }

        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("config.toml"))
    }

    /// Directory holding config, session, and logs (~/.mechta)
    pub fn data_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".mechta"))
    }
}
