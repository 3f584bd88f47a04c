//! Application configuration
//!
//! Configuration loaded from `.unistore-counter.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const CONFIG_FILE: &str = ".unistore-counter.toml";

/// Application configuration loaded from .unistore-counter.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Value handed to the reducer's initialization call
    #[serde(default)]
    pub initial_value: i64,

    /// Delay before an `async` increment is dispatched
    #[serde(default = "default_async_delay_ms")]
    pub async_delay_ms: u64,

    /// Log every dispatched action
    #[serde(default = "default_log_actions")]
    pub log_actions: bool,
}

fn default_async_delay_ms() -> u64 {
    1000
}

fn default_log_actions() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            initial_value: 0,
            async_delay_ms: default_async_delay_ms(),
            log_actions: default_log_actions(),
        }
    }
}

impl AppConfig {
    /// Load config from CWD first, then home directory, or use defaults
    pub fn load() -> Self {
        if let Some(content) = load_config_file() {
            match toml::from_str(&content) {
                Ok(config) => {
                    log::info!("Loaded app config from file");
                    return config;
                }
                Err(e) => {
                    log::warn!("Failed to parse config file: {}", e);
                }
            }
        }

        log::debug!("Using default app config");
        Self::default()
    }
}

/// Load config file content from CWD first, then home directory
fn load_config_file() -> Option<String> {
    if let Ok(content) = std::fs::read_to_string(CONFIG_FILE) {
        log::debug!("Loaded config from {}", CONFIG_FILE);
        return Some(content);
    }

    let home_config = home_config_path()?;
    match std::fs::read_to_string(&home_config) {
        Ok(content) => {
            log::debug!("Loaded config from {}", home_config.display());
            Some(content)
        }
        Err(_) => None,
    }
}

fn home_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_FILE))
}
