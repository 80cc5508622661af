//! Application configuration
//!
//! Configuration loaded from `.knews.toml`.

use serde::{Deserialize, Serialize};

/// Application configuration loaded from `.knews.toml`
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Action buffer tuning for every store
    #[serde(default)]
    pub store: StoreConfig,

    /// Paging of the top stories list
    #[serde(default)]
    pub repository: RepositoryConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Number of pending actions a store buffers
    #[serde(default = "default_buffer_capacity")]
    pub buffer_capacity: usize,

    /// What a full buffer does with a new action
    #[serde(default)]
    pub overflow: OverflowPolicy,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Evict the oldest pending action
    #[default]
    DropOldest,
    /// Make producers wait for room
    Suspend,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RepositoryConfig {
    /// Stories per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_buffer_capacity() -> usize {
    16
}

fn default_page_size() -> usize {
    5
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: default_buffer_capacity(),
            overflow: OverflowPolicy::default(),
        }
    }
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

impl AppConfig {
    /// Load config from CWD first, then home directory, or use defaults
    pub fn load() -> Self {
        if let Some(content) = crate::load_config_file() {
            match Self::parse(&content) {
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

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
