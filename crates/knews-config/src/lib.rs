//! Configuration for knews
//!
//! This crate provides:
//! - Configuration file lookup (`.knews.toml` in CWD, then home)
//! - Application configuration (AppConfig) with store and repository tuning

pub mod app_config;
pub mod config_file;

pub use app_config::{AppConfig, OverflowPolicy, RepositoryConfig, StoreConfig};
pub use config_file::load_config_file;
