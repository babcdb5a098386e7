//! Configuration management for habitlog.
//!
//! This module handles loading and saving configuration from `~/.habitlog/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{ColorSetting, Config, GeneralConfig, LoggingConfig, StorageConfig};
