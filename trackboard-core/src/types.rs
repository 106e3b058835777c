//! Core data structures shared across the trackboard crates

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

/// Top-level configuration for the trackboard client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackboardConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

/// Panel server connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the panel API, including the path prefix
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

/// Local storage settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the persisted session file
    pub data_dir: String,
}
