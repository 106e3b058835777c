//! Configuration management

use crate::error::{PanelError, PanelResult};
use crate::types::TrackboardConfig;

use std::path::Path;

impl Default for TrackboardConfig {
    fn default() -> Self {
        Self {
            server: crate::types::ServerConfig {
                base_url: "http://127.0.0.1:8000/api".to_string(),
                timeout_seconds: 30,
            },
            storage: crate::types::StorageConfig {
                data_dir: "~/.trackboard".to_string(),
            },
            logging: crate::logging::LoggingConfig::default(),
        }
    }
}

impl TrackboardConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> PanelResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| PanelError::Config {
            message: format!("Failed to read config file: {}", e),
            source: Some(Box::new(e)),
            context: crate::ErrorContext::new("config")
                .with_operation("read_file")
                .with_suggestion("Check if the config file exists and is readable"),
        })?;

        let config: TrackboardConfig =
            toml::from_str(&content).map_err(|e| PanelError::Config {
                message: format!("Failed to parse config: {}", e),
                source: Some(Box::new(e)),
                context: crate::ErrorContext::new("config")
                    .with_operation("parse_toml")
                    .with_suggestion("Check TOML syntax in config file"),
            })?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> PanelResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| PanelError::Config {
            message: format!("Failed to serialize config: {}", e),
            source: Some(Box::new(e)),
            context: crate::ErrorContext::new("config").with_operation("serialize_toml"),
        })?;

        std::fs::write(path, content).map_err(|e| PanelError::Config {
            message: format!("Failed to write config file: {}", e),
            source: Some(Box::new(e)),
            context: crate::ErrorContext::new("config")
                .with_operation("write_file")
                .with_suggestion("Check if the directory exists and is writable"),
        })?;

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> PanelResult<()> {
        if self.server.base_url.is_empty() {
            return Err(PanelError::Config {
                message: "Server base_url must not be empty".to_string(),
                source: None,
                context: crate::ErrorContext::new("config")
                    .with_operation("validate")
                    .with_suggestion("Set server.base_url to the panel API address"),
            });
        }

        if self.server.timeout_seconds == 0 {
            return Err(PanelError::Config {
                message: "Server timeout_seconds must be greater than 0".to_string(),
                source: None,
                context: crate::ErrorContext::new("config")
                    .with_operation("validate")
                    .with_suggestion("Set server.timeout_seconds to a positive value"),
            });
        }

        if self.storage.data_dir.is_empty() {
            return Err(PanelError::Config {
                message: "Storage data_dir must not be empty".to_string(),
                source: None,
                context: crate::ErrorContext::new("config")
                    .with_operation("validate")
                    .with_suggestion("Set storage.data_dir to a writable directory"),
            });
        }

        Ok(())
    }
}
