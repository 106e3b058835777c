//! Unified error handling system
//!
//! Provides structured error types with context, recovery suggestions, and proper error chaining

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

pub type PanelResult<T> = Result<T, PanelError>;

/// Error context providing additional information for debugging and recovery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Unique error ID for tracking
    pub error_id: String,
    /// Timestamp when error occurred
    pub timestamp: DateTime<Utc>,
    /// Component where error originated
    pub component: String,
    /// Operation being performed when error occurred
    pub operation: Option<String>,
    /// Additional metadata
    pub metadata: std::collections::HashMap<String, String>,
    /// Recovery suggestions
    pub recovery_suggestions: Vec<String>,
}

impl ErrorContext {
    pub fn new(component: &str) -> Self {
        Self {
            error_id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            component: component.to_string(),
            operation: None,
            metadata: std::collections::HashMap::new(),
            recovery_suggestions: Vec::new(),
        }
    }

    pub fn with_operation(mut self, operation: &str) -> Self {
        self.operation = Some(operation.to_string());
        self
    }

    pub fn with_metadata(mut self, key: &str, value: &str) -> Self {
        self.metadata.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_suggestion(mut self, suggestion: &str) -> Self {
        self.recovery_suggestions.push(suggestion.to_string());
        self
    }
}

/// Main error type for the trackboard client
#[derive(Error, Debug)]
pub enum PanelError {
    #[error("Authentication error: {message}")]
    Auth {
        message: String,
        context: ErrorContext,
    },

    #[error("API error: {message}")]
    Api {
        message: String,
        status: Option<u16>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        context: ErrorContext,
    },

    #[error("Session store error: {message}")]
    Session {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        context: ErrorContext,
    },

    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        context: ErrorContext,
    },

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
        context: ErrorContext,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PanelError {
    /// Get the error context
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            PanelError::Auth { context, .. } => Some(context),
            PanelError::Api { context, .. } => Some(context),
            PanelError::Session { context, .. } => Some(context),
            PanelError::Config { context, .. } => Some(context),
            PanelError::Validation { context, .. } => Some(context),
            _ => None,
        }
    }

    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            PanelError::Api { status, .. } => *status,
            _ => None,
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            PanelError::Config { .. } | PanelError::Validation { .. } => {
                error!(
                    error_id = ?self.context().map(|c| &c.error_id),
                    error = %self,
                    "Configuration or validation error"
                );
            }
            PanelError::Auth { .. } => {
                warn!(
                    error_id = ?self.context().map(|c| &c.error_id),
                    error = %self,
                    "Authentication error"
                );
            }
            _ => {
                error!(
                    error_id = ?self.context().map(|c| &c.error_id),
                    error = %self,
                    "Error occurred"
                );
            }
        }
    }
}

/// Convenience macros for creating errors with context
#[macro_export]
macro_rules! auth_error {
    ($msg:expr, $component:expr) => {
        PanelError::Auth {
            message: $msg.to_string(),
            context: ErrorContext::new($component)
                .with_suggestion("Check your credentials")
                .with_suggestion("Run 'trackboard login' to start a new session"),
        }
    };
}

#[macro_export]
macro_rules! config_error {
    ($msg:expr, $component:expr) => {
        PanelError::Config {
            message: $msg.to_string(),
            source: None,
            context: ErrorContext::new($component)
                .with_suggestion("Check your configuration file")
                .with_suggestion("Run 'trackboard config init' to create default config"),
        }
    };
}

#[macro_export]
macro_rules! validation_error {
    ($msg:expr, $field:expr, $component:expr) => {
        PanelError::Validation {
            message: $msg.to_string(),
            field: Some($field.to_string()),
            context: ErrorContext::new($component)
                .with_suggestion("Check the field value and format"),
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_context_builder_accumulates() {
        let ctx = ErrorContext::new("auth")
            .with_operation("login")
            .with_metadata("username", "ayse")
            .with_suggestion("Check your credentials");

        assert_eq!(ctx.component, "auth");
        assert_eq!(ctx.operation.as_deref(), Some("login"));
        assert_eq!(ctx.metadata.get("username").map(String::as_str), Some("ayse"));
        assert_eq!(ctx.recovery_suggestions.len(), 1);
        assert!(!ctx.error_id.is_empty());
    }

    #[test]
    fn api_error_carries_status() {
        let err = PanelError::Api {
            message: "server rejected request".to_string(),
            status: Some(500),
            source: None,
            context: ErrorContext::new("api"),
        };
        assert_eq!(err.status(), Some(500));
        assert!(err.context().is_some());
    }

    #[test]
    fn io_error_has_no_context() {
        let err = PanelError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(err.context().is_none());
        assert_eq!(err.status(), None);
    }

    #[test]
    fn auth_error_macro_attaches_suggestions() {
        let err = crate::auth_error!("Login failed", "auth");
        match &err {
            PanelError::Auth { message, context } => {
                assert_eq!(message, "Login failed");
                assert_eq!(context.component, "auth");
                assert!(!context.recovery_suggestions.is_empty());
            }
            other => panic!("unexpected variant: {:?}", other),
        }
    }

    #[test]
    fn config_error_macro_has_no_source() {
        let err = crate::config_error!("missing config dir", "cli");
        match &err {
            PanelError::Config {
                source, context, ..
            } => {
                assert!(source.is_none());
                assert_eq!(context.component, "cli");
            }
            other => panic!("unexpected variant: {:?}", other),
        }
    }

    #[test]
    fn validation_error_macro_names_the_field() {
        let err = crate::validation_error!("Invalid date: 2026-13-01", "start", "cli");
        match &err {
            PanelError::Validation { field, .. } => {
                assert_eq!(field.as_deref(), Some("start"));
            }
            other => panic!("unexpected variant: {:?}", other),
        }
    }
}
