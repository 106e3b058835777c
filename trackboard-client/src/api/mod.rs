//! HTTP API client for the trackboard panel
//!
//! All typed endpoint methods funnel through [`PanelApiClient::request`],
//! which injects the bearer token and handles the single failure case of a
//! rejected session.

use serde::Serialize;
use std::collections::HashMap;
use trackboard_core::{ErrorContext, PanelError, PanelResult, ServerConfig};

pub mod admin;
pub mod client;
pub mod employee;
pub mod types;


pub use client::PanelApiClient;
pub use types::*;

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL for the panel API, including the path prefix
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string
    pub user_agent: String,
    /// Additional headers sent with every request
    pub headers: HashMap<String, String>,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout_seconds: 30,
            user_agent: "trackboard/1.0".to_string(),
            headers: HashMap::new(),
        }
    }
}

impl ApiClientConfig {
    /// Create a configuration for the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Create a configuration from server settings
    pub fn from_server(server: &ServerConfig) -> Self {
        Self {
            base_url: server.base_url.clone(),
            timeout_seconds: server.timeout_seconds,
            ..Default::default()
        }
    }

    /// Set additional header
    pub fn with_header(mut self, key: String, value: String) -> Self {
        self.headers.insert(key, value);
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }
}

/// Per-request options merged into the outgoing request
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// JSON body, serialized as-is
    pub body: Option<serde_json::Value>,
    /// Extra headers; the bearer authorization header wins over these
    pub headers: HashMap<String, String>,
    /// Query string pairs
    pub query: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a JSON body
    pub fn with_json<T: Serialize>(body: &T) -> PanelResult<Self> {
        Ok(Self {
            body: Some(serde_json::to_value(body)?),
            ..Default::default()
        })
    }

    /// Add a header
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Add a query pair
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }
}

/// Helper function to create HTTP client with common configuration
pub(crate) fn create_http_client(config: &ApiClientConfig) -> PanelResult<reqwest::Client> {
    let mut headers = reqwest::header::HeaderMap::new();

    headers.insert(
        reqwest::header::USER_AGENT,
        reqwest::header::HeaderValue::from_str(&config.user_agent).map_err(|e| {
            PanelError::Api {
                message: format!("Invalid user agent: {}", e),
                status: None,
                source: Some(Box::new(e)),
                context: ErrorContext::new("http_client").with_operation("create_client"),
            }
        })?,
    );

    for (key, value) in &config.headers {
        let header_name =
            reqwest::header::HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
                PanelError::Api {
                    message: format!("Invalid header name '{}': {}", key, e),
                    status: None,
                    source: Some(Box::new(e)),
                    context: ErrorContext::new("http_client").with_operation("create_client"),
                }
            })?;

        let header_value =
            reqwest::header::HeaderValue::from_str(value).map_err(|e| PanelError::Api {
                message: format!("Invalid header value for '{}': {}", key, e),
                status: None,
                source: Some(Box::new(e)),
                context: ErrorContext::new("http_client").with_operation("create_client"),
            })?;

        headers.insert(header_name, header_value);
    }

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(config.timeout_seconds))
        .default_headers(headers)
        .build()
        .map_err(|e| PanelError::Api {
            message: format!("Failed to create HTTP client: {}", e),
            status: None,
            source: Some(Box::new(e)),
            context: ErrorContext::new("http_client").with_operation("create_client"),
        })?;

    Ok(client)
}

/// Helper function to turn a non-success response into an API error
pub(crate) async fn handle_response_error(
    response: reqwest::Response,
    component: &str,
) -> PanelError {
    let status = response.status();
    let url = response.url().clone();

    let error_body = response.text().await.unwrap_or_default();
    let snippet: String = error_body.chars().take(200).collect();

    PanelError::Api {
        message: format!("Request to {} failed with status {}: {}", url, status, snippet),
        status: Some(status.as_u16()),
        source: None,
        context: ErrorContext::new(component)
            .with_operation("http_request")
            .with_metadata("status", status.as_str())
            .with_metadata("url", url.as_str()),
    }
}
