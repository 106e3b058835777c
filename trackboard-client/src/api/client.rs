//! Session-aware request wrapper

use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use trackboard_core::{
    ErrorContext, Navigator, PanelError, PanelResult, SessionStore, SESSION_ROLE_KEY,
    SESSION_TOKEN_KEY,
};

use super::{create_http_client, handle_response_error, ApiClientConfig, RequestOptions};

/// HTTP client for the panel API
///
/// Reads the persisted token at call time, so a login or logout between two
/// requests is picked up without rebuilding the client.
pub struct PanelApiClient {
    client: reqwest::Client,
    config: ApiClientConfig,
    store: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
}

impl PanelApiClient {
    /// Create a new panel API client
    pub fn new(
        config: ApiClientConfig,
        store: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> PanelResult<Self> {
        let client = create_http_client(&config)?;

        debug!("Created panel API client for {}", config.base_url);

        Ok(Self {
            client,
            config,
            store,
            navigator,
        })
    }

    /// Issue a request against `{base}{endpoint}`
    ///
    /// Header precedence: JSON content type first, then caller-supplied
    /// headers, then the bearer authorization header when a token is
    /// persisted. A 401 response clears the session and fires the navigator,
    /// but the response is still returned un-thrown so callers can check the
    /// status themselves.
    pub async fn request(
        &self,
        method: Method,
        endpoint: &str,
        options: RequestOptions,
    ) -> PanelResult<reqwest::Response> {
        let url = format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        );

        debug!("Making panel API request: {} {}", method, url);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        for (key, value) in &options.headers {
            let name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| PanelError::Api {
                message: format!("Invalid header name '{}': {}", key, e),
                status: None,
                source: Some(Box::new(e)),
                context: ErrorContext::new("panel_api").with_operation("request"),
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| PanelError::Api {
                message: format!("Invalid header value for '{}': {}", key, e),
                status: None,
                source: Some(Box::new(e)),
                context: ErrorContext::new("panel_api").with_operation("request"),
            })?;
            headers.insert(name, value);
        }

        if let Some(token) = self.store.get(SESSION_TOKEN_KEY)? {
            let auth_value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|e| {
                PanelError::Session {
                    message: format!("Persisted token is not a valid header value: {}", e),
                    source: Some(Box::new(e)),
                    context: ErrorContext::new("panel_api")
                        .with_operation("request")
                        .with_suggestion("Log in again to replace the stored token"),
                }
            })?;
            headers.insert(AUTHORIZATION, auth_value);
        }

        let mut builder = self.client.request(method, &url).headers(headers);

        if !options.query.is_empty() {
            builder = builder.query(&options.query);
        }

        if let Some(body) = &options.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| PanelError::Api {
            message: format!("Failed to reach panel API: {}", e),
            status: None,
            source: Some(Box::new(e)),
            context: ErrorContext::new("panel_api")
                .with_operation("request")
                .with_metadata("url", &url),
        })?;

        if response.status() == StatusCode::UNAUTHORIZED {
            warn!("Panel rejected session on {}, clearing local session", url);
            self.store.remove(SESSION_TOKEN_KEY)?;
            self.store.remove(SESSION_ROLE_KEY)?;
            self.navigator.to_login();
        }

        Ok(response)
    }

    /// GET an endpoint and decode the JSON body
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> PanelResult<T> {
        self.send_json(Method::GET, endpoint, RequestOptions::new())
            .await
    }

    /// Issue a request and decode the JSON body
    ///
    /// A 401 surfaces as an authentication error after the session has
    /// already been cleared by [`Self::request`]. Any other non-success
    /// status becomes an API error carrying the status and a body snippet.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        options: RequestOptions,
    ) -> PanelResult<T> {
        let response = self.request(method, endpoint, options).await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(PanelError::Auth {
                message: "Session expired or invalid".to_string(),
                context: ErrorContext::new("panel_api")
                    .with_operation("send_json")
                    .with_metadata("endpoint", endpoint)
                    .with_suggestion("Run 'trackboard login' to start a new session"),
            });
        }

        if !response.status().is_success() {
            return Err(handle_response_error(response, "panel_api").await);
        }

        response.json().await.map_err(|e| PanelError::Api {
            message: format!("Failed to parse panel response: {}", e),
            status: None,
            source: Some(Box::new(e)),
            context: ErrorContext::new("panel_api")
                .with_operation("send_json")
                .with_metadata("endpoint", endpoint),
        })
    }
}
