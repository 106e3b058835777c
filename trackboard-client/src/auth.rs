//! Session store accessor
//!
//! Performs the login round trip and owns the token/role lifecycle: created
//! on successful login, cleared on logout, read on every outgoing request.

use log::{debug, info, warn};
use std::sync::Arc;
use trackboard_core::{
    auth_error, ErrorContext, Navigator, PanelError, PanelResult, SessionStore, SESSION_ROLE_KEY,
    SESSION_TOKEN_KEY,
};

use crate::api::{create_http_client, types::LoginResponse, ApiClientConfig};

/// Login, logout, and session presence checks
pub struct AuthService {
    client: reqwest::Client,
    base_url: String,
    store: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
}

impl AuthService {
    /// Create a new auth service
    pub fn new(
        config: &ApiClientConfig,
        store: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> PanelResult<Self> {
        let client = create_http_client(config)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            store,
            navigator,
        })
    }

    /// Post credentials to the login endpoint and persist the session
    ///
    /// Credentials go as a form-encoded body. Any non-success status is a
    /// single generic authentication error; the client does not distinguish
    /// bad credentials from server failures. On success the returned token
    /// and role are persisted and the parsed body is returned.
    pub async fn login(&self, username: &str, password: &str) -> PanelResult<LoginResponse> {
        let url = format!("{}/login", self.base_url);
        debug!("Posting credentials to {}", url);

        let response = self
            .client
            .post(&url)
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .map_err(|e| PanelError::Api {
                message: format!("Failed to reach login endpoint: {}", e),
                status: None,
                source: Some(Box::new(e)),
                context: ErrorContext::new("auth")
                    .with_operation("login")
                    .with_metadata("url", &url)
                    .with_suggestion("Check that the panel server is reachable"),
            })?;

        if !response.status().is_success() {
            warn!("Login rejected with status {}", response.status());
            return Err(auth_error!("Login failed", "auth"));
        }

        let body: LoginResponse = response.json().await.map_err(|e| PanelError::Api {
            message: format!("Failed to parse login response: {}", e),
            status: None,
            source: Some(Box::new(e)),
            context: ErrorContext::new("auth").with_operation("login"),
        })?;

        self.store.set(SESSION_TOKEN_KEY, &body.access_token)?;
        self.store.set(SESSION_ROLE_KEY, &body.role)?;

        info!("Logged in with role {}", body.role);
        Ok(body)
    }

    /// Clear the persisted session and navigate to the login destination
    ///
    /// The server is not notified.
    pub fn logout(&self) -> PanelResult<()> {
        self.store.remove(SESSION_TOKEN_KEY)?;
        self.store.remove(SESSION_ROLE_KEY)?;
        self.navigator.to_login();
        info!("Logged out");
        Ok(())
    }

    /// Persisted token, `None` if never set
    pub fn token(&self) -> PanelResult<Option<String>> {
        self.store.get(SESSION_TOKEN_KEY)
    }

    /// Persisted role, `None` if never set
    pub fn role(&self) -> PanelResult<Option<String>> {
        self.store.get(SESSION_ROLE_KEY)
    }

    /// Navigate to the login destination when no token is persisted
    ///
    /// Presence only; the token is never validated for freshness. Returns
    /// whether a token was present.
    pub fn check(&self) -> PanelResult<bool> {
        match self.store.get(SESSION_TOKEN_KEY)? {
            Some(_) => Ok(true),
            None => {
                self.navigator.to_login();
                Ok(false)
            }
        }
    }
}
