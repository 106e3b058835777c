//! Trackboard Client - typed SDK for the trackboard panel service
//!
//! Wraps the panel's HTTP API with a session-aware client: credentials go to
//! the login endpoint, the returned token and role are persisted in a
//! pluggable session store, and every subsequent request carries the token as
//! a bearer header. A rejected session clears local state and fires the
//! injected navigation capability.

pub mod api;
pub mod auth;
pub mod navigate;
pub mod session;

pub use api::{ApiClientConfig, PanelApiClient, RequestOptions};
pub use auth::AuthService;
pub use navigate::NoopNavigator;
pub use session::{FileSessionStore, MemorySessionStore};
