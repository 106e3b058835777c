//! Core trait definitions

use crate::error::PanelResult;

/// Storage key for the bearer token
pub const SESSION_TOKEN_KEY: &str = "token";
/// Storage key for the user role
pub const SESSION_ROLE_KEY: &str = "role";

/// Persistent key-value store for session state
///
/// Keys are global strings, not namespaced. The token and role entries are
/// independent: either may exist without the other, and nothing enforces
/// pairing between them.
pub trait SessionStore: Send + Sync {
    /// Read a value, `None` if never set
    fn get(&self, key: &str) -> PanelResult<Option<String>>;

    /// Write a value, overwriting any previous one
    fn set(&self, key: &str, value: &str) -> PanelResult<()>;

    /// Remove a value; removing a missing key is a no-op
    fn remove(&self, key: &str) -> PanelResult<()>;

    /// Remove all values
    fn clear(&self) -> PanelResult<()>;
}

/// Navigation capability invoked when the session is missing or rejected
///
/// The original panel frontend redirected the browser to its login page;
/// embedders inject whatever "go to login" means in their context.
pub trait Navigator: Send + Sync {
    fn to_login(&self);
}
