//! Trackboard Core - Core data structures and trait definitions
//!
//! This module defines the core abstractions and data structures for the trackboard client

pub mod config;
pub mod error;
pub mod logging;
pub mod traits;
pub mod types;

pub use config::*;
pub use error::*;
pub use logging::*;
pub use traits::*;
pub use types::*;

// Re-export commonly used external types
pub use tokio;
pub use tracing;
