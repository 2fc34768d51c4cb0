//! Jukebox Server Library
//!
//! Webhook server connecting a messaging page to the music catalog: the
//! webhook handshake and event intake, the OAuth redirect, and a health check.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod state;

// Re-export commonly used types for convenience
pub use api::create_router;
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use state::AppState;
