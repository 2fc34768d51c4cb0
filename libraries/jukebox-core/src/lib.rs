//! Jukebox Core
//!
//! Domain types, capability traits, and error handling shared by every crate
//! of the jukebox bot.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `SearchResult`, `PlaylistRef`, `Credential`, etc.
//! - **Messaging Types**: the inbound webhook shapes, decoded once into
//!   [`InboundEvent`], and the outbound [`OutboundMessage`] / [`SenderAction`]
//! - **Capability Traits**: [`CatalogApi`] and [`MessagingTransport`], implemented
//!   by the HTTP client crates and by test fakes
//! - **Error Handling**: unified `JukeboxError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use jukebox_core::types::{Credential, Grant};
//! use chrono::Utc;
//!
//! let grant = Grant {
//!     access_token: "access".to_string(),
//!     refresh_token: Some("refresh".to_string()),
//!     expires_in: 3600,
//! };
//! let credential = Credential::from_grant(grant, None, Utc::now());
//! assert!(credential.is_valid_at(Utc::now()));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod messaging;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{JukeboxError, Result};
pub use messaging::{
    Attachment, Button, Element, InboundEvent, OutboundMessage, QuickReply, ReplySource,
    SenderAction, Template, WebhookPayload,
};
pub use traits::{CatalogApi, MessagingTransport};
pub use types::{
    Album, Artist, Credential, Grant, Image, PlaylistId, PlaylistPage, PlaylistRef, SearchResult,
    SenderId, Track, TrackId,
};
