//! Messenger Client
//!
//! HTTP client for the messaging platform's Send API: sender actions
//! (typing indicator, mark seen) and messages (text, generic templates,
//! quick replies).
//!
//! [`MessengerClient`] implements [`jukebox_core::MessagingTransport`].
//!
//! # Example
//!
//! ```ignore
//! use jukebox_core::{OutboundMessage, SenderAction, SenderId};
//! use messenger_client::{MessengerClient, MessengerConfig};
//!
//! let client = MessengerClient::new(MessengerConfig::new("page-access-token"))?;
//! let user = SenderId::new("1254459154682919");
//!
//! client.action(&user, SenderAction::TypingOn).await?;
//! client.message(&user, &OutboundMessage::text("hello")).await?;
//! ```

mod client;
mod error;
mod types;

pub use client::MessengerClient;
pub use error::{MessengerClientError, Result};
pub use types::{MessengerConfig, DEFAULT_API_VERSION, DEFAULT_GRAPH_URL};
