//! Catalog Client
//!
//! HTTP client for the music catalog Web API (search, playlists) and its
//! accounts service (OAuth authorization code and refresh grants).
//!
//! # Features
//!
//! - **Accounts**: authorize URL, code exchange, token refresh
//! - **Search**: paged track search
//! - **Playlists**: list, create, append tracks
//!
//! [`CatalogClient`] implements [`jukebox_core::CatalogApi`], so it can be
//! handed straight to the bot's token lifecycle and gateway.
//!
//! # Example
//!
//! ```ignore
//! use catalog_client::{CatalogClient, CatalogConfig, DEFAULT_SCOPES};
//!
//! let config = CatalogConfig::new("client-id", "client-secret", "https://bot.example/spotify");
//! let client = CatalogClient::new(config)?;
//!
//! println!("Authorize at {}", client.authorize_url(DEFAULT_SCOPES, None)?);
//!
//! let grant = client.accounts().exchange_code("code-from-redirect").await?;
//! let tracks = client.search(&grant.access_token).tracks("daft punk", 0, 20).await?;
//! ```

mod accounts;
mod client;
mod error;
mod playlists;
mod search;
mod types;

pub use client::CatalogClient;
pub use error::{CatalogClientError, Result};
pub use types::{CatalogConfig, DEFAULT_ACCOUNTS_URL, DEFAULT_API_URL, DEFAULT_SCOPES};

pub use accounts::AccountsClient;
pub use playlists::PlaylistClient;
pub use search::SearchClient;
