//! Jukebox Bot
//!
//! Orchestration between a stateless chat channel and the music catalog.
//!
//! # Components
//!
//! - [`TokenLifecycle`]: owns the catalog OAuth credential and refreshes it
//!   behind a single critical section
//! - [`CatalogGateway`]: typed façade over search, playlist listing/creation
//!   and queue-add; caches the jukebox playlist for the process lifetime
//! - [`codec`]: versioned continuation payloads carried by interactive controls
//! - [`SearchPresenter`]: paginated search rendered as a bounded carousel
//! - [`EventRouter`]: classifies inbound events and dispatches workflows
//!
//! # Example
//!
//! ```ignore
//! use jukebox_bot::{CatalogGateway, EventRouter, TokenLifecycle};
//! use std::sync::Arc;
//!
//! let tokens = Arc::new(TokenLifecycle::new(catalog.clone()));
//! let gateway = Arc::new(CatalogGateway::new(catalog, tokens, "owner", "Jukebox"));
//! let router = EventRouter::new(gateway, messenger);
//!
//! for event in payload.into_events() {
//!     router.dispatch(event).await;
//! }
//! ```

pub mod codec;
mod gateway;
mod outbox;
mod presenter;
mod router;
mod tokens;

pub use codec::ContinuationPayload;
pub use gateway::{CatalogGateway, MAX_SEARCH_LIMIT, PLAYLIST_PAGE_SIZE};
pub use presenter::{
    Card, Carousel, PageWindow, SearchPresenter, DEFAULT_LIMIT, MAX_CARDS, UPSTREAM_PAGE_SIZE,
};
pub use router::{DispatchOutcome, EventRouter, QUEUED_CONFIRMATION, QUEUE_FAILED_MESSAGE};
pub use tokens::TokenLifecycle;

#[cfg(test)]
mod testing;
