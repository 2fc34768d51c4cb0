/// Capability traits for the two remote services
use crate::error::Result;
use crate::messaging::{OutboundMessage, SenderAction};
use crate::types::{Grant, PlaylistId, PlaylistPage, PlaylistRef, SearchResult, SenderId, TrackId};
use async_trait::async_trait;

/// Music catalog Web API.
///
/// Implementers perform one HTTP exchange per call and never retry. Calls that
/// act on the account take the bearer token explicitly; token bookkeeping is
/// the caller's job.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Search tracks matching `query`
    ///
    /// # Arguments
    /// * `offset` - Index of the first result
    /// * `limit` - Page size, 1 to 50
    async fn search_tracks(
        &self,
        access_token: &str,
        query: &str,
        offset: u32,
        limit: u32,
    ) -> Result<SearchResult>;

    /// One page of the current account's playlists
    async fn list_playlists(
        &self,
        access_token: &str,
        offset: u32,
        limit: u32,
    ) -> Result<PlaylistPage>;

    /// Create a playlist owned by `owner_id`
    async fn create_playlist(
        &self,
        access_token: &str,
        owner_id: &str,
        name: &str,
        public: bool,
    ) -> Result<PlaylistRef>;

    /// Append tracks to the end of a playlist
    async fn add_tracks(
        &self,
        access_token: &str,
        playlist_id: &PlaylistId,
        tracks: &[TrackId],
    ) -> Result<()>;

    /// Exchange a refresh token for a new access token
    async fn refresh_access_token(&self, refresh_token: &str) -> Result<Grant>;

    /// Exchange a one-time authorization code for a token pair
    async fn exchange_authorization_code(&self, code: &str) -> Result<Grant>;
}

/// Messaging platform Send API.
#[async_trait]
pub trait MessagingTransport: Send + Sync {
    /// Show a sender action (typing, seen) to `recipient`
    async fn send_action(&self, recipient: &SenderId, action: SenderAction) -> Result<()>;

    /// Deliver a message to `recipient`
    async fn send_message(&self, recipient: &SenderId, message: &OutboundMessage) -> Result<()>;
}
