//! Typed façade over the catalog API.

use crate::tokens::TokenLifecycle;
use jukebox_core::{
    CatalogApi, JukeboxError, PlaylistId, PlaylistRef, Result, SearchResult, TrackId,
};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

/// Largest page the search endpoint accepts
pub const MAX_SEARCH_LIMIT: u32 = 50;

/// Page size used when walking the playlist listing
pub const PLAYLIST_PAGE_SIZE: u32 = 50;

/// Catalog operations gated by the token lifecycle.
///
/// The jukebox playlist is resolved once (found by exact name, or created)
/// and cached for the life of the gateway.
pub struct CatalogGateway {
    api: Arc<dyn CatalogApi>,
    tokens: Arc<TokenLifecycle>,
    owner_id: String,
    playlist_name: String,
    jukebox: OnceCell<PlaylistRef>,
}

impl CatalogGateway {
    pub fn new(
        api: Arc<dyn CatalogApi>,
        tokens: Arc<TokenLifecycle>,
        owner_id: impl Into<String>,
        playlist_name: impl Into<String>,
    ) -> Self {
        Self {
            api,
            tokens,
            owner_id: owner_id.into(),
            playlist_name: playlist_name.into(),
            jukebox: OnceCell::new(),
        }
    }

    /// Token lifecycle backing this gateway
    pub fn tokens(&self) -> &Arc<TokenLifecycle> {
        &self.tokens
    }

    /// Search tracks.
    ///
    /// # Arguments
    /// * `offset` - Index of the first result
    /// * `limit` - Page size, 1 to [`MAX_SEARCH_LIMIT`]
    pub async fn search(&self, query: &str, offset: u32, limit: u32) -> Result<SearchResult> {
        if limit == 0 || limit > MAX_SEARCH_LIMIT {
            return Err(JukeboxError::invalid_argument(format!(
                "search limit must be between 1 and {}, got {}",
                MAX_SEARCH_LIMIT, limit
            )));
        }

        let token = self.tokens.ensure_valid().await?;
        debug!(query = %query, offset, limit, "Searching catalog");

        let result = self.api.search_tracks(&token, query, offset, limit).await?;

        debug!(
            items = result.items.len(),
            total = result.total,
            "Search returned"
        );
        Ok(result)
    }

    /// Every playlist of the account, in listing order.
    pub async fn list_all_playlists(&self) -> Result<Vec<PlaylistRef>> {
        let mut playlists = Vec::new();
        let mut offset = 0;

        loop {
            let token = self.tokens.ensure_valid().await?;
            let page = self
                .api
                .list_playlists(&token, offset, PLAYLIST_PAGE_SIZE)
                .await?;

            let fetched = page.items.len();
            playlists.extend(page.items);
            offset += PLAYLIST_PAGE_SIZE;

            if fetched == 0 || offset >= page.total {
                break;
            }
        }

        debug!(count = playlists.len(), "Listed playlists");
        Ok(playlists)
    }

    /// The jukebox playlist, resolved on first use and cached afterwards.
    ///
    /// Concurrent first callers share a single resolution. A failed
    /// resolution is not cached.
    pub async fn resolve_or_create_jukebox_playlist(&self) -> Result<PlaylistRef> {
        self.jukebox
            .get_or_try_init(|| self.find_or_create_playlist(&self.playlist_name))
            .await
            .cloned()
    }

    /// Cached jukebox playlist, if it has been resolved.
    pub fn cached_jukebox_playlist(&self) -> Option<&PlaylistRef> {
        self.jukebox.get()
    }

    /// Append a track to a playlist.
    pub async fn queue_track(&self, playlist_id: &PlaylistId, track_id: &TrackId) -> Result<()> {
        let token = self.tokens.ensure_valid().await?;
        debug!(playlist_id = %playlist_id, track_id = %track_id, "Queueing track");

        self.api
            .add_tracks(&token, playlist_id, std::slice::from_ref(track_id))
            .await?;

        info!(playlist_id = %playlist_id, track_id = %track_id, "Track queued");
        Ok(())
    }

    /// Append a track to the jukebox playlist, resolving it first if needed.
    pub async fn queue_on_jukebox(&self, track_id: &TrackId) -> Result<PlaylistRef> {
        let playlist = self.resolve_or_create_jukebox_playlist().await?;
        self.queue_track(&playlist.id, track_id).await?;
        Ok(playlist)
    }

    /// Complete the OAuth redirect: exchange the code, then resolve the
    /// jukebox playlist.
    ///
    /// Only the exchange can fail this call. A resolution failure is logged
    /// and retried lazily by the next queue-add.
    pub async fn complete_authorization(&self, code: &str) -> Result<()> {
        self.tokens.exchange_authorization_code(code).await?;

        match self.resolve_or_create_jukebox_playlist().await {
            Ok(playlist) => {
                info!(playlist_id = %playlist.id, name = %playlist.name, "Jukebox is ready");
            }
            Err(e) => {
                warn!(error = %e, "Failed to resolve jukebox playlist, will retry on first queue");
            }
        }
        Ok(())
    }

    async fn find_or_create_playlist(&self, name: &str) -> Result<PlaylistRef> {
        let playlists = self.list_all_playlists().await?;

        if let Some(existing) = playlists.into_iter().find(|p| p.name == name) {
            info!(playlist_id = %existing.id, name = %name, "Found jukebox playlist");
            return Ok(existing);
        }

        let token = self.tokens.ensure_valid().await?;
        let created = self
            .api
            .create_playlist(&token, &self.owner_id, name, false)
            .await?;

        info!(playlist_id = %created.id, name = %name, "Created jukebox playlist");
        Ok(created)
    }
}
