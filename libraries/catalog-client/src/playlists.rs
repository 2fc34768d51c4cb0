//! Playlist listing, creation and track appends.

use crate::client::{endpoint, read_json, server_error};
use crate::error::{CatalogClientError, Result};
use crate::types::{AddTracksRequest, CreatePlaylistRequest, PageQuery, PlaylistPaging};
use jukebox_core::{PlaylistId, PlaylistPage, PlaylistRef, TrackId};
use reqwest::Client;
use tracing::{debug, info};
use url::Url;

/// Playlist client for the catalog.
pub struct PlaylistClient<'a> {
    http: &'a Client,
    base_url: &'a Url,
    access_token: &'a str,
}

impl<'a> PlaylistClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a Url, access_token: &'a str) -> Self {
        Self {
            http,
            base_url,
            access_token,
        }
    }

    /// One page of the current account's playlists.
    pub async fn list_mine(&self, offset: u32, limit: u32) -> Result<PlaylistPage> {
        let url = endpoint(self.base_url, &["v1", "me", "playlists"])?;
        debug!(url = %url, offset, limit, "Listing playlists");

        let response = self
            .http
            .get(url)
            .bearer_auth(self.access_token)
            .query(&PageQuery { offset, limit })
            .send()
            .await
            .map_err(CatalogClientError::from_send)?;

        let paging: PlaylistPaging = read_json(response, "playlist listing").await?;

        debug!(items = paging.items.len(), total = paging.total, "Fetched playlists");
        Ok(PlaylistPage {
            items: paging.items,
            total: paging.total,
        })
    }

    /// Create a playlist owned by `owner_id`.
    pub async fn create(&self, owner_id: &str, name: &str, public: bool) -> Result<PlaylistRef> {
        let url = endpoint(self.base_url, &["v1", "users", owner_id, "playlists"])?;
        debug!(url = %url, name = %name, public, "Creating playlist");

        let response = self
            .http
            .post(url)
            .bearer_auth(self.access_token)
            .json(&CreatePlaylistRequest { name, public })
            .send()
            .await
            .map_err(CatalogClientError::from_send)?;

        let playlist: PlaylistRef = read_json(response, "create playlist").await?;

        info!(playlist_id = %playlist.id, name = %playlist.name, "Playlist created");
        Ok(playlist)
    }

    /// Append tracks to the end of a playlist.
    pub async fn add_tracks(&self, playlist_id: &PlaylistId, tracks: &[TrackId]) -> Result<()> {
        let url = endpoint(
            self.base_url,
            &["v1", "playlists", playlist_id.as_str(), "tracks"],
        )?;
        debug!(url = %url, count = tracks.len(), "Adding tracks");

        let response = self
            .http
            .post(url)
            .bearer_auth(self.access_token)
            .json(&AddTracksRequest {
                uris: tracks.iter().map(TrackId::to_uri).collect(),
            })
            .send()
            .await
            .map_err(CatalogClientError::from_send)?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(server_error(response).await)
        }
    }
}
