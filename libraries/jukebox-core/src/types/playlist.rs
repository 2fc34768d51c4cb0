/// Playlist reference types
use crate::types::PlaylistId;
use serde::{Deserialize, Serialize};

/// Reference to a catalog playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistRef {
    /// Catalog playlist identifier
    pub id: PlaylistId,

    /// Playlist name
    pub name: String,
}

impl PlaylistRef {
    /// Create a new playlist reference
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: PlaylistId::new(id),
            name: name.into(),
        }
    }
}

/// One page of the account's playlist listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistPage {
    /// Playlists on this page
    pub items: Vec<PlaylistRef>,

    /// Total number of playlists upstream
    pub total: u32,
}
