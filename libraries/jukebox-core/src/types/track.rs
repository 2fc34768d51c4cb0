/// Catalog track types as returned by a search
use crate::types::TrackId;
use serde::{Deserialize, Serialize};

/// A catalog track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Catalog track identifier
    pub id: TrackId,

    /// Track title
    pub name: String,

    /// Credited artists, in catalog order
    #[serde(default)]
    pub artists: Vec<Artist>,

    /// Album the track belongs to (only artwork is used)
    #[serde(default)]
    pub album: Album,

    /// Catalog popularity, 0-100
    #[serde(default)]
    pub popularity: u32,
}

impl Track {
    /// Artist names in catalog order, with repeated names dropped.
    pub fn artist_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::with_capacity(self.artists.len());
        for artist in &self.artists {
            if !names.contains(&artist.name.as_str()) {
                names.push(&artist.name);
            }
        }
        names
    }

    /// URL of the widest album image, or an empty string when there is none.
    pub fn album_art_url(&self) -> &str {
        let mut images: Vec<&Image> = self.album.images.iter().collect();
        images.sort_by(|a, b| b.width.unwrap_or(0).cmp(&a.width.unwrap_or(0)));
        images.first().map_or("", |image| image.url.as_str())
    }
}

/// A credited artist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    /// Artist display name
    pub name: String,
}

/// Album artwork container
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    /// Artwork candidates in arbitrary order
    #[serde(default)]
    pub images: Vec<Image>,
}

/// A single artwork rendition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Image URL
    pub url: String,

    /// Width in pixels (absent for some user-uploaded artwork)
    pub width: Option<u32>,

    /// Height in pixels
    pub height: Option<u32>,
}

/// One page of track search results
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Tracks in upstream order
    pub items: Vec<Track>,

    /// Total number of matches upstream, across all pages
    pub total: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(url: &str, width: Option<u32>) -> Image {
        Image {
            url: url.to_string(),
            width,
            height: width,
        }
    }

    fn track_with(artists: &[&str], images: Vec<Image>) -> Track {
        Track {
            id: TrackId::new("t1"),
            name: "Song".to_string(),
            artists: artists
                .iter()
                .map(|name| Artist {
                    name: (*name).to_string(),
                })
                .collect(),
            album: Album { images },
            popularity: 0,
        }
    }

    #[test]
    fn test_album_art_picks_widest() {
        let track = track_with(
            &[],
            vec![
                image("small", Some(64)),
                image("large", Some(640)),
                image("medium", Some(300)),
            ],
        );
        assert_eq!(track.album_art_url(), "large");
    }

    #[test]
    fn test_album_art_empty_without_images() {
        let track = track_with(&[], vec![]);
        assert_eq!(track.album_art_url(), "");
    }

    #[test]
    fn test_album_art_unknown_width_sorts_last() {
        let track = track_with(&[], vec![image("unknown", None), image("known", Some(1))]);
        assert_eq!(track.album_art_url(), "known");
    }

    #[test]
    fn test_artist_names_dedup_preserves_order() {
        let track = track_with(&["Daft Punk", "Pharrell", "Daft Punk", "Nile Rodgers"], vec![]);
        assert_eq!(
            track.artist_names(),
            vec!["Daft Punk", "Pharrell", "Nile Rodgers"]
        );
    }

    #[test]
    fn test_deserialize_catalog_track() {
        let json = serde_json::json!({
            "id": "abc",
            "name": "Get Lucky",
            "artists": [{"name": "Daft Punk", "id": "x"}],
            "album": {"name": "RAM", "images": [{"url": "u", "width": 640, "height": 640}]},
            "popularity": 81,
            "explicit": false
        });
        let track: Track = serde_json::from_value(json).unwrap();
        assert_eq!(track.id, TrackId::new("abc"));
        assert_eq!(track.popularity, 81);
        assert_eq!(track.album.images.len(), 1);
    }
}
