//! Shared fakes for the orchestration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jukebox_bot::{CatalogGateway, EventRouter, TokenLifecycle};
use jukebox_core::{
    Album, Artist, CatalogApi, Credential, Grant, Image, JukeboxError, MessagingTransport,
    OutboundMessage, PlaylistId, PlaylistPage, PlaylistRef, Result, SearchResult, SenderAction,
    SenderId, Track, TrackId,
};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const PLAYLIST_NAME: &str = "Jukebox";
pub const OWNER_ID: &str = "jukebox-owner";
pub const GOOD_CODE: &str = "good-code";

/// In-memory catalog with call counters.
pub struct FakeCatalog {
    tracks: Vec<Track>,
    playlists: Mutex<Vec<PlaylistRef>>,
    pub searches: Mutex<Vec<(String, u32, u32)>>,
    pub added: Mutex<Vec<(PlaylistId, Vec<TrackId>)>>,
    pub refresh_calls: AtomicUsize,
    pub exchange_calls: AtomicUsize,
    pub list_calls: AtomicUsize,
    pub create_calls: AtomicUsize,
    pub fail_search: AtomicBool,
    pub fail_add: AtomicBool,
    latency: std::time::Duration,
}

impl FakeCatalog {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self {
            tracks,
            playlists: Mutex::new(Vec::new()),
            searches: Mutex::new(Vec::new()),
            added: Mutex::new(Vec::new()),
            refresh_calls: AtomicUsize::new(0),
            exchange_calls: AtomicUsize::new(0),
            list_calls: AtomicUsize::new(0),
            create_calls: AtomicUsize::new(0),
            fail_search: AtomicBool::new(false),
            fail_add: AtomicBool::new(false),
            latency: std::time::Duration::from_millis(20),
        }
    }

    pub fn with_playlists(self, playlists: Vec<PlaylistRef>) -> Self {
        *self.playlists.lock().unwrap() = playlists;
        self
    }

    pub fn playlists(&self) -> Vec<PlaylistRef> {
        self.playlists.lock().unwrap().clone()
    }

    pub fn searches(&self) -> Vec<(String, u32, u32)> {
        self.searches.lock().unwrap().clone()
    }

    pub fn added(&self) -> Vec<(PlaylistId, Vec<TrackId>)> {
        self.added.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogApi for FakeCatalog {
    async fn search_tracks(
        &self,
        _access_token: &str,
        query: &str,
        offset: u32,
        limit: u32,
    ) -> Result<SearchResult> {
        self.searches
            .lock()
            .unwrap()
            .push((query.to_string(), offset, limit));
        if self.fail_search.load(Ordering::SeqCst) {
            return Err(JukeboxError::upstream(503, "search unavailable"));
        }

        let start = (offset as usize).min(self.tracks.len());
        let end = (start + limit as usize).min(self.tracks.len());
        Ok(SearchResult {
            items: self.tracks[start..end].to_vec(),
            total: self.tracks.len() as u32,
        })
    }

    async fn list_playlists(
        &self,
        _access_token: &str,
        offset: u32,
        limit: u32,
    ) -> Result<PlaylistPage> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let playlists = self.playlists();
        let start = (offset as usize).min(playlists.len());
        let end = (start + limit as usize).min(playlists.len());
        Ok(PlaylistPage {
            items: playlists[start..end].to_vec(),
            total: playlists.len() as u32,
        })
    }

    async fn create_playlist(
        &self,
        _access_token: &str,
        _owner_id: &str,
        name: &str,
        _public: bool,
    ) -> Result<PlaylistRef> {
        let n = self.create_calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.latency).await;
        let playlist = PlaylistRef::new(format!("created-{}", n), name);
        self.playlists.lock().unwrap().push(playlist.clone());
        Ok(playlist)
    }

    async fn add_tracks(
        &self,
        _access_token: &str,
        playlist_id: &PlaylistId,
        tracks: &[TrackId],
    ) -> Result<()> {
        if self.fail_add.load(Ordering::SeqCst) {
            return Err(JukeboxError::upstream(403, "playlist is not owned by user"));
        }
        self.added
            .lock()
            .unwrap()
            .push((playlist_id.clone(), tracks.to_vec()));
        Ok(())
    }

    async fn refresh_access_token(&self, refresh_token: &str) -> Result<Grant> {
        let n = self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.latency).await;
        if refresh_token == "revoked" {
            return Err(JukeboxError::upstream(400, "invalid_grant"));
        }
        Ok(Grant {
            access_token: format!("refreshed-{}", n),
            refresh_token: None,
            expires_in: 3600,
        })
    }

    async fn exchange_authorization_code(&self, code: &str) -> Result<Grant> {
        self.exchange_calls.fetch_add(1, Ordering::SeqCst);
        if code != GOOD_CODE {
            return Err(JukeboxError::upstream(400, "invalid_grant"));
        }
        Ok(Grant {
            access_token: "granted".to_string(),
            refresh_token: Some("refresh".to_string()),
            expires_in: 3600,
        })
    }
}

/// Something the bot sent to the messaging platform.
#[derive(Debug, Clone, PartialEq)]
pub enum Sent {
    Action(SenderId, SenderAction),
    Message(SenderId, OutboundMessage),
}

/// Messaging transport that records every delivery.
#[derive(Default)]
pub struct RecordingMessenger {
    sent: Mutex<Vec<Sent>>,
}

impl RecordingMessenger {
    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn actions(&self) -> Vec<SenderAction> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Action(_, action) => Some(action),
                Sent::Message(..) => None,
            })
            .collect()
    }

    pub fn messages(&self) -> Vec<OutboundMessage> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Message(_, message) => Some(message),
                Sent::Action(..) => None,
            })
            .collect()
    }
}

#[async_trait]
impl MessagingTransport for RecordingMessenger {
    async fn send_action(&self, recipient: &SenderId, action: SenderAction) -> Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push(Sent::Action(recipient.clone(), action));
        Ok(())
    }

    async fn send_message(&self, recipient: &SenderId, message: &OutboundMessage) -> Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push(Sent::Message(recipient.clone(), message.clone()));
        Ok(())
    }
}

/// `count` tracks named `Track {i}` with popularity `i`.
pub fn catalog_tracks(count: u32) -> Vec<Track> {
    (0..count)
        .map(|i| Track {
            id: TrackId::new(format!("track-{}", i)),
            name: format!("Track {}", i),
            artists: vec![Artist {
                name: "Artist".to_string(),
            }],
            album: Album {
                images: vec![Image {
                    url: format!("https://img.example/{}.jpg", i),
                    width: Some(300),
                    height: Some(300),
                }],
            },
            popularity: i,
        })
        .collect()
}

pub fn valid_credential() -> Credential {
    Credential::new(
        "valid",
        Some("refresh".to_string()),
        Utc::now() + Duration::hours(1),
    )
}

pub fn expired_credential(refresh_token: &str) -> Credential {
    Credential::new(
        "stale",
        Some(refresh_token.to_string()),
        Utc::now() - Duration::minutes(1),
    )
}

pub struct Harness {
    pub catalog: Arc<FakeCatalog>,
    pub messenger: Arc<RecordingMessenger>,
    pub tokens: Arc<TokenLifecycle>,
    pub gateway: Arc<CatalogGateway>,
    pub router: EventRouter,
}

pub fn harness(catalog: FakeCatalog, credential: Credential) -> Harness {
    let catalog = Arc::new(catalog);
    let messenger = Arc::new(RecordingMessenger::default());
    let api: Arc<dyn CatalogApi> = catalog.clone();
    let tokens = Arc::new(TokenLifecycle::with_credential(api.clone(), credential));
    let gateway = Arc::new(CatalogGateway::new(
        api,
        Arc::clone(&tokens),
        OWNER_ID,
        PLAYLIST_NAME,
    ));
    let router = EventRouter::new(Arc::clone(&gateway), messenger.clone());

    Harness {
        catalog,
        messenger,
        tokens,
        gateway,
        router,
    }
}
