//! Mock capabilities shared by the unit tests.

use async_trait::async_trait;
use jukebox_core::{
    CatalogApi, Grant, MessagingTransport, OutboundMessage, PlaylistId, PlaylistPage, PlaylistRef,
    Result, SearchResult, SenderAction, SenderId, TrackId,
};

mockall::mock! {
    pub Catalog {}

    #[async_trait]
    impl CatalogApi for Catalog {
        async fn search_tracks(
            &self,
            access_token: &str,
            query: &str,
            offset: u32,
            limit: u32,
        ) -> Result<SearchResult>;
        async fn list_playlists(
            &self,
            access_token: &str,
            offset: u32,
            limit: u32,
        ) -> Result<PlaylistPage>;
        async fn create_playlist(
            &self,
            access_token: &str,
            owner_id: &str,
            name: &str,
            public: bool,
        ) -> Result<PlaylistRef>;
        async fn add_tracks(
            &self,
            access_token: &str,
            playlist_id: &PlaylistId,
            tracks: &[TrackId],
        ) -> Result<()>;
        async fn refresh_access_token(&self, refresh_token: &str) -> Result<Grant>;
        async fn exchange_authorization_code(&self, code: &str) -> Result<Grant>;
    }
}

mockall::mock! {
    pub Messenger {}

    #[async_trait]
    impl MessagingTransport for Messenger {
        async fn send_action(&self, recipient: &SenderId, action: SenderAction) -> Result<()>;
        async fn send_message(&self, recipient: &SenderId, message: &OutboundMessage) -> Result<()>;
    }
}

pub fn grant(access_token: &str, refresh_token: Option<&str>) -> Grant {
    Grant {
        access_token: access_token.to_string(),
        refresh_token: refresh_token.map(str::to_string),
        expires_in: 3600,
    }
}
