//! Types for catalog API requests and responses.

use jukebox_core::{Grant, PlaylistRef, SearchResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Production Web API base URL
pub const DEFAULT_API_URL: &str = "https://api.spotify.com";

/// Production accounts service base URL
pub const DEFAULT_ACCOUNTS_URL: &str = "https://accounts.spotify.com";

/// Scopes needed to read the account's playlists and edit the jukebox playlist
pub const DEFAULT_SCOPES: &[&str] = &[
    "playlist-read-private",
    "playlist-modify-public",
    "playlist-modify-private",
];

/// Configuration for connecting to the catalog.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Web API base URL
    pub api_url: String,
    /// Accounts service base URL
    pub accounts_url: String,
    /// OAuth client id
    pub client_id: String,
    /// OAuth client secret
    pub client_secret: String,
    /// Redirect URI registered for the client
    pub redirect_uri: String,
    /// TCP connect timeout
    pub connect_timeout: Duration,
    /// Whole-request timeout
    pub request_timeout: Duration,
}

impl CatalogConfig {
    /// Production endpoints with default timeouts.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            accounts_url: DEFAULT_ACCOUNTS_URL.to_string(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }

    /// Point both services somewhere else (e.g. a mock server).
    #[must_use]
    pub fn with_base_urls(
        mut self,
        api_url: impl Into<String>,
        accounts_url: impl Into<String>,
    ) -> Self {
        self.api_url = api_url.into();
        self.accounts_url = accounts_url.into();
        self
    }

    /// Override the connect and request timeouts.
    #[must_use]
    pub fn with_timeouts(mut self, connect: Duration, request: Duration) -> Self {
        self.connect_timeout = connect;
        self.request_timeout = request;
        self
    }
}

// =============================================================================
// Accounts Types
// =============================================================================

/// Form body for the token endpoint.
#[derive(Debug, Serialize)]
pub(crate) struct TokenRequest<'a> {
    pub grant_type: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_uri: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<&'a str>,
}

impl<'a> TokenRequest<'a> {
    pub fn authorization_code(code: &'a str, redirect_uri: &'a str) -> Self {
        Self {
            grant_type: "authorization_code",
            code: Some(code),
            redirect_uri: Some(redirect_uri),
            refresh_token: None,
        }
    }

    pub fn refresh_token(refresh_token: &'a str) -> Self {
        Self {
            grant_type: "refresh_token",
            code: None,
            redirect_uri: None,
            refresh_token: Some(refresh_token),
        }
    }
}

/// Token endpoint response.
#[derive(Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub expires_in: u64,
}

impl From<TokenResponse> for Grant {
    fn from(response: TokenResponse) -> Self {
        Grant {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
            expires_in: response.expires_in,
        }
    }
}

/// OAuth error body, e.g. `{"error":"invalid_grant","error_description":"..."}`.
#[derive(Debug, Deserialize)]
pub(crate) struct OAuthError {
    pub error: String,
    #[serde(default)]
    pub error_description: Option<String>,
}

impl std::fmt::Display for OAuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.error_description {
            Some(description) => write!(f, "{}: {}", self.error, description),
            None => f.write_str(&self.error),
        }
    }
}

// =============================================================================
// Web API Types
// =============================================================================

#[derive(Debug, Serialize)]
pub(crate) struct SearchQuery<'a> {
    pub q: &'a str,
    #[serde(rename = "type")]
    pub kind: &'a str,
    pub offset: u32,
    pub limit: u32,
}

#[derive(Debug, Serialize)]
pub(crate) struct PageQuery {
    pub offset: u32,
    pub limit: u32,
}

/// Search response; only the track paging object is requested.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    pub tracks: SearchResult,
}

/// Paging object of playlists.
#[derive(Debug, Deserialize)]
pub(crate) struct PlaylistPaging {
    pub items: Vec<PlaylistRef>,
    pub total: u32,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreatePlaylistRequest<'a> {
    pub name: &'a str,
    pub public: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct AddTracksRequest {
    pub uris: Vec<String>,
}
