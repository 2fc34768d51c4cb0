//! Main catalog client.

use crate::accounts::AccountsClient;
use crate::error::{CatalogClientError, Result};
use crate::playlists::PlaylistClient;
use crate::search::SearchClient;
use crate::types::CatalogConfig;
use async_trait::async_trait;
use jukebox_core::{
    CatalogApi, Grant, PlaylistId, PlaylistPage, PlaylistRef, SearchResult, TrackId,
};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::warn;
use url::Url;

/// Client for the catalog Web API and accounts service.
///
/// Holds no token state: account calls take the bearer token explicitly and
/// the token endpoint calls return the grant to the caller.
///
/// # Example
///
/// ```ignore
/// use catalog_client::{CatalogClient, CatalogConfig};
///
/// let client = CatalogClient::new(CatalogConfig::new("id", "secret", "https://bot.example/spotify"))?;
/// let page = client.playlists(&access_token).list_mine(0, 50).await?;
/// println!("{} playlists", page.total);
/// ```
pub struct CatalogClient {
    http: Client,
    config: CatalogConfig,
    api_base: Url,
    accounts_base: Url,
}

impl CatalogClient {
    /// Create a new client with the given configuration.
    pub fn new(config: CatalogConfig) -> Result<Self> {
        let api_base = parse_base(&config.api_url)?;
        let accounts_base = parse_base(&config.accounts_url)?;

        let http = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(format!("Jukebox/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(CatalogClientError::Request)?;

        Ok(Self {
            http,
            config,
            api_base,
            accounts_base,
        })
    }

    /// Configuration this client was built with
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Accounts service operations (token grants, authorize URL).
    pub fn accounts(&self) -> AccountsClient<'_> {
        AccountsClient::new(&self.http, &self.config, &self.accounts_base)
    }

    /// Search operations on behalf of `access_token`.
    pub fn search<'a>(&'a self, access_token: &'a str) -> SearchClient<'a> {
        SearchClient::new(&self.http, &self.api_base, access_token)
    }

    /// Playlist operations on behalf of `access_token`.
    pub fn playlists<'a>(&'a self, access_token: &'a str) -> PlaylistClient<'a> {
        PlaylistClient::new(&self.http, &self.api_base, access_token)
    }

    /// URL the account owner visits to grant `scopes`.
    pub fn authorize_url(&self, scopes: &[&str], state: Option<&str>) -> Result<Url> {
        self.accounts().authorize_url(scopes, state)
    }
}

#[async_trait]
impl CatalogApi for CatalogClient {
    async fn search_tracks(
        &self,
        access_token: &str,
        query: &str,
        offset: u32,
        limit: u32,
    ) -> jukebox_core::Result<SearchResult> {
        Ok(self
            .search(access_token)
            .tracks(query, offset, limit)
            .await?)
    }

    async fn list_playlists(
        &self,
        access_token: &str,
        offset: u32,
        limit: u32,
    ) -> jukebox_core::Result<PlaylistPage> {
        Ok(self
            .playlists(access_token)
            .list_mine(offset, limit)
            .await?)
    }

    async fn create_playlist(
        &self,
        access_token: &str,
        owner_id: &str,
        name: &str,
        public: bool,
    ) -> jukebox_core::Result<PlaylistRef> {
        Ok(self
            .playlists(access_token)
            .create(owner_id, name, public)
            .await?)
    }

    async fn add_tracks(
        &self,
        access_token: &str,
        playlist_id: &PlaylistId,
        tracks: &[TrackId],
    ) -> jukebox_core::Result<()> {
        Ok(self
            .playlists(access_token)
            .add_tracks(playlist_id, tracks)
            .await?)
    }

    async fn refresh_access_token(&self, refresh_token: &str) -> jukebox_core::Result<Grant> {
        Ok(self.accounts().refresh(refresh_token).await?)
    }

    async fn exchange_authorization_code(&self, code: &str) -> jukebox_core::Result<Grant> {
        Ok(self.accounts().exchange_code(code).await?)
    }
}

fn parse_base(raw: &str) -> Result<Url> {
    if raw.is_empty() {
        return Err(CatalogClientError::InvalidUrl("URL cannot be empty".into()));
    }
    if !raw.starts_with("http://") && !raw.starts_with("https://") {
        return Err(CatalogClientError::InvalidUrl(format!(
            "{} must start with http:// or https://",
            raw
        )));
    }
    Url::parse(raw).map_err(|e| CatalogClientError::InvalidUrl(format!("{}: {}", raw, e)))
}

/// `base` with `segments` appended to its path, each percent-encoded.
pub(crate) fn endpoint(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| CatalogClientError::InvalidUrl(format!("{} cannot be a base", base)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Parse a 2xx body as `T`, or turn the response into a `ServerError`.
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
    if response.status().is_success() {
        response.json().await.map_err(|e| {
            CatalogClientError::ParseError(format!("Failed to parse {} response: {}", what, e))
        })
    } else {
        Err(server_error(response).await)
    }
}

pub(crate) async fn server_error(response: Response) -> CatalogClientError {
    let status = response.status().as_u16();
    let message = response.text().await.unwrap_or_default();
    warn!(status, error = %message, "Catalog request failed");
    CatalogClientError::ServerError { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_appends_and_encodes_segments() {
        let base = Url::parse("https://api.example.com").unwrap();
        let url = endpoint(&base, &["v1", "users", "dj bob", "playlists"]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/users/dj%20bob/playlists");
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let base = Url::parse("http://127.0.0.1:9000/proxy/").unwrap();
        let url = endpoint(&base, &["v1", "search"]).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:9000/proxy/v1/search");
    }

    #[test]
    fn test_parse_base_rejects_non_http() {
        assert!(matches!(
            parse_base("ftp://example.com"),
            Err(CatalogClientError::InvalidUrl(_))
        ));
        assert!(matches!(parse_base(""), Err(CatalogClientError::InvalidUrl(_))));
    }
}
