//! Track search.

use crate::client::{endpoint, read_json};
use crate::error::{CatalogClientError, Result};
use crate::types::{SearchQuery, SearchResponse};
use jukebox_core::SearchResult;
use reqwest::Client;
use tracing::debug;
use url::Url;

/// Search client for the catalog.
pub struct SearchClient<'a> {
    http: &'a Client,
    base_url: &'a Url,
    access_token: &'a str,
}

impl<'a> SearchClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a Url, access_token: &'a str) -> Self {
        Self {
            http,
            base_url,
            access_token,
        }
    }

    /// Search tracks.
    ///
    /// # Arguments
    /// * `offset` - Index of the first result
    /// * `limit` - Page size (the catalog accepts 1 to 50)
    pub async fn tracks(&self, query: &str, offset: u32, limit: u32) -> Result<SearchResult> {
        let url = endpoint(self.base_url, &["v1", "search"])?;
        debug!(url = %url, query = %query, offset, limit, "Searching tracks");

        let response = self
            .http
            .get(url)
            .bearer_auth(self.access_token)
            .query(&SearchQuery {
                q: query,
                kind: "track",
                offset,
                limit,
            })
            .send()
            .await
            .map_err(CatalogClientError::from_send)?;

        let search: SearchResponse = read_json(response, "search").await?;

        debug!(
            items = search.tracks.items.len(),
            total = search.tracks.total,
            "Search returned"
        );
        Ok(search.tracks)
    }
}
