//! Accounts service: OAuth authorization code and refresh grants.

use crate::client::{endpoint, server_error};
use crate::error::{CatalogClientError, Result};
use crate::types::{CatalogConfig, OAuthError, TokenRequest, TokenResponse};
use jukebox_core::Grant;
use reqwest::{Client, StatusCode};
use tracing::{debug, info, warn};
use url::Url;

/// Accounts client for the catalog.
pub struct AccountsClient<'a> {
    http: &'a Client,
    config: &'a CatalogConfig,
    base_url: &'a Url,
}

impl<'a> AccountsClient<'a> {
    pub(crate) fn new(http: &'a Client, config: &'a CatalogConfig, base_url: &'a Url) -> Self {
        Self {
            http,
            config,
            base_url,
        }
    }

    /// Build the authorization URL for the code flow.
    pub fn authorize_url(&self, scopes: &[&str], state: Option<&str>) -> Result<Url> {
        let mut url = endpoint(self.base_url, &["authorize"])?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("response_type", "code")
                .append_pair("client_id", &self.config.client_id)
                .append_pair("scope", &scopes.join(" "))
                .append_pair("redirect_uri", &self.config.redirect_uri);
            if let Some(state) = state {
                query.append_pair("state", state);
            }
        }
        Ok(url)
    }

    /// Exchange a one-time authorization code for a token pair.
    pub async fn exchange_code(&self, code: &str) -> Result<Grant> {
        debug!("Exchanging authorization code");
        let grant = self
            .request_token(&TokenRequest::authorization_code(
                code,
                &self.config.redirect_uri,
            ))
            .await?;

        info!(
            expires_in = grant.expires_in,
            refresh = grant.refresh_token.is_some(),
            "Authorization code exchanged"
        );
        Ok(grant)
    }

    /// Exchange a refresh token for a new access token.
    ///
    /// The response may omit the refresh token; callers keep the old one.
    pub async fn refresh(&self, refresh_token: &str) -> Result<Grant> {
        debug!("Refreshing access token");
        let grant = self
            .request_token(&TokenRequest::refresh_token(refresh_token))
            .await?;

        debug!(expires_in = grant.expires_in, "Token refresh successful");
        Ok(grant)
    }

    async fn request_token(&self, form: &TokenRequest<'_>) -> Result<Grant> {
        let url = endpoint(self.base_url, &["api", "token"])?;

        let response = self
            .http
            .post(url)
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .form(form)
            .send()
            .await
            .map_err(CatalogClientError::from_send)?;

        let status = response.status();

        if status.is_success() {
            let token: TokenResponse = response.json().await.map_err(|e| {
                CatalogClientError::ParseError(format!("Failed to parse token response: {}", e))
            })?;
            Ok(token.into())
        } else if status == StatusCode::BAD_REQUEST || status == StatusCode::UNAUTHORIZED {
            let body = response.text().await.unwrap_or_default();
            let reason = serde_json::from_str::<OAuthError>(&body)
                .map(|e| e.to_string())
                .unwrap_or(body);
            warn!(status = %status, grant_type = form.grant_type, error = %reason, "Token request rejected");
            Err(CatalogClientError::AuthFailed(reason))
        } else {
            Err(server_error(response).await)
        }
    }
}
