//! OAuth credential lifecycle for the catalog API.

use chrono::{Duration, Utc};
use jukebox_core::{CatalogApi, Credential, JukeboxError, Result};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Owns the catalog credential and keeps it fresh.
///
/// Every catalog call goes through [`TokenLifecycle::ensure_valid`]. Refresh
/// is a critical section: callers that observe an expired token queue on the
/// write lock, and all but the first find the token already refreshed.
pub struct TokenLifecycle {
    api: Arc<dyn CatalogApi>,
    credential: RwLock<Credential>,
    refresh_margin: Duration,
}

impl TokenLifecycle {
    /// Create an unauthorized lifecycle; the first authorization code
    /// exchange installs the credential.
    pub fn new(api: Arc<dyn CatalogApi>) -> Self {
        Self::with_credential(api, Credential::default())
    }

    /// Create a lifecycle around an existing credential.
    pub fn with_credential(api: Arc<dyn CatalogApi>, credential: Credential) -> Self {
        Self {
            api,
            credential: RwLock::new(credential),
            refresh_margin: Duration::zero(),
        }
    }

    /// Treat tokens as expired `margin` before their actual expiry, so a
    /// request does not start with a token that lapses mid-flight.
    #[must_use]
    pub fn with_refresh_margin(mut self, margin: Duration) -> Self {
        self.refresh_margin = margin;
        self
    }

    /// Whether the held credential is currently usable.
    pub async fn is_valid(&self) -> bool {
        self.is_fresh(&*self.credential.read().await)
    }

    /// Snapshot of the held credential.
    pub async fn credential(&self) -> Credential {
        self.credential.read().await.clone()
    }

    /// Return a non-expired access token, refreshing first if needed.
    pub async fn ensure_valid(&self) -> Result<String> {
        {
            let credential = self.credential.read().await;
            if let Some(token) = self.fresh_token(&credential) {
                return Ok(token);
            }
        }

        let mut credential = self.credential.write().await;

        // Another caller may have refreshed while we waited for the lock
        if let Some(token) = self.fresh_token(&credential) {
            return Ok(token);
        }

        let refresh_token = credential
            .refresh_token()
            .map(str::to_string)
            .ok_or_else(|| JukeboxError::auth("no refresh token held, authorization required"))?;

        debug!(expires_at = ?credential.expires_at(), "Access token expired, refreshing");

        let grant = self
            .api
            .refresh_access_token(&refresh_token)
            .await
            .map_err(|e| {
                warn!(error = %e, "Token refresh failed");
                as_auth_error(e)
            })?;

        let access_token = grant.access_token.clone();
        *credential = Credential::from_grant(grant, Some(refresh_token), Utc::now());

        info!(expires_at = ?credential.expires_at(), "Access token refreshed");
        Ok(access_token)
    }

    /// Exchange a one-time authorization code and install the resulting
    /// credential, replacing whatever was held.
    pub async fn exchange_authorization_code(&self, code: &str) -> Result<Credential> {
        debug!("Exchanging authorization code");

        let grant = self
            .api
            .exchange_authorization_code(code)
            .await
            .map_err(|e| {
                warn!(error = %e, "Authorization code exchange failed");
                as_auth_error(e)
            })?;

        if grant.refresh_token.is_none() {
            warn!("Authorization grant carried no refresh token; it cannot be renewed");
        }

        let fresh = Credential::from_grant(grant, None, Utc::now());
        let mut credential = self.credential.write().await;
        *credential = fresh.clone();

        info!(expires_at = ?credential.expires_at(), "Catalog authorization granted");
        Ok(fresh)
    }

    fn is_fresh(&self, credential: &Credential) -> bool {
        credential.is_valid_at(Utc::now() + self.refresh_margin)
    }

    fn fresh_token(&self, credential: &Credential) -> Option<String> {
        if self.is_fresh(credential) {
            credential.access_token().map(str::to_string)
        } else {
            None
        }
    }
}

fn as_auth_error(err: JukeboxError) -> JukeboxError {
    match err {
        JukeboxError::Auth(_) => err,
        other => JukeboxError::auth(other.to_string()),
    }
}
