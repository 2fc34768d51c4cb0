/// OAuth credential state for the catalog API
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use std::fmt;

/// Token endpoint response for both the code exchange and a refresh.
#[derive(Clone, Deserialize)]
pub struct Grant {
    /// Short-lived bearer token
    pub access_token: String,

    /// Long-lived token; refresh responses may omit it
    #[serde(default)]
    pub refresh_token: Option<String>,

    /// Access token validity in seconds
    pub expires_in: u64,
}

impl fmt::Debug for Grant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grant")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

/// Access/refresh token pair with its expiry.
///
/// An access token never exists without an expiry: the only constructors
/// take both together.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credential {
    access_token: Option<String>,
    refresh_token: Option<String>,
    expires_at: Option<DateTime<Utc>>,
}

impl Credential {
    /// Create a credential from known values (e.g. restored state, tests)
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: Option<String>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            access_token: Some(access_token.into()),
            refresh_token,
            expires_at: Some(expires_at),
        }
    }

    /// Build a credential from a token endpoint response received at `now`.
    ///
    /// When the grant carries no refresh token, `previous_refresh_token` is kept.
    pub fn from_grant(
        grant: Grant,
        previous_refresh_token: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        let expires_at = i64::try_from(grant.expires_in)
            .ok()
            .and_then(Duration::try_seconds)
            .and_then(|validity| now.checked_add_signed(validity))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self {
            access_token: Some(grant.access_token),
            refresh_token: grant.refresh_token.or(previous_refresh_token),
            expires_at: Some(expires_at),
        }
    }

    /// Valid iff an access token and expiry are both set and `now < expires_at`.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        match (&self.access_token, self.expires_at) {
            (Some(token), Some(expires_at)) => !token.is_empty() && now < expires_at,
            _ => false,
        }
    }

    /// Current access token, if any
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// Current refresh token, if any
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    /// Expiry of the access token, if any
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
