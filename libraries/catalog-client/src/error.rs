//! Error types for the catalog client.

use jukebox_core::JukeboxError;
use thiserror::Error;

/// Errors that can occur when talking to the catalog.
#[derive(Error, Debug)]
pub enum CatalogClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Catalog returned an error response
    #[error("Catalog error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Accounts service rejected the code or refresh token
    #[error("Authorization rejected: {0}")]
    AuthFailed(String),

    /// Invalid base URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse a response body
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Catalog is unreachable (connect failure or timeout)
    #[error("Catalog unreachable: {0}")]
    Unreachable(String),
}

/// Result type for catalog client operations.
pub type Result<T> = std::result::Result<T, CatalogClientError>;

impl CatalogClientError {
    /// Classify a transport failure
    pub(crate) fn from_send(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            Self::Unreachable(e.to_string())
        } else {
            Self::Request(e)
        }
    }
}

impl From<CatalogClientError> for JukeboxError {
    fn from(e: CatalogClientError) -> Self {
        match e {
            CatalogClientError::ServerError { status, message } => {
                JukeboxError::upstream(status, message)
            }
            CatalogClientError::AuthFailed(msg) => JukeboxError::Auth(msg),
            CatalogClientError::ParseError(msg) => JukeboxError::Parse(msg),
            CatalogClientError::InvalidUrl(msg) => JukeboxError::InvalidArgument(msg),
            CatalogClientError::Unreachable(msg) => JukeboxError::Transport(msg),
            CatalogClientError::Request(e) => JukeboxError::Transport(e.to_string()),
        }
    }
}
