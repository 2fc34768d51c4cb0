//! Error types for the messenger client.

use jukebox_core::JukeboxError;
use thiserror::Error;

/// Errors that can occur when calling the Send API.
#[derive(Error, Debug)]
pub enum MessengerClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Send API returned an error response
    #[error("Send API error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Invalid Graph URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Send API is unreachable (connect failure or timeout)
    #[error("Send API unreachable: {0}")]
    Unreachable(String),
}

/// Result type for messenger client operations.
pub type Result<T> = std::result::Result<T, MessengerClientError>;

impl From<MessengerClientError> for JukeboxError {
    fn from(e: MessengerClientError) -> Self {
        match e {
            MessengerClientError::ServerError { status, message } => {
                JukeboxError::upstream(status, message)
            }
            MessengerClientError::InvalidUrl(msg) => JukeboxError::InvalidArgument(msg),
            MessengerClientError::Unreachable(msg) => JukeboxError::Transport(msg),
            MessengerClientError::Request(e) => JukeboxError::Transport(e.to_string()),
        }
    }
}
