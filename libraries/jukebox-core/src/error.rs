/// Core error types for the jukebox bot
use thiserror::Error;

/// Result type alias using `JukeboxError`
pub type Result<T> = std::result::Result<T, JukeboxError>;

/// Core error type for the jukebox bot
#[derive(Error, Debug)]
pub enum JukeboxError {
    /// Authorization code or refresh token rejected, or no authorization yet
    #[error("Authorization failed: {0}")]
    Auth(String),

    /// Remote API answered with a non-2xx status
    #[error("Upstream error ({status}): {message}")]
    Upstream {
        /// HTTP status returned by the remote API
        status: u16,
        /// Response body or a short description
        message: String,
    },

    /// Remote API answered 2xx with a body we could not parse
    #[error("Failed to parse upstream response: {0}")]
    Parse(String),

    /// The request never produced a response (connect failure, timeout)
    #[error("Transport error: {0}")]
    Transport(String),

    /// A continuation payload could not be decoded
    #[error("Failed to decode payload: {0}")]
    Decode(String),

    /// Caller supplied an argument outside the accepted range
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl JukeboxError {
    /// Create an authorization error
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }

    /// Create an upstream error
    pub fn upstream(status: u16, msg: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            message: msg.into(),
        }
    }

    /// Create a decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Whether this error came from a remote API (status, body, or transport)
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::Upstream { .. } | Self::Parse(_) | Self::Transport(_)
        )
    }
}
