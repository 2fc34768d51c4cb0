//! Send API request types and client configuration.

use jukebox_core::{OutboundMessage, SenderAction, SenderId};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Production Graph API base URL
pub const DEFAULT_GRAPH_URL: &str = "https://graph.facebook.com";

/// Graph API version the Send API is called under
pub const DEFAULT_API_VERSION: &str = "v2.6";

/// Configuration for the Send API.
#[derive(Clone)]
pub struct MessengerConfig {
    /// Graph API base URL
    pub graph_url: String,
    /// Graph API version path segment
    pub api_version: String,
    /// Page access token sent as the `access_token` query parameter
    pub page_access_token: String,
    /// TCP connect timeout
    pub connect_timeout: Duration,
    /// Whole-request timeout
    pub request_timeout: Duration,
}

impl MessengerConfig {
    /// Production Graph API with default timeouts.
    pub fn new(page_access_token: impl Into<String>) -> Self {
        Self {
            graph_url: DEFAULT_GRAPH_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            page_access_token: page_access_token.into(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }

    /// Point the client somewhere else (e.g. a mock server).
    #[must_use]
    pub fn with_graph_url(mut self, graph_url: impl Into<String>) -> Self {
        self.graph_url = graph_url.into();
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

impl std::fmt::Debug for MessengerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessengerConfig")
            .field("graph_url", &self.graph_url)
            .field("api_version", &self.api_version)
            .field("page_access_token", &"<redacted>")
            .field("connect_timeout", &self.connect_timeout)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct Recipient<'a> {
    pub id: &'a SenderId,
}

/// Send API request body. Exactly one of `sender_action` or `message` is set.
#[derive(Debug, Serialize)]
pub(crate) struct SendRequest<'a> {
    pub recipient: Recipient<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_action: Option<SenderAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'a OutboundMessage>,
}

impl<'a> SendRequest<'a> {
    pub fn action(recipient: &'a SenderId, action: SenderAction) -> Self {
        Self {
            recipient: Recipient { id: recipient },
            sender_action: Some(action),
            message: None,
        }
    }

    pub fn message(recipient: &'a SenderId, message: &'a OutboundMessage) -> Self {
        Self {
            recipient: Recipient { id: recipient },
            sender_action: None,
            message: Some(message),
        }
    }
}

/// Graph API error body, `{"error": {"message": ..., "code": ...}}`.
#[derive(Debug, Deserialize)]
pub(crate) struct GraphErrorBody {
    pub error: GraphError,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphError {
    pub message: String,
    #[serde(default)]
    pub code: Option<i64>,
}
