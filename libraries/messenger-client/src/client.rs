//! Send API client.

use crate::error::{MessengerClientError, Result};
use crate::types::{GraphErrorBody, MessengerConfig, SendRequest};
use async_trait::async_trait;
use jukebox_core::{MessagingTransport, OutboundMessage, SenderAction, SenderId};
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

/// Client for the messaging platform's Send API.
pub struct MessengerClient {
    http: Client,
    endpoint: Url,
    page_access_token: String,
}

impl MessengerClient {
    /// Create a new client with the given configuration.
    pub fn new(config: MessengerConfig) -> Result<Self> {
        let endpoint = messages_endpoint(&config)?;

        let http = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(format!("Jukebox/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(MessengerClientError::Request)?;

        Ok(Self {
            http,
            endpoint,
            page_access_token: config.page_access_token,
        })
    }

    /// Messages endpoint, without the access token
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Show a sender action to `recipient`.
    pub async fn action(&self, recipient: &SenderId, action: SenderAction) -> Result<()> {
        debug!(recipient = %recipient, action = ?action, "Sending action");
        self.send(&SendRequest::action(recipient, action)).await
    }

    /// Deliver a message to `recipient`.
    pub async fn message(&self, recipient: &SenderId, message: &OutboundMessage) -> Result<()> {
        debug!(
            recipient = %recipient,
            text = message.text.is_some(),
            attachment = message.attachment.is_some(),
            quick_replies = message.quick_replies.len(),
            "Sending message"
        );
        self.send(&SendRequest::message(recipient, message)).await
    }

    async fn send(&self, body: &SendRequest<'_>) -> Result<()> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .query(&[("access_token", self.page_access_token.as_str())])
            .json(body)
            .send()
            .await
            .map_err(|e| {
                // reqwest errors carry the URL, which carries the token
                let e = e.without_url();
                if e.is_connect() || e.is_timeout() {
                    MessengerClientError::Unreachable(e.to_string())
                } else {
                    MessengerClientError::Request(e)
                }
            })?;

        let status = response.status();

        if status.is_success() {
            Ok(())
        } else {
            let text = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<GraphErrorBody>(&text) {
                Ok(GraphErrorBody { error }) => match error.code {
                    Some(code) => format!("{} (code {})", error.message, code),
                    None => error.message,
                },
                Err(_) => text,
            };
            warn!(status = %status, error = %message, "Send API request failed");
            Err(MessengerClientError::ServerError {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[async_trait]
impl MessagingTransport for MessengerClient {
    async fn send_action(
        &self,
        recipient: &SenderId,
        action: SenderAction,
    ) -> jukebox_core::Result<()> {
        Ok(self.action(recipient, action).await?)
    }

    async fn send_message(
        &self,
        recipient: &SenderId,
        message: &OutboundMessage,
    ) -> jukebox_core::Result<()> {
        Ok(self.message(recipient, message).await?)
    }
}

fn messages_endpoint(config: &MessengerConfig) -> Result<Url> {
    let raw = config.graph_url.as_str();
    if !raw.starts_with("http://") && !raw.starts_with("https://") {
        return Err(MessengerClientError::InvalidUrl(format!(
            "{} must start with http:// or https://",
            raw
        )));
    }

    let mut url =
        Url::parse(raw).map_err(|e| MessengerClientError::InvalidUrl(format!("{}: {}", raw, e)))?;
    url.path_segments_mut()
        .map_err(|()| MessengerClientError::InvalidUrl(format!("{} cannot be a base", raw)))?
        .pop_if_empty()
        .extend([config.api_version.as_str(), "me", "messages"]);
    Ok(url)
}
