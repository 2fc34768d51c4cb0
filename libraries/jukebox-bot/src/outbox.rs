//! Delivery to the messaging transport. Failures are logged here and never
//! propagate into a workflow.

use jukebox_core::{MessagingTransport, OutboundMessage, SenderAction, SenderId};
use std::sync::Arc;
use tracing::error;

#[derive(Clone)]
pub(crate) struct Outbox {
    transport: Arc<dyn MessagingTransport>,
}

impl Outbox {
    pub(crate) fn new(transport: Arc<dyn MessagingTransport>) -> Self {
        Self { transport }
    }

    /// Returns whether the action was delivered.
    pub(crate) async fn action(&self, recipient: &SenderId, action: SenderAction) -> bool {
        match self.transport.send_action(recipient, action).await {
            Ok(()) => true,
            Err(e) => {
                error!(recipient = %recipient, action = ?action, error = %e, "Delivery failed");
                false
            }
        }
    }

    /// Returns whether the message was delivered.
    pub(crate) async fn message(&self, recipient: &SenderId, message: &OutboundMessage) -> bool {
        match self.transport.send_message(recipient, message).await {
            Ok(()) => true,
            Err(e) => {
                error!(recipient = %recipient, error = %e, "Message delivery failed");
                false
            }
        }
    }
}
