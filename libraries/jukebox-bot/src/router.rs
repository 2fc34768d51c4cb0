//! Inbound event dispatch.

use crate::codec::{self, ContinuationPayload};
use crate::gateway::CatalogGateway;
use crate::outbox::Outbox;
use crate::presenter::{Carousel, SearchPresenter, DEFAULT_LIMIT};
use jukebox_core::{
    InboundEvent, MessagingTransport, OutboundMessage, PlaylistRef, ReplySource, Result,
    SenderAction, SenderId, TrackId,
};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Sent after a track was appended to the jukebox playlist
pub const QUEUED_CONFIRMATION: &str = "Thanks! Your track has been added to the Jukebox playlist";

/// Sent when appending a track failed
pub const QUEUE_FAILED_MESSAGE: &str =
    "Sorry, that track couldn't be added to the Jukebox playlist. Please try again later.";

/// What a handled event resulted in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A search ran; `None` when there was nothing worth showing
    Searched(Option<Carousel>),
    /// The track was appended and the user was told so
    Queued(PlaylistRef),
    /// Appending failed and the user was told so
    QueueFailed,
}

/// Routes classified inbound events to their workflow.
///
/// Holds no per-conversation state: anything a multi-step workflow needs
/// arrives inside the event's continuation payload.
pub struct EventRouter {
    gateway: Arc<CatalogGateway>,
    presenter: SearchPresenter,
    outbox: Outbox,
}

impl EventRouter {
    pub fn new(gateway: Arc<CatalogGateway>, messenger: Arc<dyn MessagingTransport>) -> Self {
        Self {
            presenter: SearchPresenter::new(Arc::clone(&gateway), Arc::clone(&messenger)),
            gateway,
            outbox: Outbox::new(messenger),
        }
    }

    /// Handle an event, logging any failure. Never fails.
    pub async fn dispatch(&self, event: InboundEvent) {
        let sender = event.sender().clone();
        match self.handle(event).await {
            Ok(outcome) => debug!(sender = %sender, outcome = ?outcome, "Event handled"),
            Err(e) => error!(sender = %sender, error = %e, "Event abandoned"),
        }
    }

    /// Handle an event, returning what happened or why it was abandoned.
    pub async fn handle(&self, event: InboundEvent) -> Result<DispatchOutcome> {
        match event {
            InboundEvent::Message { sender, text } => {
                self.outbox.action(&sender, SenderAction::MarkSeen).await;
                let carousel = self
                    .presenter
                    .search(&sender, &text, 0, DEFAULT_LIMIT)
                    .await?;
                Ok(DispatchOutcome::Searched(carousel))
            }
            InboundEvent::StructuredReply {
                sender,
                payload,
                source,
            } => {
                if source == ReplySource::QuickReply {
                    self.outbox.action(&sender, SenderAction::MarkSeen).await;
                }
                self.resume(&sender, &payload).await
            }
        }
    }

    async fn resume(&self, sender: &SenderId, payload: &str) -> Result<DispatchOutcome> {
        let command = match codec::decode(payload) {
            Ok(command) => command,
            Err(e) => {
                warn!(sender = %sender, payload = %payload, "Rejected continuation payload");
                return Err(e);
            }
        };

        match command {
            ContinuationPayload::AddTrack { track_id } => {
                Ok(self.add_track(sender, &track_id).await)
            }
            ContinuationPayload::SearchMore { query, skip, limit } => {
                let carousel = self.presenter.search(sender, &query, skip, limit).await?;
                Ok(DispatchOutcome::Searched(carousel))
            }
        }
    }

    async fn add_track(&self, sender: &SenderId, track_id: &TrackId) -> DispatchOutcome {
        self.outbox.action(sender, SenderAction::TypingOn).await;
        let queued = self.gateway.queue_on_jukebox(track_id).await;
        self.outbox.action(sender, SenderAction::TypingOff).await;

        match queued {
            Ok(playlist) => {
                info!(sender = %sender, track_id = %track_id, "Track added by user");
                self.outbox
                    .message(sender, &OutboundMessage::text(QUEUED_CONFIRMATION))
                    .await;
                DispatchOutcome::Queued(playlist)
            }
            Err(e) => {
                error!(sender = %sender, track_id = %track_id, error = %e, "Failed to queue track");
                self.outbox
                    .message(sender, &OutboundMessage::text(QUEUE_FAILED_MESSAGE))
                    .await;
                DispatchOutcome::QueueFailed
            }
        }
    }
}
