//! Paginated search rendered as a card carousel.

use crate::codec::{self, ContinuationPayload};
use crate::gateway::CatalogGateway;
use crate::outbox::Outbox;
use jukebox_core::{
    Button, Element, MessagingTransport, OutboundMessage, QuickReply, Result, SearchResult,
    SenderAction, SenderId, Track,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Upstream pagination unit; searches always fetch one aligned window of this size
pub const UPSTREAM_PAGE_SIZE: u32 = 20;

/// Cards per carousel when the user has not asked for more
pub const DEFAULT_LIMIT: u32 = 10;

/// Most cards a generic template can hold
pub const MAX_CARDS: u32 = 10;

const ADD_TITLE: &str = "Add";
const MORE_TITLE: &str = "More Results";

/// Aligned upstream window `[start, end)` containing a given offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub start: u32,
    pub end: u32,
}

impl PageWindow {
    /// Window of [`UPSTREAM_PAGE_SIZE`] that contains `skip`.
    pub fn containing(skip: u32) -> Self {
        let start = skip - (skip % UPSTREAM_PAGE_SIZE);
        Self {
            start,
            end: start.saturating_add(UPSTREAM_PAGE_SIZE),
        }
    }

    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// One selectable track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub title: String,
    /// Artist names joined with ", "
    pub subtitle: String,
    /// Widest album artwork, empty when the track has none
    pub image_url: String,
    pub action: ContinuationPayload,
}

impl Card {
    fn from_track(track: &Track) -> Self {
        Self {
            title: track.name.clone(),
            subtitle: track.artist_names().join(", "),
            image_url: track.album_art_url().to_string(),
            action: ContinuationPayload::AddTrack {
                track_id: track.id.clone(),
            },
        }
    }
}

/// Cards for one screen of results plus the optional "More Results" control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carousel {
    pub cards: Vec<Card>,
    pub continuation: Option<ContinuationPayload>,
}

impl Carousel {
    /// Build the carousel for `[skip, skip + limit)` from one fetched window.
    ///
    /// Returns `None` when the window holds one result or fewer, or when the
    /// requested range falls outside what was fetched.
    pub fn build(
        query: &str,
        skip: u32,
        limit: u32,
        window: PageWindow,
        result: SearchResult,
    ) -> Option<Self> {
        let SearchResult { mut items, total } = result;
        if items.len() <= 1 {
            return None;
        }

        // Stable: equally popular tracks keep their upstream order
        items.sort_by(|a, b| b.popularity.cmp(&a.popularity));

        let from = (skip - window.start) as usize;
        let to = (from + limit as usize).min(items.len());
        if from >= to {
            return None;
        }

        let cards: Vec<Card> = items[from..to].iter().map(Card::from_track).collect();

        let remaining = i64::from(total) - i64::from(limit) - i64::from(skip);
        let continuation = (remaining > 0).then(|| ContinuationPayload::SearchMore {
            query: query.to_string(),
            skip: skip.saturating_add(limit),
            limit,
        });

        Some(Self {
            cards,
            continuation,
        })
    }

    /// Render as a generic template with an optional quick reply.
    pub fn to_message(&self) -> OutboundMessage {
        let elements = self
            .cards
            .iter()
            .map(|card| Element {
                title: card.title.clone(),
                subtitle: card.subtitle.clone(),
                image_url: card.image_url.clone(),
                buttons: vec![Button::Postback {
                    title: ADD_TITLE.to_string(),
                    payload: codec::encode(&card.action),
                }],
            })
            .collect();

        let quick_replies = self
            .continuation
            .as_ref()
            .map(codec::encode)
            .filter(|payload| {
                let fits = codec::fits_transport(payload);
                if !fits {
                    warn!(len = payload.len(), "Continuation too long to attach, dropping");
                }
                fits
            })
            .map(|payload| QuickReply::Text {
                title: MORE_TITLE.to_string(),
                payload,
            })
            .into_iter()
            .collect();

        OutboundMessage::generic(elements).with_quick_replies(quick_replies)
    }
}

/// Runs searches and delivers the resulting carousel.
pub struct SearchPresenter {
    gateway: Arc<CatalogGateway>,
    outbox: Outbox,
}

impl SearchPresenter {
    pub fn new(gateway: Arc<CatalogGateway>, messenger: Arc<dyn MessagingTransport>) -> Self {
        Self {
            gateway,
            outbox: Outbox::new(messenger),
        }
    }

    /// Fetch the window containing `skip` and build the carousel, without
    /// sending anything. `limit` is clamped to `1..=MAX_CARDS`.
    pub async fn present(&self, query: &str, skip: u32, limit: u32) -> Result<Option<Carousel>> {
        let limit = limit.clamp(1, MAX_CARDS);
        let window = PageWindow::containing(skip);

        let result = self
            .gateway
            .search(query, window.start, window.len())
            .await?;

        let carousel = Carousel::build(query, skip, limit, window, result);
        debug!(
            query = %query,
            skip,
            limit,
            cards = carousel.as_ref().map_or(0, |c| c.cards.len()),
            more = carousel.as_ref().is_some_and(|c| c.continuation.is_some()),
            "Built carousel"
        );
        Ok(carousel)
    }

    /// Search on behalf of `sender` and send the carousel, bracketed by a
    /// typing indicator. The indicator is cleared even when the search fails.
    pub async fn search(
        &self,
        sender: &SenderId,
        query: &str,
        skip: u32,
        limit: u32,
    ) -> Result<Option<Carousel>> {
        self.outbox.action(sender, SenderAction::TypingOn).await;

        let presented = self.present(query, skip, limit).await;
        if let Ok(Some(carousel)) = &presented {
            self.outbox.message(sender, &carousel.to_message()).await;
        }

        self.outbox.action(sender, SenderAction::TypingOff).await;
        presented
    }
}
