//! Messaging-platform wire types.
//!
//! Inbound webhook bodies are deserialized into [`WebhookPayload`] and then
//! classified exactly once into the tagged [`InboundEvent`]; nothing past the
//! HTTP boundary looks at the raw shapes. Outbound types serialize to the Send
//! API's JSON.

use crate::types::SenderId;
use serde::{Deserialize, Serialize};

// =============================================================================
// Inbound
// =============================================================================

/// Body of a webhook delivery.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookPayload {
    /// Subscription object type; only `"page"` is handled
    pub object: String,
    /// Batched entries
    #[serde(default)]
    pub entry: Vec<WebhookEntry>,
}

impl WebhookPayload {
    /// Whether the delivery comes from a page subscription
    pub fn is_page_subscription(&self) -> bool {
        self.object == "page"
    }

    /// Classify every messaging event of every entry, in delivery order,
    /// dropping the ones that carry nothing actionable.
    pub fn into_events(self) -> Vec<InboundEvent> {
        self.entry
            .into_iter()
            .flat_map(|entry| entry.messaging)
            .filter_map(MessagingEvent::classify)
            .collect()
    }
}

/// One entry of a webhook delivery.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEntry {
    /// Messaging events of this entry
    #[serde(default)]
    pub messaging: Vec<MessagingEvent>,
}

/// Raw messaging event as delivered by the platform.
#[derive(Debug, Clone, Deserialize)]
pub struct MessagingEvent {
    /// Who sent the event
    pub sender: Participant,
    /// Present for text messages and quick-reply taps
    #[serde(default)]
    pub message: Option<IncomingMessage>,
    /// Present for postback button taps
    #[serde(default)]
    pub postback: Option<Postback>,
}

/// Sender or recipient reference.
#[derive(Debug, Clone, Deserialize)]
pub struct Participant {
    /// Page-scoped id
    pub id: SenderId,
}

/// Message part of an inbound event.
#[derive(Debug, Clone, Deserialize)]
pub struct IncomingMessage {
    /// Typed text
    #[serde(default)]
    pub text: Option<String>,
    /// Set when the user tapped a quick reply
    #[serde(default)]
    pub quick_reply: Option<QuickReplyTap>,
    /// Set for copies of messages the page itself sent
    #[serde(default)]
    pub is_echo: bool,
}

/// Payload of a tapped quick reply.
#[derive(Debug, Clone, Deserialize)]
pub struct QuickReplyTap {
    /// Payload attached when the quick reply was sent
    pub payload: String,
}

/// Payload of a tapped postback button.
#[derive(Debug, Clone, Deserialize)]
pub struct Postback {
    /// Payload attached when the button was sent
    pub payload: String,
}

/// Where a structured reply came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    /// Quick reply tap (arrives as a message)
    QuickReply,
    /// Postback button tap
    Postback,
}

/// Inbound event after classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    /// Free text typed by the user
    Message {
        /// Who sent it
        sender: SenderId,
        /// Non-empty text
        text: String,
    },
    /// A tap on a control we rendered earlier
    StructuredReply {
        /// Who tapped
        sender: SenderId,
        /// Opaque payload we attached to the control
        payload: String,
        /// Quick reply or postback
        source: ReplySource,
    },
}

impl InboundEvent {
    /// Who the event came from
    pub fn sender(&self) -> &SenderId {
        match self {
            Self::Message { sender, .. } | Self::StructuredReply { sender, .. } => sender,
        }
    }
}

impl MessagingEvent {
    /// Classify a raw event. Quick replies are folded into structured replies
    /// so quick-reply and postback buttons share one decode path.
    pub fn classify(self) -> Option<InboundEvent> {
        let sender = self.sender.id;

        if let Some(message) = self.message {
            if message.is_echo {
                return None;
            }
            if let Some(tap) = message.quick_reply {
                return Some(InboundEvent::StructuredReply {
                    sender,
                    payload: tap.payload,
                    source: ReplySource::QuickReply,
                });
            }
            return message
                .text
                .filter(|text| !text.trim().is_empty())
                .map(|text| InboundEvent::Message { sender, text });
        }

        self.postback.map(|postback| InboundEvent::StructuredReply {
            sender,
            payload: postback.payload,
            source: ReplySource::Postback,
        })
    }
}

// =============================================================================
// Outbound
// =============================================================================

/// Sender action shown in the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SenderAction {
    /// Show the typing bubble
    TypingOn,
    /// Hide the typing bubble
    TypingOff,
    /// Mark the last message as read
    MarkSeen,
}

impl SenderAction {
    /// Typing indicator on or off
    pub fn typing(on: bool) -> Self {
        if on {
            Self::TypingOn
        } else {
            Self::TypingOff
        }
    }
}

/// Outbound message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    /// Plain text body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Structured attachment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,
    /// Quick replies shown under the message
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub quick_replies: Vec<QuickReply>,
}

impl OutboundMessage {
    /// Plain text message
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Generic template (horizontal carousel) message
    pub fn generic(elements: Vec<Element>) -> Self {
        Self {
            attachment: Some(Attachment::Template(Template::Generic { elements })),
            ..Self::default()
        }
    }

    /// Attach quick replies
    #[must_use]
    pub fn with_quick_replies(mut self, quick_replies: Vec<QuickReply>) -> Self {
        self.quick_replies = quick_replies;
        self
    }
}

/// Message attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum Attachment {
    /// Structured template
    Template(Template),
}

/// Structured template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "template_type", rename_all = "snake_case")]
pub enum Template {
    /// Carousel of cards
    Generic {
        /// Cards, at most ten
        elements: Vec<Element>,
    },
}

/// One card of a generic template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    /// Bold first line
    pub title: String,
    /// Second line
    pub subtitle: String,
    /// Card image; empty when the track has no artwork
    pub image_url: String,
    /// Card buttons
    pub buttons: Vec<Button>,
}

/// Card button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Button {
    /// Sends `payload` back as a postback event
    Postback {
        /// Button label
        title: String,
        /// Opaque payload
        payload: String,
    },
}

/// Quick reply chip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "content_type", rename_all = "snake_case")]
pub enum QuickReply {
    /// Text chip; tapping sends `payload` back with the message
    Text {
        /// Chip label
        title: String,
        /// Opaque payload
        payload: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn classify(value: serde_json::Value) -> Option<InboundEvent> {
        serde_json::from_value::<MessagingEvent>(value)
            .unwrap()
            .classify()
    }

    #[test]
    fn test_text_message() {
        let event = classify(json!({
            "sender": {"id": "42"},
            "recipient": {"id": "page"},
            "timestamp": 1,
            "message": {"mid": "m1", "text": "daft punk"}
        }));
        assert_eq!(
            event,
            Some(InboundEvent::Message {
                sender: SenderId::new("42"),
                text: "daft punk".to_string()
            })
        );
    }

    #[test]
    fn test_quick_reply_becomes_structured_reply() {
        let event = classify(json!({
            "sender": {"id": "42"},
            "message": {"text": "More Results", "quick_reply": {"payload": "{\"v\":1}"}}
        }));
        assert_eq!(
            event,
            Some(InboundEvent::StructuredReply {
                sender: SenderId::new("42"),
                payload: "{\"v\":1}".to_string(),
                source: ReplySource::QuickReply,
            })
        );
    }

    #[test]
    fn test_postback() {
        let event = classify(json!({
            "sender": {"id": "42"},
            "postback": {"title": "Add", "payload": "p"}
        }));
        assert!(matches!(
            event,
            Some(InboundEvent::StructuredReply {
                source: ReplySource::Postback,
                ..
            })
        ));
    }

    #[test]
    fn test_ignored_events() {
        // attachment-only message
        assert_eq!(
            classify(json!({"sender": {"id": "1"}, "message": {"attachments": []}})),
            None
        );
        // whitespace text
        assert_eq!(
            classify(json!({"sender": {"id": "1"}, "message": {"text": "   "}})),
            None
        );
        // echo of our own message
        assert_eq!(
            classify(json!({"sender": {"id": "1"}, "message": {"text": "hi", "is_echo": true}})),
            None
        );
        // delivery receipt
        assert_eq!(
            classify(json!({"sender": {"id": "1"}, "delivery": {"watermark": 1}})),
            None
        );
    }

    #[test]
    fn test_payload_flattens_entries_in_order() {
        let payload: WebhookPayload = serde_json::from_value(json!({
            "object": "page",
            "entry": [
                {"messaging": [{"sender": {"id": "a"}, "message": {"text": "one"}}]},
                {"messaging": [
                    {"sender": {"id": "b"}, "message": {"text": "two"}},
                    {"sender": {"id": "b"}, "read": {"watermark": 1}}
                ]}
            ]
        }))
        .unwrap();

        assert!(payload.is_page_subscription());
        let events = payload.into_events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].sender().as_str(), "a");
        assert_eq!(events[1].sender().as_str(), "b");
    }

    #[test]
    fn test_generic_template_wire_format() {
        let message = OutboundMessage::generic(vec![Element {
            title: "Get Lucky".to_string(),
            subtitle: "Daft Punk".to_string(),
            image_url: String::new(),
            buttons: vec![Button::Postback {
                title: "Add".to_string(),
                payload: "p".to_string(),
            }],
        }])
        .with_quick_replies(vec![QuickReply::Text {
            title: "More Results".to_string(),
            payload: "q".to_string(),
        }]);

        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({
                "attachment": {
                    "type": "template",
                    "payload": {
                        "template_type": "generic",
                        "elements": [{
                            "title": "Get Lucky",
                            "subtitle": "Daft Punk",
                            "image_url": "",
                            "buttons": [{"type": "postback", "title": "Add", "payload": "p"}]
                        }]
                    }
                },
                "quick_replies": [{"content_type": "text", "title": "More Results", "payload": "q"}]
            })
        );
    }

    #[test]
    fn test_text_message_wire_format() {
        assert_eq!(
            serde_json::to_value(OutboundMessage::text("hi")).unwrap(),
            json!({"text": "hi"})
        );
        assert_eq!(
            serde_json::to_value(SenderAction::MarkSeen).unwrap(),
            json!("mark_seen")
        );
    }
}
