//! Continuation payloads carried by interactive controls.
//!
//! A chat channel delivers every tap as an independent event, so whatever a
//! workflow needs to resume travels inside the control itself. The encoded
//! form is a small versioned JSON object:
//!
//! ```text
//! {"command":"add_track","track_id":"4uLU6hMCjMI75M1A2tKUQC","v":1}
//! {"command":"search_more","limit":10,"query":"daft punk","skip":10,"v":1}
//! ```
//!
//! Decoding fails closed: anything that is not exactly a known command of a
//! known version, with exactly its fields and in-range offsets, is a
//! [`JukeboxError::Decode`].

use crate::presenter::MAX_CARDS;
use jukebox_core::{JukeboxError, Result, TrackId};
use serde::Deserialize;
use serde_json::{json, Value};

/// Current envelope version
pub const PAYLOAD_VERSION: u64 = 1;

/// Longest payload the messaging platform accepts on a button
pub const MAX_PAYLOAD_LEN: usize = 1000;

/// Deepest search offset the catalog will page to
pub const MAX_SEARCH_OFFSET: u32 = 1000;

const VERSION_KEY: &str = "v";
const COMMAND_KEY: &str = "command";

/// Workflow state resumed by the next tap.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum ContinuationPayload {
    /// Append a track to the jukebox playlist
    AddTrack { track_id: TrackId },
    /// Fetch the next carousel of a search
    SearchMore { query: String, skip: u32, limit: u32 },
}

impl ContinuationPayload {
    fn field_names(&self) -> &'static [&'static str] {
        match self {
            Self::AddTrack { .. } => &["track_id"],
            Self::SearchMore { .. } => &["query", "skip", "limit"],
        }
    }

    fn check_bounds(&self) -> Result<()> {
        if let Self::SearchMore { skip, limit, .. } = self {
            if *skip > MAX_SEARCH_OFFSET {
                return Err(JukeboxError::decode(format!(
                    "invalid payload: skip {} exceeds {}",
                    skip, MAX_SEARCH_OFFSET
                )));
            }
            if !(1..=MAX_CARDS).contains(limit) {
                return Err(JukeboxError::decode(format!(
                    "invalid payload: limit {} outside 1..={}",
                    limit, MAX_CARDS
                )));
            }
        }
        Ok(())
    }
}

/// Serialize a payload. The same payload always encodes to the same string.
pub fn encode(payload: &ContinuationPayload) -> String {
    let value = match payload {
        ContinuationPayload::AddTrack { track_id } => json!({
            "v": PAYLOAD_VERSION,
            "command": "add_track",
            "track_id": track_id,
        }),
        ContinuationPayload::SearchMore { query, skip, limit } => json!({
            "v": PAYLOAD_VERSION,
            "command": "search_more",
            "query": query,
            "skip": skip,
            "limit": limit,
        }),
    };
    value.to_string()
}

/// Parse a payload produced by [`encode`].
pub fn decode(encoded: &str) -> Result<ContinuationPayload> {
    let mut value: Value = serde_json::from_str(encoded)
        .map_err(|e| JukeboxError::decode(format!("payload is not JSON: {}", e)))?;

    let object = value
        .as_object_mut()
        .ok_or_else(|| JukeboxError::decode("payload is not an object"))?;

    let version = object
        .remove(VERSION_KEY)
        .ok_or_else(|| JukeboxError::decode("payload has no version"))?;

    match version.as_u64() {
        Some(PAYLOAD_VERSION) => {}
        Some(other) => {
            return Err(JukeboxError::decode(format!(
                "unsupported payload version {}",
                other
            )))
        }
        None => {
            return Err(JukeboxError::decode(format!(
                "payload version is not an unsigned integer: {}",
                version
            )))
        }
    }

    let keys: Vec<String> = object
        .keys()
        .filter(|key| *key != COMMAND_KEY)
        .cloned()
        .collect();

    let payload: ContinuationPayload = serde_json::from_value(value)
        .map_err(|e| JukeboxError::decode(format!("invalid payload: {}", e)))?;

    // serde ignores extra keys on tagged enums
    let fields = payload.field_names();
    if let Some(unknown) = keys.iter().find(|key| !fields.contains(&key.as_str())) {
        return Err(JukeboxError::decode(format!(
            "invalid payload: unknown field `{}`",
            unknown
        )));
    }

    payload.check_bounds()?;
    Ok(payload)
}

/// Whether an encoded payload is short enough to attach to a control.
pub fn fits_transport(encoded: &str) -> bool {
    encoded.chars().count() <= MAX_PAYLOAD_LEN
}
