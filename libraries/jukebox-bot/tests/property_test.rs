//! Property-based tests for continuation payloads and carousel windowing
//!
//! Uses proptest to verify invariants across many random inputs.

use jukebox_bot::codec::{self, MAX_PAYLOAD_LEN, MAX_SEARCH_OFFSET};
use jukebox_bot::{Carousel, ContinuationPayload, PageWindow, UPSTREAM_PAGE_SIZE};
use jukebox_core::{JukeboxError, SearchResult, Track, TrackId};
use proptest::prelude::*;

// ===== Helpers =====

fn arbitrary_payload() -> impl Strategy<Value = ContinuationPayload> {
    prop_oneof![
        "[A-Za-z0-9]{1,22}".prop_map(|id| ContinuationPayload::AddTrack {
            track_id: TrackId::new(id),
        }),
        (".{0,80}", 0u32..=MAX_SEARCH_OFFSET, 1u32..=10).prop_map(|(query, skip, limit)| {
            ContinuationPayload::SearchMore { query, skip, limit }
        }),
    ]
}

fn window_items(total: u32, window: PageWindow, popularity: &[u32]) -> Vec<Track> {
    let count = window.len().min(total.saturating_sub(window.start));
    (0..count)
        .map(|i| {
            let index = window.start + i;
            Track {
                id: TrackId::new(format!("t{}", index)),
                name: format!("Track {}", index),
                artists: Vec::new(),
                album: Default::default(),
                popularity: popularity[i as usize % popularity.len()],
            }
        })
        .collect()
}

// ===== Property Tests =====

proptest! {
    /// Property: every payload survives an encode/decode cycle unchanged
    #[test]
    fn payload_roundtrip(payload in arbitrary_payload()) {
        let encoded = codec::encode(&payload);
        let decoded = codec::decode(&encoded).expect("own encoding must decode");
        prop_assert_eq!(decoded, payload);
    }

    /// Property: encoding is deterministic
    #[test]
    fn encoding_is_stable(payload in arbitrary_payload()) {
        prop_assert_eq!(codec::encode(&payload), codec::encode(&payload.clone()));
    }

    /// Property: arbitrary input either decodes or fails with a decode error
    #[test]
    fn decode_fails_closed(input in ".{0,200}") {
        match codec::decode(&input) {
            Ok(payload) => {
                // Only reachable if the input happens to be a valid envelope
                prop_assert_eq!(codec::decode(&codec::encode(&payload)).ok(), Some(payload));
            }
            Err(e) => prop_assert!(matches!(e, JukeboxError::Decode(_))),
        }
    }

    /// Property: any version other than the current one is rejected
    #[test]
    fn foreign_versions_are_rejected(version in 2u64..1000, id in "[a-z0-9]{1,22}") {
        let encoded = format!(
            r#"{{"v":{},"command":"add_track","track_id":"{}"}}"#,
            version, id
        );
        prop_assert!(matches!(codec::decode(&encoded), Err(JukeboxError::Decode(_))));
    }

    /// Property: short queries always fit on a control
    #[test]
    fn short_queries_fit_transport(query in "[a-z ]{0,200}", skip in 0u32..10_000) {
        let encoded = codec::encode(&ContinuationPayload::SearchMore { query, skip, limit: 10 });
        prop_assert!(encoded.len() < MAX_PAYLOAD_LEN);
        prop_assert!(codec::fits_transport(&encoded));
    }

    /// Property: the window containing `skip` starts on a page boundary and
    /// covers it
    #[test]
    fn window_contains_skip(skip in 0u32..100_000) {
        let window = PageWindow::containing(skip);
        prop_assert_eq!(window.start % UPSTREAM_PAGE_SIZE, 0);
        prop_assert!(window.start <= skip && skip < window.end);
        prop_assert_eq!(window.len(), UPSTREAM_PAGE_SIZE);
    }

    /// Property: a carousel never shows more than `limit` cards, and offers
    /// "more" exactly when results remain past the current screen
    #[test]
    fn carousel_respects_bounds(
        total in 0u32..200,
        skip in 0u32..200,
        limit in 1u32..=10,
        popularity in prop::collection::vec(0u32..100, 1..20),
    ) {
        let window = PageWindow::containing(skip);
        let items = window_items(total, window, &popularity);
        let fetched = items.len() as u32;
        let carousel = Carousel::build("q", skip, limit, window, SearchResult { items, total });

        let offset = skip - window.start;
        if fetched <= 1 || offset >= fetched {
            prop_assert!(carousel.is_none());
        } else {
            let carousel = carousel.expect("carousel for a populated window");
            prop_assert_eq!(carousel.cards.len() as u32, limit.min(fetched - offset));

            match carousel.continuation {
                Some(ContinuationPayload::SearchMore { skip: next, limit: next_limit, .. }) => {
                    prop_assert!(total > skip + limit);
                    prop_assert_eq!(next, skip + limit);
                    prop_assert_eq!(next_limit, limit);
                }
                Some(other) => prop_assert!(false, "unexpected continuation {:?}", other),
                None => prop_assert!(total <= skip + limit),
            }
        }
    }
}
