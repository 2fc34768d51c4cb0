/// Messaging webhook routes
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use jukebox_core::WebhookPayload;
use serde::Deserialize;
use tracing::{debug, info, warn};

#[derive(Debug, Deserialize)]
pub struct VerifyQuery {
    #[serde(rename = "hub.mode")]
    pub mode: Option<String>,
    #[serde(rename = "hub.verify_token")]
    pub verify_token: Option<String>,
    #[serde(rename = "hub.challenge")]
    pub challenge: Option<String>,
}

/// GET /webhook - Subscription handshake
///
/// Echoes `hub.challenge` when the mode is `subscribe` and the token matches.
pub async fn verify(
    State(app_state): State<AppState>,
    Query(query): Query<VerifyQuery>,
) -> Result<String> {
    let subscribed = query.mode.as_deref() == Some("subscribe")
        && query.verify_token.as_deref() == Some(&*app_state.verify_token);

    if !subscribed {
        warn!(mode = ?query.mode, "Rejected webhook verification");
        return Err(ServerError::Forbidden("verification failed".to_string()));
    }

    info!("Responded to webhook verification request");
    Ok(query.challenge.unwrap_or_default())
}

/// POST /webhook - Event delivery
///
/// Acknowledges at once. The delivery's events are handled in order on a
/// background task; separate deliveries run concurrently.
pub async fn receive(
    State(app_state): State<AppState>,
    Json(payload): Json<WebhookPayload>,
) -> Result<StatusCode> {
    if !payload.is_page_subscription() {
        return Err(ServerError::NotFound(format!(
            "unsupported subscription object {:?}",
            payload.object
        )));
    }

    let events = payload.into_events();
    debug!(events = events.len(), "Webhook delivery received");

    if !events.is_empty() {
        let router = app_state.router.clone();
        tokio::spawn(async move {
            for event in events {
                router.dispatch(event).await;
            }
        });
    }

    Ok(StatusCode::OK)
}
