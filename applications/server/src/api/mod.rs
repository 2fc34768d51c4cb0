/// API route modules
pub mod health;
pub mod oauth;
pub mod webhook;

use crate::state::AppState;
use axum::{routing::get, Router};
use tower_http::trace::{DefaultMakeSpan, TraceLayer};

/// Build the HTTP router
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/webhook", get(webhook::verify).post(webhook::receive))
        .route("/spotify", get(oauth::callback))
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
        .with_state(app_state)
}
