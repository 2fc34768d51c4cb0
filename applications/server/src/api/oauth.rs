/// OAuth redirect route
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{
    extract::{Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::{error, info, warn};

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    /// Set instead of `code` when the owner denied access
    pub error: Option<String>,
}

/// GET /spotify - Authorization code redirect
///
/// Responds immediately; the code exchange and playlist resolution run in
/// the background.
pub async fn callback(
    State(app_state): State<AppState>,
    Query(query): Query<CallbackQuery>,
) -> Result<StatusCode> {
    if let Some(reason) = query.error {
        warn!(error = %reason, "Catalog authorization denied");
        return Err(ServerError::BadRequest(format!(
            "authorization denied: {}",
            reason
        )));
    }

    let code = query
        .code
        .filter(|code| !code.is_empty())
        .ok_or_else(|| ServerError::BadRequest("missing authorization code".to_string()))?;

    info!("Received catalog authorization code");

    let gateway = app_state.gateway.clone();
    tokio::spawn(async move {
        if let Err(e) = gateway.complete_authorization(&code).await {
            error!(error = %e, "Catalog authorization failed");
        }
    });

    Ok(StatusCode::OK)
}
