//! Sync protocol handlers
//!
//! GET  /api/sync/status  - `{lastSync?, status, lastError?}`
//! POST /api/sync/process - inbound leg: apply a peer snapshot, answer with
//!                          received counts and our own full state
//! POST /api/sync/trigger - outbound leg: run the two-way exchange against
//!                          the configured remote; no remote → 400,
//!                          transport failure → 502 and status `error`

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use tracing::info;

use tradepost_sync::{SyncError, SyncOutcome, SyncProcessResponse, SyncSnapshot, SyncStatus};

use crate::error::{ApiError, ApiResult, ValidJson};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/status", get(status))
        .route("/process", post(process))
        .route("/trigger", post(trigger))
}

async fn status(State(state): State<Arc<AppState>>) -> Json<SyncStatus> {
    Json(state.sync_state.current().await)
}

async fn process(
    State(state): State<Arc<AppState>>,
    ValidJson(snapshot): ValidJson<SyncSnapshot>,
) -> ApiResult<SyncProcessResponse> {
    let response = state.reconciler().process(&snapshot).await?;
    Ok(Json(response))
}

async fn trigger(State(state): State<Arc<AppState>>) -> ApiResult<SyncOutcome> {
    let remote_url = resolve_remote_url(&state).await?;
    info!(remote = %remote_url, "Sync triggered");

    state.sync_state.begin().await;
    let reconciler = state.reconciler();
    match state.sync_client.sync_with(&reconciler, &remote_url).await {
        Ok(outcome) => {
            state.sync_state.finish_success().await;
            Ok(Json(outcome))
        }
        Err(err) => {
            state.sync_state.finish_error(err.to_string()).await;
            Err(err.into())
        }
    }
}

/// Server config override wins; otherwise the stored settings row decides.
async fn resolve_remote_url(state: &AppState) -> Result<String, ApiError> {
    if let Some(url) = &state.config.remote_url {
        return Ok(url.clone());
    }
    let settings = state.db.settings().get().await?;
    settings
        .remote_url
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| ApiError::from(SyncError::RemoteUrlMissing))
}
