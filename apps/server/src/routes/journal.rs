//! Journal entry handlers
//!
//! GET  /api/journal-entries - headers, newest entry date first
//! POST /api/journal-entries - post atomically, 201; imbalance → 400
//!                             IMBALANCE, unknown account → 400

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use tradepost_core::{CreateJournalEntryRequest, JournalEntry};

use crate::error::{ApiError, ApiResult, ValidJson};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(list).post(create))
}

async fn list(State(state): State<Arc<AppState>>) -> ApiResult<Vec<JournalEntry>> {
    let entries = state.db.journal().list().await?;
    Ok(Json(entries))
}

async fn create(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<CreateJournalEntryRequest>,
) -> Result<(StatusCode, Json<JournalEntry>), ApiError> {
    let entry = state
        .db
        .journal()
        .create_posted(&req)
        .await
        .map_err(|err| ApiError::from(err).posting())?;
    Ok((StatusCode::CREATED, Json(entry)))
}
