//! Store settings handlers
//!
//! GET /api/settings - the singleton row, seeded with defaults on first read
//! PUT /api/settings - patch provided fields

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use tradepost_core::{Settings, UpdateSettingsRequest};

use crate::error::{ApiResult, ValidJson};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(fetch).put(update))
}

async fn fetch(State(state): State<Arc<AppState>>) -> ApiResult<Settings> {
    let settings = state.db.settings().get().await?;
    Ok(Json(settings))
}

async fn update(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<UpdateSettingsRequest>,
) -> ApiResult<Settings> {
    let settings = state.db.settings().update(&req).await?;
    Ok(Json(settings))
}
