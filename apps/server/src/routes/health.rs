//! Liveness probe
//!
//! GET /api/health - 200 `{status: "ok"}` when the database answers

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
}

pub async fn health(State(state): State<Arc<AppState>>) -> ApiResult<HealthResponse> {
    if !state.db.health_check().await {
        return Err(ApiError::internal("Database unreachable"));
    }
    Ok(Json(HealthResponse { status: "ok" }))
}
