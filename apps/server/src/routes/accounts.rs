//! Chart-of-accounts handlers
//!
//! GET  /api/accounts      - ordered by account code
//! POST /api/accounts      - create, 201; duplicate code → 409
//! GET  /api/accounts/{id} - fetch, 404 when missing

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use tradepost_core::{Account, CreateAccountRequest};

use crate::error::{ApiError, ApiResult, ValidJson};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(fetch))
}

async fn list(State(state): State<Arc<AppState>>) -> ApiResult<Vec<Account>> {
    let accounts = state.db.accounts().list().await?;
    Ok(Json(accounts))
}

async fn create(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<CreateAccountRequest>,
) -> Result<(StatusCode, Json<Account>), ApiError> {
    let account = state.db.accounts().create(&req).await?;
    Ok((StatusCode::CREATED, Json(account)))
}

async fn fetch(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Account> {
    let account = state
        .db
        .accounts()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Account", &id))?;
    Ok(Json(account))
}
