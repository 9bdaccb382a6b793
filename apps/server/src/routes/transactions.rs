//! Transaction posting handlers
//!
//! GET  /api/transactions           - list, filters `type`, `startDate`,
//!                                    `endDate` (RFC3339), `partnerId`
//! POST /api/transactions           - post atomically, 201; missing product
//!                                    reference → 400, nothing persisted
//! GET  /api/transactions/{id}      - header plus line items, 404 when missing
//! POST /api/transactions/{id}/void - flip to voided and post the
//!                                    compensating stock adjustment

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use tradepost_core::{CreateTransactionRequest, Transaction, TransactionKind, TransactionWithItems};
use tradepost_db::TransactionFilter;

use crate::error::{ApiError, ApiResult, ValidJson};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransactionQuery {
    #[serde(rename = "type")]
    kind: Option<TransactionKind>,
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
    partner_id: Option<String>,
}

/// Body for the void operation; carries who performed it so the
/// compensating adjustment is attributed like any other posting.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VoidRequest {
    user_id: String,
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(fetch))
        .route("/{id}/void", post(void))
}

async fn list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TransactionQuery>,
) -> ApiResult<Vec<Transaction>> {
    let filter = TransactionFilter {
        kind: query.kind,
        partner_id: query.partner_id,
        start_date: query.start_date,
        end_date: query.end_date,
        limit: None,
    };
    let transactions = state.db.transactions().list(&filter).await?;
    Ok(Json(transactions))
}

async fn create(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<CreateTransactionRequest>,
) -> Result<(StatusCode, Json<Transaction>), ApiError> {
    let transaction = state
        .db
        .transactions()
        .create_posted(&req)
        .await
        .map_err(|err| ApiError::from(err).posting())?;
    Ok((StatusCode::CREATED, Json(transaction)))
}

async fn fetch(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<TransactionWithItems> {
    let transaction = state
        .db
        .transactions()
        .get_with_items(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Transaction", &id))?;
    Ok(Json(transaction))
}

async fn void(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ValidJson(req): ValidJson<VoidRequest>,
) -> ApiResult<Transaction> {
    let transaction = state.db.transactions().void(&id, &req.user_id).await?;
    Ok(Json(transaction))
}
