//! Reporting handlers
//!
//! GET /api/reports/dashboard - sales/profit totals, low-stock strip,
//!                              recent transactions, best sellers, breakdown

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use tradepost_core::DashboardStats;

use crate::error::ApiResult;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/dashboard", get(dashboard))
}

async fn dashboard(State(state): State<Arc<AppState>>) -> ApiResult<DashboardStats> {
    let stats = state.db.reports().dashboard().await?;
    Ok(Json(stats))
}
