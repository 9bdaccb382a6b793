//! Salary payment handlers
//!
//! GET  /api/salaries - list, newest payment first, filter `employeeId`
//! POST /api/salaries - post payment + companion payroll transaction, 201;
//!                      unknown employee → 400

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use tradepost_core::{CreateSalaryRequest, Salary};

use crate::error::{ApiError, ApiResult, ValidJson};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SalaryQuery {
    employee_id: Option<String>,
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(list).post(create))
}

async fn list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SalaryQuery>,
) -> ApiResult<Vec<Salary>> {
    let salaries = state.db.salaries().list(query.employee_id.as_deref()).await?;
    Ok(Json(salaries))
}

async fn create(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<CreateSalaryRequest>,
) -> Result<(StatusCode, Json<Salary>), ApiError> {
    let salary = state
        .db
        .salaries()
        .create_posted(&req)
        .await
        .map_err(|err| ApiError::from(err).posting())?;
    Ok((StatusCode::CREATED, Json(salary)))
}
