//! Employee handlers
//!
//! GET    /api/employees        - list, ordered by name
//! POST   /api/employees        - create, 201
//! GET    /api/employees/{id}   - fetch, 404 when missing
//! PUT    /api/employees/{id}   - patch provided fields
//! DELETE /api/employees/{id}   - remove, 204; salary history → 409

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use tradepost_core::{CreateEmployeeRequest, Employee, UpdateEmployeeRequest};

use crate::error::{ApiError, ApiResult, ValidJson};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(fetch).put(update).delete(remove))
}

async fn list(State(state): State<Arc<AppState>>) -> ApiResult<Vec<Employee>> {
    let employees = state.db.employees().list().await?;
    Ok(Json(employees))
}

async fn create(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<CreateEmployeeRequest>,
) -> Result<(StatusCode, Json<Employee>), ApiError> {
    let employee = state.db.employees().create(&req).await?;
    Ok((StatusCode::CREATED, Json(employee)))
}

async fn fetch(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Employee> {
    let employee = state
        .db
        .employees()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Employee", &id))?;
    Ok(Json(employee))
}

async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ValidJson(req): ValidJson<UpdateEmployeeRequest>,
) -> ApiResult<Employee> {
    let employee = state.db.employees().update(&id, &req).await?;
    Ok(Json(employee))
}

async fn remove(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.db.employees().delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
