//! Partner handlers
//!
//! GET    /api/partners        - list, filters `type` (customer|supplier), `search`
//! POST   /api/partners        - create, 201
//! GET    /api/partners/{id}   - fetch, 404 when missing
//! PUT    /api/partners/{id}   - patch provided fields
//! DELETE /api/partners/{id}   - remove, 204

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use tradepost_core::{CreatePartnerRequest, Partner, PartnerKind, UpdatePartnerRequest};

use crate::error::{ApiError, ApiResult, ValidJson};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PartnerQuery {
    #[serde(rename = "type")]
    kind: Option<PartnerKind>,
    search: Option<String>,
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(fetch).put(update).delete(remove))
}

async fn list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PartnerQuery>,
) -> ApiResult<Vec<Partner>> {
    let partners = state
        .db
        .partners()
        .list(query.search.as_deref(), query.kind)
        .await?;
    Ok(Json(partners))
}

async fn create(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<CreatePartnerRequest>,
) -> Result<(StatusCode, Json<Partner>), ApiError> {
    let partner = state.db.partners().create(&req).await?;
    Ok((StatusCode::CREATED, Json(partner)))
}

async fn fetch(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Partner> {
    let partner = state
        .db
        .partners()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Partner", &id))?;
    Ok(Json(partner))
}

async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ValidJson(req): ValidJson<UpdatePartnerRequest>,
) -> ApiResult<Partner> {
    let partner = state.db.partners().update(&id, &req).await?;
    Ok(Json(partner))
}

async fn remove(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.db.partners().delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
