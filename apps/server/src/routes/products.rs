//! Product catalog handlers
//!
//! GET    /api/products        - list, filters `search` (name/sku/barcode), `category`
//! POST   /api/products        - create, 201
//! GET    /api/products/{id}   - fetch, 404 when missing
//! PUT    /api/products/{id}   - patch provided fields (stock excluded)
//! DELETE /api/products/{id}   - remove, 204

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use tradepost_core::{CreateProductRequest, Product, UpdateProductRequest};

use crate::error::{ApiError, ApiResult, ValidJson};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductQuery {
    search: Option<String>,
    category: Option<String>,
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(fetch).put(update).delete(remove))
}

async fn list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ProductQuery>,
) -> ApiResult<Vec<Product>> {
    let products = state
        .db
        .products()
        .list(query.search.as_deref(), query.category.as_deref())
        .await?;
    Ok(Json(products))
}

async fn create(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<CreateProductRequest>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let product = state.db.products().create(&req).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

async fn fetch(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Product> {
    let product = state
        .db
        .products()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", &id))?;
    Ok(Json(product))
}

async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ValidJson(req): ValidJson<UpdateProductRequest>,
) -> ApiResult<Product> {
    let product = state.db.products().update(&id, &req).await?;
    Ok(Json(product))
}

async fn remove(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.db.products().delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
