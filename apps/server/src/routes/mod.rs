//! API routes for the Tradepost server
//!
//! One module per resource; each exposes a `router()` merged here under
//! `/api`. Error responses share the `{code, message}` shape from
//! [`crate::error`].

pub mod accounts;
pub mod employees;
pub mod health;
pub mod journal;
pub mod partners;
pub mod products;
pub mod reports;
pub mod salaries;
pub mod settings;
pub mod sync;
pub mod transactions;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;

/// Build the combined router over shared state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api/products", products::router())
        .nest("/api/partners", partners::router())
        .nest("/api/transactions", transactions::router())
        .nest("/api/journal-entries", journal::router())
        .nest("/api/accounts", accounts::router())
        .nest("/api/employees", employees::router())
        .nest("/api/salaries", salaries::router())
        .nest("/api/settings", settings::router())
        .nest("/api/sync", sync::router())
        .nest("/api/reports", reports::router())
        .route("/api/health", get(health::health))
        .with_state(state)
}
