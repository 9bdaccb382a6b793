//! # Tradepost Server
//!
//! HTTP API over the Tradepost store. The binary in `main.rs` wires
//! configuration, database and router together; everything else lives here
//! so integration tests can boot the same app on an ephemeral port.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          Request Flow                               │
//! │                                                                     │
//! │  HTTP ──► routes::* ──► repositories (tradepost-db) ──► SQLite     │
//! │             │                                                       │
//! │             └──► tradepost-sync (trigger/process/status)           │
//! │                                                                     │
//! │  Errors: DbError / SyncError ──► ApiError ──► {code, message}      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::{ConfigError, ServerConfig};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use state::AppState;

use std::sync::Arc;

use axum::Router;

/// Build the full application router.
pub fn app(state: Arc<AppState>) -> Router {
    routes::router(state)
}
