//! # Sync Status Tracking
//!
//! Shared tracker behind `GET /api/sync/status`. Triggers flip it to
//! `syncing` while running and land on `success` or `error`; the last
//! successful sync time survives later failures so operators can see how
//! stale a replica is.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// Lifecycle phase of the sync loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncPhase {
    Idle,
    Syncing,
    Success,
    Error,
}

/// Current sync status for external queries.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncStatus {
    /// Completion time of the last successful trigger.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_sync: Option<DateTime<Utc>>,
    pub status: SyncPhase,
    /// Message of the most recent failure; cleared by the next success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

impl Default for SyncStatus {
    fn default() -> Self {
        SyncStatus {
            last_sync: None,
            status: SyncPhase::Idle,
            last_error: None,
        }
    }
}

/// Cloneable handle to the shared status, one per server instance.
#[derive(Debug, Clone, Default)]
pub struct SyncState {
    inner: Arc<RwLock<SyncStatus>>,
}

impl SyncState {
    pub fn new() -> Self {
        SyncState::default()
    }

    /// Returns a copy of the current status.
    pub async fn current(&self) -> SyncStatus {
        self.inner.read().await.clone()
    }

    /// Marks a trigger as running.
    pub async fn begin(&self) {
        let mut status = self.inner.write().await;
        status.status = SyncPhase::Syncing;
    }

    /// Marks the running trigger as completed successfully.
    pub async fn finish_success(&self) {
        let mut status = self.inner.write().await;
        status.status = SyncPhase::Success;
        status.last_sync = Some(Utc::now());
        status.last_error = None;
    }

    /// Marks the running trigger as failed, keeping the previous
    /// `last_sync` timestamp.
    pub async fn finish_error(&self, message: impl Into<String>) {
        let mut status = self.inner.write().await;
        status.status = SyncPhase::Error;
        status.last_error = Some(message.into());
    }
}
