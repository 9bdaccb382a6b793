//! # Sync Error Types
//!
//! Error types for sync operations.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Sync Error Categories                             │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌──────────────────┐  ┌───────────────────────┐  │
//! │  │  Configuration  │  │    Transport     │  │     Application       │  │
//! │  │                 │  │                  │  │                       │  │
//! │  │  RemoteUrl      │  │  TransportFailed │  │  Db (reconciliation   │  │
//! │  │  Missing        │  │  Timeout         │  │   leg hit the store)  │  │
//! │  │                 │  │  RemoteRejected  │  │                       │  │
//! │  │                 │  │  InvalidResponse │  │                       │  │
//! │  └─────────────────┘  └──────────────────┘  └───────────────────────┘  │
//! │                                                                         │
//! │  Transport failures abort the current leg only; rows applied by an     │
//! │  earlier leg stay (every row operation is idempotent, retry is safe).  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;
use tradepost_db::DbError;

/// Result type alias for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Sync failure, categorized for HTTP mapping: configuration problems are
/// the caller's fault, transport problems are the peer's.
#[derive(Debug, Error)]
pub enum SyncError {
    /// No remote peer configured in settings or server config.
    #[error("No remote URL configured; set settings.remoteUrl first")]
    RemoteUrlMissing,

    /// Could not reach the remote peer.
    #[error("Sync transport failed: {0}")]
    TransportFailed(String),

    /// The remote peer did not answer in time.
    #[error("Sync request timed out")]
    Timeout,

    /// The remote peer answered with a non-success status.
    #[error("Remote peer rejected sync: HTTP {status}")]
    RemoteRejected { status: u16 },

    /// The remote peer answered 2xx but the body was not a valid
    /// sync response.
    #[error("Invalid sync response: {0}")]
    InvalidResponse(String),

    /// A reconciliation write failed locally.
    #[error(transparent)]
    Db(#[from] DbError),
}

impl From<reqwest::Error> for SyncError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SyncError::Timeout
        } else if err.is_decode() {
            SyncError::InvalidResponse(err.to_string())
        } else {
            SyncError::TransportFailed(err.to_string())
        }
    }
}

impl SyncError {
    /// True for failures worth retrying on the next trigger (the peer may
    /// simply be offline).
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            SyncError::TransportFailed(_)
                | SyncError::Timeout
                | SyncError::RemoteRejected { .. }
                | SyncError::InvalidResponse(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_classification() {
        assert!(SyncError::Timeout.is_transport());
        assert!(SyncError::RemoteRejected { status: 500 }.is_transport());
        assert!(!SyncError::RemoteUrlMissing.is_transport());
        assert!(!SyncError::Db(DbError::PoolExhausted).is_transport());
    }

    #[test]
    fn test_messages_name_the_problem() {
        assert_eq!(
            SyncError::RemoteRejected { status: 503 }.to_string(),
            "Remote peer rejected sync: HTTP 503"
        );
        assert!(SyncError::RemoteUrlMissing.to_string().contains("remoteUrl"));
    }
}
