//! # Sync Client
//!
//! The initiator side of the two-way protocol: push the local snapshot to
//! the peer, then apply the peer's returned state locally. Both legs run
//! sequentially inside one trigger; a failed first leg skips the second.

use std::time::Duration;

use serde::Serialize;
use tracing::{info, warn};

use crate::error::{SyncError, SyncResult};
use crate::protocol::{ReceivedCount, SyncProcessResponse, SyncSnapshot};
use crate::reconcile::Reconciler;

/// Per-request timeout for sync calls. Snapshots of a small-business store
/// fit comfortably in one request.
const SYNC_TIMEOUT: Duration = Duration::from_secs(30);

/// What one completed trigger moved in each direction.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncOutcome {
    /// Counts the remote peer acknowledged receiving from us.
    pub pushed: ReceivedCount,
    /// Counts of the remote state we applied locally.
    pub pulled: ReceivedCount,
}

/// HTTP client for the push leg of sync.
#[derive(Debug, Clone)]
pub struct SyncClient {
    http: reqwest::Client,
}

impl SyncClient {
    /// Creates a sync client with the standard timeout.
    pub fn new() -> SyncResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(SYNC_TIMEOUT)
            .build()
            .map_err(|e| SyncError::TransportFailed(e.to_string()))?;
        Ok(SyncClient { http })
    }

    /// Runs the full two-way protocol against `remote_url`.
    ///
    /// Leg 1 POSTs the local snapshot to the peer's `/api/sync/process`;
    /// leg 2 feeds the peer's `currentState` into the local reconciler.
    pub async fn sync_with(
        &self,
        reconciler: &Reconciler,
        remote_url: &str,
    ) -> SyncResult<SyncOutcome> {
        let local = reconciler.snapshot().await?;
        info!(
            remote = %remote_url,
            products = local.products.len(),
            partners = local.partners.len(),
            transactions = local.transactions.len(),
            "Starting two-way sync"
        );

        let response = self.push_snapshot(remote_url, &local).await?;

        let applied = reconciler.process(&response.current_state).await?;

        let outcome = SyncOutcome {
            pushed: response.received_count,
            pulled: applied.received_count,
        };
        info!(
            remote = %remote_url,
            pulled_transactions = outcome.pulled.transactions,
            "Two-way sync complete"
        );
        Ok(outcome)
    }

    /// Leg 1: POST a snapshot to the peer and parse its response.
    pub async fn push_snapshot(
        &self,
        remote_url: &str,
        snapshot: &SyncSnapshot,
    ) -> SyncResult<SyncProcessResponse> {
        let url = process_url(remote_url);

        let response = self.http.post(&url).json(snapshot).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!(remote = %url, status = %status, "Remote peer rejected sync");
            return Err(SyncError::RemoteRejected {
                status: status.as_u16(),
            });
        }

        Ok(response.json::<SyncProcessResponse>().await?)
    }
}

/// Joins the peer base URL with the process endpoint, tolerating a
/// trailing slash.
fn process_url(remote_url: &str) -> String {
    if remote_url.ends_with('/') {
        format!("{remote_url}api/sync/process")
    } else {
        format!("{remote_url}/api/sync/process")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_url_join() {
        assert_eq!(
            process_url("http://peer.local:5000"),
            "http://peer.local:5000/api/sync/process"
        );
        assert_eq!(
            process_url("http://peer.local:5000/"),
            "http://peer.local:5000/api/sync/process"
        );
    }

    #[test]
    fn test_outcome_wire_shape() {
        let outcome = SyncOutcome {
            pushed: ReceivedCount {
                products: 3,
                partners: 2,
                transactions: 7,
            },
            pulled: ReceivedCount {
                products: 3,
                partners: 2,
                transactions: 9,
            },
        };
        let json = serde_json::to_value(outcome).unwrap();
        assert_eq!(json["pushed"]["transactions"], 7);
        assert_eq!(json["pulled"]["transactions"], 9);
    }
}
