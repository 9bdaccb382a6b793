//! # Sync Protocol Bodies
//!
//! JSON bodies exchanged by the two-way sync protocol. The same shapes are
//! used on both sides of the wire: a replica POSTs a [`SyncSnapshot`] of
//! itself and receives a [`SyncProcessResponse`] whose `currentState` is
//! the peer's snapshot after applying ours.
//!
//! ## Wire Format
//! ```json
//! {
//!   "success": true,
//!   "receivedCount": { "products": 3, "partners": 2, "transactions": 7 },
//!   "currentState": { "products": [...], "partners": [...], "transactions": [...] }
//! }
//! ```
//!
//! Transaction entries are headers only; line items never travel. Stock
//! levels replicate inside the product rows, so history and inventory
//! cannot drift apart by syncing one without the other.

use serde::{Deserialize, Serialize};
use tradepost_core::{Partner, Product, Transaction};

/// Full replica state as carried by one sync call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncSnapshot {
    pub products: Vec<Product>,
    pub partners: Vec<Partner>,
    pub transactions: Vec<Transaction>,
}

impl SyncSnapshot {
    /// Collection sizes, as reported back to the sender.
    pub fn counts(&self) -> ReceivedCount {
        ReceivedCount {
            products: self.products.len(),
            partners: self.partners.len(),
            transactions: self.transactions.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty() && self.partners.is_empty() && self.transactions.is_empty()
    }
}

/// How many rows of each collection the peer received (array lengths, not
/// rows changed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceivedCount {
    pub products: usize,
    pub partners: usize,
    pub transactions: usize,
}

/// Response of `POST /api/sync/process`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncProcessResponse {
    pub success: bool,
    pub received_count: ReceivedCount,
    /// The peer's complete state after applying the posted snapshot; the
    /// initiator feeds this into its own reconciler as the second leg.
    pub current_state: SyncSnapshot,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_wire_shape() {
        let response = SyncProcessResponse {
            success: true,
            received_count: ReceivedCount {
                products: 3,
                partners: 2,
                transactions: 7,
            },
            current_state: SyncSnapshot::default(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["receivedCount"]["products"], 3);
        assert_eq!(json["receivedCount"]["transactions"], 7);
        assert!(json["currentState"]["products"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_empty_snapshot_roundtrip() {
        let snapshot: SyncSnapshot =
            serde_json::from_str(r#"{"products":[],"partners":[],"transactions":[]}"#).unwrap();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.counts().products, 0);
    }
}
