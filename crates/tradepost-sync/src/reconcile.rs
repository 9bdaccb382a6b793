//! # Snapshot Reconciler
//!
//! Applies an incoming peer snapshot to the local store, collection by
//! collection:
//!
//! - **Products / partners** upsert by name: the matching local row is
//!   fully overwritten (keeping its local id), unknown names insert fresh
//!   rows. Last writer wins; there is no timestamp comparison.
//! - **Transactions** insert by their origin-assigned UUID and skip ids
//!   already present, so replays change nothing.
//!
//! Rows are applied one at a time without a wrapping store transaction; a
//! failure mid-collection keeps the rows already applied. That is safe
//! because every row operation is idempotent and the next trigger simply
//! retries.

use tracing::{debug, info};

use crate::error::SyncResult;
use crate::protocol::{SyncProcessResponse, SyncSnapshot};
use tradepost_db::Database;

/// Applies incoming snapshots and produces local ones.
#[derive(Debug, Clone)]
pub struct Reconciler {
    db: Database,
}

impl Reconciler {
    /// Creates a reconciler over the local store.
    pub fn new(db: Database) -> Self {
        Reconciler { db }
    }

    /// Reads the complete local state for shipping to a peer.
    pub async fn snapshot(&self) -> SyncResult<SyncSnapshot> {
        Ok(SyncSnapshot {
            products: self.db.products().list_all().await?,
            partners: self.db.partners().list_all().await?,
            transactions: self.db.transactions().list_all().await?,
        })
    }

    /// Applies one incoming snapshot and answers with the local state
    /// after application.
    pub async fn process(&self, incoming: &SyncSnapshot) -> SyncResult<SyncProcessResponse> {
        let received_count = incoming.counts();

        for product in &incoming.products {
            self.db.products().upsert_from_peer(product).await?;
        }
        for partner in &incoming.partners {
            self.db.partners().upsert_from_peer(partner).await?;
        }

        let mut inserted_transactions = 0usize;
        for transaction in &incoming.transactions {
            if self.db.transactions().insert_if_absent(transaction).await? {
                inserted_transactions += 1;
            }
        }

        debug!(
            products = received_count.products,
            partners = received_count.partners,
            transactions = received_count.transactions,
            new_transactions = inserted_transactions,
            "Applied incoming snapshot"
        );

        let current_state = self.snapshot().await?;
        info!(
            received_transactions = received_count.transactions,
            new_transactions = inserted_transactions,
            returned_transactions = current_state.transactions.len(),
            "Reconciliation complete"
        );

        Ok(SyncProcessResponse {
            success: true,
            received_count,
            current_state,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tradepost_core::{
        CreateProductRequest, Money, Partner, PartnerKind, Product, Transaction, TransactionKind,
        TransactionStatus,
    };
    use tradepost_db::DbConfig;

    async fn reconciler() -> Reconciler {
        Reconciler::new(Database::new(DbConfig::in_memory()).await.unwrap())
    }

    fn remote_product(name: &str, quantity: i64) -> Product {
        Product {
            id: format!("remote-{name}"),
            sku: None,
            barcode: None,
            name: name.to_string(),
            description: None,
            quantity,
            cost_price: Money::from_cents(1000),
            selling_price: Money::from_cents(2500),
            min_stock_level: 5,
            category: None,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    fn remote_transaction(id: &str, cents: i64) -> Transaction {
        Transaction {
            id: id.to_string(),
            kind: TransactionKind::Sale,
            partner_id: None,
            user_id: "u-remote".to_string(),
            total_amount: Money::from_cents(cents),
            status: TransactionStatus::Completed,
            notes: None,
            transaction_date: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_processing_same_product_snapshot_twice_is_stable() {
        let reconciler = reconciler().await;
        let snapshot = SyncSnapshot {
            products: vec![remote_product("Wireless Mouse", 42)],
            ..Default::default()
        };

        reconciler.process(&snapshot).await.unwrap();
        let second = reconciler.process(&snapshot).await.unwrap();

        assert_eq!(second.current_state.products.len(), 1);
        let row = &second.current_state.products[0];
        assert_eq!(row.name, "Wireless Mouse");
        assert_eq!(row.quantity, 42);
        assert_ne!(row.id, "remote-Wireless Mouse", "local id, not the peer's");
    }

    #[tokio::test]
    async fn test_replayed_transactions_do_not_duplicate() {
        let reconciler = reconciler().await;
        let snapshot = SyncSnapshot {
            transactions: vec![
                remote_transaction("t-1", 14000),
                remote_transaction("t-2", 999),
            ],
            ..Default::default()
        };

        let first = reconciler.process(&snapshot).await.unwrap();
        assert_eq!(first.current_state.transactions.len(), 2);

        let second = reconciler.process(&snapshot).await.unwrap();
        assert_eq!(second.current_state.transactions.len(), 2);
        assert_eq!(second.received_count.transactions, 2, "lengths, not inserts");
    }

    #[tokio::test]
    async fn test_name_match_overwrites_local_fields() {
        let reconciler = reconciler().await;

        // Local catalog entry created the ordinary way.
        reconciler
            .db
            .products()
            .create(&CreateProductRequest {
                sku: Some("MS-001".to_string()),
                barcode: None,
                name: "Wireless Mouse".to_string(),
                description: None,
                quantity: 50,
                cost_price: Money::from_cents(1000),
                selling_price: Money::from_cents(2500),
                min_stock_level: 5,
                category: None,
                is_active: true,
            })
            .await
            .unwrap();

        let mut incoming = remote_product("Wireless Mouse", 37);
        incoming.selling_price = Money::from_cents(2799);
        reconciler
            .process(&SyncSnapshot {
                products: vec![incoming],
                ..Default::default()
            })
            .await
            .unwrap();

        let rows = reconciler.db.products().list_all().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].quantity, 37, "peer stock level wins");
        assert_eq!(rows[0].selling_price, Money::from_cents(2799));
    }

    #[tokio::test]
    async fn test_partners_reconcile_like_products() {
        let reconciler = reconciler().await;

        let incoming = Partner {
            id: "remote-p".to_string(),
            name: "Walk-in Customer".to_string(),
            kind: PartnerKind::Customer,
            phone: Some("555-0100".to_string()),
            email: None,
            address: None,
            is_active: true,
            created_at: Utc::now(),
        };

        let snapshot = SyncSnapshot {
            partners: vec![incoming],
            ..Default::default()
        };
        reconciler.process(&snapshot).await.unwrap();
        let response = reconciler.process(&snapshot).await.unwrap();

        assert_eq!(response.current_state.partners.len(), 1);
        assert_eq!(response.received_count.partners, 1);
    }

    #[tokio::test]
    async fn test_empty_snapshot_returns_local_state() {
        let reconciler = reconciler().await;
        reconciler
            .process(&SyncSnapshot {
                transactions: vec![remote_transaction("t-1", 500)],
                ..Default::default()
            })
            .await
            .unwrap();

        let response = reconciler.process(&SyncSnapshot::default()).await.unwrap();
        assert!(response.success);
        assert_eq!(response.received_count.transactions, 0);
        assert_eq!(response.current_state.transactions.len(), 1);
    }
}
