//! # Report Repository
//!
//! Read-only aggregates for the dashboard. Everything is recomputed from
//! the base tables on each call; there is no cache to invalidate.
//!
//! Money sums and rankings count `completed` transactions only, so a
//! voided sale drops out of revenue, profit and the best-seller ranking
//! the moment it is voided. The recent-transactions strip is unfiltered
//! history and does show voided headers.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use tradepost_core::{
    DashboardStats, Money, Product, TopSellingProduct, Transaction, TransactionBreakdown,
    TransactionKind, TransactionStatus,
};

/// Repository for dashboard aggregation.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    /// Creates a new ReportRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReportRepository { pool }
    }

    /// Computes the full dashboard aggregate.
    pub async fn dashboard(&self) -> DbResult<DashboardStats> {
        let total_sales: Money = sqlx::query_scalar(
            "SELECT COALESCE(SUM(total_amount), 0) FROM transactions \
             WHERE kind = ?1 AND status = ?2",
        )
        .bind(TransactionKind::Sale)
        .bind(TransactionStatus::Completed)
        .fetch_one(&self.pool)
        .await?;

        // Profit uses the cost captured on each item at posting time, so
        // later catalog price changes never rewrite history.
        let total_profits: Money = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM((ti.price - ti.cost) * ti.quantity), 0)
            FROM transaction_items ti
            JOIN transactions t ON t.id = ti.transaction_id
            WHERE t.kind = ?1 AND t.status = ?2
            "#,
        )
        .bind(TransactionKind::Sale)
        .bind(TransactionStatus::Completed)
        .fetch_one(&self.pool)
        .await?;

        let low_stock_products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, sku, barcode, name, description, quantity, cost_price,
                   selling_price, min_stock_level, category, is_active, created_at
            FROM products
            WHERE quantity <= min_stock_level
            ORDER BY quantity ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let recent_transactions = sqlx::query_as::<_, Transaction>(
            "SELECT id, kind, partner_id, user_id, total_amount, status, notes, transaction_date \
             FROM transactions ORDER BY transaction_date DESC LIMIT 5",
        )
        .fetch_all(&self.pool)
        .await?;

        let top_selling_products = sqlx::query_as::<_, TopSellingProduct>(
            r#"
            SELECT p.id AS product_id, p.name AS name, SUM(ti.quantity) AS total_sold
            FROM transaction_items ti
            JOIN transactions t ON t.id = ti.transaction_id
            JOIN products p ON p.id = ti.product_id
            WHERE t.kind = ?1 AND t.status = ?2
            GROUP BY p.id, p.name
            ORDER BY total_sold DESC, p.id ASC
            LIMIT 5
            "#,
        )
        .bind(TransactionKind::Sale)
        .bind(TransactionStatus::Completed)
        .fetch_all(&self.pool)
        .await?;

        let breakdown = self.breakdown().await?;

        debug!(
            total_sales = %total_sales,
            low_stock = low_stock_products.len(),
            "Computed dashboard"
        );
        Ok(DashboardStats {
            total_sales,
            total_profits,
            low_stock_count: low_stock_products.len() as i64,
            low_stock_products,
            recent_transactions,
            top_selling_products,
            breakdown,
        })
    }

    /// Completed-transaction money totals grouped by kind.
    async fn breakdown(&self) -> DbResult<TransactionBreakdown> {
        let rows = sqlx::query_as::<_, (TransactionKind, Money)>(
            "SELECT kind, COALESCE(SUM(total_amount), 0) FROM transactions \
             WHERE status = ?1 GROUP BY kind",
        )
        .bind(TransactionStatus::Completed)
        .fetch_all(&self.pool)
        .await?;

        let mut breakdown = TransactionBreakdown {
            sales: Money::zero(),
            purchases: Money::zero(),
            sale_returns: Money::zero(),
            purchase_returns: Money::zero(),
            adjustments: Money::zero(),
        };
        for (kind, total) in rows {
            match kind {
                TransactionKind::Sale => breakdown.sales = total,
                TransactionKind::Purchase => breakdown.purchases = total,
                TransactionKind::SaleReturn => breakdown.sale_returns = total,
                TransactionKind::PurchaseReturn => breakdown.purchase_returns = total,
                TransactionKind::Adjustment => breakdown.adjustments = total,
                // Payroll and expense totals have no slot on the dashboard.
                TransactionKind::Payroll | TransactionKind::Expense => {}
            }
        }
        Ok(breakdown)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use tradepost_core::{CreateProductRequest, CreateTransactionRequest, TransactionItemInput};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn seed_product(
        db: &Database,
        name: &str,
        quantity: i64,
        cost_cents: i64,
        sell_cents: i64,
    ) -> String {
        db.products()
            .create(&CreateProductRequest {
                sku: None,
                barcode: None,
                name: name.to_string(),
                description: None,
                quantity,
                cost_price: Money::from_cents(cost_cents),
                selling_price: Money::from_cents(sell_cents),
                min_stock_level: 5,
                category: None,
                is_active: true,
            })
            .await
            .unwrap()
            .id
    }

    async fn post_sale(db: &Database, items: Vec<TransactionItemInput>) -> Transaction {
        db.transactions()
            .create_posted(&CreateTransactionRequest {
                kind: TransactionKind::Sale,
                partner_id: None,
                user_id: "u-admin".to_string(),
                items,
                notes: None,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_empty_dashboard_is_all_zeroes() {
        let db = test_db().await;
        let stats = db.reports().dashboard().await.unwrap();

        assert!(stats.total_sales.is_zero());
        assert!(stats.total_profits.is_zero());
        assert_eq!(stats.low_stock_count, 0);
        assert!(stats.recent_transactions.is_empty());
        assert!(stats.top_selling_products.is_empty());
        assert!(stats.breakdown.sales.is_zero());
    }

    #[tokio::test]
    async fn test_sale_feeds_every_aggregate() {
        let db = test_db().await;
        let mouse = seed_product(&db, "Wireless Mouse", 50, 1000, 2500).await;
        let keyboard = seed_product(&db, "Mechanical Keyboard", 20, 4000, 9000).await;

        post_sale(
            &db,
            vec![
                TransactionItemInput {
                    product_id: mouse.clone(),
                    quantity: 2,
                    price: Money::from_cents(2500),
                },
                TransactionItemInput {
                    product_id: keyboard.clone(),
                    quantity: 1,
                    price: Money::from_cents(9000),
                },
            ],
        )
        .await;

        let stats = db.reports().dashboard().await.unwrap();
        assert_eq!(stats.total_sales, Money::from_cents(14000));
        // (25.00 − 10.00) × 2 + (90.00 − 40.00) × 1 = 80.00
        assert_eq!(stats.total_profits, Money::from_cents(8000));
        assert_eq!(stats.breakdown.sales, Money::from_cents(14000));
        assert_eq!(stats.recent_transactions.len(), 1);

        assert_eq!(stats.top_selling_products.len(), 2);
        assert_eq!(stats.top_selling_products[0].product_id, mouse);
        assert_eq!(stats.top_selling_products[0].total_sold, 2);
        assert_eq!(stats.top_selling_products[1].total_sold, 1);
    }

    #[tokio::test]
    async fn test_voided_sale_drops_out_of_sums() {
        let db = test_db().await;
        let mouse = seed_product(&db, "Wireless Mouse", 50, 1000, 2500).await;

        let posted = post_sale(
            &db,
            vec![TransactionItemInput {
                product_id: mouse,
                quantity: 2,
                price: Money::from_cents(2500),
            }],
        )
        .await;
        db.transactions().void(&posted.id, "u-admin").await.unwrap();

        let stats = db.reports().dashboard().await.unwrap();
        assert!(stats.total_sales.is_zero());
        assert!(stats.total_profits.is_zero());
        assert!(stats.top_selling_products.is_empty());
        assert!(stats.breakdown.sales.is_zero());
        // History still shows the voided sale and its compensating adjustment.
        assert_eq!(stats.recent_transactions.len(), 2);
    }

    #[tokio::test]
    async fn test_low_stock_threshold_is_inclusive() {
        let db = test_db().await;
        seed_product(&db, "Nearly Out", 5, 100, 200).await;
        seed_product(&db, "Well Stocked", 50, 100, 200).await;

        let stats = db.reports().dashboard().await.unwrap();
        assert_eq!(stats.low_stock_count, 1);
        assert_eq!(stats.low_stock_products[0].name, "Nearly Out");
    }
}
