//! # Transaction Repository
//!
//! Posting, voiding and querying of business transactions.
//!
//! ## Posting Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      create_posted()                                    │
//! │                                                                         │
//! │  1. Validate request (kind postable, caller set, items sane)            │
//! │  2. Total = Σ(price × quantity), computed here, never trusted from      │
//! │     the client                                                          │
//! │  3. BEGIN                                                               │
//! │     ├─ INSERT transactions header                                       │
//! │     ├─ for each line:                                                   │
//! │     │    ├─ fetch product (missing → error → whole posting rolls back)  │
//! │     │    ├─ INSERT transaction_items (cost frozen from the product)     │
//! │     │    └─ UPDATE products SET quantity = quantity + delta             │
//! │     └─ COMMIT                                                           │
//! │                                                                         │
//! │  Stock direction per kind:                                              │
//! │    sale, purchase_return   → −quantity                                  │
//! │    purchase, sale_return   → +quantity                                  │
//! │    adjustment              → quantity as signed delta                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Voiding never deletes: the header flips to `voided` and a compensating
//! zero-priced adjustment puts the stock back, so the audit trail stays
//! complete and syncs like any other transaction.

use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use tradepost_core::posting::{reversal_quantity, stock_delta, transaction_total};
use tradepost_core::validation::validate_transaction_request;
use tradepost_core::{
    CoreError, CreateTransactionRequest, Money, Transaction, TransactionItem, TransactionKind,
    TransactionStatus, TransactionWithItems,
};

const SELECT_COLUMNS: &str =
    "id, kind, partner_id, user_id, total_amount, status, notes, transaction_date";

/// Optional list filters, combined with AND.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub kind: Option<TransactionKind>,
    pub partner_id: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub limit: Option<i64>,
}

/// Repository for transaction posting and queries.
///
/// ## Usage
/// ```rust,ignore
/// let repo = TransactionRepository::new(pool);
///
/// let posted = repo.create_posted(&request).await?;
/// let voided = repo.void(&posted.id, "u-admin").await?;
/// ```
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    pool: SqlitePool,
}

impl TransactionRepository {
    /// Creates a new TransactionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TransactionRepository { pool }
    }

    // =========================================================================
    // Posting
    // =========================================================================

    /// Posts a transaction atomically: header, line items and stock deltas
    /// all commit together or not at all.
    ///
    /// ## Errors
    /// - Validation failures (non-postable kind, empty items, bad quantities)
    /// - `NotFound` when a line references an unknown product; nothing is
    ///   left behind in that case
    pub async fn create_posted(&self, req: &CreateTransactionRequest) -> DbResult<Transaction> {
        validate_transaction_request(req)?;

        let transaction = Transaction {
            id: Uuid::new_v4().to_string(),
            kind: req.kind,
            partner_id: req.partner_id.clone(),
            user_id: req.user_id.clone(),
            total_amount: transaction_total(&req.items),
            status: TransactionStatus::Completed,
            notes: req.notes.clone(),
            transaction_date: Utc::now(),
        };

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO transactions
                (id, kind, partner_id, user_id, total_amount, status, notes, transaction_date)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&transaction.id)
        .bind(transaction.kind)
        .bind(&transaction.partner_id)
        .bind(&transaction.user_id)
        .bind(transaction.total_amount)
        .bind(transaction.status)
        .bind(&transaction.notes)
        .bind(transaction.transaction_date)
        .execute(&mut *tx)
        .await?;

        for item in &req.items {
            let cost: Money =
                sqlx::query_scalar("SELECT cost_price FROM products WHERE id = ?1")
                    .bind(&item.product_id)
                    .fetch_optional(&mut *tx)
                    .await?
                    .ok_or_else(|| DbError::not_found("Product", &item.product_id))?;

            sqlx::query(
                r#"
                INSERT INTO transaction_items (id, transaction_id, product_id, quantity, price, cost)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
            )
            .bind(Uuid::new_v4().to_string())
            .bind(&transaction.id)
            .bind(&item.product_id)
            .bind(item.quantity)
            .bind(item.price)
            .bind(cost)
            .execute(&mut *tx)
            .await?;

            let delta = stock_delta(req.kind, item.quantity);
            if delta != 0 {
                sqlx::query("UPDATE products SET quantity = quantity + ?1 WHERE id = ?2")
                    .bind(delta)
                    .bind(&item.product_id)
                    .execute(&mut *tx)
                    .await?;
            }
        }

        tx.commit().await?;

        info!(
            id = %transaction.id,
            kind = ?transaction.kind,
            total = %transaction.total_amount,
            items = req.items.len(),
            "Posted transaction"
        );
        Ok(transaction)
    }

    /// Voids a transaction: flips the status and posts a compensating
    /// zero-priced adjustment that reverses the original stock movement.
    ///
    /// Voiding an already-voided transaction fails; stock is only ever
    /// given back once.
    pub async fn void(&self, id: &str, user_id: &str) -> DbResult<Transaction> {
        let mut tx = self.pool.begin().await?;

        let mut transaction = sqlx::query_as::<_, Transaction>(&format!(
            "SELECT {SELECT_COLUMNS} FROM transactions WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DbError::not_found("Transaction", id))?;

        if transaction.is_voided() {
            return Err(CoreError::InvalidTransactionStatus {
                transaction_id: id.to_string(),
                current_status: "voided".to_string(),
            }
            .into());
        }

        sqlx::query("UPDATE transactions SET status = ?1 WHERE id = ?2")
            .bind(TransactionStatus::Voided)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let items = sqlx::query_as::<_, TransactionItem>(
            r#"
            SELECT id, transaction_id, product_id, quantity, price, cost
            FROM transaction_items WHERE transaction_id = ?1
            "#,
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;

        // Reversal lines; kinds that never moved stock produce none.
        let reversals: Vec<(&TransactionItem, i64)> = items
            .iter()
            .map(|item| (item, reversal_quantity(transaction.kind, item.quantity)))
            .filter(|(_, qty)| *qty != 0)
            .collect();

        if !reversals.is_empty() {
            let adjustment_id = Uuid::new_v4().to_string();
            sqlx::query(
                r#"
                INSERT INTO transactions
                    (id, kind, partner_id, user_id, total_amount, status, notes, transaction_date)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                "#,
            )
            .bind(&adjustment_id)
            .bind(TransactionKind::Adjustment)
            .bind(Option::<String>::None)
            .bind(user_id)
            .bind(Money::zero())
            .bind(TransactionStatus::Completed)
            .bind(format!("Void of transaction {id}"))
            .bind(Utc::now())
            .execute(&mut *tx)
            .await?;

            for (item, qty) in reversals {
                sqlx::query(
                    r#"
                    INSERT INTO transaction_items
                        (id, transaction_id, product_id, quantity, price, cost)
                    VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                    "#,
                )
                .bind(Uuid::new_v4().to_string())
                .bind(&adjustment_id)
                .bind(&item.product_id)
                .bind(qty)
                .bind(Money::zero())
                .bind(item.cost)
                .execute(&mut *tx)
                .await?;

                sqlx::query("UPDATE products SET quantity = quantity + ?1 WHERE id = ?2")
                    .bind(qty)
                    .bind(&item.product_id)
                    .execute(&mut *tx)
                    .await?;
            }
        }

        tx.commit().await?;

        transaction.status = TransactionStatus::Voided;
        info!(id = %id, by = %user_id, "Voided transaction");
        Ok(transaction)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Lists transactions, newest first.
    pub async fn list(&self, filter: &TransactionFilter) -> DbResult<Vec<Transaction>> {
        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
            "SELECT {SELECT_COLUMNS} FROM transactions WHERE 1 = 1"
        ));

        if let Some(kind) = filter.kind {
            qb.push(" AND kind = ");
            qb.push_bind(kind);
        }
        if let Some(partner_id) = &filter.partner_id {
            qb.push(" AND partner_id = ");
            qb.push_bind(partner_id.clone());
        }
        if let Some(start) = filter.start_date {
            qb.push(" AND transaction_date >= ");
            qb.push_bind(start);
        }
        if let Some(end) = filter.end_date {
            qb.push(" AND transaction_date <= ");
            qb.push_bind(end);
        }
        qb.push(" ORDER BY transaction_date DESC");
        if let Some(limit) = filter.limit {
            qb.push(" LIMIT ");
            qb.push_bind(limit);
        }

        let transactions = qb
            .build_query_as::<Transaction>()
            .fetch_all(&self.pool)
            .await?;

        debug!(count = transactions.len(), "Listed transactions");
        Ok(transactions)
    }

    /// Returns every transaction header, for the sync snapshot.
    pub async fn list_all(&self) -> DbResult<Vec<Transaction>> {
        let transactions = sqlx::query_as::<_, Transaction>(&format!(
            "SELECT {SELECT_COLUMNS} FROM transactions ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(transactions)
    }

    /// Gets a transaction header by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Transaction>> {
        let transaction = sqlx::query_as::<_, Transaction>(&format!(
            "SELECT {SELECT_COLUMNS} FROM transactions WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(transaction)
    }

    /// Gets a transaction with its line items.
    pub async fn get_with_items(&self, id: &str) -> DbResult<Option<TransactionWithItems>> {
        let Some(transaction) = self.get_by_id(id).await? else {
            return Ok(None);
        };

        let items = sqlx::query_as::<_, TransactionItem>(
            r#"
            SELECT id, transaction_id, product_id, quantity, price, cost
            FROM transaction_items WHERE transaction_id = ?1
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(TransactionWithItems { transaction, items }))
    }

    // =========================================================================
    // Sync
    // =========================================================================

    /// Inserts an incoming transaction header unless its id already exists.
    ///
    /// The id is the cross-replica identity, so replaying the same sync
    /// payload is a no-op. Stock is NOT touched here; replicated stock
    /// levels travel inside the product rows themselves.
    ///
    /// Returns `true` when the row was actually inserted.
    pub async fn insert_if_absent(&self, incoming: &Transaction) -> DbResult<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO transactions
                (id, kind, partner_id, user_id, total_amount, status, notes, transaction_date)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ON CONFLICT(id) DO NOTHING
            "#,
        )
        .bind(&incoming.id)
        .bind(incoming.kind)
        .bind(&incoming.partner_id)
        .bind(&incoming.user_id)
        .bind(incoming.total_amount)
        .bind(incoming.status)
        .bind(&incoming.notes)
        .bind(incoming.transaction_date)
        .execute(&self.pool)
        .await?;

        let inserted = result.rows_affected() > 0;
        if inserted {
            debug!(id = %incoming.id, "Sync: inserted transaction");
        }
        Ok(inserted)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
