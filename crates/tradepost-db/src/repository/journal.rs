//! # Journal Repository
//!
//! Posting and listing of double-entry journal entries.
//!
//! ## Posting Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      create_posted()                                    │
//! │                                                                         │
//! │  1. Validate lines (non-negative sides, not all zero)                   │
//! │  2. Σdebit == Σcredit, checked before anything is written               │
//! │  3. BEGIN                                                               │
//! │     ├─ INSERT journal_entries header                                    │
//! │     ├─ for each line:                                                   │
//! │     │    ├─ INSERT journal_items                                        │
//! │     │    └─ UPDATE accounts SET balance = balance + (debit − credit)    │
//! │     │       (no row updated → unknown account → roll back)              │
//! │     └─ COMMIT                                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use tradepost_core::posting::{balance_delta, check_journal_balance};
use tradepost_core::validation::validate_journal_request;
use tradepost_core::{CreateJournalEntryRequest, JournalEntry, JournalItem};

/// Repository for journal entry posting and queries.
#[derive(Debug, Clone)]
pub struct JournalRepository {
    pool: SqlitePool,
}

impl JournalRepository {
    /// Creates a new JournalRepository.
    pub fn new(pool: SqlitePool) -> Self {
        JournalRepository { pool }
    }

    /// Posts a journal entry atomically, keeping every referenced account
    /// balance in step with its items.
    ///
    /// ## Errors
    /// - Validation failures (empty items, negative sides, all-zero entry)
    /// - `Imbalance` when Σdebit ≠ Σcredit; nothing is written
    /// - `NotFound` when a line references an unknown account; the whole
    ///   entry rolls back
    pub async fn create_posted(&self, req: &CreateJournalEntryRequest) -> DbResult<JournalEntry> {
        validate_journal_request(req)?;
        check_journal_balance(&req.items)?;

        let entry = JournalEntry {
            id: Uuid::new_v4().to_string(),
            description: req.description.trim().to_string(),
            entry_date: req.entry_date.unwrap_or_else(Utc::now),
            reference: req.reference.clone(),
        };

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO journal_entries (id, description, entry_date, reference)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&entry.id)
        .bind(&entry.description)
        .bind(entry.entry_date)
        .bind(&entry.reference)
        .execute(&mut *tx)
        .await?;

        for item in &req.items {
            sqlx::query(
                r#"
                INSERT INTO journal_items (id, journal_entry_id, account_id, debit, credit)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(Uuid::new_v4().to_string())
            .bind(&entry.id)
            .bind(&item.account_id)
            .bind(item.debit)
            .bind(item.credit)
            .execute(&mut *tx)
            .await?;

            let updated =
                sqlx::query("UPDATE accounts SET balance = balance + ?1 WHERE id = ?2")
                    .bind(balance_delta(item.debit, item.credit))
                    .bind(&item.account_id)
                    .execute(&mut *tx)
                    .await?;

            if updated.rows_affected() == 0 {
                return Err(DbError::not_found("Account", &item.account_id));
            }
        }

        tx.commit().await?;

        info!(
            id = %entry.id,
            items = req.items.len(),
            "Posted journal entry"
        );
        Ok(entry)
    }

    /// Lists journal entry headers, newest first.
    pub async fn list(&self) -> DbResult<Vec<JournalEntry>> {
        let entries = sqlx::query_as::<_, JournalEntry>(
            "SELECT id, description, entry_date, reference FROM journal_entries \
             ORDER BY entry_date DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = entries.len(), "Listed journal entries");
        Ok(entries)
    }

    /// Lines of one entry, in insertion order.
    pub async fn items_for_entry(&self, entry_id: &str) -> DbResult<Vec<JournalItem>> {
        let items = sqlx::query_as::<_, JournalItem>(
            r#"
            SELECT id, journal_entry_id, account_id, debit, credit
            FROM journal_items WHERE journal_entry_id = ?1
            "#,
        )
        .bind(entry_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use tradepost_core::{
        AccountKind, CoreError, CreateAccountRequest, JournalItemInput, Money,
    };

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn seed_account(db: &Database, code: &str, name: &str, kind: AccountKind) -> String {
        db.accounts()
            .create(&CreateAccountRequest {
                code: code.to_string(),
                name: name.to_string(),
                kind,
                parent_account_id: None,
                balance: Money::zero(),
            })
            .await
            .unwrap()
            .id
    }

    fn entry(items: Vec<JournalItemInput>) -> CreateJournalEntryRequest {
        CreateJournalEntryRequest {
            description: "Opening entry".to_string(),
            entry_date: None,
            reference: None,
            items,
        }
    }

    async fn balance_of(db: &Database, id: &str) -> Money {
        db.accounts().get_by_id(id).await.unwrap().unwrap().balance
    }

    #[tokio::test]
    async fn test_balanced_entry_moves_both_accounts() {
        let db = test_db().await;
        let cash = seed_account(&db, "1000", "Cash", AccountKind::Asset).await;
        let revenue = seed_account(&db, "4000", "Sales Revenue", AccountKind::Revenue).await;

        let posted = db
            .journal()
            .create_posted(&entry(vec![
                JournalItemInput {
                    account_id: cash.clone(),
                    debit: Money::from_cents(10000),
                    credit: Money::zero(),
                },
                JournalItemInput {
                    account_id: revenue.clone(),
                    debit: Money::zero(),
                    credit: Money::from_cents(10000),
                },
            ]))
            .await
            .unwrap();

        assert_eq!(balance_of(&db, &cash).await, Money::from_cents(10000));
        assert_eq!(balance_of(&db, &revenue).await, Money::from_cents(-10000));

        let items = db.journal().items_for_entry(&posted.id).await.unwrap();
        assert_eq!(items.len(), 2);
    }

    #[tokio::test]
    async fn test_imbalanced_entry_rejected_before_any_write() {
        let db = test_db().await;
        let cash = seed_account(&db, "1000", "Cash", AccountKind::Asset).await;
        let revenue = seed_account(&db, "4000", "Sales Revenue", AccountKind::Revenue).await;

        let err = db
            .journal()
            .create_posted(&entry(vec![
                JournalItemInput {
                    account_id: cash.clone(),
                    debit: Money::from_cents(10000),
                    credit: Money::zero(),
                },
                JournalItemInput {
                    account_id: revenue.clone(),
                    debit: Money::zero(),
                    credit: Money::from_cents(9000),
                },
            ]))
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::Core(CoreError::Imbalance { .. })));
        assert_eq!(balance_of(&db, &cash).await, Money::zero());
        assert_eq!(balance_of(&db, &revenue).await, Money::zero());
        assert!(db.journal().list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_account_rolls_back_entry() {
        let db = test_db().await;
        let cash = seed_account(&db, "1000", "Cash", AccountKind::Asset).await;

        let err = db
            .journal()
            .create_posted(&entry(vec![
                JournalItemInput {
                    account_id: cash.clone(),
                    debit: Money::from_cents(500),
                    credit: Money::zero(),
                },
                JournalItemInput {
                    account_id: "ghost".to_string(),
                    debit: Money::zero(),
                    credit: Money::from_cents(500),
                },
            ]))
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(balance_of(&db, &cash).await, Money::zero(), "debit rolled back");
        assert!(db.journal().list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_entry_date_defaults_to_now() {
        let db = test_db().await;
        let cash = seed_account(&db, "1000", "Cash", AccountKind::Asset).await;
        let equity = seed_account(&db, "3000", "Owner Equity", AccountKind::Equity).await;

        let before = Utc::now();
        let posted = db
            .journal()
            .create_posted(&entry(vec![
                JournalItemInput {
                    account_id: cash,
                    debit: Money::from_cents(1),
                    credit: Money::zero(),
                },
                JournalItemInput {
                    account_id: equity,
                    debit: Money::zero(),
                    credit: Money::from_cents(1),
                },
            ]))
            .await
            .unwrap();

        assert!(posted.entry_date >= before);
        assert!(posted.reference.is_none());
    }
}
