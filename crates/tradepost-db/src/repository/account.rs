//! # Account Repository
//!
//! The chart of accounts. Balances are owned by journal entry posting;
//! this repository only creates accounts and reads them back.

use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use tradepost_core::validation::validate_account_request;
use tradepost_core::{Account, CreateAccountRequest};

const SELECT_COLUMNS: &str = "id, code, name, kind, parent_account_id, balance";

/// Repository for chart-of-accounts operations.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    pool: SqlitePool,
}

impl AccountRepository {
    /// Creates a new AccountRepository.
    pub fn new(pool: SqlitePool) -> Self {
        AccountRepository { pool }
    }

    /// Lists all accounts ordered by code.
    pub async fn list(&self) -> DbResult<Vec<Account>> {
        let accounts = sqlx::query_as::<_, Account>(&format!(
            "SELECT {SELECT_COLUMNS} FROM accounts ORDER BY code"
        ))
        .fetch_all(&self.pool)
        .await?;

        debug!(count = accounts.len(), "Listed accounts");
        Ok(accounts)
    }

    /// Gets an account by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {SELECT_COLUMNS} FROM accounts WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    /// Creates an account. The code must be unique across the chart.
    pub async fn create(&self, req: &CreateAccountRequest) -> DbResult<Account> {
        validate_account_request(req)?;

        let account = Account {
            id: Uuid::new_v4().to_string(),
            code: req.code.trim().to_string(),
            name: req.name.trim().to_string(),
            kind: req.kind,
            parent_account_id: req.parent_account_id.clone(),
            balance: req.balance,
        };

        debug!(id = %account.id, code = %account.code, "Creating account");
        sqlx::query(
            r#"
            INSERT INTO accounts (id, code, name, kind, parent_account_id, balance)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&account.id)
        .bind(&account.code)
        .bind(&account.name)
        .bind(account.kind)
        .bind(&account.parent_account_id)
        .bind(account.balance)
        .execute(&self.pool)
        .await?;

        Ok(account)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};
    use tradepost_core::{AccountKind, Money};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn cash() -> CreateAccountRequest {
        CreateAccountRequest {
            code: "1000".to_string(),
            name: "Cash".to_string(),
            kind: AccountKind::Asset,
            parent_account_id: None,
            balance: Money::zero(),
        }
    }

    #[tokio::test]
    async fn test_create_and_list_ordered_by_code() {
        let db = test_db().await;
        let repo = db.accounts();

        repo.create(&CreateAccountRequest {
            code: "4000".to_string(),
            name: "Sales Revenue".to_string(),
            kind: AccountKind::Revenue,
            parent_account_id: None,
            balance: Money::zero(),
        })
        .await
        .unwrap();
        repo.create(&cash()).await.unwrap();

        let accounts = repo.list().await.unwrap();
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].code, "1000");
        assert_eq!(accounts[1].code, "4000");
        assert_eq!(accounts[1].kind, AccountKind::Revenue);
    }

    #[tokio::test]
    async fn test_duplicate_code_rejected() {
        let db = test_db().await;
        let repo = db.accounts();
        repo.create(&cash()).await.unwrap();

        let mut dup = cash();
        dup.name = "Petty Cash".to_string();
        let err = repo.create(&dup).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_opening_balance_is_kept() {
        let db = test_db().await;
        let mut req = cash();
        req.balance = Money::from_cents(50_000);

        let created = db.accounts().create(&req).await.unwrap();
        let fetched = db.accounts().get_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched.balance, Money::from_cents(50_000));
    }
}
