//! # Salary Repository
//!
//! Payroll postings. Paying a salary writes two rows atomically: the
//! Salary record and a companion payroll-kind transaction that carries the
//! expense into the transaction history (and from there into sync).

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use tradepost_core::validation::validate_salary_request;
use tradepost_core::{CreateSalaryRequest, Salary, TransactionKind, TransactionStatus};

/// Repository for salary payment posting and queries.
#[derive(Debug, Clone)]
pub struct SalaryRepository {
    pool: SqlitePool,
}

impl SalaryRepository {
    /// Creates a new SalaryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SalaryRepository { pool }
    }

    /// Posts a salary payment: the Salary row and its companion payroll
    /// transaction commit together or not at all.
    ///
    /// ## Errors
    /// - Validation failures (missing employee/caller, bad month, amount ≤ 0)
    /// - `NotFound` when the employee does not exist
    pub async fn create_posted(&self, req: &CreateSalaryRequest) -> DbResult<Salary> {
        validate_salary_request(req)?;

        let mut tx = self.pool.begin().await?;

        let employee_exists: Option<String> =
            sqlx::query_scalar("SELECT id FROM employees WHERE id = ?1")
                .bind(&req.employee_id)
                .fetch_optional(&mut *tx)
                .await?;
        if employee_exists.is_none() {
            return Err(DbError::not_found("Employee", &req.employee_id));
        }

        let salary = Salary {
            id: Uuid::new_v4().to_string(),
            employee_id: req.employee_id.clone(),
            amount: req.amount,
            month: req.month.clone(),
            payment_date: Utc::now(),
            notes: req.notes.clone(),
        };

        sqlx::query(
            r#"
            INSERT INTO salaries (id, employee_id, amount, month, payment_date, notes)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&salary.id)
        .bind(&salary.employee_id)
        .bind(salary.amount)
        .bind(&salary.month)
        .bind(salary.payment_date)
        .bind(&salary.notes)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO transactions
                (id, kind, partner_id, user_id, total_amount, status, notes, transaction_date)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(TransactionKind::Payroll)
        .bind(Option::<String>::None)
        .bind(&req.user_id)
        .bind(salary.amount)
        .bind(TransactionStatus::Completed)
        .bind(format!("Salary payment for month {}", salary.month))
        .bind(salary.payment_date)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(
            id = %salary.id,
            employee = %salary.employee_id,
            amount = %salary.amount,
            month = %salary.month,
            "Posted salary payment"
        );
        Ok(salary)
    }

    /// Lists salary payments, newest first, optionally for one employee.
    pub async fn list(&self, employee_id: Option<&str>) -> DbResult<Vec<Salary>> {
        let salaries = match employee_id {
            Some(employee_id) => {
                sqlx::query_as::<_, Salary>(
                    r#"
                    SELECT id, employee_id, amount, month, payment_date, notes
                    FROM salaries WHERE employee_id = ?1
                    ORDER BY payment_date DESC
                    "#,
                )
                .bind(employee_id)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Salary>(
                    r#"
                    SELECT id, employee_id, amount, month, payment_date, notes
                    FROM salaries ORDER BY payment_date DESC
                    "#,
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        debug!(count = salaries.len(), "Listed salaries");
        Ok(salaries)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::transaction::TransactionFilter;
    use tradepost_core::{CoreError, CreateEmployeeRequest, Money};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn seed_employee(db: &Database) -> String {
        db.employees()
            .create(&CreateEmployeeRequest {
                full_name: "Jordan Reyes".to_string(),
                position: Some("Clerk".to_string()),
                salary: Money::from_cents(120_000),
                phone: None,
                email: None,
                hire_date: None,
                is_active: true,
            })
            .await
            .unwrap()
            .id
    }

    fn july(employee_id: &str) -> CreateSalaryRequest {
        CreateSalaryRequest {
            employee_id: employee_id.to_string(),
            amount: Money::from_cents(120_000),
            month: "2025-07".to_string(),
            notes: None,
            user_id: "u-admin".to_string(),
        }
    }

    #[tokio::test]
    async fn test_posting_writes_salary_and_companion_transaction() {
        let db = test_db().await;
        let employee = seed_employee(&db).await;

        let posted = db.salaries().create_posted(&july(&employee)).await.unwrap();
        assert_eq!(posted.amount, Money::from_cents(120_000));

        let payrolls = db
            .transactions()
            .list(&TransactionFilter {
                kind: Some(TransactionKind::Payroll),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(payrolls.len(), 1);
        assert_eq!(payrolls[0].total_amount, Money::from_cents(120_000));
        assert_eq!(payrolls[0].user_id, "u-admin");
        assert_eq!(
            payrolls[0].notes.as_deref(),
            Some("Salary payment for month 2025-07")
        );
    }

    #[tokio::test]
    async fn test_unknown_employee_writes_nothing() {
        let db = test_db().await;

        let err = db.salaries().create_posted(&july("ghost")).await.unwrap_err();
        assert!(err.is_not_found());

        assert!(db.salaries().list(None).await.unwrap().is_empty());
        let payrolls = db
            .transactions()
            .list(&TransactionFilter {
                kind: Some(TransactionKind::Payroll),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(payrolls.is_empty(), "no companion transaction either");
    }

    #[tokio::test]
    async fn test_bad_month_rejected() {
        let db = test_db().await;
        let employee = seed_employee(&db).await;

        let mut req = july(&employee);
        req.month = "July 2025".to_string();
        let err = db.salaries().create_posted(&req).await.unwrap_err();
        assert!(matches!(err, DbError::Core(CoreError::Validation(_))));
    }

    #[tokio::test]
    async fn test_list_filters_by_employee() {
        let db = test_db().await;
        let first = seed_employee(&db).await;
        let second = db
            .employees()
            .create(&CreateEmployeeRequest {
                full_name: "Sam Okafor".to_string(),
                position: None,
                salary: Money::from_cents(90_000),
                phone: None,
                email: None,
                hire_date: None,
                is_active: true,
            })
            .await
            .unwrap()
            .id;

        db.salaries().create_posted(&july(&first)).await.unwrap();
        db.salaries().create_posted(&july(&second)).await.unwrap();

        let all = db.salaries().list(None).await.unwrap();
        assert_eq!(all.len(), 2);

        let only_first = db.salaries().list(Some(&first)).await.unwrap();
        assert_eq!(only_first.len(), 1);
        assert_eq!(only_first[0].employee_id, first);
    }
}
