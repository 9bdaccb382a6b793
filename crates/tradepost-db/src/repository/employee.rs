//! # Employee Repository
//!
//! Staff records behind the payroll module. Employees never sync between
//! replicas; each store manages its own roster.

use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use tradepost_core::validation::{validate_employee_request, validate_name, validate_non_negative};
use tradepost_core::{CreateEmployeeRequest, Employee, UpdateEmployeeRequest};

const SELECT_COLUMNS: &str = "id, full_name, position, salary, phone, email, hire_date, is_active";

/// Repository for employee database operations.
#[derive(Debug, Clone)]
pub struct EmployeeRepository {
    pool: SqlitePool,
}

impl EmployeeRepository {
    /// Creates a new EmployeeRepository.
    pub fn new(pool: SqlitePool) -> Self {
        EmployeeRepository { pool }
    }

    /// Lists employees ordered by name.
    pub async fn list(&self) -> DbResult<Vec<Employee>> {
        let employees = sqlx::query_as::<_, Employee>(&format!(
            "SELECT {SELECT_COLUMNS} FROM employees ORDER BY full_name"
        ))
        .fetch_all(&self.pool)
        .await?;

        debug!(count = employees.len(), "Listed employees");
        Ok(employees)
    }

    /// Gets an employee by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Employee>> {
        let employee = sqlx::query_as::<_, Employee>(&format!(
            "SELECT {SELECT_COLUMNS} FROM employees WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(employee)
    }

    /// Creates an employee with a fresh id.
    pub async fn create(&self, req: &CreateEmployeeRequest) -> DbResult<Employee> {
        validate_employee_request(req)?;

        let employee = Employee {
            id: Uuid::new_v4().to_string(),
            full_name: req.full_name.trim().to_string(),
            position: req.position.clone(),
            salary: req.salary,
            phone: req.phone.clone(),
            email: req.email.clone(),
            hire_date: req.hire_date,
            is_active: req.is_active,
        };

        debug!(id = %employee.id, name = %employee.full_name, "Creating employee");
        sqlx::query(
            r#"
            INSERT INTO employees (id, full_name, position, salary, phone, email, hire_date, is_active)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&employee.id)
        .bind(&employee.full_name)
        .bind(&employee.position)
        .bind(employee.salary)
        .bind(&employee.phone)
        .bind(&employee.email)
        .bind(employee.hire_date)
        .bind(employee.is_active)
        .execute(&self.pool)
        .await?;

        Ok(employee)
    }

    /// Applies a partial update and returns the new row.
    pub async fn update(&self, id: &str, req: &UpdateEmployeeRequest) -> DbResult<Employee> {
        let current = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Employee", id))?;

        let merged = Employee {
            id: current.id.clone(),
            full_name: req
                .full_name
                .clone()
                .unwrap_or(current.full_name)
                .trim()
                .to_string(),
            position: req.position.clone().or(current.position),
            salary: req.salary.unwrap_or(current.salary),
            phone: req.phone.clone().or(current.phone),
            email: req.email.clone().or(current.email),
            hire_date: req.hire_date.or(current.hire_date),
            is_active: req.is_active.unwrap_or(current.is_active),
        };

        validate_name("fullName", &merged.full_name)?;
        validate_non_negative("salary", merged.salary)?;

        sqlx::query(
            r#"
            UPDATE employees SET
                full_name = ?2, position = ?3, salary = ?4, phone = ?5,
                email = ?6, hire_date = ?7, is_active = ?8
            WHERE id = ?1
            "#,
        )
        .bind(&merged.id)
        .bind(&merged.full_name)
        .bind(&merged.position)
        .bind(merged.salary)
        .bind(&merged.phone)
        .bind(&merged.email)
        .bind(merged.hire_date)
        .bind(merged.is_active)
        .execute(&self.pool)
        .await?;

        Ok(merged)
    }

    /// Deletes an employee. Fails with a foreign key violation while salary
    /// payments still reference the employee; paid staff are history, not
    /// deletable rows.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM employees WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Employee", id));
        }

        debug!(id = %id, "Deleted employee");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::NaiveDate;
    use tradepost_core::Money;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn clerk() -> CreateEmployeeRequest {
        CreateEmployeeRequest {
            full_name: "Jordan Reyes".to_string(),
            position: Some("Clerk".to_string()),
            salary: Money::from_cents(120_000),
            phone: None,
            email: None,
            hire_date: NaiveDate::from_ymd_opt(2024, 3, 1),
            is_active: true,
        }
    }

    #[tokio::test]
    async fn test_create_and_fetch() {
        let db = test_db().await;
        let created = db.employees().create(&clerk()).await.unwrap();

        let fetched = db.employees().get_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched.full_name, "Jordan Reyes");
        assert_eq!(fetched.salary, Money::from_cents(120_000));
        assert_eq!(fetched.hire_date, NaiveDate::from_ymd_opt(2024, 3, 1));
    }

    #[tokio::test]
    async fn test_update_salary_only() {
        let db = test_db().await;
        let created = db.employees().create(&clerk()).await.unwrap();

        let updated = db
            .employees()
            .update(
                &created.id,
                &UpdateEmployeeRequest {
                    salary: Some(Money::from_cents(135_000)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.salary, Money::from_cents(135_000));
        assert_eq!(updated.position.as_deref(), Some("Clerk"));
    }

    #[tokio::test]
    async fn test_delete_blocked_by_salary_history() {
        let db = test_db().await;
        let employee = db.employees().create(&clerk()).await.unwrap();

        db.salaries()
            .create_posted(&tradepost_core::CreateSalaryRequest {
                employee_id: employee.id.clone(),
                amount: Money::from_cents(120_000),
                month: "2025-07".to_string(),
                notes: None,
                user_id: "u-admin".to_string(),
            })
            .await
            .unwrap();

        let err = db.employees().delete(&employee.id).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));

        // Still fetchable after the failed delete.
        assert!(db.employees().get_by_id(&employee.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_blank_name_rejected() {
        let db = test_db().await;
        let mut req = clerk();
        req.full_name = "   ".to_string();

        let err = db.employees().create(&req).await.unwrap_err();
        assert!(matches!(err, DbError::Core(_)));
    }
}
