//! # Validation Module
//!
//! Input validation for posting requests and catalog writes.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Deserialization (serde)                                      │
//! │  ├── Typed request bodies, snake_case enum values                      │
//! │  └── Unknown enum values rejected, extraneous fields dropped           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE - field and request rules                        │
//! │  ├── Required fields, ranges, formats                                  │
//! │  └── Runs before any storage write                                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / UNIQUE constraints                                     │
//! │  └── Foreign key constraints                                           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Field names in errors use the wire spelling ("userId", "costPrice") so
//! messages point at what the client actually sent.

use crate::error::ValidationError;
use crate::money::Money;
use crate::posting::journal_totals;
use crate::types::{
    CreateAccountRequest, CreateEmployeeRequest, CreateJournalEntryRequest,
    CreatePartnerRequest, CreateProductRequest, CreateSalaryRequest,
    CreateTransactionRequest, TransactionKind,
};
use crate::{MAX_LINE_ITEMS, MAX_LINE_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates that a required string field is present and non-blank.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a display name (product, partner, employee, account).
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 200 characters
pub fn validate_name(field: &str, value: &str) -> ValidationResult<()> {
    validate_required(field, value)?;
    if value.trim().len() > 200 {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: 200,
        });
    }
    Ok(())
}

/// Validates a SKU (Stock Keeping Unit).
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 50 characters
/// - Only alphanumeric characters, hyphens, underscores
///
/// ## Example
/// ```rust
/// use tradepost_core::validation::validate_sku;
///
/// assert!(validate_sku("MS-001").is_ok());
/// assert!(validate_sku("").is_err());
/// assert!(validate_sku("has space").is_err());
/// ```
pub fn validate_sku(sku: &str) -> ValidationResult<()> {
    let sku = sku.trim();

    if sku.is_empty() {
        return Err(ValidationError::Required {
            field: "sku".to_string(),
        });
    }

    if sku.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "sku".to_string(),
            max: 50,
        });
    }

    if !sku
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "sku".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a chart-of-accounts code ("1000", "4000-1", ...).
pub fn validate_account_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "code".to_string(),
        });
    }

    if code.len() > 20 {
        return Err(ValidationError::TooLong {
            field: "code".to_string(),
            max: 20,
        });
    }

    if !code
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "code".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a salary month in "YYYY-MM" form.
///
/// ## Example
/// ```rust
/// use tradepost_core::validation::validate_month;
///
/// assert!(validate_month("2024-03").is_ok());
/// assert!(validate_month("2024-13").is_err());
/// assert!(validate_month("March 2024").is_err());
/// ```
pub fn validate_month(month: &str) -> ValidationResult<()> {
    let invalid = || ValidationError::InvalidFormat {
        field: "month".to_string(),
        reason: "must be YYYY-MM".to_string(),
    };

    let (year, month_num) = month.split_once('-').ok_or_else(invalid)?;
    if year.len() != 4 || month_num.len() != 2 {
        return Err(invalid());
    }
    if !year.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    let parsed: u8 = month_num.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&parsed) {
        return Err(invalid());
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line item quantity for the given transaction kind.
///
/// ## Rules
/// - Adjustments: any non-zero quantity within ±MAX_LINE_QUANTITY
///   (the sign is the stock direction)
/// - Every other kind: strictly positive, at most MAX_LINE_QUANTITY
pub fn validate_line_quantity(kind: TransactionKind, quantity: i64) -> ValidationResult<()> {
    if kind == TransactionKind::Adjustment {
        if quantity == 0 {
            return Err(ValidationError::MustBeNonZero {
                field: "quantity".to_string(),
            });
        }
        if quantity.abs() > MAX_LINE_QUANTITY {
            return Err(ValidationError::OutOfRange {
                field: "quantity".to_string(),
                min: -MAX_LINE_QUANTITY,
                max: MAX_LINE_QUANTITY,
            });
        }
        return Ok(());
    }

    if quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    if quantity > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a money amount that may be zero but not negative
/// (prices, costs, debit/credit sides).
pub fn validate_non_negative(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::MAX,
        });
    }
    Ok(())
}

/// Validates a money amount that must be strictly positive
/// (salary payments).
pub fn validate_positive(field: &str, amount: Money) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Posting Request Validators
// =============================================================================

/// Validates a transaction posting request. Runs before any storage write;
/// a failure here means nothing was mutated.
pub fn validate_transaction_request(req: &CreateTransactionRequest) -> ValidationResult<()> {
    if !req.kind.is_postable() {
        return Err(ValidationError::NotAllowed {
            field: "type".to_string(),
            allowed: vec![
                "sale".to_string(),
                "purchase".to_string(),
                "sale_return".to_string(),
                "purchase_return".to_string(),
                "adjustment".to_string(),
            ],
        });
    }

    validate_required("userId", &req.user_id)?;

    if req.items.is_empty() {
        return Err(ValidationError::Required {
            field: "items".to_string(),
        });
    }
    if req.items.len() > MAX_LINE_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "items".to_string(),
            min: 1,
            max: MAX_LINE_ITEMS as i64,
        });
    }

    for item in &req.items {
        validate_required("productId", &item.product_id)?;
        validate_line_quantity(req.kind, item.quantity)?;
        validate_non_negative("price", item.price)?;
    }

    Ok(())
}

/// Validates a journal entry posting request.
///
/// Covers field rules only; the debit/credit balance check is a separate
/// pure step (`posting::check_journal_balance`) so an imbalance surfaces
/// as its own error kind.
pub fn validate_journal_request(req: &CreateJournalEntryRequest) -> ValidationResult<()> {
    validate_required("description", &req.description)?;
    if req.description.trim().len() > 500 {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: 500,
        });
    }

    if req.items.is_empty() {
        return Err(ValidationError::Required {
            field: "items".to_string(),
        });
    }
    if req.items.len() > MAX_LINE_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "items".to_string(),
            min: 1,
            max: MAX_LINE_ITEMS as i64,
        });
    }

    for item in &req.items {
        validate_required("accountId", &item.account_id)?;
        validate_non_negative("debit", item.debit)?;
        validate_non_negative("credit", item.credit)?;
    }

    // An all-zero entry is balanced but meaningless; reject it here rather
    // than letting it post no-op lines.
    let (debits, credits) = journal_totals(&req.items);
    if debits.is_zero() && credits.is_zero() {
        return Err(ValidationError::MustBePositive {
            field: "journal entry total".to_string(),
        });
    }

    Ok(())
}

/// Validates a salary posting request.
pub fn validate_salary_request(req: &CreateSalaryRequest) -> ValidationResult<()> {
    validate_required("employeeId", &req.employee_id)?;
    validate_required("userId", &req.user_id)?;
    validate_positive("amount", req.amount)?;
    validate_month(&req.month)?;
    Ok(())
}

// =============================================================================
// Catalog Request Validators
// =============================================================================

pub fn validate_product_request(req: &CreateProductRequest) -> ValidationResult<()> {
    validate_name("name", &req.name)?;
    if let Some(sku) = &req.sku {
        validate_sku(sku)?;
    }
    validate_non_negative("costPrice", req.cost_price)?;
    validate_non_negative("sellingPrice", req.selling_price)?;
    if req.min_stock_level < 0 {
        return Err(ValidationError::OutOfRange {
            field: "minStockLevel".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }
    Ok(())
}

pub fn validate_partner_request(req: &CreatePartnerRequest) -> ValidationResult<()> {
    validate_name("name", &req.name)
}

pub fn validate_employee_request(req: &CreateEmployeeRequest) -> ValidationResult<()> {
    validate_name("fullName", &req.full_name)?;
    validate_non_negative("salary", req.salary)?;
    Ok(())
}

pub fn validate_account_request(req: &CreateAccountRequest) -> ValidationResult<()> {
    validate_account_code(&req.code)?;
    validate_name("name", &req.name)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
