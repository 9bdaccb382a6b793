//! # Error Types
//!
//! Domain-specific error types for tradepost-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tradepost-core errors (this file)                                     │
//! │  ├── CoreError        - Posting rule violations                        │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  tradepost-db errors (separate crate)                                  │
//! │  └── DbError          - Storage failures, missing rows, conflicts      │
//! │                                                                         │
//! │  tradepost-sync errors (separate crate)                                │
//! │  └── SyncError        - Transport / reconciliation failures            │
//! │                                                                         │
//! │  HTTP errors (apps/server)                                             │
//! │  └── ApiError         - {code, message} JSON with status mapping       │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → ApiError → client       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (amounts, ids, statuses)
//! 3. Errors are enum variants, never String
//! 4. Each variant maps to exactly one HTTP error class upstream

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Posting rule violations.
///
/// Raised by the pure checks in [`crate::posting`] and [`crate::validation`]
/// before any storage mutation happens. A posting that raises one of these
/// writes nothing.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Journal entry debits and credits do not match.
    ///
    /// ## When This Occurs
    /// - A journal entry is posted with Σdebit ≠ Σcredit
    ///
    /// ## Double-Entry Rule
    /// ```text
    /// POST {items: [{debit: 100.00}, {credit: 90.00}]}
    ///      │
    ///      ▼
    /// check_journal_balance: 100.00 ≠ 90.00
    ///      │
    ///      ▼
    /// Imbalance { debits: 100.00, credits: 90.00 }   (no write happened)
    /// ```
    #[error("Journal entry does not balance: debits {debits}, credits {credits}")]
    Imbalance { debits: Money, credits: Money },

    /// Transaction is not in a state that allows the requested operation.
    ///
    /// ## When This Occurs
    /// - Voiding a transaction that is already voided
    #[error("Transaction {transaction_id} is {current_status}, cannot perform operation")]
    InvalidTransactionStatus {
        transaction_id: String,
        current_status: String,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when request input doesn't meet requirements.
/// Used for early validation before posting logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be zero (signed values where either direction is fine).
    #[error("{field} must not be zero")]
    MustBeNonZero { field: String },

    /// Invalid format (e.g., invalid month string).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_imbalance_message_shows_both_sides() {
        let err = CoreError::Imbalance {
            debits: Money::from_cents(10000),
            credits: Money::from_cents(9000),
        };
        assert_eq!(
            err.to_string(),
            "Journal entry does not balance: debits 100.00, credits 90.00"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "userId".to_string(),
        };
        assert_eq!(err.to_string(), "userId is required");

        let err = ValidationError::MustBeNonZero {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must not be zero");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "items".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
