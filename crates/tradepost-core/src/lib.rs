//! # tradepost-core: Pure Business Logic for Tradepost
//!
//! This crate is the **heart** of Tradepost. It contains all posting rules
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Tradepost Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    HTTP API (apps/server)                       │   │
//! │  │    /api/transactions ── /api/journal-entries ── /api/sync/...  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ tradepost-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  posting  │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │stock delta│  │   rules   │  │   │
//! │  │   │Transaction│  │  decimal  │  │  totals   │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 tradepost-db (Database Layer)                   │   │
//! │  │             SQLite queries, migrations, repositories            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Transaction, Account, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`posting`] - Posting rules: totals, stock deltas, journal balance
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use tradepost_core::money::Money;
//! use tradepost_core::posting::stock_delta;
//! use tradepost_core::types::TransactionKind;
//!
//! // A sale of 3 units removes 3 from stock
//! assert_eq!(stock_delta(TransactionKind::Sale, 3), -3);
//!
//! // An adjustment carries its own sign
//! assert_eq!(stock_delta(TransactionKind::Adjustment, -2), -2);
//!
//! // Money parses from the 2-decimal wire format
//! let price: Money = "25.00".parse().unwrap();
//! assert_eq!(price.cents(), 2500);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod posting;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use tradepost_core::Money` instead of
// `use tradepost_core::money::Money`

pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum line items allowed in a single posted transaction or journal entry.
///
/// ## Business Reason
/// Prevents runaway request bodies and keeps a single posting's atomic unit
/// small enough to commit quickly.
pub const MAX_LINE_ITEMS: usize = 100;

/// Maximum absolute quantity of a single line item.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000000 instead of 10)
/// while still allowing bulk purchase postings.
pub const MAX_LINE_QUANTITY: i64 = 100_000;

/// Low-stock threshold applied when a product does not set its own.
pub const DEFAULT_MIN_STOCK_LEVEL: i64 = 5;
