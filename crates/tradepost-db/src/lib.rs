//! # tradepost-db: Storage Layer for Tradepost
//!
//! This crate provides database access for the Tradepost system.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Tradepost Data Flow                               │
//! │                                                                         │
//! │  HTTP handler (POST /api/transactions)                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   tradepost-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ transaction   │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ journal       │    │ 001_initial  │  │   │
//! │  │   │ Connection    │    │ salary        │    │ 002_indexes  │  │   │
//! │  │   │ Management    │    │ product, ...  │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   Posting repositories run their writes inside one sqlx        │   │
//! │  │   transaction: header + items + stock/balance deltas commit    │   │
//! │  │   together or not at all.                                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (or :memory: in tests)                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (transaction, journal, etc.)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tradepost_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./data/tradepost.db")).await?;
//!
//! let posted = db.transactions().create_posted(&request).await?;
//! let stats = db.reports().dashboard().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::account::AccountRepository;
pub use repository::employee::EmployeeRepository;
pub use repository::journal::JournalRepository;
pub use repository::partner::PartnerRepository;
pub use repository::product::ProductRepository;
pub use repository::report::ReportRepository;
pub use repository::salary::SalaryRepository;
pub use repository::settings::SettingsRepository;
pub use repository::transaction::{TransactionFilter, TransactionRepository};
