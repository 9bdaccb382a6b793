//! # Repository Module
//!
//! Database repository implementations for Tradepost.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  HTTP handler                                                          │
//! │       │                                                                 │
//! │       │  db.transactions().create_posted(&request)                     │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  TransactionRepository                                                 │
//! │  ├── validate (pure rules from tradepost-core)                         │
//! │  ├── BEGIN                                                              │
//! │  ├── insert header, insert items, apply stock deltas                   │
//! │  └── COMMIT (or rollback on any failure)                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • SQL is isolated in one place per entity                             │
//! │  • Posting atomicity lives next to the queries it protects             │
//! │  • The sync reconciler reuses the same upsert methods                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`product::ProductRepository`] - Catalog CRUD, search, sync upsert
//! - [`partner::PartnerRepository`] - Partner CRUD, sync upsert
//! - [`transaction::TransactionRepository`] - Atomic posting, void, listing
//! - [`journal::JournalRepository`] - Journal posting with balance updates
//! - [`account::AccountRepository`] - Chart of accounts
//! - [`employee::EmployeeRepository`] - Employee CRUD
//! - [`salary::SalaryRepository`] - Payroll posting
//! - [`settings::SettingsRepository`] - Lazy singleton settings row
//! - [`report::ReportRepository`] - Dashboard aggregates

pub mod account;
pub mod employee;
pub mod journal;
pub mod partner;
pub mod product;
pub mod report;
pub mod salary;
pub mod settings;
pub mod transaction;
