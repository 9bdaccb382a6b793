//! # Domain Types
//!
//! Core domain types used throughout Tradepost.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │  Transaction    │   │  JournalEntry   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  sku (business) │   │  kind           │   │  description    │       │
//! │  │  quantity       │   │  total_amount   │   │  entry_date     │       │
//! │  │  cost/sell price│   │  items[]        │   │  items[] (d/c)  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Partner      │   │    Employee     │   │    Account      │       │
//! │  │  customer /     │   │  + Salary rows  │   │  balance =      │       │
//! │  │  supplier       │   │  (payroll)      │   │  Σ(debit-credit)│       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Every entity id is a UUID v4 string, assigned at the replica that creates
//! the row. Transaction ids double as the cross-replica identity during sync,
//! so they must never be regenerated after creation.
//!
//! ## Wire Format
//! All types serialize with camelCase keys; enum values are snake_case
//! strings. The `kind` fields appear as `"type"` in JSON.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::DEFAULT_MIN_STOCK_LEVEL;

// =============================================================================
// Transaction Kind
// =============================================================================

/// The business meaning of a transaction, which decides its stock effect.
///
/// ## Stock Direction
/// ```text
/// sale, purchase_return  →  stock DOWN by item quantity
/// purchase, sale_return  →  stock UP by item quantity
/// adjustment             →  signed item quantity applied as-is
/// payroll, expense       →  no items, no stock effect
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Goods out to a customer.
    Sale,
    /// Goods in from a supplier.
    Purchase,
    /// Customer returned goods (stock comes back).
    SaleReturn,
    /// Goods sent back to a supplier (stock goes out).
    PurchaseReturn,
    /// Manual stock correction; item quantities carry their own sign.
    Adjustment,
    /// Companion record of a salary payment; created by the payroll path only.
    Payroll,
    /// Money out with no stock movement.
    Expense,
}

impl TransactionKind {
    /// Whether this kind may be submitted through the transaction posting
    /// endpoint. Payroll rows come only from salary posting, and expenses
    /// have no line items to post.
    #[inline]
    pub const fn is_postable(&self) -> bool {
        matches!(
            self,
            TransactionKind::Sale
                | TransactionKind::Purchase
                | TransactionKind::SaleReturn
                | TransactionKind::PurchaseReturn
                | TransactionKind::Adjustment
        )
    }
}

// =============================================================================
// Transaction Status
// =============================================================================

/// Lifecycle status of a transaction header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    /// Posted and counted in reports.
    Completed,
    /// Cancelled after posting; excluded from money rollups. Stock was
    /// restored by a compensating adjustment at void time.
    Voided,
}

impl Default for TransactionStatus {
    fn default() -> Self {
        TransactionStatus::Completed
    }
}

// =============================================================================
// Partner Kind
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum PartnerKind {
    Customer,
    Supplier,
}

// =============================================================================
// Account Kind
// =============================================================================

/// Chart-of-accounts classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum AccountKind {
    Asset,
    Liability,
    Equity,
    Revenue,
    Expense,
}

// =============================================================================
// Product
// =============================================================================

/// A stocked (or stockable) item in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Stock Keeping Unit - optional unique business identifier.
    pub sku: Option<String>,

    /// Barcode (EAN-13, UPC-A, etc.), optional and unique when present.
    pub barcode: Option<String>,

    /// Display name. Also the natural key used by sync upserts.
    pub name: String,

    /// Optional description.
    pub description: Option<String>,

    /// Current stock level. May go negative; there is no floor. Mutated only
    /// by transaction posting and sync upserts, never by plain CRUD updates.
    pub quantity: i64,

    /// What the business pays per unit. Captured onto transaction items at
    /// posting time so later edits do not rewrite historical profit.
    pub cost_price: Money,

    /// What the business charges per unit.
    pub selling_price: Money,

    /// Threshold at or below which the product counts as low stock.
    pub min_stock_level: i64,

    /// Optional free-form category.
    pub category: Option<String>,

    /// Whether the product is active (soft delete).
    pub is_active: bool,

    /// When the product was created.
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Checks the low-stock condition used by the dashboard.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.min_stock_level
    }

    /// Profit made on one unit at current prices.
    #[inline]
    pub fn unit_margin(&self) -> Money {
        self.selling_price - self.cost_price
    }
}

// =============================================================================
// Partner
// =============================================================================

/// A counterparty: customer or supplier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Partner {
    pub id: String,
    /// Display name. Also the natural key used by sync upserts.
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PartnerKind,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Transaction
// =============================================================================

/// A posted business event header. Line items live in [`TransactionItem`].
///
/// Headers are immutable after posting except for the void status flip.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// UUID v4, assigned at the origin replica and preserved by sync.
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Counterparty; absent for walk-in/anonymous postings.
    pub partner_id: Option<String>,
    /// Who posted it. Always explicit, never defaulted.
    pub user_id: String,
    /// Derived server-side as Σ(item price × item quantity).
    pub total_amount: Money,
    pub status: TransactionStatus,
    pub notes: Option<String>,
    pub transaction_date: DateTime<Utc>,
}

impl Transaction {
    #[inline]
    pub fn is_voided(&self) -> bool {
        self.status == TransactionStatus::Voided
    }
}

// =============================================================================
// Transaction Item
// =============================================================================

/// A line of a transaction. Immutable once posted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct TransactionItem {
    pub id: String,
    pub transaction_id: String,
    pub product_id: String,
    /// Positive for all kinds except adjustment, where the sign is the
    /// stock direction.
    pub quantity: i64,
    /// Unit price as applied in this transaction.
    pub price: Money,
    /// Product cost price captured at posting time (frozen).
    pub cost: Money,
}

impl TransactionItem {
    /// Line total (price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }

    /// Profit contribution of this line ((price − cost) × quantity).
    #[inline]
    pub fn line_profit(&self) -> Money {
        (self.price - self.cost).multiply_quantity(self.quantity)
    }
}

/// A transaction header together with its line items, as returned by the
/// single-transaction fetch.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionWithItems {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub items: Vec<TransactionItem>,
}

// =============================================================================
// Account / Journal
// =============================================================================

/// A ledger account with a running balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    /// Unique account code ("1000", "4000", ...).
    pub code: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AccountKind,
    /// Optional parent for hierarchy display; not enforced.
    pub parent_account_id: Option<String>,
    /// Always Σ(debit − credit) over the account's journal items, maintained
    /// incrementally at posting time.
    pub balance: Money,
}

/// A posted journal entry header. Lines live in [`JournalItem`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: String,
    pub description: String,
    pub entry_date: DateTime<Utc>,
    pub reference: Option<String>,
}

/// One debit/credit line of a journal entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct JournalItem {
    pub id: String,
    pub journal_entry_id: String,
    pub account_id: String,
    pub debit: Money,
    pub credit: Money,
}

// =============================================================================
// Employee / Salary
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    pub full_name: String,
    pub position: Option<String>,
    /// Base monthly salary.
    pub salary: Money,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub is_active: bool,
}

/// A salary payment record. Posting one also creates a companion
/// payroll-kind [`Transaction`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Salary {
    pub id: String,
    pub employee_id: String,
    pub amount: Money,
    /// Payment period, "YYYY-MM".
    pub month: String,
    pub payment_date: DateTime<Utc>,
    pub notes: Option<String>,
}

// =============================================================================
// Settings
// =============================================================================

/// Store-wide settings. A single row, created lazily on first read.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub id: String,
    pub store_name: String,
    pub currency: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub theme: String,
    /// Base URL of the peer instance the sync trigger talks to.
    pub remote_url: Option<String>,
}

// =============================================================================
// Posting Requests
// =============================================================================
// Typed request bodies for the three posting paths. Extraneous JSON fields
// (e.g. a client-computed total) are ignored by deserialization; unknown
// enum values are rejected.

/// Request body for posting a transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionRequest {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(default)]
    pub partner_id: Option<String>,
    pub user_id: String,
    pub items: Vec<TransactionItemInput>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// One requested line of a transaction posting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionItemInput {
    pub product_id: String,
    pub quantity: i64,
    pub price: Money,
}

/// Request body for posting a journal entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJournalEntryRequest {
    pub description: String,
    /// Defaults to now when omitted.
    #[serde(default)]
    pub entry_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub reference: Option<String>,
    pub items: Vec<JournalItemInput>,
}

/// One requested debit/credit line. Omitted sides default to zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalItemInput {
    pub account_id: String,
    #[serde(default)]
    pub debit: Money,
    #[serde(default)]
    pub credit: Money,
}

/// Request body for posting a salary payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSalaryRequest {
    pub employee_id: String,
    pub amount: Money,
    /// Payment period, "YYYY-MM".
    pub month: String,
    #[serde(default)]
    pub notes: Option<String>,
    pub user_id: String,
}

// =============================================================================
// CRUD Requests
// =============================================================================
// Create payloads carry serde defaults matching the store defaults; update
// payloads are all-optional and patch only the provided fields. Update
// payloads for products deliberately have no quantity field: stock moves
// through transaction posting and sync only.

fn default_true() -> bool {
    true
}

fn default_min_stock() -> i64 {
    DEFAULT_MIN_STOCK_LEVEL
}

fn default_store_name() -> String {
    "My Store".to_string()
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_theme() -> String {
    "light".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub barcode: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Opening stock.
    #[serde(default)]
    pub quantity: i64,
    pub cost_price: Money,
    pub selling_price: Money,
    #[serde(default = "default_min_stock")]
    pub min_stock_level: i64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Partial product update. No quantity on purpose.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub cost_price: Option<Money>,
    #[serde(default)]
    pub selling_price: Option<Money>,
    #[serde(default)]
    pub min_stock_level: Option<i64>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePartnerRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PartnerKind,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePartnerRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<PartnerKind>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeRequest {
    pub full_name: String,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub salary: Money,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub hire_date: Option<NaiveDate>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeeRequest {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub salary: Option<Money>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub hire_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    pub code: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AccountKind,
    #[serde(default)]
    pub parent_account_id: Option<String>,
    /// Opening balance.
    #[serde(default)]
    pub balance: Money,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsRequest {
    #[serde(default)]
    pub store_name: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub remote_url: Option<String>,
}

// Used by the settings repository to seed the lazy singleton.
impl Settings {
    pub fn with_defaults(id: String) -> Self {
        Settings {
            id,
            store_name: default_store_name(),
            currency: default_currency(),
            address: None,
            phone: None,
            theme: default_theme(),
            remote_url: None,
        }
    }
}

// =============================================================================
// Report Types
// =============================================================================

/// Everything the dashboard shows, recomputed fully on each call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Σ total_amount over completed sale transactions.
    pub total_sales: Money,
    /// Σ (price − cost) × quantity over completed sale items, at the cost
    /// captured when each sale was posted.
    pub total_profits: Money,
    pub low_stock_count: i64,
    pub low_stock_products: Vec<Product>,
    /// Five most recent transactions by date.
    pub recent_transactions: Vec<Transaction>,
    /// Five best sellers by units sold, ties broken by product id.
    pub top_selling_products: Vec<TopSellingProduct>,
    pub breakdown: TransactionBreakdown,
}

/// One row of the best-seller ranking.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct TopSellingProduct {
    pub product_id: String,
    pub name: String,
    pub total_sold: i64,
}

/// Completed-transaction money totals grouped by kind.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionBreakdown {
    pub sales: Money,
    pub purchases: Money,
    pub sale_returns: Money,
    pub purchase_returns: Money,
    pub adjustments: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================
