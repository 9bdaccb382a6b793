//! # Posting Rules
//!
//! The pure arithmetic behind every posting: transaction totals, signed
//! stock deltas, and the double-entry balance check. Both sync peers run
//! exactly this code, which is why it lives here and not in the storage
//! layer.
//!
//! ## The Stock Delta Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  stock_delta(kind, item_quantity)                       │
//! │                                                                         │
//! │   kind              stored quantity      delta applied to product      │
//! │   ───────────────   ───────────────      ──────────────────────────    │
//! │   sale                    3                      -3                     │
//! │   purchase_return         3                      -3                     │
//! │   purchase                3                      +3                     │
//! │   sale_return             3                      +3                     │
//! │   adjustment             -2                      -2   (sign kept)       │
//! │   adjustment             +2                      +2                     │
//! │   payroll / expense       -                       0   (no items)        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tradepost_core::posting::{stock_delta, transaction_total};
//! use tradepost_core::types::{TransactionItemInput, TransactionKind};
//! use tradepost_core::money::Money;
//!
//! assert_eq!(stock_delta(TransactionKind::Sale, 3), -3);
//!
//! let items = vec![TransactionItemInput {
//!     product_id: "p-1".to_string(),
//!     quantity: 2,
//!     price: Money::from_cents(2500),
//! }];
//! assert_eq!(transaction_total(&items), Money::from_cents(5000));
//! ```

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{JournalItemInput, TransactionItemInput, TransactionKind};

// =============================================================================
// Stock Deltas
// =============================================================================

/// Returns the signed change to a product's stock for one line item.
///
/// Sales and purchase returns move goods out; purchases and sale returns
/// move goods in; adjustments carry their own sign in the stored quantity.
/// Payroll and expense transactions never touch stock.
#[inline]
pub const fn stock_delta(kind: TransactionKind, quantity: i64) -> i64 {
    match kind {
        TransactionKind::Sale | TransactionKind::PurchaseReturn => -quantity,
        TransactionKind::Purchase | TransactionKind::SaleReturn => quantity,
        TransactionKind::Adjustment => quantity,
        TransactionKind::Payroll | TransactionKind::Expense => 0,
    }
}

/// Returns the adjustment quantity that undoes one line item's stock effect.
///
/// Used by the void path: voiding a sale of 3 posts an adjustment line with
/// quantity +3, voiding a purchase of 3 posts -3. Zero means the line had no
/// stock effect and needs no compensation.
#[inline]
pub const fn reversal_quantity(kind: TransactionKind, quantity: i64) -> i64 {
    -stock_delta(kind, quantity)
}

// =============================================================================
// Totals
// =============================================================================

/// Computes a transaction's total amount from its requested line items.
///
/// Always Σ(price × quantity). Client-supplied totals are never consulted;
/// the header total is derived here and only here. Adjustment lines with
/// negative quantities produce negative contributions, which is intended.
pub fn transaction_total(items: &[TransactionItemInput]) -> Money {
    items
        .iter()
        .map(|item| item.price.multiply_quantity(item.quantity))
        .sum()
}

/// Sums the two sides of a journal entry: (total debits, total credits).
pub fn journal_totals(items: &[JournalItemInput]) -> (Money, Money) {
    let debits = items.iter().map(|item| item.debit).sum();
    let credits = items.iter().map(|item| item.credit).sum();
    (debits, credits)
}

/// The signed change a journal line applies to its account's running
/// balance. Debits push balances up, credits push them down, so an asset
/// bought on credit raises the asset account and lowers the liability
/// account by the same amount.
#[inline]
pub fn balance_delta(debit: Money, credit: Money) -> Money {
    debit - credit
}

// =============================================================================
// Balance Check
// =============================================================================

/// Enforces the double-entry rule on a journal entry before any write.
///
/// Σdebit must equal Σcredit. Runs after field validation, so both sides
/// are already known to be non-negative and the entry known to be non-zero.
pub fn check_journal_balance(items: &[JournalItemInput]) -> CoreResult<()> {
    let (debits, credits) = journal_totals(items);
    if debits != credits {
        return Err(CoreError::Imbalance { debits, credits });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(quantity: i64, price_cents: i64) -> TransactionItemInput {
        TransactionItemInput {
            product_id: "p-1".to_string(),
            quantity,
            price: Money::from_cents(price_cents),
        }
    }

    fn journal_item(debit_cents: i64, credit_cents: i64) -> JournalItemInput {
        JournalItemInput {
            account_id: "a-1".to_string(),
            debit: Money::from_cents(debit_cents),
            credit: Money::from_cents(credit_cents),
        }
    }

    #[test]
    fn test_stock_delta_directions() {
        assert_eq!(stock_delta(TransactionKind::Sale, 3), -3);
        assert_eq!(stock_delta(TransactionKind::PurchaseReturn, 3), -3);
        assert_eq!(stock_delta(TransactionKind::Purchase, 3), 3);
        assert_eq!(stock_delta(TransactionKind::SaleReturn, 3), 3);
    }

    #[test]
    fn test_adjustment_keeps_its_sign() {
        assert_eq!(stock_delta(TransactionKind::Adjustment, -2), -2);
        assert_eq!(stock_delta(TransactionKind::Adjustment, 2), 2);
    }

    #[test]
    fn test_itemless_kinds_have_no_stock_effect() {
        assert_eq!(stock_delta(TransactionKind::Payroll, 5), 0);
        assert_eq!(stock_delta(TransactionKind::Expense, 5), 0);
    }

    #[test]
    fn test_reversal_undoes_delta() {
        // A voided sale of 3 puts 3 back
        assert_eq!(reversal_quantity(TransactionKind::Sale, 3), 3);
        // A voided purchase of 3 takes 3 out
        assert_eq!(reversal_quantity(TransactionKind::Purchase, 3), -3);
        // A voided adjustment of -2 puts 2 back
        assert_eq!(reversal_quantity(TransactionKind::Adjustment, -2), 2);
        assert_eq!(reversal_quantity(TransactionKind::Payroll, 5), 0);
    }

    #[test]
    fn test_transaction_total() {
        // 2 × 25.00 + 1 × 90.00 = 140.00
        let items = vec![item(2, 2500), item(1, 9000)];
        assert_eq!(transaction_total(&items), Money::from_cents(14000));
    }

    #[test]
    fn test_transaction_total_signed_adjustment() {
        let items = vec![item(-2, 1000)];
        assert_eq!(transaction_total(&items), Money::from_cents(-2000));
    }

    #[test]
    fn test_transaction_total_empty_is_zero() {
        assert_eq!(transaction_total(&[]), Money::zero());
    }

    #[test]
    fn test_journal_totals() {
        let items = vec![journal_item(10000, 0), journal_item(0, 10000)];
        let (debits, credits) = journal_totals(&items);
        assert_eq!(debits, Money::from_cents(10000));
        assert_eq!(credits, Money::from_cents(10000));
    }

    #[test]
    fn test_balanced_entry_passes() {
        let items = vec![
            journal_item(5000, 0),
            journal_item(5000, 0),
            journal_item(0, 10000),
        ];
        assert!(check_journal_balance(&items).is_ok());
    }

    #[test]
    fn test_imbalanced_entry_rejected_with_both_sides() {
        let items = vec![journal_item(10000, 0), journal_item(0, 9000)];
        let err = check_journal_balance(&items).unwrap_err();
        match err {
            CoreError::Imbalance { debits, credits } => {
                assert_eq!(debits, Money::from_cents(10000));
                assert_eq!(credits, Money::from_cents(9000));
            }
            other => panic!("expected Imbalance, got {other:?}"),
        }
    }

    #[test]
    fn test_balance_delta_sign() {
        assert_eq!(
            balance_delta(Money::from_cents(10000), Money::zero()),
            Money::from_cents(10000)
        );
        assert_eq!(
            balance_delta(Money::zero(), Money::from_cents(10000)),
            Money::from_cents(-10000)
        );
    }
}
