//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A ledger that drifts by fractions of a cent will never balance.        │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    "25.00" on the wire ⇄ 2500 in memory and in the database             │
//! │    Totals, profits and account balances are exact integer sums          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//!
//! The JSON representation is a 2-decimal string (`"140.00"`), matching the
//! fixed-point columns of the relational model. Deserialization also accepts
//! bare JSON numbers, interpreted as MAJOR units (`25` and `25.5` mean
//! $25.00 and $25.50, never cents) because that is how clients submit line
//! prices and journal amounts.
//!
//! ## Usage
//! ```rust
//! use tradepost_core::money::Money;
//!
//! let price = Money::from_cents(1099); // 10.99
//! let total = price * 3;               // 32.97
//! assert_eq!(total.to_string(), "32.97");
//!
//! let parsed: Money = "89.99".parse().unwrap();
//! assert_eq!(parsed.cents(), 8999);
//! ```

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: Negative values are legal (returns, signed
///   adjustments, debit-negative account balances)
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Custom serde**: Serializes as a 2-decimal string to keep the wire
///   format stable regardless of the in-memory representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(transparent))]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use tradepost_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // 10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// For negative amounts only the major unit carries the sign:
    /// `from_major_minor(-5, 50)` is -5.50, not -4.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Multiplies by a line quantity.
    ///
    /// Both factors are signed: an adjustment line with quantity -2 and a
    /// positive price yields a negative line total, which is intended.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Errors produced when parsing the decimal wire format.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyParseError {
    /// Empty string or missing digits.
    #[error("amount is empty")]
    Empty,

    /// Characters other than digits, a leading sign and one decimal point.
    #[error("amount '{0}' is not a decimal number")]
    NotANumber(String),

    /// More than two fraction digits; the store is fixed-point with
    /// 2-decimal precision, so finer amounts cannot round-trip.
    #[error("amount '{0}' has more than two decimal places")]
    TooPrecise(String),

    /// Value does not fit in 64-bit cents.
    #[error("amount '{0}' is out of range")]
    OutOfRange(String),
}

impl FromStr for Money {
    type Err = MoneyParseError;

    /// Parses `"140.00"`, `"140"`, `"140.5"` or `"-2.50"` into cents.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(MoneyParseError::Empty);
        }

        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        if digits.is_empty() {
            return Err(MoneyParseError::Empty);
        }

        let (major_part, minor_part) = match digits.split_once('.') {
            Some((maj, min)) => (maj, min),
            None => (digits, ""),
        };

        if minor_part.len() > 2 {
            return Err(MoneyParseError::TooPrecise(s.to_string()));
        }
        if major_part.is_empty() && minor_part.is_empty() {
            return Err(MoneyParseError::Empty);
        }
        let all_digits = major_part.chars().chain(minor_part.chars());
        if major_part.chars().any(|c| !c.is_ascii_digit())
            || minor_part.chars().any(|c| !c.is_ascii_digit())
            || all_digits.count() == 0
        {
            return Err(MoneyParseError::NotANumber(s.to_string()));
        }

        let major: i64 = if major_part.is_empty() {
            0
        } else {
            major_part
                .parse()
                .map_err(|_| MoneyParseError::OutOfRange(s.to_string()))?
        };

        // ".5" means 50 cents, ".05" means 5 cents
        let minor: i64 = match minor_part.len() {
            0 => 0,
            1 => {
                minor_part
                    .parse::<i64>()
                    .map_err(|_| MoneyParseError::NotANumber(s.to_string()))?
                    * 10
            }
            _ => minor_part
                .parse()
                .map_err(|_| MoneyParseError::NotANumber(s.to_string()))?,
        };

        let cents = major
            .checked_mul(100)
            .and_then(|c| c.checked_add(minor))
            .ok_or_else(|| MoneyParseError::OutOfRange(s.to_string()))?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display renders the canonical 2-decimal wire format (no currency symbol).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, (self.0 / 100).abs(), (self.0 % 100).abs())
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MoneyVisitor;

        impl<'de> Visitor<'de> for MoneyVisitor {
            type Value = Money;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a decimal amount string like \"25.00\" or a number of major units")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
                v.parse().map_err(de::Error::custom)
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
                v.checked_mul(100)
                    .map(Money)
                    .ok_or_else(|| de::Error::custom("amount out of range"))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
                i64::try_from(v)
                    .ok()
                    .and_then(|v| v.checked_mul(100))
                    .map(Money)
                    .ok_or_else(|| de::Error::custom("amount out of range"))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
                let cents = (v * 100.0).round();
                if !cents.is_finite() || cents.abs() > i64::MAX as f64 {
                    return Err(de::Error::custom("amount out of range"));
                }
                Ok(Money(cents as i64))
            }
        }

        deserializer.deserialize_any(MoneyVisitor)
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by i64 (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Negation (for compensating entries).
impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

/// Sum over iterators of Money (journal columns, report rollups).
impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
