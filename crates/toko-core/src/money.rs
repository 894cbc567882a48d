//! # Money Module
//!
//! Monetary values in the smallest currency unit, with checked
//! arithmetic.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                     │
//! │                                                                 │
//! │  0.1 + 0.2 = 0.30000000000000004  ❌                            │
//! │                                                                 │
//! │  OUR SOLUTION: integer minor units (i64)                        │
//! │    price 15000 × qty 3 = subtotal 45000, exact                  │
//! │    overflow is an explicit error, never a silent wrap           │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Checkout arithmetic (subtotal = price × quantity, running total)
//! goes through this type so an overflowing cart fails the whole
//! operation instead of committing a corrupted total.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A monetary value in the smallest currency unit.
///
/// Zero-cost newtype over `i64`. Signed so that arithmetic mistakes
/// (e.g. a negative subtotal) are representable and therefore
/// checkable, but every committed value in the system is validated
/// non-negative.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    #[inline]
    pub const fn from_minor(amount: i64) -> Self {
        Money(amount)
    }

    /// Returns the amount in minor units.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Zero amount.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checked addition. `None` on overflow.
    #[inline]
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Checked multiplication by a quantity. `None` on overflow.
    #[inline]
    pub fn checked_mul(self, quantity: i64) -> Option<Money> {
        self.0.checked_mul(quantity).map(Money)
    }

    /// True for amounts below zero.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

impl fmt::Display for Money {
    /// Formats as rupiah with dot thousands separators, e.g. `Rp15.000`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let negative = self.0 < 0;
        let digits = self.0.unsigned_abs().to_string();

        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(c);
        }

        if negative {
            write!(f, "-Rp{}", grouped)
        } else {
            write!(f, "Rp{}", grouped)
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_minor_roundtrip() {
        assert_eq!(Money::from_minor(15_000).minor(), 15_000);
        assert_eq!(Money::zero().minor(), 0);
    }

    #[test]
    fn checked_arithmetic() {
        let price = Money::from_minor(1_000);

        assert_eq!(price.checked_mul(3), Some(Money::from_minor(3_000)));
        assert_eq!(
            price.checked_add(Money::from_minor(500)),
            Some(Money::from_minor(1_500))
        );
    }

    #[test]
    fn overflow_is_detected() {
        let max = Money::from_minor(i64::MAX);
        assert_eq!(max.checked_add(Money::from_minor(1)), None);
        assert_eq!(max.checked_mul(2), None);
    }

    #[test]
    fn display_groups_thousands() {
        assert_eq!(Money::from_minor(0).to_string(), "Rp0");
        assert_eq!(Money::from_minor(999).to_string(), "Rp999");
        assert_eq!(Money::from_minor(15_000).to_string(), "Rp15.000");
        assert_eq!(Money::from_minor(1_234_567).to_string(), "Rp1.234.567");
        assert_eq!(Money::from_minor(-5_000).to_string(), "-Rp5.000");
    }

    #[test]
    fn serializes_as_plain_integer() {
        let json = serde_json::to_string(&Money::from_minor(45_000)).unwrap();
        assert_eq!(json, "45000");
    }
}
