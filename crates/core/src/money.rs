//! Monetary amounts in the smallest currency unit.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// A non-negative monetary amount, stored as integer cents.
///
/// Costs, prices and line totals are all plain USD amounts in this system;
/// keeping them as cents avoids float drift in totals.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub fn cents(&self) -> u64 {
        self.0
    }

    /// Multiply by a quantity, failing on overflow.
    pub fn checked_mul(&self, quantity: u32) -> DomainResult<Money> {
        self.0
            .checked_mul(u64::from(quantity))
            .map(Money)
            .ok_or_else(|| DomainError::invariant("line amount overflow"))
    }

    /// Add another amount, failing on overflow.
    pub fn checked_add(&self, other: Money) -> DomainResult<Money> {
        self.0
            .checked_add(other.0)
            .map(Money)
            .ok_or_else(|| DomainError::invariant("total amount overflow"))
    }

    /// Bare two-decimal rendering, e.g. `2.50` (no currency symbol).
    pub fn as_decimal(&self) -> String {
        format!("{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// Renders with a leading currency symbol and exactly two decimals: `$2.50`.
impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn displays_with_symbol_and_two_decimals() {
        assert_eq!(Money::from_cents(250).to_string(), "$2.50");
        assert_eq!(Money::from_cents(7).to_string(), "$0.07");
        assert_eq!(Money::ZERO.to_string(), "$0.00");
        assert_eq!(Money::from_cents(123456).to_string(), "$1234.56");
    }

    #[test]
    fn decimal_rendering_omits_symbol() {
        assert_eq!(Money::from_cents(250).as_decimal(), "2.50");
        assert_eq!(Money::ZERO.as_decimal(), "0.00");
    }

    #[test]
    fn checked_mul_detects_overflow() {
        let err = Money::from_cents(u64::MAX).checked_mul(2).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn checked_add_detects_overflow() {
        let err = Money::from_cents(u64::MAX)
            .checked_add(Money::from_cents(1))
            .unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    proptest! {
        #[test]
        fn mul_matches_plain_arithmetic(cents in 0u64..1_000_000, qty in 1u32..1_000) {
            let total = Money::from_cents(cents).checked_mul(qty).unwrap();
            prop_assert_eq!(total.cents(), cents * u64::from(qty));
        }
    }
}
