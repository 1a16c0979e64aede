use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Sub, SubAssign},
};

use serde::{Deserialize, Serialize};

/// Absolute tolerance used when checking that contributions sum to an
/// expense's total.
///
/// Equal shares are plain floating divisions and are never rounded
/// internally, so the per-participant amounts may not sum to the total to
/// the last representable digit. This epsilon absorbs that drift.
pub const SUM_EPSILON: f64 = 0.01;

/// Monetary amount.
///
/// The engine keeps amounts as `f64` on purpose: an equal split stores
/// `total / count` unrounded, and rounding to two decimals happens only at
/// presentation time ([`Money::fmt`]). All invariant checks that compare
/// sums use [`SUM_EPSILON`].
///
/// # Examples
///
/// ```rust
/// use engine::Money;
///
/// let share = Money::new(100.0 / 3.0);
/// assert_eq!(share.to_string(), "$33.33");
/// assert!((share + share + share).approx_eq(Money::new(100.0)));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Money(f64);

impl Money {
    pub const ZERO: Money = Money(0.0);

    #[must_use]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Returns the raw amount.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Returns `true` if the amount is strictly positive.
    #[must_use]
    pub fn is_positive(self) -> bool {
        self.0 > 0.0
    }

    /// Returns `true` if the amount is below zero.
    #[must_use]
    pub fn is_negative(self) -> bool {
        self.0 < 0.0
    }

    /// Returns `true` if the two amounts are within [`SUM_EPSILON`] of each
    /// other.
    #[must_use]
    pub fn approx_eq(self, other: Money) -> bool {
        (self.0 - other.0).abs() <= SUM_EPSILON
    }
}

impl fmt::Display for Money {
    /// Two-decimal presentation rounding. The stored value stays unrounded.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl From<f64> for Money {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl From<Money> for f64 {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Self::Output {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_rounds_to_cents() {
        assert_eq!(Money::new(0.0).to_string(), "$0.00");
        assert_eq!(Money::new(10.5).to_string(), "$10.50");
        assert_eq!(Money::new(100.0 / 3.0).to_string(), "$33.33");
        assert_eq!(Money::new(0.555).to_string(), "$0.56");
    }

    #[test]
    fn approx_eq_uses_epsilon() {
        assert!(Money::new(99.995).approx_eq(Money::new(100.0)));
        assert!(!Money::new(99.98).approx_eq(Money::new(100.0)));

        // Three unrounded thirds sum back within tolerance.
        let third = Money::new(100.0 / 3.0);
        let sum: Money = [third, third, third].into_iter().sum();
        assert!(sum.approx_eq(Money::new(100.0)));
    }

    #[test]
    fn sum_folds_from_zero() {
        let total: Money = [Money::new(1.5), Money::new(2.5)].into_iter().sum();
        assert_eq!(total, Money::new(4.0));
    }
}
