//! Monetary amounts in the smallest currency unit.

use core::iter::Sum;
use core::ops::{Add, AddAssign, Sub};
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Non-negative amount of money in cents (single-currency storefront).
///
/// Serialized as the integer number of cents.
#[derive(
    Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    /// Whole currency units plus cents, e.g. `Money::new(45, 99)` is $45.99.
    pub const fn new(units: u64, cents: u64) -> Self {
        Self(units * 100 + cents)
    }

    pub const fn cents(self) -> u64 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Unit price times quantity (saturating).
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(u64::from(quantity)))
    }

    /// Apply a rate expressed in basis points (1/100 of a percent), rounding
    /// half up to the nearest cent. 800 bps of $40.00 is $3.20.
    pub fn apply_rate_bps(self, bps: u32) -> Self {
        let scaled = u128::from(self.0) * u128::from(bps);
        let rounded = (scaled + 5_000) / 10_000;
        Self(u64::try_from(rounded).unwrap_or(u64::MAX))
    }

    pub fn saturating_sub(self, other: Money) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        *self = *self + rhs;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        self.saturating_sub(rhs)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// Parses `45.99`, `$45.99`, `45.9` or `45`.
impl FromStr for Money {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let raw = raw.strip_prefix('$').unwrap_or(raw);
        let invalid = || DomainError::validation(format!("invalid amount: {s:?}"));

        let (units, fraction) = match raw.split_once('.') {
            Some((units, fraction)) => (units, fraction),
            None => (raw, ""),
        };
        if units.is_empty() || !units.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        if fraction.len() > 2 || !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let units: u64 = units.parse().map_err(|_| invalid())?;
        let cents: u64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<u64>().map_err(|_| invalid())? * 10,
            _ => fraction.parse().map_err(|_| invalid())?,
        };

        units
            .checked_mul(100)
            .and_then(|c| c.checked_add(cents))
            .map(Money)
            .ok_or_else(invalid)
    }
}
