//! Monetary amounts held as integer cents.
//!
//! Receipts carry money as text with exactly two fraction digits (`"35.35"`). Parsing that
//! text straight into minor units keeps every rule that inspects an amount (round dollars,
//! quarter multiples, the 20% item bonus) in exact integer arithmetic.

use std::fmt;

use serde::{Serialize, Serializer};

/// Non-negative monetary value in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(u64);

impl Amount {
    #[inline]
    pub const fn from_cents(cents: u64) -> Self {
        Amount(cents)
    }

    #[inline]
    pub const fn cents(&self) -> u64 {
        self.0
    }

    /// Whole dollars, truncating the cents.
    #[inline]
    pub const fn dollars(&self) -> u64 {
        self.0 / 100
    }

    /// The two-digit cents portion (0-99).
    #[inline]
    pub const fn cents_part(&self) -> u64 {
        self.0 % 100
    }

    #[inline]
    pub const fn is_whole_dollars(&self) -> bool {
        self.cents_part() == 0
    }

    /// True when the amount is an exact multiple of `step_cents`.
    #[inline]
    pub const fn is_multiple_of(&self, step_cents: u64) -> bool {
        step_cents != 0 && self.0 % step_cents == 0
    }

    /// `ceil(self * numerator / denominator)` in whole dollars, without leaving integers.
    ///
    /// A 20% share rounded up is `ceil_share(1, 5)`: `ceil(cents / 500)`.
    pub fn ceil_share(&self, numerator: u64, denominator: u64) -> u64 {
        let scaled = u128::from(self.0) * u128::from(numerator);
        let divisor = u128::from(denominator) * 100;
        let dollars = scaled.div_ceil(divisor);
        u64::try_from(dollars).unwrap_or(u64::MAX)
    }

    /// Parse the canonical `digits.dd` form.
    ///
    /// Returns `None` for anything else, including values too large for `u64` cents.
    pub fn parse_canonical(raw: &str) -> Option<Self> {
        let (major, minor) = raw.split_once('.')?;
        if major.is_empty()
            || minor.len() != 2
            || !major.bytes().all(|b| b.is_ascii_digit())
            || !minor.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }

        let major: u64 = major.parse().ok()?;
        let minor: u64 = minor.parse().ok()?;
        major.checked_mul(100)?.checked_add(minor).map(Amount)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.dollars(), self.cents_part())
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
