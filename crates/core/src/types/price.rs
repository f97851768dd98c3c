//! Type-safe price representation using decimal arithmetic.
//!
//! Prices come off the catalog API as plain JSON numbers and are carried as
//! [`rust_decimal::Decimal`] so cart math stays exact. Display formatting uses
//! rupee notation with Indian-style digit grouping (`₹1,23,456.78`), matching
//! the storefront's locale.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A monetary amount in the storefront's display currency.
///
/// Serializes transparently as the underlying decimal, so it round-trips both
/// through the catalog API payloads and the persisted cart/wishlist JSON.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(pub Decimal);

impl Price {
    /// Zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Mul<u32> for Price {
    type Output = Self;

    fn mul(self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl fmt::Display for Price {
    /// Formats as `₹` with Indian digit grouping and two decimal places.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let text = format!("{rounded:.2}");
        let (sign, unsigned) = text
            .strip_prefix('-')
            .map_or(("", text.as_str()), |rest| ("-", rest));
        let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, "00"));
        write!(f, "{sign}\u{20b9}{}.{frac_part}", group_indian(int_part))
    }
}

/// Group an unsigned integer digit string Indian-style: the last three digits
/// form one group, every two digits before that form another.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let head_chars: Vec<char> = head.chars().collect();
    let mut groups: Vec<String> = head_chars
        .rchunks(2)
        .map(|chunk| chunk.iter().collect())
        .collect();
    groups.reverse();
    format!("{},{tail}", groups.join(","))
}
