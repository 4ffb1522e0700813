//! The digit domain shared by every cell of a Matrixle equation.
//!
//! A [`Digit`] is always in `1..=9`. Zero is not a legal cell value, so a
//! `Digit` can index the digit tracker without any offset checks.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

/// A single cell value, guaranteed to be in `1..=9`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
#[display("{}", _0)]
#[serde(try_from = "u8", into = "u8")]
pub struct Digit(u8);

impl Digit {
    /// Smallest legal digit value.
    pub const MIN: u8 = 1;
    /// Largest legal digit value.
    pub const MAX: u8 = 9;
    /// Number of distinct digit values.
    pub const COUNT: usize = (Self::MAX - Self::MIN + 1) as usize;
    /// The digit one.
    pub const ONE: Digit = Digit(1);

    /// Creates a digit, rejecting values outside `1..=9`.
    pub fn new(value: u8) -> Result<Self, DigitError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(DigitError {
                value: i64::from(value),
            })
        }
    }

    /// Returns the numeric value.
    pub fn value(self) -> u8 {
        self.0
    }

    /// Zero-based slot of this digit in per-digit tables.
    pub fn index(self) -> usize {
        usize::from(self.0 - Self::MIN)
    }

    /// Every digit in ascending order.
    pub fn all() -> impl Iterator<Item = Digit> {
        (Self::MIN..=Self::MAX).map(Digit)
    }
}

impl TryFrom<u8> for Digit {
    type Error = DigitError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<i64> for Digit {
    type Error = DigitError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map_err(|_| DigitError { value })
            .and_then(Self::new)
    }
}

impl From<Digit> for u8 {
    fn from(digit: Digit) -> Self {
        digit.0
    }
}

/// A value that is not a legal digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("{} is not a digit from 1 to 9", value)]
pub struct DigitError {
    /// The rejected value.
    pub value: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_one_through_nine() {
        for value in 1..=9u8 {
            assert_eq!(Digit::new(value).map(Digit::value), Ok(value));
        }
    }

    #[test]
    fn test_rejects_zero_and_ten() {
        assert_eq!(Digit::new(0), Err(DigitError { value: 0 }));
        assert_eq!(Digit::new(10), Err(DigitError { value: 10 }));
    }

    #[test]
    fn test_rejects_negative_and_huge_raw_values() {
        assert!(Digit::try_from(-3i64).is_err());
        assert!(Digit::try_from(300i64).is_err());
        assert_eq!(Digit::try_from(7i64).map(Digit::value), Ok(7));
    }

    #[test]
    fn test_index_is_zero_based() {
        assert_eq!(Digit::ONE.index(), 0);
        assert_eq!(Digit::new(9).map(Digit::index), Ok(8));
        assert_eq!(Digit::all().count(), Digit::COUNT);
    }

    #[test]
    fn test_deserialize_rejects_out_of_range() {
        let ok: Result<Digit, _> = serde_json::from_str("4");
        assert_eq!(ok.map(Digit::value).ok(), Some(4));

        let bad: Result<Digit, _> = serde_json::from_str("0");
        assert!(bad.is_err());
    }
}
