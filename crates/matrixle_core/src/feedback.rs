//! Per-cell feedback labels.

use super::position::CELL_COUNT;
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Classification of one guessed cell against the secret.
///
/// Variants are declared worst to best, so the derived ordering is the
/// priority used by the digit tracker: `Absent < Present < Exact`.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Feedback {
    /// Digit does not occur among the unmatched secret cells.
    #[default]
    #[display("absent")]
    Absent,
    /// Digit occurs in the secret at a different, unmatched position.
    #[display("present")]
    Present,
    /// Correct digit in the correct position.
    #[display("exact")]
    Exact,
}

impl Feedback {
    /// Returns true for [`Feedback::Exact`].
    pub fn is_exact(self) -> bool {
        matches!(self, Feedback::Exact)
    }

    /// Returns true if this label counts the digit as found somewhere.
    pub fn is_hit(self) -> bool {
        !matches!(self, Feedback::Absent)
    }
}

/// Labels for all eight cells of a guess, in canonical position order.
pub type GuessFeedback = [Feedback; CELL_COUNT];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_order() {
        assert!(Feedback::Exact > Feedback::Present);
        assert!(Feedback::Present > Feedback::Absent);
        assert_eq!(Feedback::default(), Feedback::Absent);
    }

    #[test]
    fn test_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Feedback::Present).unwrap(), "\"present\"");
        assert_eq!(Feedback::Exact.to_string(), "exact");
    }
}
