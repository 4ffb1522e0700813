//! Best-known status per digit, folded from the guess history.

use super::super::{Digit, Feedback, Guess};
use serde::{Deserialize, Serialize};
use tracing::{instrument, trace};

/// Best feedback observed for each digit 1-9.
///
/// Every digit starts as [`Feedback::Absent`] and is only ever upgraded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DigitTracker {
    statuses: [Feedback; Digit::COUNT],
}

impl DigitTracker {
    /// Creates a tracker with every digit absent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the tracker from a full guess history.
    #[instrument(skip(history), fields(guesses = history.len()))]
    pub fn from_history(history: &[Guess]) -> Self {
        let mut tracker = Self::new();
        for guess in history {
            for (digit, label) in guess.observations() {
                tracker.observe(digit, label);
            }
        }
        tracker
    }

    /// Returns the status of a digit.
    pub fn status(&self, digit: Digit) -> Feedback {
        self.statuses[digit.index()]
    }

    /// Records one observation, upgrading only on a strictly better label.
    ///
    /// Returns true if the stored status changed.
    pub fn observe(&mut self, digit: Digit, label: Feedback) -> bool {
        let slot = &mut self.statuses[digit.index()];
        if label > *slot {
            trace!(%digit, from = %slot, to = %label, "Digit status upgraded");
            *slot = label;
            true
        } else {
            false
        }
    }

    /// Iterates digits 1-9 with their status.
    pub fn iter(&self) -> impl Iterator<Item = (Digit, Feedback)> + '_ {
        Digit::all().map(|digit| (digit, self.status(digit)))
    }

    /// Returns true if no digit is worse in `self` than in `earlier`.
    pub fn dominates(&self, earlier: &DigitTracker) -> bool {
        self.statuses
            .iter()
            .zip(earlier.statuses.iter())
            .all(|(now, before)| now >= before)
    }
}

/// Folds the feedback of every guess into one status per digit.
#[instrument(skip(history), fields(guesses = history.len()))]
pub fn aggregate_digit_status(history: &[Guess]) -> DigitTracker {
    DigitTracker::from_history(history)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CELL_COUNT, ConsistentEquation, Equation, Puzzle};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn equation(values: [u8; CELL_COUNT]) -> ConsistentEquation {
        let cells = values.map(|v| Digit::new(v).expect("test digit"));
        ConsistentEquation::try_from(Equation::from_cells(cells)).expect("consistent test equation")
    }

    fn puzzle() -> Puzzle {
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).expect("valid date");
        Puzzle::new(1, date, equation([2, 1, 1, 3, 3, 2, 8, 9]))
    }

    fn guess(values: [u8; CELL_COUNT]) -> Guess {
        let at = Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0).unwrap();
        Guess::score(equation(values), &puzzle(), at)
    }

    fn digit(value: u8) -> Digit {
        Digit::new(value).expect("test digit")
    }

    #[test]
    fn test_empty_history_all_absent() {
        let tracker = aggregate_digit_status(&[]);
        assert!(tracker.iter().all(|(_, status)| status == Feedback::Absent));
        assert_eq!(tracker.iter().count(), Digit::COUNT);
    }

    #[test]
    fn test_present_then_exact_upgrades() {
        // [1 1; 1 2] x [4; 1] = [5; 6]: the 2 at d is present.
        let first = guess([1, 1, 1, 2, 4, 1, 5, 6]);
        assert_eq!(first.feedback()[3], Feedback::Present);
        // [2 1; 1 3] x [1; 2] = [4; 7]: the 2 at a is exact.
        let second = guess([2, 1, 1, 3, 1, 2, 4, 7]);
        assert_eq!(second.feedback()[0], Feedback::Exact);

        let tracker = aggregate_digit_status(&[first, second]);
        assert_eq!(tracker.status(digit(2)), Feedback::Exact);
    }

    #[test]
    fn test_exact_never_downgraded() {
        let exact_first = guess([2, 1, 1, 3, 1, 2, 4, 7]);
        let present_later = guess([1, 1, 1, 2, 4, 1, 5, 6]);
        let tracker = aggregate_digit_status(&[exact_first, present_later]);
        assert_eq!(tracker.status(digit(2)), Feedback::Exact);
    }

    #[test]
    fn test_observe_only_upgrades() {
        let mut tracker = DigitTracker::new();
        assert!(tracker.observe(digit(5), Feedback::Present));
        assert!(!tracker.observe(digit(5), Feedback::Absent));
        assert!(!tracker.observe(digit(5), Feedback::Present));
        assert!(tracker.observe(digit(5), Feedback::Exact));
        assert!(!tracker.observe(digit(5), Feedback::Present));
        assert_eq!(tracker.status(digit(5)), Feedback::Exact);
    }

    #[test]
    fn test_growing_history_is_monotonic() {
        let history = vec![
            guess([1, 1, 1, 1, 4, 5, 9, 9]),
            guess([1, 1, 1, 2, 4, 1, 5, 6]),
            guess([2, 1, 1, 3, 1, 2, 4, 7]),
            guess([2, 1, 1, 3, 3, 2, 8, 9]),
        ];
        let mut previous = DigitTracker::new();
        for len in 1..=history.len() {
            let current = aggregate_digit_status(&history[..len]);
            assert!(current.dominates(&previous), "regressed at length {len}");
            previous = current;
        }
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let history = vec![guess([1, 1, 1, 2, 4, 1, 5, 6]), guess([2, 1, 1, 3, 1, 2, 4, 7])];
        assert_eq!(aggregate_digit_status(&history), aggregate_digit_status(&history));
    }
}
