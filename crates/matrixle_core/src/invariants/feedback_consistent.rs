//! Feedback consistency invariant: stored labels match a fresh classification.

use super::super::{Session, rules::classify_guess};
use super::Invariant;

/// Invariant: every stored feedback equals the classifier's output.
///
/// Feedback is computed once at append time; this catches stored sessions
/// whose labels were altered or scored against another puzzle.
pub struct FeedbackConsistentInvariant;

impl Invariant<Session> for FeedbackConsistentInvariant {
    fn holds(session: &Session) -> bool {
        let secret = session.puzzle().cells();
        session
            .history()
            .iter()
            .all(|guess| *guess.feedback() == classify_guess(&guess.equation().cells(), &secret))
    }

    fn description() -> &'static str {
        "Stored feedback matches classification against the puzzle"
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::{MISS, SECRET, equation, play};
    use super::*;
    use crate::{Guess, Puzzle};
    use chrono::{NaiveDate, Utc};

    #[test]
    fn test_played_session_holds() {
        assert!(FeedbackConsistentInvariant::holds(&play(&[MISS, SECRET])));
    }

    #[test]
    fn test_guess_scored_elsewhere_violates() {
        let mut session = play(&[]);
        let other = Puzzle::new(
            2,
            NaiveDate::from_ymd_opt(2026, 3, 15).expect("valid date"),
            equation(MISS),
        );
        session
            .history
            .push(Guess::score(equation(MISS), &other, Utc::now()));
        session.current_attempt = 1;
        assert!(!FeedbackConsistentInvariant::holds(&session));
    }
}
