//! First-class invariants for Matrixle sessions.
//!
//! Invariants are logical properties that must hold throughout a session.
//! They are testable independently and serve as documentation of system guarantees.

/// A logical property that must hold for a given state.
///
/// Invariants are checked in debug builds after every transition, and on
/// demand when a session is loaded from storage.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for the tuple of session invariants.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set.
    ///
    /// Returns Ok(()) if all invariants hold, or Err with a list of
    /// violations if any invariant fails.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

// Implement InvariantSet for 4-tuples
impl<S, I1, I2, I3, I4> InvariantSet<S> for (I1, I2, I3, I4)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
    I4: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if !I3::holds(state) {
            violations.push(InvariantViolation::new(I3::description()));
        }

        if !I4::holds(state) {
            violations.push(InvariantViolation::new(I4::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

pub mod bounded_history;
pub mod feedback_consistent;
pub mod status_consistent;
pub mod tracker_consistent;

pub use bounded_history::BoundedHistoryInvariant;
pub use feedback_consistent::FeedbackConsistentInvariant;
pub use status_consistent::StatusConsistentInvariant;
pub use tracker_consistent::TrackerConsistentInvariant;

/// All session invariants as a composable set.
pub type SessionInvariants = (
    BoundedHistoryInvariant,
    FeedbackConsistentInvariant,
    StatusConsistentInvariant,
    TrackerConsistentInvariant,
);


#[cfg(test)]
mod tests {
    use super::fixtures::{MISS, SECRET, play};
    use super::*;

    #[test]
    fn test_invariant_set_holds_for_new_session() {
        assert!(SessionInvariants::check_all(&play(&[])).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_through_a_loss() {
        let session = play(&[MISS; 6]);
        assert!(SessionInvariants::check_all(&session).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_win() {
        let session = play(&[MISS, MISS, SECRET]);
        assert!(SessionInvariants::check_all(&session).is_ok());
    }

    #[test]
    fn test_invariant_set_detects_violations() {
        let mut session = play(&[MISS]);
        session.history.clear();

        let violations = SessionInvariants::check_all(&session).unwrap_err();
        assert!(!violations.is_empty());
    }

    #[test]
    fn test_invariant_set_names_only_failing_invariant() {
        let mut session = play(&[MISS]);
        session.status = crate::SessionStatus::Won;
        session.current_attempt = 0;

        let violations = SessionInvariants::check_all(&session).unwrap_err();
        let descriptions: Vec<&str> = violations.iter().map(|v| v.description.as_str()).collect();
        assert_eq!(descriptions, vec![StatusConsistentInvariant::description()]);
    }
}
