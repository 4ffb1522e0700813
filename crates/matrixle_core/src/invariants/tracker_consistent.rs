//! Tracker consistency invariant: digit statuses equal a recomputation.

use super::super::{Session, rules::aggregate_digit_status};
use super::Invariant;

/// Invariant: the digit tracker is a pure function of the history.
pub struct TrackerConsistentInvariant;

impl Invariant<Session> for TrackerConsistentInvariant {
    fn holds(session: &Session) -> bool {
        *session.digits() == aggregate_digit_status(session.history())
    }

    fn description() -> &'static str {
        "Digit statuses equal a recomputation from history"
    }
}
