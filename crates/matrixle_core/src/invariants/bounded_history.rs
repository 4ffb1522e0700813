//! Bounded history invariant: at most six guesses, attempt index in step.

use super::super::{MAX_ATTEMPTS, Session};
use super::Invariant;

/// Invariant: history never exceeds six guesses and the attempt index tracks it.
///
/// While playing, the current attempt is the number of guesses so far.
/// Once terminal, it points at the final guess.
pub struct BoundedHistoryInvariant;

impl Invariant<Session> for BoundedHistoryInvariant {
    fn holds(session: &Session) -> bool {
        let len = session.history().len();
        if len > MAX_ATTEMPTS {
            return false;
        }

        if session.status().is_terminal() {
            len > 0 && session.current_attempt() + 1 == len
        } else {
            len < MAX_ATTEMPTS && session.current_attempt() == len
        }
    }

    fn description() -> &'static str {
        "History holds at most six guesses and the attempt index matches it"
    }
}
