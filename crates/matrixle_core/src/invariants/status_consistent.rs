//! Status consistency invariant: won, lost and playing follow from history.

use super::super::{MAX_ATTEMPTS, Session, SessionStatus, rules::is_winning_guess};
use super::Invariant;

/// Invariant: the status is the one the history implies.
///
/// Only the final guess may be a winner. Won means it is; lost means six
/// guesses without one; playing means fewer than six without one.
pub struct StatusConsistentInvariant;

impl Invariant<Session> for StatusConsistentInvariant {
    fn holds(session: &Session) -> bool {
        let puzzle = session.puzzle();
        let wins: Vec<bool> = session
            .history()
            .iter()
            .map(|guess| is_winning_guess(guess.equation(), puzzle))
            .collect();

        let Some((last_wins, earlier)) = wins.split_last() else {
            return session.status() == SessionStatus::Playing;
        };
        if earlier.iter().any(|won| *won) {
            return false;
        }

        match session.status() {
            SessionStatus::Won => *last_wins,
            SessionStatus::Lost => !last_wins && wins.len() == MAX_ATTEMPTS,
            SessionStatus::Playing => !last_wins && wins.len() < MAX_ATTEMPTS,
        }
    }

    fn description() -> &'static str {
        "Session status follows from the guess history"
    }
}
