//! Contract-based validation for session transitions.
//!
//! Contracts define correctness through preconditions and postconditions.
//! They formalize the Hoare-style reasoning: {P} action {Q}

use super::action::SessionError;
use super::equation::ConsistentEquation;
use super::invariants::{InvariantSet, SessionInvariants};
use super::session::Session;
use super::types::MAX_ATTEMPTS;
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
///
/// - Precondition: {P(state, action)} - must hold before applying action
/// - Postcondition: {Q(before, after)} - must hold after applying action
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), SessionError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), SessionError>;
}

// ─────────────────────────────────────────────────────────────
//  Submit Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the session still accepts guesses.
pub struct SessionPlaying;

impl SessionPlaying {
    /// Fails with [`SessionError::SessionOver`] once the session is terminal.
    #[instrument(skip(session))]
    pub fn check(session: &Session) -> Result<(), SessionError> {
        if session.status().is_terminal() {
            Err(SessionError::SessionOver(session.status()))
        } else {
            Ok(())
        }
    }
}

/// Precondition: there is room left in the history.
pub struct AttemptsRemaining;

impl AttemptsRemaining {
    /// Fails if six guesses were already recorded.
    #[instrument(skip(session))]
    pub fn check(session: &Session) -> Result<(), SessionError> {
        if session.history().len() >= MAX_ATTEMPTS {
            warn!(len = session.history().len(), "Playing session with full history");
            Err(SessionError::InvariantViolation(format!(
                "history already holds {} guesses",
                MAX_ATTEMPTS
            )))
        } else {
            Ok(())
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Submit Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for guess submissions.
///
/// Preconditions:
/// - Session is playing
/// - History is not full
///
/// Postconditions:
/// - History grew by exactly one guess
/// - Digit statuses never regress
/// - All session invariants hold
pub struct SubmitContract;

impl Contract<Session, ConsistentEquation> for SubmitContract {
    fn pre(session: &Session, _equation: &ConsistentEquation) -> Result<(), SessionError> {
        SessionPlaying::check(session)?;
        AttemptsRemaining::check(session)?;
        Ok(())
    }

    fn post(before: &Session, after: &Session) -> Result<(), SessionError> {
        if after.history().len() != before.history().len() + 1 {
            return Err(SessionError::InvariantViolation(format!(
                "Postcondition failed: history went from {} to {} guesses",
                before.history().len(),
                after.history().len()
            )));
        }
        if !after.digits().dominates(before.digits()) {
            return Err(SessionError::InvariantViolation(
                "Postcondition failed: a digit status regressed".to_string(),
            ));
        }
        SessionInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            SessionError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}
