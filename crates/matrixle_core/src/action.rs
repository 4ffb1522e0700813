//! First-class session events and their errors.
//!
//! Events are domain values, not side effects. They can be logged, replayed
//! and checked by contracts independently of the reducer that applies them.

use super::equation::ConsistentEquation;
use super::types::{Puzzle, SessionStatus};
use super::validate::GuessRejection;
use chrono::{DateTime, Utc};
use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

/// An event applied to a session by [`reduce`](crate::reduce).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A validated guess submitted at the given instant.
    Submit {
        /// The guessed equation.
        equation: ConsistentEquation,
        /// Submission timestamp.
        at: DateTime<Utc>,
    },
    /// Discard all progress and start over on the given puzzle.
    Reset(Puzzle),
}

impl SessionEvent {
    /// Creates a submit event.
    pub fn submit(equation: ConsistentEquation, at: DateTime<Utc>) -> Self {
        Self::Submit { equation, at }
    }
}

impl std::fmt::Display for SessionEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionEvent::Submit { equation, .. } => write!(f, "submit {}", equation),
            SessionEvent::Reset(puzzle) => write!(f, "reset to puzzle #{}", puzzle.id()),
        }
    }
}

/// Error raised by a session transition.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum SessionError {
    /// The session no longer accepts guesses.
    #[display("Session is already over ({})", _0)]
    SessionOver(SessionStatus),

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for SessionError {}

/// Error returned when submitting raw input to a session.
#[derive(Debug, Clone, PartialEq, Eq, Display, From)]
pub enum SubmitError {
    /// The candidate failed validation; the session is unchanged.
    #[display("{}", _0)]
    Rejected(GuessRejection),
    /// The transition itself failed.
    #[display("{}", _0)]
    Session(SessionError),
}

impl std::error::Error for SubmitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SubmitError::Rejected(rejection) => Some(rejection),
            SubmitError::Session(error) => Some(error),
        }
    }
}
