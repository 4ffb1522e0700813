//! Session state and the pure reducer that advances it.
//!
//! A [`Session`] is an explicit value. Every change goes through [`reduce`],
//! which consumes the old session and returns the next one, so callers never
//! observe a half-applied guess.

use super::action::{SessionError, SessionEvent, SubmitError};
use super::contracts::{Contract, SubmitContract};
use super::equation::ConsistentEquation;
use super::rules::{DigitTracker, aggregate_digit_status, is_winning_guess};
use super::types::{Guess, MAX_ATTEMPTS, Puzzle, SessionStatus};
use super::validate::{CandidateGuess, validate_guess};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// One player's progress on one puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub(crate) puzzle: Puzzle,
    pub(crate) history: Vec<Guess>,
    pub(crate) current_attempt: usize,
    pub(crate) status: SessionStatus,
    pub(crate) digits: DigitTracker,
}

impl Session {
    /// Creates a fresh session on the given puzzle.
    #[instrument(skip(puzzle), fields(puzzle_id = puzzle.id()))]
    pub fn new(puzzle: Puzzle) -> Self {
        Self {
            puzzle,
            history: Vec::new(),
            current_attempt: 0,
            status: SessionStatus::Playing,
            digits: DigitTracker::new(),
        }
    }

    /// Returns the puzzle being played.
    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    /// Returns accepted guesses, oldest first.
    pub fn history(&self) -> &[Guess] {
        &self.history
    }

    /// Zero-based index of the attempt in play (or the last one played).
    pub fn current_attempt(&self) -> usize {
        self.current_attempt
    }

    /// Returns the session status.
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Returns the best-known status of each digit.
    pub fn digits(&self) -> &DigitTracker {
        &self.digits
    }

    /// Number of guesses still available.
    pub fn attempts_remaining(&self) -> usize {
        MAX_ATTEMPTS.saturating_sub(self.history.len())
    }

    /// Returns the most recent guess.
    pub fn last_guess(&self) -> Option<&Guess> {
        self.history.last()
    }

    /// Validates raw input and, if accepted, applies it.
    ///
    /// Submitting to a finished session returns it unchanged.
    #[instrument(skip(self, candidate), fields(puzzle_id = self.puzzle.id(), status = %self.status))]
    pub fn submit(
        &self,
        candidate: &CandidateGuess,
        at: DateTime<Utc>,
    ) -> Result<Session, SubmitError> {
        if self.status.is_terminal() {
            debug!("Submission ignored, session is over");
            return Ok(self.clone());
        }
        let equation = validate_guess(candidate)?;
        Ok(reduce(self.clone(), SessionEvent::submit(equation, at))?)
    }

    /// Scores and appends an accepted guess, then derives the new status.
    fn record(mut self, equation: ConsistentEquation, at: DateTime<Utc>) -> Self {
        let won = is_winning_guess(&equation, &self.puzzle);
        let guess = Guess::score(equation, &self.puzzle, at);
        self.history.push(guess);
        self.digits = aggregate_digit_status(&self.history);

        if won {
            self.status = SessionStatus::Won;
            info!(attempts = self.history.len(), "Puzzle solved");
        } else if self.history.len() >= MAX_ATTEMPTS {
            self.status = SessionStatus::Lost;
            info!(attempts = self.history.len(), "Out of attempts");
        } else {
            self.current_attempt += 1;
        }
        self
    }
}

/// Applies one event to a session.
///
/// Contract enforcement:
/// - a submit to a finished session is a no-op
/// - any other failed precondition is returned as an error
/// - postconditions are checked in debug builds only
#[instrument(skip(session, event), fields(puzzle_id = session.puzzle.id(), event = %event))]
pub fn reduce(session: Session, event: SessionEvent) -> Result<Session, SessionError> {
    match event {
        SessionEvent::Submit { equation, at } => {
            match SubmitContract::pre(&session, &equation) {
                Ok(()) => {}
                Err(SessionError::SessionOver(status)) => {
                    debug!(%status, "Ignoring submission to finished session");
                    return Ok(session);
                }
                Err(reason) => return Err(reason),
            }

            #[cfg(debug_assertions)]
            let before = session.clone();

            let after = session.record(equation, at);

            #[cfg(debug_assertions)]
            SubmitContract::post(&before, &after)?;

            Ok(after)
        }
        SessionEvent::Reset(puzzle) => Ok(reset_session(puzzle)),
    }
}

/// Validates a candidate and applies it to a copy of the session.
pub fn submit_guess(
    session: &Session,
    candidate: &CandidateGuess,
    at: DateTime<Utc>,
) -> Result<Session, SubmitError> {
    session.submit(candidate, at)
}

/// Starts a fresh session on the given puzzle.
#[instrument(skip(puzzle), fields(puzzle_id = puzzle.id()))]
pub fn reset_session(puzzle: Puzzle) -> Session {
    info!("Starting fresh session");
    Session::new(puzzle)
}
