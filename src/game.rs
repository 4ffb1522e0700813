//! Daily game orchestration.
//!
//! [`DailyGame`] ties one day's puzzle to the saved session for that day. The
//! core reducer decides what a guess does; this layer loads, saves, and reports.

use crate::puzzles::{PuzzleError, PuzzleProvider};
use crate::store::{SessionStore, StoreError};
use chrono::{DateTime, NaiveDate, Utc};
use derive_more::{Display, From};
use matrixle_core::{
    CandidateGuess, GuessFeedback, GuessRejection, InvariantSet, Session, SessionInvariants,
    SessionStatus, SubmitError, reset_session, submit_guess,
};
use tracing::{debug, info, instrument, warn};

/// Outcome of handing a candidate to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitReport {
    /// The guess was scored and recorded.
    Accepted {
        /// Per-cell labels for the new guess.
        feedback: GuessFeedback,
        /// Session status after the guess.
        status: SessionStatus,
    },
    /// The session was already over; nothing changed.
    Ignored {
        /// The terminal status.
        status: SessionStatus,
    },
}

impl SubmitReport {
    /// Status after the submission.
    pub fn status(&self) -> SessionStatus {
        match self {
            SubmitReport::Accepted { status, .. } | SubmitReport::Ignored { status } => *status,
        }
    }
}

/// Error from the daily game.
#[derive(Debug, Clone, Display, From)]
pub enum GameError {
    /// No puzzle for the requested day.
    #[display("{}", _0)]
    Puzzle(PuzzleError),
    /// Loading or saving failed.
    #[display("{}", _0)]
    Store(StoreError),
    /// The guess was rejected or the transition failed.
    #[display("{}", _0)]
    Submit(SubmitError),
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Puzzle(error) => Some(error),
            GameError::Store(error) => Some(error),
            GameError::Submit(error) => Some(error),
        }
    }
}

impl GameError {
    /// Returns the validation failure, if the guess itself was at fault.
    pub fn rejection(&self) -> Option<&GuessRejection> {
        match self {
            GameError::Submit(SubmitError::Rejected(rejection)) => Some(rejection),
            _ => None,
        }
    }
}

/// One day's game, backed by a store and a puzzle provider.
#[derive(Debug)]
pub struct DailyGame<S, P> {
    store: S,
    provider: P,
    date: NaiveDate,
    session: Session,
}

impl<S: SessionStore, P: PuzzleProvider> DailyGame<S, P> {
    /// Opens the game for `date`, resuming the saved session when it is for
    /// the same puzzle and passes every session invariant. A save that does
    /// not decode is discarded like any other corrupt save.
    ///
    /// # Errors
    ///
    /// Returns [`GameError`] if there is no puzzle for the day or the store
    /// backend cannot be read.
    #[instrument(skip(store, provider))]
    pub fn start(store: S, provider: P, date: NaiveDate) -> Result<Self, GameError> {
        let puzzle = provider.puzzle_for_date(date)?;

        let saved = match store.load(date) {
            Ok(saved) => saved,
            Err(err) if err.is_payload() => {
                warn!(error = %err, "Saved session is unreadable, starting fresh");
                None
            }
            Err(err) => return Err(err.into()),
        };

        let session = match saved {
            Some(saved) if saved.puzzle() != &puzzle => {
                warn!(
                    saved_id = saved.puzzle().id(),
                    current_id = puzzle.id(),
                    "Saved session is for a different puzzle, starting fresh"
                );
                reset_session(puzzle)
            }
            Some(saved) => match SessionInvariants::check_all(&saved) {
                Ok(()) => {
                    info!(
                        attempts = saved.history().len(),
                        status = %saved.status(),
                        "Resuming saved session"
                    );
                    saved
                }
                Err(violations) => {
                    warn!(?violations, "Saved session is corrupt, starting fresh");
                    reset_session(puzzle)
                }
            },
            None => reset_session(puzzle),
        };

        Ok(Self {
            store,
            provider,
            date,
            session,
        })
    }

    /// Returns the current session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Returns the day being played.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Submits a candidate, timestamped now.
    ///
    /// # Errors
    ///
    /// See [`DailyGame::submit_at`].
    pub fn submit(&mut self, candidate: &CandidateGuess) -> Result<SubmitReport, GameError> {
        self.submit_at(candidate, Utc::now())
    }

    /// Submits a candidate with an explicit timestamp.
    ///
    /// An accepted guess is saved before it becomes the current session. A
    /// finished session ignores the candidate without validating it.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Submit`] if the candidate is rejected, or
    /// [`GameError::Store`] if the new session cannot be saved. The current
    /// session is unchanged in both cases.
    #[instrument(skip(self, candidate), fields(date = %self.date, attempt = self.session.current_attempt()))]
    pub fn submit_at(
        &mut self,
        candidate: &CandidateGuess,
        at: DateTime<Utc>,
    ) -> Result<SubmitReport, GameError> {
        let status = self.session.status();
        if status.is_terminal() {
            debug!(%status, "Game over, submission ignored");
            return Ok(SubmitReport::Ignored { status });
        }

        let next = submit_guess(&self.session, candidate, at)?;
        let grew = next.history().len() > self.session.history().len();
        let Some(guess) = next.last_guess().filter(|_| grew) else {
            return Ok(SubmitReport::Ignored {
                status: next.status(),
            });
        };
        let report = SubmitReport::Accepted {
            feedback: *guess.feedback(),
            status: next.status(),
        };

        self.store.save(&next)?;
        self.session = next;
        info!(status = %report.status(), "Guess accepted");
        Ok(report)
    }

    /// Discards progress on today's puzzle and saves the fresh session.
    ///
    /// # Errors
    ///
    /// Returns [`GameError`] if the puzzle lookup or the save fails.
    #[instrument(skip(self), fields(date = %self.date))]
    pub fn reset(&mut self) -> Result<(), GameError> {
        let puzzle = self.provider.puzzle_for_date(self.date)?;
        let fresh = reset_session(puzzle);
        self.store.save(&fresh)?;
        self.session = fresh;
        Ok(())
    }
}
