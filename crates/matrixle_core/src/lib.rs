//! Matrixle core - the scoring engine of a daily matrix puzzle.
//!
//! The player deduces a secret `[a b; c d] x [e; f] = [g; h]` where every cell
//! is a digit from 1 to 9, using exact / present / absent feedback across up to
//! six guesses.
//!
//! # Architecture
//!
//! - **Validator**: [`validate_guess`] turns raw input into a [`ConsistentEquation`]
//! - **Classifier**: [`classify_guess`] labels eight cells with two-pass multiset matching
//! - **Tracker**: [`aggregate_digit_status`] folds history into one status per digit
//! - **Win detector**: [`is_winning_guess`]
//! - **Session**: [`reduce`] applies [`SessionEvent`]s to an explicit [`Session`] value
//!
//! Everything here is pure. Persistence and puzzle selection live in the
//! application crate.
//!
//! # Example
//!
//! ```
//! use chrono::{NaiveDate, Utc};
//! use matrixle_core::{CandidateGuess, Puzzle, SessionStatus, reset_session, submit_guess, validate_guess};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let secret = validate_guess(&CandidateGuess::from_values([2, 1, 1, 3, 3, 2, 8, 9]))?;
//! let date = NaiveDate::from_ymd_opt(2026, 3, 14).ok_or("bad date")?;
//! let session = reset_session(Puzzle::new(1, date, secret));
//!
//! let guess = CandidateGuess::from_values([2, 1, 1, 3, 3, 2, 8, 9]);
//! let session = submit_guess(&session, &guess, Utc::now())?;
//! assert_eq!(session.status(), SessionStatus::Won);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod contracts;
mod digit;
mod equation;
mod feedback;
mod invariants;
mod position;
mod rules;
mod session;
mod types;
mod validate;

pub use action::{SessionError, SessionEvent, SubmitError};
pub use contracts::{AttemptsRemaining, Contract, SessionPlaying, SubmitContract};
pub use digit::{Digit, DigitError};
pub use equation::{ConsistentEquation, Equation, InconsistentEquation, Matrix, ResultPair, Vector};
pub use feedback::{Feedback, GuessFeedback};
pub use invariants::{
    BoundedHistoryInvariant, FeedbackConsistentInvariant, Invariant, InvariantSet,
    InvariantViolation, SessionInvariants, StatusConsistentInvariant, TrackerConsistentInvariant,
};
pub use position::{CELL_COUNT, CellPosition};
pub use rules::{DigitTracker, aggregate_digit_status, classify_guess, is_winning_guess};
pub use session::{Session, reduce, reset_session, submit_guess};
pub use types::{Guess, MAX_ATTEMPTS, Puzzle, SessionStatus};
pub use validate::{CandidateGuess, Defect, GuessRejection, ParseCandidateError, validate_guess};
