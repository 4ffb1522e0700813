//! Core domain types for Matrixle.

use super::digit::Digit;
use super::equation::ConsistentEquation;
use super::feedback::{Feedback, GuessFeedback};
use super::position::CELL_COUNT;
use super::rules::classify_guess;
use chrono::{DateTime, NaiveDate, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Maximum number of guesses in one session.
pub const MAX_ATTEMPTS: usize = 6;

/// The secret equation of a given day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Puzzle {
    /// Puzzle number, counted from the first published day.
    id: u32,
    /// Calendar day this puzzle belongs to.
    date: NaiveDate,
    /// The secret equation.
    equation: ConsistentEquation,
}

impl Puzzle {
    /// Creates a puzzle.
    #[instrument(skip(equation), fields(equation = %equation))]
    pub fn new(id: u32, date: NaiveDate, equation: ConsistentEquation) -> Self {
        Self { id, date, equation }
    }

    /// Secret cells in canonical position order.
    pub fn cells(&self) -> [Digit; CELL_COUNT] {
        self.equation.cells()
    }
}

/// An accepted guess together with its feedback.
///
/// Feedback is computed once, when the guess is scored against the puzzle,
/// and never recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Guess {
    /// The guessed equation.
    equation: ConsistentEquation,
    /// One label per cell in canonical order.
    feedback: GuessFeedback,
    /// When the guess was submitted.
    submitted_at: DateTime<Utc>,
}

impl Guess {
    /// Scores an equation against the puzzle.
    #[instrument(skip(equation, puzzle), fields(puzzle_id = puzzle.id(), equation = %equation))]
    pub fn score(equation: ConsistentEquation, puzzle: &Puzzle, submitted_at: DateTime<Utc>) -> Self {
        let feedback = classify_guess(&equation.cells(), &puzzle.cells());
        Self {
            equation,
            feedback,
            submitted_at,
        }
    }

    /// Returns true if every cell is [`Feedback::Exact`].
    pub fn is_all_exact(&self) -> bool {
        self.feedback.iter().all(|label| label.is_exact())
    }

    /// Pairs each guessed digit with its label, in canonical order.
    pub fn observations(&self) -> impl Iterator<Item = (Digit, Feedback)> + '_ {
        self.equation.cells().into_iter().zip(self.feedback.iter().copied())
    }
}

/// Status of a session.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SessionStatus {
    /// Guesses are still being accepted.
    Playing,
    /// The secret was found.
    Won,
    /// All attempts were used without finding the secret.
    Lost,
}

impl SessionStatus {
    /// Returns true for [`SessionStatus::Won`] and [`SessionStatus::Lost`].
    pub fn is_terminal(self) -> bool {
        !matches!(self, SessionStatus::Playing)
    }
}
