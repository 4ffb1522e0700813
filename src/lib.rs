//! Matrixle - a daily matrix-vector deduction puzzle
//!
//! Each day has one secret `[a b; c d] x [e; f] = [g; h]` made of digits 1 to 9.
//! Players get six arithmetically valid guesses, each scored cell by cell as
//! exact, present, or absent. This crate is the application shell around the
//! pure engine in `matrixle_core`.
//!
//! # Architecture
//!
//! - **Puzzles**: [`PuzzleTable`] picks the day's secret from a dated rotation
//! - **Store**: [`SessionStore`] persists one session per day ([`SessionRepository`] on SQLite)
//! - **Game**: [`DailyGame`] resumes, advances, and saves the day's session
//! - **Render**: plain-text board and digit tracker
//! - **Config**: [`MatrixleConfig`] from TOML
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use matrixle::{DailyGame, MemoryStore, PuzzleTable};
//! use matrixle_core::{CandidateGuess, SessionStatus};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let table = PuzzleTable::builtin()?;
//! let store = MemoryStore::new();
//! let date = NaiveDate::from_ymd_opt(2026, 1, 1).ok_or("bad date")?;
//!
//! let mut game = DailyGame::start(&store, &table, date)?;
//! let report = game.submit(&"2 1 1 3 3 2 8 9".parse::<CandidateGuess>()?)?;
//! assert_eq!(report.status(), SessionStatus::Won);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod db;
mod game;
mod puzzles;
mod render;
mod store;

// Crate-level exports - Configuration
pub use config::{ConfigError, MatrixleConfig};

// Crate-level exports - Database
pub use db::{DbError, NewSavedSession, PlayStats, SavedSession, SessionRepository};

// Crate-level exports - Game orchestration
pub use game::{DailyGame, GameError, SubmitReport};

// Crate-level exports - Puzzle selection
pub use puzzles::{DEFAULT_LAUNCH, PuzzleError, PuzzleProvider, PuzzleTable};

// Crate-level exports - Rendering
pub use render::{feedback_symbol, render_guess, render_session, render_tracker};

// Crate-level exports - Persistence seam
pub use store::{MemoryStore, SessionStore, StoreError, StoreErrorKind};
