//! Scoring rules for Matrixle.
//!
//! Pure functions over fixed-size cell arrays. Rules are kept apart from the
//! session record so the contract system can reuse them to recheck state.

pub mod classify;
pub mod tracker;
pub mod win;

pub use classify::classify_guess;
pub use tracker::{DigitTracker, aggregate_digit_status};
pub use win::is_winning_guess;
