//! Database models and domain types.

use chrono::{Days, NaiveDate, NaiveDateTime};
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;
use matrixle_core::{MAX_ATTEMPTS, SessionStatus};
use std::str::FromStr;
use tracing::instrument;

use crate::db::{DbError, schema};

/// Date format used for the `play_date` key.
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Saved session database model.
#[derive(Debug, Clone, Queryable, Selectable, Getters)]
#[diesel(table_name = schema::saved_sessions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SavedSession {
    play_date: String,
    puzzle_id: i32,
    status: String,
    attempts: i32,
    payload: String,
    updated_at: NaiveDateTime,
}

impl SavedSession {
    /// Parses the stored date key.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the key is not a `YYYY-MM-DD` date.
    #[instrument(skip(self), fields(play_date = %self.play_date))]
    pub fn parse_date(&self) -> Result<NaiveDate, DbError> {
        NaiveDate::parse_from_str(&self.play_date, DATE_FORMAT)
            .map_err(|e| DbError::new(format!("Invalid play date '{}': {}", self.play_date, e)))
    }

    /// Parses the stored status string into a [`SessionStatus`].
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the string is not a valid status value.
    #[instrument(skip(self), fields(status = %self.status))]
    pub fn parse_status(&self) -> Result<SessionStatus, DbError> {
        SessionStatus::from_str(&self.status)
            .map_err(|_| DbError::new(format!("Invalid status: '{}'", self.status)))
    }
}

/// Insertable row used to create or replace a saved session.
#[derive(Debug, Clone, Insertable, new, Getters)]
#[diesel(table_name = schema::saved_sessions)]
pub struct NewSavedSession {
    play_date: String,
    puzzle_id: i32,
    status: String,
    attempts: i32,
    payload: String,
    updated_at: NaiveDateTime,
}

/// Aggregated play statistics across saved sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters)]
pub struct PlayStats {
    /// Finished sessions (won or lost).
    played: u32,
    wins: u32,
    losses: u32,
    /// Sessions still being played.
    in_progress: u32,
    /// Wins keyed by number of guesses used (index 0 = first guess).
    distribution: [u32; MAX_ATTEMPTS],
    /// Consecutive daily wins ending at the latest finished day.
    current_streak: u32,
    max_streak: u32,
}

impl PlayStats {
    /// Aggregates `(date, status, attempts)` records.
    ///
    /// Records may arrive in any order. A streak counts wins on consecutive
    /// calendar days. A loss, a skipped day or a day still in progress ends
    /// it. The current streak is the one ending at the latest finished day.
    #[instrument(skip(records), fields(count = records.len()))]
    pub fn from_records(records: &[(NaiveDate, SessionStatus, usize)]) -> Self {
        let mut sorted: Vec<_> = records.to_vec();
        sorted.sort_by_key(|(date, _, _)| *date);

        let mut stats = Self::default();
        let mut streak = 0u32;
        let mut last_finished: Option<NaiveDate> = None;

        for (date, status, attempts) in sorted {
            match status {
                SessionStatus::Playing => {
                    stats.in_progress += 1;
                    continue;
                }
                SessionStatus::Won => {
                    stats.wins += 1;
                    if let Some(index) = attempts.checked_sub(1)
                        && let Some(slot) = stats.distribution.get_mut(index)
                    {
                        *slot += 1;
                    }
                    let consecutive = last_finished
                        .and_then(|prev| prev.checked_add_days(Days::new(1)))
                        .is_some_and(|next| next == date);
                    streak = if consecutive { streak + 1 } else { 1 };
                }
                SessionStatus::Lost => {
                    stats.losses += 1;
                    streak = 0;
                }
            }
            stats.played += 1;
            stats.max_streak = stats.max_streak.max(streak);
            last_finished = Some(date);
        }

        stats.current_streak = streak;
        stats
    }

    /// Calculates win rate as a percentage (0.0–100.0).
    #[instrument(skip(self))]
    pub fn win_rate(&self) -> f64 {
        if self.played == 0 {
            0.0
        } else {
            (self.wins as f64 / self.played as f64) * 100.0
        }
    }
}
