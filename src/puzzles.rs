//! Daily puzzle selection.
//!
//! A [`PuzzleTable`] maps calendar days onto a fixed rotation of secret
//! equations, counted from a launch date. Puzzle ids start at 1 on launch day.

use chrono::NaiveDate;
use derive_getters::Getters;
use derive_more::Display;
use matrixle_core::{CELL_COUNT, CandidateGuess, ConsistentEquation, Puzzle, validate_guess};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info, instrument};

/// First day of the built-in rotation.
pub const DEFAULT_LAUNCH: (i32, u32, u32) = (2026, 1, 1);

/// Built-in secrets, in rotation order.
const BUILTIN: [[i64; CELL_COUNT]; 20] = [
    [2, 1, 1, 3, 3, 2, 8, 9],
    [1, 2, 3, 1, 1, 3, 7, 6],
    [1, 1, 1, 2, 4, 2, 6, 8],
    [3, 1, 1, 1, 2, 3, 9, 5],
    [2, 2, 1, 3, 1, 2, 6, 7],
    [1, 3, 2, 1, 3, 2, 9, 8],
    [4, 1, 1, 2, 1, 4, 8, 9],
    [1, 2, 1, 1, 5, 2, 9, 7],
    [2, 1, 1, 1, 2, 4, 8, 6],
    [1, 1, 2, 3, 3, 1, 4, 9],
    [3, 2, 1, 4, 1, 2, 7, 9],
    [1, 4, 2, 1, 1, 2, 9, 4],
    [2, 3, 1, 1, 3, 1, 9, 4],
    [5, 1, 1, 2, 1, 3, 8, 7],
    [1, 2, 3, 2, 1, 1, 3, 5],
    [1, 1, 1, 1, 4, 5, 9, 9],
    [2, 1, 1, 2, 2, 3, 7, 8],
    [3, 3, 1, 2, 1, 2, 9, 5],
    [1, 6, 2, 1, 3, 1, 9, 7],
    [4, 2, 1, 3, 1, 2, 8, 7],
];

/// Puzzle lookup or table loading failure.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum PuzzleError {
    /// The requested day precedes the first puzzle.
    #[display("No puzzle for {}: the first puzzle is on {}", date, launch)]
    BeforeLaunch {
        /// Requested day.
        date: NaiveDate,
        /// First day of the table.
        launch: NaiveDate,
    },
    /// The requested day is too far from launch to number.
    #[display("No puzzle number for {}", _0)]
    DateOutOfRange(NaiveDate),
    /// The table has no entries.
    #[display("Puzzle table is empty")]
    EmptyTable,
    /// A table entry is not a valid secret.
    #[display("Puzzle entry {} is invalid: {}", index, reason)]
    InvalidEntry {
        /// Zero-based entry index.
        index: usize,
        /// What is wrong with it.
        reason: String,
    },
    /// The table file could not be read.
    #[display("Failed to read puzzle file: {}", _0)]
    Io(String),
    /// The table file is not valid TOML.
    #[display("Failed to parse puzzle file: {}", _0)]
    Parse(String),
}

impl std::error::Error for PuzzleError {}

/// Source of the puzzle for a given day.
pub trait PuzzleProvider {
    /// Returns the puzzle scheduled for `date`.
    ///
    /// # Errors
    ///
    /// Returns [`PuzzleError`] if no puzzle is scheduled for that day.
    fn puzzle_for_date(&self, date: NaiveDate) -> Result<Puzzle, PuzzleError>;
}

impl<T: PuzzleProvider + ?Sized> PuzzleProvider for &T {
    fn puzzle_for_date(&self, date: NaiveDate) -> Result<Puzzle, PuzzleError> {
        (**self).puzzle_for_date(date)
    }
}

/// On-disk layout of a puzzle table.
#[derive(Debug, Deserialize)]
struct PuzzleFile {
    launch_date: NaiveDate,
    puzzles: Vec<PuzzleEntry>,
}

#[derive(Debug, Deserialize)]
struct PuzzleEntry {
    cells: Vec<i64>,
}

/// A launch date plus a rotation of secret equations.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct PuzzleTable {
    /// Day of puzzle 1.
    launch_date: NaiveDate,
    /// Secrets in rotation order.
    entries: Vec<ConsistentEquation>,
}

impl PuzzleTable {
    /// Creates a table from already-checked secrets.
    ///
    /// # Errors
    ///
    /// Returns [`PuzzleError::EmptyTable`] if `entries` is empty.
    #[instrument(skip(entries), fields(count = entries.len()))]
    pub fn new(launch_date: NaiveDate, entries: Vec<ConsistentEquation>) -> Result<Self, PuzzleError> {
        if entries.is_empty() {
            return Err(PuzzleError::EmptyTable);
        }
        Ok(Self {
            launch_date,
            entries,
        })
    }

    /// The rotation that ships with the game, starting 2026-01-01.
    ///
    /// # Errors
    ///
    /// Returns [`PuzzleError`] only if a built-in entry is malformed.
    #[instrument]
    pub fn builtin() -> Result<Self, PuzzleError> {
        let (year, month, day) = DEFAULT_LAUNCH;
        let launch = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| PuzzleError::Parse("invalid built-in launch date".to_string()))?;
        let rows: Vec<Vec<i64>> = BUILTIN.iter().map(|row| row.to_vec()).collect();
        Self::from_rows(launch, &rows)
    }

    /// Parses a table from TOML.
    ///
    /// ```toml
    /// launch_date = "2026-01-01"
    ///
    /// [[puzzles]]
    /// cells = [2, 1, 1, 3, 3, 2, 8, 9]
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`PuzzleError`] if the TOML is malformed or any entry is not a
    /// consistent equation of digits 1 to 9.
    #[instrument(skip(content), fields(bytes = content.len()))]
    pub fn from_toml_str(content: &str) -> Result<Self, PuzzleError> {
        let file: PuzzleFile =
            toml::from_str(content).map_err(|e| PuzzleError::Parse(e.to_string()))?;
        let rows: Vec<Vec<i64>> = file.puzzles.into_iter().map(|entry| entry.cells).collect();
        Self::from_rows(file.launch_date, &rows)
    }

    /// Loads a table from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`PuzzleError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PuzzleError> {
        debug!("Loading puzzle table");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| PuzzleError::Io(e.to_string()))?;
        let table = Self::from_toml_str(&content)?;
        info!(count = table.len(), launch = %table.launch_date, "Puzzle table loaded");
        Ok(table)
    }

    fn from_rows(launch_date: NaiveDate, rows: &[Vec<i64>]) -> Result<Self, PuzzleError> {
        let mut entries = Vec::with_capacity(rows.len());
        for (index, row) in rows.iter().enumerate() {
            let values: [i64; CELL_COUNT] =
                row.as_slice()
                    .try_into()
                    .map_err(|_| PuzzleError::InvalidEntry {
                        index,
                        reason: format!("expected {} cells, got {}", CELL_COUNT, row.len()),
                    })?;
            let equation = validate_guess(&CandidateGuess::from_values(values)).map_err(|rejection| {
                PuzzleError::InvalidEntry {
                    index,
                    reason: rejection.to_string(),
                }
            })?;
            entries.push(equation);
        }
        Self::new(launch_date, entries)
    }

    /// Number of secrets in the rotation.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a constructed table.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PuzzleProvider for PuzzleTable {
    #[instrument(skip(self), fields(launch = %self.launch_date))]
    fn puzzle_for_date(&self, date: NaiveDate) -> Result<Puzzle, PuzzleError> {
        let days = date.signed_duration_since(self.launch_date).num_days();
        let Ok(offset) = usize::try_from(days) else {
            return Err(PuzzleError::BeforeLaunch {
                date,
                launch: self.launch_date,
            });
        };
        let id = u32::try_from(offset + 1).map_err(|_| PuzzleError::DateOutOfRange(date))?;
        let equation = self.entries[offset % self.entries.len()];
        debug!(id, slot = offset % self.entries.len(), "Puzzle selected");
        Ok(Puzzle::new(id, date, equation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn test_builtin_table_is_valid() {
        let table = PuzzleTable::builtin().expect("builtin table");
        assert_eq!(table.len(), BUILTIN.len());
        assert_eq!(*table.launch_date(), date(2026, 1, 1));
    }

    #[test]
    fn test_launch_day_is_puzzle_one() {
        let table = PuzzleTable::builtin().expect("builtin table");
        let puzzle = table.puzzle_for_date(date(2026, 1, 1)).expect("puzzle");
        assert_eq!(*puzzle.id(), 1);
        assert_eq!(puzzle.cells().map(u8::from), [2, 1, 1, 3, 3, 2, 8, 9]);
    }

    #[test]
    fn test_rotation_wraps() {
        let table = PuzzleTable::builtin().expect("builtin table");
        let first = table.puzzle_for_date(date(2026, 1, 1)).expect("puzzle");
        let wrapped = table.puzzle_for_date(date(2026, 1, 21)).expect("puzzle");
        assert_eq!(*wrapped.id(), 21);
        assert_eq!(wrapped.equation(), first.equation());
    }

    #[test]
    fn test_before_launch_is_error() {
        let table = PuzzleTable::builtin().expect("builtin table");
        let result = table.puzzle_for_date(date(2025, 12, 31));
        assert!(matches!(result, Err(PuzzleError::BeforeLaunch { .. })));
    }

    #[test]
    fn test_empty_table_rejected() {
        assert_eq!(
            PuzzleTable::new(date(2026, 1, 1), Vec::new()),
            Err(PuzzleError::EmptyTable)
        );
    }

    #[test]
    fn test_short_row_rejected() {
        let result = PuzzleTable::from_rows(date(2026, 1, 1), &[vec![1, 2, 3]]);
        assert!(matches!(result, Err(PuzzleError::InvalidEntry { index: 0, .. })));
    }
}
