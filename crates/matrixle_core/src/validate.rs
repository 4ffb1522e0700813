//! Guess validation: well-formed digits first, then arithmetic.
//!
//! Validation never panics and never mutates anything. A rejected candidate
//! comes back as a [`GuessRejection`] listing every defect found, in position
//! order, so the presentation layer can report them all at once.

use super::digit::Digit;
use super::equation::{ConsistentEquation, Equation};
use super::position::{CELL_COUNT, CellPosition};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{debug, instrument};

/// Raw, possibly incomplete cell values entered by the player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateGuess {
    cells: [Option<i64>; CELL_COUNT],
}

impl CandidateGuess {
    /// Creates a candidate from raw cells in canonical order.
    pub fn new(cells: [Option<i64>; CELL_COUNT]) -> Self {
        Self { cells }
    }

    /// Creates a candidate with every cell filled.
    pub fn from_values(values: [i64; CELL_COUNT]) -> Self {
        Self::new(values.map(Some))
    }

    /// Returns the raw value at a position.
    pub fn get(&self, position: CellPosition) -> Option<i64> {
        self.cells[position.to_index()]
    }

    /// Sets or clears the raw value at a position.
    pub fn set(&mut self, position: CellPosition, value: Option<i64>) {
        self.cells[position.to_index()] = value;
    }

    /// Returns raw cells in canonical order.
    pub fn cells(&self) -> &[Option<i64>; CELL_COUNT] {
        &self.cells
    }
}

impl From<&Equation> for CandidateGuess {
    fn from(equation: &Equation) -> Self {
        Self::new(equation.cells().map(|digit| Some(i64::from(digit.value()))))
    }
}

impl FromStr for CandidateGuess {
    type Err = ParseCandidateError;

    /// Parses up to eight tokens separated by whitespace or commas.
    ///
    /// `_` and `?` leave a cell empty, as do missing trailing tokens.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|token| !token.is_empty())
            .collect();
        if tokens.len() > CELL_COUNT {
            return Err(ParseCandidateError::TooManyCells(tokens.len()));
        }

        let mut candidate = Self::default();
        for (position, token) in CellPosition::ALL.into_iter().zip(tokens) {
            let value = match token {
                "_" | "?" => None,
                other => Some(other.parse::<i64>().map_err(|_| {
                    ParseCandidateError::NotANumber {
                        position,
                        token: other.to_string(),
                    }
                })?),
            };
            candidate.set(position, value);
        }
        Ok(candidate)
    }
}

/// Input that cannot be read as a candidate guess at all.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseCandidateError {
    /// More than eight tokens were supplied.
    #[display("Expected at most {} cells, got {}", CELL_COUNT, _0)]
    TooManyCells(usize),
    /// A token is not an integer.
    #[display("{} is not a number: '{}'", position, token)]
    NotANumber {
        /// Cell the token was meant for.
        position: CellPosition,
        /// The offending token.
        token: String,
    },
}

impl std::error::Error for ParseCandidateError {}

/// A single reason a candidate guess is not accepted.
#[derive(Debug, Clone, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum Defect {
    /// The cell has no value.
    #[display("{} is required", _0)]
    Missing(CellPosition),
    /// The cell value is not a digit from 1 to 9.
    #[display("{} must be a digit from 1 to 9 (got {})", position, value)]
    OutOfRange {
        /// Offending cell.
        position: CellPosition,
        /// Value entered.
        value: i64,
    },
    /// All cells are digits, but the result is not matrix times vector.
    #[display("The result does not equal the matrix times the vector")]
    ArithmeticInconsistent,
}

/// A rejected guess and every defect found in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessRejection {
    defects: Vec<Defect>,
}

impl GuessRejection {
    fn new(defects: Vec<Defect>) -> Self {
        debug_assert!(!defects.is_empty(), "rejection without defects");
        Self { defects }
    }

    /// Defects in checking order. Never empty.
    pub fn defects(&self) -> &[Defect] {
        &self.defects
    }

    /// Returns true if the only problem is the arithmetic.
    pub fn is_arithmetic(&self) -> bool {
        self.defects == [Defect::ArithmeticInconsistent]
    }
}

impl std::fmt::Display for GuessRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Guess rejected: ")?;
        for (index, defect) in self.defects.iter().enumerate() {
            if index > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", defect)?;
        }
        Ok(())
    }
}

impl std::error::Error for GuessRejection {}

/// Checks a candidate guess.
///
/// Rules, in order:
/// 1. every cell present, else [`Defect::Missing`];
/// 2. every present cell a digit 1-9, else [`Defect::OutOfRange`];
/// 3. only when 1 and 2 hold for all eight cells, the result must equal the
///    matrix-vector product, else a single [`Defect::ArithmeticInconsistent`].
#[instrument(skip(candidate), fields(cells = ?candidate.cells()))]
pub fn validate_guess(candidate: &CandidateGuess) -> Result<ConsistentEquation, GuessRejection> {
    let mut defects = Vec::new();
    let mut digits: [Option<Digit>; CELL_COUNT] = [None; CELL_COUNT];

    for position in CellPosition::ALL {
        match candidate.get(position) {
            None => defects.push(Defect::Missing(position)),
            Some(value) => match Digit::try_from(value) {
                Ok(digit) => digits[position.to_index()] = Some(digit),
                Err(_) => defects.push(Defect::OutOfRange { position, value }),
            },
        }
    }

    let cells = match (defects.is_empty(), all_present(digits)) {
        (true, Some(cells)) => cells,
        _ => {
            debug!(defects = defects.len(), "Candidate has field defects");
            return Err(GuessRejection::new(defects));
        }
    };

    ConsistentEquation::try_from(Equation::from_cells(cells)).map_err(|inconsistent| {
        debug!(%inconsistent, "Candidate arithmetic rejected");
        GuessRejection::new(vec![Defect::ArithmeticInconsistent])
    })
}

fn all_present(digits: [Option<Digit>; CELL_COUNT]) -> Option<[Digit; CELL_COUNT]> {
    let mut cells = [Digit::ONE; CELL_COUNT];
    for (slot, digit) in cells.iter_mut().zip(digits) {
        *slot = digit?;
    }
    Some(cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consistent_guess_accepted() {
        let candidate = CandidateGuess::from_values([2, 1, 1, 3, 3, 2, 8, 9]);
        let equation = validate_guess(&candidate).expect("accepted");
        assert_eq!(equation.product(), (8, 9));
    }

    #[test]
    fn test_missing_cells_reported_in_order() {
        let mut candidate = CandidateGuess::from_values([2, 1, 1, 3, 3, 2, 8, 9]);
        candidate.set(CellPosition::ResultBottom, None);
        candidate.set(CellPosition::TopRight, None);

        let rejection = validate_guess(&candidate).unwrap_err();
        assert_eq!(
            rejection.defects(),
            [
                Defect::Missing(CellPosition::TopRight),
                Defect::Missing(CellPosition::ResultBottom),
            ]
        );
    }

    #[test]
    fn test_zero_and_ten_out_of_range() {
        let candidate = CandidateGuess::from_values([0, 1, 1, 3, 3, 2, 8, 10]);
        let rejection = validate_guess(&candidate).unwrap_err();
        assert_eq!(
            rejection.defects(),
            [
                Defect::OutOfRange {
                    position: CellPosition::TopLeft,
                    value: 0
                },
                Defect::OutOfRange {
                    position: CellPosition::ResultBottom,
                    value: 10
                },
            ]
        );
    }

    #[test]
    fn test_field_defects_suppress_arithmetic_check() {
        // Arithmetic is also wrong here, but only field defects are reported.
        let candidate = CandidateGuess::new([Some(9), Some(9), None, Some(9), Some(9), Some(9), Some(1), Some(-4)]);
        let rejection = validate_guess(&candidate).unwrap_err();
        assert!(!rejection.defects().contains(&Defect::ArithmeticInconsistent));
        assert_eq!(rejection.defects().len(), 2);
    }

    #[test]
    fn test_wrong_arithmetic_single_defect() {
        let candidate = CandidateGuess::from_values([2, 1, 1, 3, 3, 2, 9, 8]);
        let rejection = validate_guess(&candidate).unwrap_err();
        assert!(rejection.is_arithmetic());
        assert_eq!(
            rejection.to_string(),
            "Guess rejected: The result does not equal the matrix times the vector"
        );
    }

    #[test]
    fn test_parse_full_and_partial_input() {
        let full: CandidateGuess = "2 1 1 3, 3 2, 8 9".parse().unwrap();
        assert_eq!(full, CandidateGuess::from_values([2, 1, 1, 3, 3, 2, 8, 9]));

        let partial: CandidateGuess = "2 _ 1 ? 3".parse().unwrap();
        assert_eq!(partial.get(CellPosition::TopLeft), Some(2));
        assert_eq!(partial.get(CellPosition::TopRight), None);
        assert_eq!(partial.get(CellPosition::BottomRight), None);
        assert_eq!(partial.get(CellPosition::VectorTop), Some(3));
        assert_eq!(partial.get(CellPosition::ResultBottom), None);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(
            "1 2 3 4 5 6 7 8 9".parse::<CandidateGuess>(),
            Err(ParseCandidateError::TooManyCells(9))
        );
        assert!(matches!(
            "1 x".parse::<CandidateGuess>(),
            Err(ParseCandidateError::NotANumber {
                position: CellPosition::TopRight,
                ..
            })
        ));
    }
}
