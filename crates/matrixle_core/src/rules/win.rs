//! Win detection for Matrixle.

use super::super::{Equation, Puzzle};
use tracing::instrument;

/// Returns true if all eight cells of the guess equal the secret's.
#[instrument(skip(guess, puzzle), fields(puzzle_id = puzzle.id()))]
pub fn is_winning_guess(guess: &Equation, puzzle: &Puzzle) -> bool {
    guess.cells() == puzzle.cells()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::classify_guess;
    use crate::{CELL_COUNT, ConsistentEquation, Digit, Feedback};
    use chrono::NaiveDate;

    fn equation(values: [u8; CELL_COUNT]) -> Equation {
        Equation::from_cells(values.map(|v| Digit::new(v).expect("test digit")))
    }

    fn puzzle() -> Puzzle {
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).expect("valid date");
        let secret = ConsistentEquation::try_from(equation([2, 1, 1, 3, 3, 2, 8, 9]))
            .expect("consistent secret");
        Puzzle::new(1, date, secret)
    }

    #[test]
    fn test_identical_guess_wins() {
        assert!(is_winning_guess(&equation([2, 1, 1, 3, 3, 2, 8, 9]), &puzzle()));
    }

    #[test]
    fn test_single_cell_difference_loses() {
        assert!(!is_winning_guess(&equation([2, 1, 1, 3, 3, 2, 8, 8]), &puzzle()));
    }

    #[test]
    fn test_win_iff_all_exact() {
        let puzzle = puzzle();
        let candidates = [
            [2, 1, 1, 3, 3, 2, 8, 9],
            [1, 2, 3, 1, 2, 3, 9, 8],
            [2, 1, 1, 3, 3, 2, 9, 8],
            [4, 5, 6, 7, 4, 5, 6, 7],
        ];
        for raw in candidates {
            let guess = equation(raw);
            let all_exact = classify_guess(&guess.cells(), &puzzle.cells())
                .iter()
                .all(|label| *label == Feedback::Exact);
            assert_eq!(is_winning_guess(&guess, &puzzle), all_exact, "{raw:?}");
        }
    }
}
