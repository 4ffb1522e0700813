//! Canonical cell positions of a Matrixle equation.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Number of cells in an equation: four matrix, two vector, two result.
pub const CELL_COUNT: usize = 8;

/// One of the eight cells of `[a b; c d] x [e; f] = [g; h]`.
///
/// The declaration order is the canonical position order used by the
/// validator, the classifier and the win detector.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, strum::EnumIter,
)]
pub enum CellPosition {
    /// Matrix top-left (a).
    TopLeft,
    /// Matrix top-right (b).
    TopRight,
    /// Matrix bottom-left (c).
    BottomLeft,
    /// Matrix bottom-right (d).
    BottomRight,
    /// Vector top (e).
    VectorTop,
    /// Vector bottom (f).
    VectorBottom,
    /// Result top (g).
    ResultTop,
    /// Result bottom (h).
    ResultBottom,
}

impl CellPosition {
    /// All 8 positions in canonical order.
    pub const ALL: [CellPosition; CELL_COUNT] = [
        CellPosition::TopLeft,
        CellPosition::TopRight,
        CellPosition::BottomLeft,
        CellPosition::BottomRight,
        CellPosition::VectorTop,
        CellPosition::VectorBottom,
        CellPosition::ResultTop,
        CellPosition::ResultBottom,
    ];

    /// Get label for this position (for display).
    pub fn label(&self) -> &'static str {
        match self {
            CellPosition::TopLeft => "Matrix top-left",
            CellPosition::TopRight => "Matrix top-right",
            CellPosition::BottomLeft => "Matrix bottom-left",
            CellPosition::BottomRight => "Matrix bottom-right",
            CellPosition::VectorTop => "Vector top",
            CellPosition::VectorBottom => "Vector bottom",
            CellPosition::ResultTop => "Result top",
            CellPosition::ResultBottom => "Result bottom",
        }
    }

    /// Single-letter name of the cell (`a` through `h`).
    pub fn letter(&self) -> char {
        match self {
            CellPosition::TopLeft => 'a',
            CellPosition::TopRight => 'b',
            CellPosition::BottomLeft => 'c',
            CellPosition::BottomRight => 'd',
            CellPosition::VectorTop => 'e',
            CellPosition::VectorBottom => 'f',
            CellPosition::ResultTop => 'g',
            CellPosition::ResultBottom => 'h',
        }
    }

    /// Converts position to cell index (0-7).
    pub fn to_index(self) -> usize {
        match self {
            CellPosition::TopLeft => 0,
            CellPosition::TopRight => 1,
            CellPosition::BottomLeft => 2,
            CellPosition::BottomRight => 3,
            CellPosition::VectorTop => 4,
            CellPosition::VectorBottom => 5,
            CellPosition::ResultTop => 6,
            CellPosition::ResultBottom => 7,
        }
    }

    /// Creates position from cell index.
    #[instrument]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Parses a cell letter (`a`-`h`, case-insensitive).
    #[instrument]
    pub fn from_letter(letter: char) -> Option<Self> {
        let letter = letter.to_ascii_lowercase();
        <CellPosition as strum::IntoEnumIterator>::iter().find(|pos| pos.letter() == letter)
    }
}

impl std::fmt::Display for CellPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.label(), self.letter())
    }
}
