//! Matrix, vector and result components of a Matrixle equation.
//!
//! An [`Equation`] is any eight digits laid out as `[a b; c d] x [e; f] = [g; h]`.
//! A [`ConsistentEquation`] is one whose result really is the matrix-vector
//! product. Only the checked form can become a puzzle or a guess.

use super::digit::Digit;
use super::position::CELL_COUNT;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::ops::Deref;
use tracing::{instrument, trace};

/// 2x2 matrix `[a b; c d]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Matrix {
    /// Row 1, column 1 (a).
    pub top_left: Digit,
    /// Row 1, column 2 (b).
    pub top_right: Digit,
    /// Row 2, column 1 (c).
    pub bottom_left: Digit,
    /// Row 2, column 2 (d).
    pub bottom_right: Digit,
}

impl Matrix {
    /// Creates a matrix from its four cells in row-major order.
    pub fn new(top_left: Digit, top_right: Digit, bottom_left: Digit, bottom_right: Digit) -> Self {
        Self {
            top_left,
            top_right,
            bottom_left,
            bottom_right,
        }
    }

    /// Row-by-column product with a vector: `(a·e + b·f, c·e + d·f)`.
    pub fn apply(&self, vector: &Vector) -> (u32, u32) {
        let (a, b) = (u32::from(self.top_left.value()), u32::from(self.top_right.value()));
        let (c, d) = (u32::from(self.bottom_left.value()), u32::from(self.bottom_right.value()));
        let (e, f) = (u32::from(vector.top.value()), u32::from(vector.bottom.value()));
        (a * e + b * f, c * e + d * f)
    }
}

/// 2x1 column vector `[e; f]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vector {
    /// Top element (e).
    pub top: Digit,
    /// Bottom element (f).
    pub bottom: Digit,
}

impl Vector {
    /// Creates a vector.
    pub fn new(top: Digit, bottom: Digit) -> Self {
        Self { top, bottom }
    }
}

/// 2x1 claimed product `[g; h]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResultPair {
    /// Top component (g).
    pub top: Digit,
    /// Bottom component (h).
    pub bottom: Digit,
}

impl ResultPair {
    /// Creates a result pair.
    pub fn new(top: Digit, bottom: Digit) -> Self {
        Self { top, bottom }
    }
}

/// Eight digits arranged as a matrix, a vector and a claimed result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Equation {
    /// The 2x2 matrix.
    pub matrix: Matrix,
    /// The 2x1 vector.
    pub vector: Vector,
    /// The claimed 2x1 result.
    pub result: ResultPair,
}

impl Equation {
    /// Creates an equation from its parts.
    pub fn new(matrix: Matrix, vector: Vector, result: ResultPair) -> Self {
        Self {
            matrix,
            vector,
            result,
        }
    }

    /// Builds an equation from cells in canonical position order.
    pub fn from_cells(cells: [Digit; CELL_COUNT]) -> Self {
        let [a, b, c, d, e, f, g, h] = cells;
        Self {
            matrix: Matrix::new(a, b, c, d),
            vector: Vector::new(e, f),
            result: ResultPair::new(g, h),
        }
    }

    /// Cells in canonical position order.
    pub fn cells(&self) -> [Digit; CELL_COUNT] {
        [
            self.matrix.top_left,
            self.matrix.top_right,
            self.matrix.bottom_left,
            self.matrix.bottom_right,
            self.vector.top,
            self.vector.bottom,
            self.result.top,
            self.result.bottom,
        ]
    }

    /// The true product of the matrix and vector.
    pub fn product(&self) -> (u32, u32) {
        self.matrix.apply(&self.vector)
    }

    /// Returns true if the claimed result equals the product.
    pub fn is_consistent(&self) -> bool {
        let (top, bottom) = self.product();
        top == u32::from(self.result.top.value()) && bottom == u32::from(self.result.bottom.value())
    }
}

impl std::fmt::Display for Equation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{} {}; {} {}] x [{}; {}] = [{}; {}]",
            self.matrix.top_left,
            self.matrix.top_right,
            self.matrix.bottom_left,
            self.matrix.bottom_right,
            self.vector.top,
            self.vector.bottom,
            self.result.top,
            self.result.bottom,
        )
    }
}

/// An equation whose claimed result equals the matrix-vector product.
///
/// Obtained only through [`TryFrom<Equation>`]. Deserialization goes through
/// the same check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Equation", into = "Equation")]
pub struct ConsistentEquation(Equation);

impl ConsistentEquation {
    /// Returns the underlying equation.
    pub fn equation(&self) -> &Equation {
        &self.0
    }
}

impl TryFrom<Equation> for ConsistentEquation {
    type Error = InconsistentEquation;

    #[instrument(skip(equation), fields(equation = %equation))]
    fn try_from(equation: Equation) -> Result<Self, Self::Error> {
        if equation.is_consistent() {
            Ok(Self(equation))
        } else {
            let (top, bottom) = equation.product();
            trace!(top, bottom, "Claimed result does not match product");
            Err(InconsistentEquation {
                equation,
                product_top: top,
                product_bottom: bottom,
            })
        }
    }
}

impl From<ConsistentEquation> for Equation {
    fn from(checked: ConsistentEquation) -> Self {
        checked.0
    }
}

impl Deref for ConsistentEquation {
    type Target = Equation;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for ConsistentEquation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

/// An equation whose claimed result is not the matrix-vector product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display(
    "{} is inconsistent: product is [{}; {}]",
    equation,
    product_top,
    product_bottom
)]
pub struct InconsistentEquation {
    /// The rejected equation.
    pub equation: Equation,
    /// Actual top component of the product.
    pub product_top: u32,
    /// Actual bottom component of the product.
    pub product_bottom: u32,
}
