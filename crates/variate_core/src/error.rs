//! Error types for the numerical foundation.
//!
//! Every fallible routine in this crate returns [`MathError`]; callers in higher
//! layers either propagate it with `?` or convert it into their own error type.

use thiserror::Error;

/// Errors raised by special functions, statistics and linear algebra.
///
/// # Variants
/// - `EmptyInput`: a non-empty slice was required
/// - `DimensionMismatch`: operand shapes are incompatible
/// - `NotSquare`: a square matrix was required
/// - `DomainError`: an argument lies outside the function's domain
/// - `NotConverged`: an iterative method exhausted its iteration budget
///
/// # Examples
/// ```
/// use variate_core::MathError;
///
/// let err = MathError::NotSquare { rows: 2, cols: 3 };
/// assert_eq!(format!("{}", err), "Matrix must be square, got 2x3");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MathError {
    /// The input slice was empty.
    #[error("Empty input: at least one value is required")]
    EmptyInput,

    /// Operand shapes do not agree.
    #[error("Dimension mismatch: expected {expected:?}, got {got:?}")]
    DimensionMismatch {
        /// Shape the operation required, as (rows, cols) or (len, 1).
        expected: (usize, usize),
        /// Shape actually supplied.
        got: (usize, usize),
    },

    /// A square matrix was required.
    #[error("Matrix must be square, got {rows}x{cols}")]
    NotSquare {
        /// Number of rows supplied.
        rows: usize,
        /// Number of columns supplied.
        cols: usize,
    },

    /// Argument outside the domain of the function.
    #[error("Domain error: {0}")]
    DomainError(String),

    /// An iterative method did not converge.
    #[error("Failed to converge after {iterations} iterations")]
    NotConverged {
        /// Iterations performed before giving up.
        iterations: usize,
    },
}

impl MathError {
    /// Shorthand for a [`MathError::DimensionMismatch`] between two vector lengths.
    pub fn length_mismatch(expected: usize, got: usize) -> Self {
        MathError::DimensionMismatch {
            expected: (expected, 1),
            got: (got, 1),
        }
    }
}
