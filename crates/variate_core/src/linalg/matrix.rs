//! Dense matrix operations.
//!
//! Matrices are row-major slices of rows (`&[Vec<T>]`) and must be
//! rectangular. Operations are generic over `T: Num + Copy`, so they work for
//! both integer and floating-point element types. Each allocating operation has
//! an `*_into` variant writing into a caller-supplied output of the right shape.

use num_traits::Num;

use crate::error::MathError;

/// Shape of a rectangular matrix as (rows, cols).
///
/// # Errors
/// `MathError::DimensionMismatch` if the rows differ in length.
pub fn shape<T>(m: &[Vec<T>]) -> Result<(usize, usize), MathError> {
    let rows = m.len();
    let cols = m.first().map_or(0, Vec::len);
    if let Some(row) = m.iter().find(|row| row.len() != cols) {
        return Err(MathError::DimensionMismatch {
            expected: (rows, cols),
            got: (rows, row.len()),
        });
    }
    Ok((rows, cols))
}

fn require_shape<T>(m: &[Vec<T>], expected: (usize, usize)) -> Result<(), MathError> {
    let got = shape(m)?;
    if got != expected {
        return Err(MathError::DimensionMismatch { expected, got });
    }
    Ok(())
}

fn elementwise_into<T, F>(
    a: &[Vec<T>],
    b: &[Vec<T>],
    out: &mut [Vec<T>],
    op: F,
) -> Result<(), MathError>
where
    T: Num + Copy,
    F: Fn(T, T) -> T,
{
    let dims = shape(a)?;
    require_shape(b, dims)?;
    require_shape(out, dims)?;
    for ((row_a, row_b), row_out) in a.iter().zip(b).zip(out.iter_mut()) {
        for ((&x, &y), slot) in row_a.iter().zip(row_b).zip(row_out.iter_mut()) {
            *slot = op(x, y);
        }
    }
    Ok(())
}

/// Element-wise sum `a + b`.
///
/// # Errors
/// `MathError::DimensionMismatch` if the shapes differ or either matrix is ragged.
///
/// # Examples
/// ```
/// use variate_core::linalg::sum;
///
/// let c = sum(&[vec![1, 2], vec![3, 4]], &[vec![10, 20], vec![30, 40]]).unwrap();
/// assert_eq!(c, vec![vec![11, 22], vec![33, 44]]);
/// ```
pub fn sum<T: Num + Copy>(a: &[Vec<T>], b: &[Vec<T>]) -> Result<Vec<Vec<T>>, MathError> {
    let (rows, cols) = shape(a)?;
    let mut out = vec![vec![T::zero(); cols]; rows];
    sum_into(a, b, &mut out)?;
    Ok(out)
}

/// Element-wise sum written into `out`.
///
/// # Errors
/// `MathError::DimensionMismatch` if any of the three shapes differ.
pub fn sum_into<T: Num + Copy>(
    a: &[Vec<T>],
    b: &[Vec<T>],
    out: &mut [Vec<T>],
) -> Result<(), MathError> {
    elementwise_into(a, b, out, |x, y| x + y)
}

/// Element-wise difference `a - b`.
///
/// # Errors
/// `MathError::DimensionMismatch` if the shapes differ or either matrix is ragged.
pub fn difference<T: Num + Copy>(a: &[Vec<T>], b: &[Vec<T>]) -> Result<Vec<Vec<T>>, MathError> {
    let (rows, cols) = shape(a)?;
    let mut out = vec![vec![T::zero(); cols]; rows];
    difference_into(a, b, &mut out)?;
    Ok(out)
}

/// Element-wise difference written into `out`.
///
/// # Errors
/// `MathError::DimensionMismatch` if any of the three shapes differ.
pub fn difference_into<T: Num + Copy>(
    a: &[Vec<T>],
    b: &[Vec<T>],
    out: &mut [Vec<T>],
) -> Result<(), MathError> {
    elementwise_into(a, b, out, |x, y| x - y)
}

/// Matrix product `a · b` of an `m×n` and an `n×p` matrix.
///
/// # Errors
/// `MathError::DimensionMismatch` if the inner dimensions disagree or either
/// matrix is ragged.
///
/// # Examples
/// ```
/// use variate_core::linalg::product;
///
/// let a = vec![vec![1.0, 2.0, 3.0]];
/// let b = vec![vec![4.0], vec![5.0], vec![6.0]];
/// assert_eq!(product(&a, &b).unwrap(), vec![vec![32.0]]);
/// ```
pub fn product<T: Num + Copy>(a: &[Vec<T>], b: &[Vec<T>]) -> Result<Vec<Vec<T>>, MathError> {
    let (rows, _) = shape(a)?;
    let (_, cols) = shape(b)?;
    let mut out = vec![vec![T::zero(); cols]; rows];
    product_into(a, b, &mut out)?;
    Ok(out)
}

/// Matrix product written into `out`, which must be `m×p`.
///
/// # Errors
/// `MathError::DimensionMismatch` if the inner dimensions disagree or `out`
/// has the wrong shape.
pub fn product_into<T: Num + Copy>(
    a: &[Vec<T>],
    b: &[Vec<T>],
    out: &mut [Vec<T>],
) -> Result<(), MathError> {
    let (m, n) = shape(a)?;
    let (n_b, p) = shape(b)?;
    if n != n_b {
        return Err(MathError::DimensionMismatch {
            expected: (n, p),
            got: (n_b, p),
        });
    }
    require_shape(out, (m, p))?;

    for (row_a, row_out) in a.iter().zip(out.iter_mut()) {
        for (j, slot) in row_out.iter_mut().enumerate() {
            *slot = row_a
                .iter()
                .zip(b)
                .fold(T::zero(), |acc, (&x, row_b)| acc + x * row_b[j]);
        }
    }
    Ok(())
}

/// Transpose a square matrix in place.
///
/// # Errors
/// - `MathError::NotSquare` if the matrix is not square
/// - `MathError::DimensionMismatch` if it is ragged
///
/// # Examples
/// ```
/// use variate_core::linalg::transpose_square_in_place;
///
/// let mut m = vec![vec![1, 2], vec![3, 4]];
/// transpose_square_in_place(&mut m).unwrap();
/// assert_eq!(m, vec![vec![1, 3], vec![2, 4]]);
/// ```
pub fn transpose_square_in_place<T>(m: &mut [Vec<T>]) -> Result<(), MathError> {
    let (rows, cols) = shape(m)?;
    if rows != cols {
        return Err(MathError::NotSquare { rows, cols });
    }
    for i in 0..rows {
        for j in (i + 1)..cols {
            let (upper, lower) = m.split_at_mut(j);
            std::mem::swap(&mut upper[i][j], &mut lower[0][i]);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_and_difference() {
        let a = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
        let b = vec![vec![0.5, 0.5], vec![1.0, -1.0]];
        assert_eq!(sum(&a, &b).unwrap(), vec![vec![1.5, 2.5], vec![4.0, 3.0]]);
        assert_eq!(difference(&a, &b).unwrap(), vec![vec![0.5, 1.5], vec![2.0, 5.0]]);
    }

    #[test]
    fn test_sum_into_reuses_output() {
        let a = vec![vec![1, 2, 3]];
        let b = vec![vec![4, 5, 6]];
        let mut out = vec![vec![0; 3]];
        sum_into(&a, &b, &mut out).unwrap();
        assert_eq!(out, vec![vec![5, 7, 9]]);
    }

    #[test]
    fn test_shape_mismatch() {
        let a = vec![vec![1, 2], vec![3, 4]];
        let b = vec![vec![1, 2, 3]];
        assert_eq!(
            sum(&a, &b),
            Err(MathError::DimensionMismatch {
                expected: (2, 2),
                got: (1, 3)
            })
        );
        let mut wrong = vec![vec![0; 1]; 2];
        assert!(difference_into(&a, &a, &mut wrong).is_err());
    }

    #[test]
    fn test_ragged_matrix_rejected() {
        let ragged = vec![vec![1, 2], vec![3]];
        assert!(matches!(shape(&ragged), Err(MathError::DimensionMismatch { .. })));
    }

    #[test]
    fn test_product_rectangular() {
        let a = vec![vec![1, 2, 3], vec![4, 5, 6]];
        let b = vec![vec![7, 8], vec![9, 10], vec![11, 12]];
        assert_eq!(product(&a, &b).unwrap(), vec![vec![58, 64], vec![139, 154]]);
    }

    #[test]
    fn test_product_inner_dimension_mismatch() {
        let a = vec![vec![1.0, 2.0]];
        let b = vec![vec![1.0, 2.0]];
        assert!(matches!(product(&a, &b), Err(MathError::DimensionMismatch { .. })));
    }

    #[test]
    fn test_product_identity() {
        let a = vec![vec![2.0, -1.0], vec![0.5, 3.0]];
        let identity = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        assert_eq!(product(&a, &identity).unwrap(), a);
        assert_eq!(product(&identity, &a).unwrap(), a);
    }

    #[test]
    fn test_transpose_square_in_place() {
        let mut m = vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9]];
        transpose_square_in_place(&mut m).unwrap();
        assert_eq!(m, vec![vec![1, 4, 7], vec![2, 5, 8], vec![3, 6, 9]]);
    }

    #[test]
    fn test_transpose_rejects_non_square() {
        let mut m = vec![vec![1, 2, 3], vec![4, 5, 6]];
        assert_eq!(
            transpose_square_in_place(&mut m),
            Err(MathError::NotSquare { rows: 2, cols: 3 })
        );
    }
}
