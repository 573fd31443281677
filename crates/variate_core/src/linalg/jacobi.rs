//! Eigen-decomposition of real symmetric matrices by cyclic Jacobi rotations.
//!
//! Each sweep visits every upper off-diagonal entry and annihilates it with a
//! plane rotation. The first three sweeps skip entries below a threshold of
//! `0.2 · off / n²`; from the fifth sweep on, entries negligible relative to
//! both diagonal neighbours are zeroed directly. The accumulated rotations
//! form the eigenvector matrix.
//!
//! # Examples
//! ```
//! use variate_core::linalg::{JacobiDiagonalization, JacobiOutcome};
//!
//! let mut jacobi = JacobiDiagonalization::new(&[vec![2.0, 1.0], vec![1.0, 2.0]]).unwrap();
//! assert!(jacobi.eigenvalues().is_none());
//!
//! let outcome = jacobi.compute();
//! assert!(outcome.is_converged());
//!
//! let mut values = jacobi.eigenvalues().unwrap().to_vec();
//! values.sort_by(f64::total_cmp);
//! assert!((values[0] - 1.0).abs() < 1e-10);
//! assert!((values[1] - 3.0).abs() < 1e-10);
//! ```

use tracing::warn;

use super::config::JacobiConfig;
use super::matrix::shape;
use crate::error::MathError;

/// Result of a Jacobi run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JacobiOutcome {
    /// Off-diagonal mass fell below tolerance after the given number of sweeps.
    Converged {
        /// Sweeps performed (0 for an already diagonal matrix).
        sweeps: usize,
    },
    /// The sweep budget ran out. A best-effort decomposition is still stored.
    NotConverged {
        /// Sweeps performed.
        iterations: usize,
    },
}

impl JacobiOutcome {
    /// Whether the decomposition met the tolerance.
    pub fn is_converged(&self) -> bool {
        matches!(self, JacobiOutcome::Converged { .. })
    }

    /// Convert to a `Result`, mapping non-convergence to [`MathError::NotConverged`].
    ///
    /// # Errors
    /// `MathError::NotConverged` for [`JacobiOutcome::NotConverged`].
    pub fn into_result(self) -> Result<usize, MathError> {
        match self {
            JacobiOutcome::Converged { sweeps } => Ok(sweeps),
            JacobiOutcome::NotConverged { iterations } => {
                Err(MathError::NotConverged { iterations })
            }
        }
    }
}

/// Jacobi diagonalisation of a symmetric matrix.
///
/// Construction validates the shape; [`compute`](Self::compute) performs the
/// rotations. Eigenvalues and eigenvectors are `None` until a computation has
/// run. Only the upper triangle of the input is read.
#[derive(Debug, Clone)]
pub struct JacobiDiagonalization {
    matrix: Vec<Vec<f64>>,
    eigenvalues: Option<Vec<f64>>,
    eigenvectors: Option<Vec<Vec<f64>>>,
}

impl JacobiDiagonalization {
    /// Prepare the decomposition of a square matrix.
    ///
    /// # Errors
    /// - `MathError::NotSquare` if the matrix is not square
    /// - `MathError::DimensionMismatch` if it is ragged
    pub fn new<T: Copy + Into<f64>>(matrix: &[Vec<T>]) -> Result<Self, MathError> {
        let (rows, cols) = shape(matrix)?;
        if rows != cols {
            return Err(MathError::NotSquare { rows, cols });
        }
        let matrix = matrix
            .iter()
            .map(|row| row.iter().map(|&v| v.into()).collect())
            .collect();
        Ok(Self {
            matrix,
            eigenvalues: None,
            eigenvectors: None,
        })
    }

    /// Run with the default [`JacobiConfig`].
    pub fn compute(&mut self) -> JacobiOutcome {
        self.compute_with(&JacobiConfig::default())
    }

    /// Run with an explicit tolerance and sweep budget.
    ///
    /// Recomputes from the original matrix each time it is called.
    pub fn compute_with(&mut self, config: &JacobiConfig) -> JacobiOutcome {
        let n = self.matrix.len();
        let mut a = self.matrix.clone();
        let mut v: Vec<Vec<f64>> = (0..n)
            .map(|i| (0..n).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
            .collect();
        let mut d: Vec<f64> = (0..n).map(|i| a[i][i]).collect();
        let mut b = d.clone();
        let mut z = vec![0.0; n];

        let mut outcome = None;
        for sweep in 1..=config.max_iterations {
            let off = off_diagonal_mass(&a);
            if off < config.tolerance {
                outcome = Some(JacobiOutcome::Converged { sweeps: sweep - 1 });
                break;
            }

            let threshold = if sweep < 4 {
                0.2 * off / (n * n) as f64
            } else {
                0.0
            };

            for p in 0..n.saturating_sub(1) {
                for q in (p + 1)..n {
                    let g = 100.0 * a[p][q].abs();
                    if sweep > 4 && d[p].abs() + g == d[p].abs() && d[q].abs() + g == d[q].abs()
                    {
                        a[p][q] = 0.0;
                    } else if a[p][q].abs() > threshold {
                        let h = d[q] - d[p];
                        let t = if h.abs() + g == h.abs() {
                            a[p][q] / h
                        } else {
                            let theta = 0.5 * h / a[p][q];
                            let t = 1.0 / (theta.abs() + (1.0 + theta * theta).sqrt());
                            if theta < 0.0 {
                                -t
                            } else {
                                t
                            }
                        };
                        let c = 1.0 / (1.0 + t * t).sqrt();
                        let rotation = Rotation {
                            s: t * c,
                            tau: t * c / (1.0 + c),
                        };
                        let h = t * a[p][q];
                        z[p] -= h;
                        z[q] += h;
                        d[p] -= h;
                        d[q] += h;
                        a[p][q] = 0.0;

                        for j in 0..p {
                            rotation.apply(&mut a, (j, p), (j, q));
                        }
                        for j in (p + 1)..q {
                            rotation.apply(&mut a, (p, j), (j, q));
                        }
                        for j in (q + 1)..n {
                            rotation.apply(&mut a, (p, j), (q, j));
                        }
                        for j in 0..n {
                            rotation.apply(&mut v, (j, p), (j, q));
                        }
                    }
                }
            }

            for p in 0..n {
                b[p] += z[p];
                d[p] = b[p];
                z[p] = 0.0;
            }
        }

        let outcome = outcome.unwrap_or_else(|| {
            if off_diagonal_mass(&a) < config.tolerance {
                JacobiOutcome::Converged {
                    sweeps: config.max_iterations,
                }
            } else {
                warn!(
                    size = n,
                    max_iterations = config.max_iterations,
                    "Jacobi diagonalisation did not converge"
                );
                JacobiOutcome::NotConverged {
                    iterations: config.max_iterations,
                }
            }
        });

        self.eigenvalues = Some(d);
        self.eigenvectors = Some(v);
        outcome
    }

    /// Eigenvalues, in the order of the eigenvector columns.
    pub fn eigenvalues(&self) -> Option<&[f64]> {
        self.eigenvalues.as_deref()
    }

    /// Eigenvectors stored column-wise: column `k` belongs to eigenvalue `k`.
    pub fn eigenvectors(&self) -> Option<&[Vec<f64>]> {
        self.eigenvectors.as_deref()
    }

    /// The matrix being diagonalised.
    pub fn matrix(&self) -> &[Vec<f64>] {
        &self.matrix
    }
}

/// Sum of absolute upper off-diagonal entries.
fn off_diagonal_mass(a: &[Vec<f64>]) -> f64 {
    a.iter()
        .enumerate()
        .flat_map(|(i, row)| row.iter().skip(i + 1))
        .map(|v| v.abs())
        .sum()
}

#[derive(Clone, Copy)]
struct Rotation {
    s: f64,
    tau: f64,
}

impl Rotation {
    fn apply(&self, m: &mut [Vec<f64>], (i, j): (usize, usize), (k, l): (usize, usize)) {
        let g = m[i][j];
        let h = m[k][l];
        m[i][j] = g - self.s * (h + g * self.tau);
        m[k][l] = h + self.s * (g - h * self.tau);
    }
}
