//! Jacobi diagonalisation configuration.

/// Configuration for the cyclic Jacobi eigenvalue method.
///
/// # Example
///
/// ```
/// use variate_core::linalg::JacobiConfig;
///
/// let config = JacobiConfig::default();
/// assert!(config.tolerance < 1e-8);
/// assert_eq!(config.max_iterations, 100);
///
/// let custom = JacobiConfig {
///     tolerance: 1e-14,
///     max_iterations: 50,
/// };
/// assert!(custom.tolerance < config.tolerance);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JacobiConfig {
    /// Convergence tolerance.
    ///
    /// Iteration stops once the sum of absolute off-diagonal entries falls
    /// below this value.
    pub tolerance: f64,

    /// Maximum number of sweeps over the off-diagonal entries.
    ///
    /// If the matrix has not been diagonalised within this limit, the
    /// best-effort decomposition is reported as not converged.
    pub max_iterations: usize,
}

impl Default for JacobiConfig {
    /// Default values:
    /// - `tolerance`: 1e-10
    /// - `max_iterations`: 100
    fn default() -> Self {
        Self {
            tolerance: 1e-10,
            max_iterations: 100,
        }
    }
}

impl JacobiConfig {
    /// Create a new configuration with specified values.
    ///
    /// # Panics
    ///
    /// Panics if `tolerance <= 0` or `max_iterations == 0`.
    pub fn new(tolerance: f64, max_iterations: usize) -> Self {
        assert!(tolerance > 0.0, "tolerance must be positive");
        assert!(max_iterations > 0, "max_iterations must be positive");
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Configuration with a tighter tolerance and a larger sweep budget.
    pub fn high_precision() -> Self {
        Self {
            tolerance: 1e-14,
            max_iterations: 500,
        }
    }

    /// Configuration favouring speed over precision.
    pub fn fast() -> Self {
        Self {
            tolerance: 1e-6,
            max_iterations: 20,
        }
    }
}
