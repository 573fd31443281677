//! # variate_core: Numerical Foundation for the variate Toolkit
//!
//! ## Layer 1 (Foundation) Role
//!
//! variate_core is the bottom layer of the workspace, providing:
//! - Special functions: log-gamma, integer powers, incomplete beta, erfc and
//!   the standard normal CDF (`math`)
//! - Descriptive statistics: mean, variance, covariance, correlation and the
//!   Welch t-test (`stats`)
//! - Dense matrix operations and Jacobi diagonalisation (`linalg`)
//! - Error type: `MathError` (`error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other variate_* crates, with minimal external
//! dependencies:
//! - num-traits: Traits for generic numerical computation
//! - thiserror: Error derives
//! - tracing: Diagnostics for non-converging iterations
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use variate_core::math::functions::{ln_gamma, norm_cdf};
//! use variate_core::stats;
//!
//! // ln(4!) = ln(24)
//! assert!((ln_gamma(5.0) - 24.0_f64.ln()).abs() < 1e-12);
//!
//! // Symmetry of the normal CDF
//! assert!((norm_cdf(0.0_f64) - 0.5).abs() < 1e-7);
//!
//! // Descriptive statistics over integer or float slices
//! let mean = stats::mean(&[1, 2, 3, 4]).unwrap();
//! assert_eq!(mean, 2.5);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for `MathError` and `JacobiConfig`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod error;
pub mod linalg;
pub mod math;
pub mod stats;

pub use error::MathError;
