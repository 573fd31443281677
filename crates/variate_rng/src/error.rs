//! Error types for random generation.
//!
//! [`RandomError`] covers every failure the generator wrapper, the variate
//! algorithms and the index samplers can report. All domain errors are raised
//! before any value is drawn, so a failed call never advances the generator.

use std::fmt::Display;

use thiserror::Error;

use crate::config::ConfigError;
use crate::source::Capability;

/// Errors from random generation and sampling.
///
/// # Variants
/// - `UnsupportedCapability`: a dynamically chosen source lacks an operation
/// - `UnknownAlgorithm`: an algorithm name did not parse
/// - `InvalidBound`, `InvalidParameter`: bad arguments to a bounded draw or variate
/// - `SampleTooLarge`, `BufferTooSmall`, `PopulationTooSmall`, `InvalidWindow`:
///   bad arguments to an index sampler
/// - `Config`: a generator configuration failed validation
///
/// # Examples
/// ```
/// use variate_rng::RandomError;
///
/// let err = RandomError::SampleTooLarge { k: 5, n: 3 };
/// assert_eq!(format!("{}", err), "Cannot sample 5 distinct indices from a population of 3");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RandomError {
    /// The source does not implement the requested capability.
    #[error("{algorithm} does not support the {capability} capability")]
    UnsupportedCapability {
        /// Name of the algorithm behind the source.
        algorithm: String,
        /// The missing capability.
        capability: Capability,
    },

    /// No algorithm with this name is known.
    #[error("Unknown random number algorithm: {0}")]
    UnknownAlgorithm(String),

    /// An interval `[origin, bound)` is empty or not finite.
    #[error("Invalid bound: origin {origin} must be less than bound {bound}")]
    InvalidBound {
        /// Lower end of the interval, formatted.
        origin: String,
        /// Upper end of the interval, formatted.
        bound: String,
    },

    /// A distribution parameter lies outside its domain.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// More distinct indices were requested than the population holds.
    #[error("Cannot sample {k} distinct indices from a population of {n}")]
    SampleTooLarge {
        /// Requested sample size.
        k: usize,
        /// Population size.
        n: usize,
    },

    /// The caller-supplied destination cannot hold the sample.
    #[error("Destination buffer too small: need {needed}, got {got}")]
    BufferTooSmall {
        /// Required length.
        needed: usize,
        /// Supplied length.
        got: usize,
    },

    /// The population is too small for the combination requested.
    #[error("Population of {n} is too small: at least {needed} required")]
    PopulationTooSmall {
        /// Population size.
        n: usize,
        /// Minimum population size.
        needed: usize,
    },

    /// The window is too narrow to hold the combination requested.
    #[error("Window {window} is too small: at least {min} required")]
    InvalidWindow {
        /// Supplied window.
        window: usize,
        /// Minimum window.
        min: usize,
    },

    /// Configuration validation failed.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl RandomError {
    /// Build an [`RandomError::InvalidBound`] from any displayable pair.
    pub fn invalid_bound<T: Display>(origin: T, bound: T) -> Self {
        RandomError::InvalidBound {
            origin: origin.to_string(),
            bound: bound.to_string(),
        }
    }

    /// Build an [`RandomError::InvalidParameter`].
    pub fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        RandomError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
