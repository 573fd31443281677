//! Generator configuration.
//!
//! [`GeneratorConfig`] describes how to build an [`EnhancedRng`]: which
//! algorithm, which seed (if any), which Gaussian method, and which
//! capabilities the caller will rely on. Declaring capabilities up front moves
//! the failure for an unsuitable algorithm from the first stream operation to
//! [`GeneratorConfigBuilder::build`].
//!
//! Configurations can also be read from the environment:
//!
//! | Variable | Meaning |
//! |----------|---------|
//! | `VARIATE_ALGORITHM` | algorithm name, parsed as [`Algorithm`] |
//! | `VARIATE_SEED` | decimal 64-bit seed |

use thiserror::Error;
use tracing::debug;

use crate::enhanced::EnhancedRng;
use crate::error::RandomError;
use crate::source::{Algorithm, AnyRng, Capability, CapabilitySet};
use crate::variates::GaussianMethod;

/// Environment variable naming the algorithm.
pub const ALGORITHM_VAR: &str = "VARIATE_ALGORITHM";

/// Environment variable holding the seed.
pub const SEED_VAR: &str = "VARIATE_SEED";

/// Configuration validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The chosen algorithm lacks a required capability.
    #[error("{algorithm} lacks the required {capability} capability")]
    MissingCapability {
        /// Configured algorithm.
        algorithm: Algorithm,
        /// First missing capability.
        capability: Capability,
    },

    /// An environment variable holds an unusable value.
    #[error("Invalid value for {variable}: {value:?}")]
    InvalidEnvironment {
        /// Variable name.
        variable: &'static str,
        /// Offending value.
        value: String,
    },
}

/// Parse a seed as written in [`SEED_VAR`].
pub(crate) fn parse_seed(value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidEnvironment {
            variable: SEED_VAR,
            value: value.to_string(),
        })
}

/// How to construct a generator.
///
/// # Examples
///
/// ```rust
/// use variate_rng::config::GeneratorConfig;
/// use variate_rng::source::{Algorithm, Capability};
///
/// let config = GeneratorConfig::builder()
///     .algorithm(Algorithm::Pcg64)
///     .seed(42)
///     .require(Capability::Splittable)
///     .build()
///     .expect("Pcg64 can split");
///
/// let mut rng = config.create().unwrap();
/// let child = rng.try_split().unwrap();
/// assert_eq!(child.algorithm(), Algorithm::Pcg64);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GeneratorConfig {
    algorithm: Algorithm,
    seed: Option<u64>,
    gaussian: GaussianMethod,
    required: CapabilitySet,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            seed: None,
            gaussian: GaussianMethod::default(),
            required: CapabilitySet::basic(),
        }
    }
}

impl GeneratorConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> GeneratorConfigBuilder {
        GeneratorConfigBuilder::default()
    }

    /// Configured algorithm.
    #[inline]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Configured seed; `None` means operating-system entropy.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Gaussian method of the created generator.
    #[inline]
    pub fn gaussian(&self) -> GaussianMethod {
        self.gaussian
    }

    /// Capabilities the algorithm must have.
    #[inline]
    pub fn required(&self) -> CapabilitySet {
        self.required
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// `ConfigError::MissingCapability` if the algorithm lacks a required
    /// capability.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.algorithm.capabilities().first_missing(self.required) {
            Some(capability) => Err(ConfigError::MissingCapability {
                algorithm: self.algorithm,
                capability,
            }),
            None => Ok(()),
        }
    }

    /// Reads [`ALGORITHM_VAR`] and [`SEED_VAR`] from the process environment.
    ///
    /// Unset variables keep their defaults.
    ///
    /// # Errors
    /// `ConfigError::InvalidEnvironment` if a variable is set but unparsable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// As [`from_env`](Self::from_env), reading variables through `lookup`.
    ///
    /// # Errors
    /// `ConfigError::InvalidEnvironment` if a variable is set but unparsable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(name) = lookup(ALGORITHM_VAR) {
            config.algorithm = name
                .parse()
                .map_err(|_| ConfigError::InvalidEnvironment {
                    variable: ALGORITHM_VAR,
                    value: name.clone(),
                })?;
        }

        if let Some(seed) = lookup(SEED_VAR) {
            config.seed = Some(parse_seed(&seed)?);
        }

        config.validate()?;
        Ok(config)
    }

    /// Build the generator.
    ///
    /// # Errors
    /// `RandomError::Config` if validation fails.
    pub fn create(&self) -> Result<EnhancedRng<AnyRng>, RandomError> {
        self.validate()?;
        debug!(
            algorithm = %self.algorithm,
            seed = ?self.seed,
            gaussian = ?self.gaussian,
            required = %self.required,
            "creating generator from configuration"
        );
        Ok(EnhancedRng::from_algorithm(self.algorithm, self.seed)
            .with_gaussian_method(self.gaussian))
    }
}

/// Builder for [`GeneratorConfig`].
#[derive(Clone, Debug, Default)]
pub struct GeneratorConfigBuilder {
    config: GeneratorConfig,
}

impl GeneratorConfigBuilder {
    /// Sets the algorithm.
    #[inline]
    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.config.algorithm = algorithm;
        self
    }

    /// Sets the seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Sets the Gaussian method.
    #[inline]
    pub fn gaussian(mut self, method: GaussianMethod) -> Self {
        self.config.gaussian = method;
        self
    }

    /// Requires `capability` (and everything it implies).
    #[inline]
    pub fn require(mut self, capability: Capability) -> Self {
        self.config.required = self.config.required.with(capability);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    /// `ConfigError::MissingCapability` if the algorithm lacks a required
    /// capability.
    pub fn build(self) -> Result<GeneratorConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
