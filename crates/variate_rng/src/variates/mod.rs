//! Non-uniform variates built on a uniform source.
//!
//! - [`ziggurat`]: standard normal by the 128-strip Ziggurat (the default)
//! - [`polar`]: standard normal by Marsaglia's polar method, two per rejection loop
//! - [`cauchy`]: Cauchy by inversion
//! - [`binomial`]: binomial by inversion or BTPE
//!
//! Everything here takes `&mut R` with `R: RngCore + ?Sized`, so it can be
//! driven by a bare source or by an [`EnhancedRng`](crate::EnhancedRng). The
//! distribution objects ([`Gaussian`], [`Cauchy`], [`Binomial`]) also implement
//! [`rand_distr::Distribution`].

pub mod binomial;
pub mod cauchy;
pub mod polar;
pub mod ziggurat;

use rand::{Rng, RngCore};
use rand_distr::{Distribution, Exp1};

use crate::error::RandomError;

pub use binomial::Binomial;
pub use cauchy::{cauchy, Cauchy};
pub use polar::PolarGaussian;
pub use ziggurat::standard_normal;

/// Algorithm used for standard normal deviates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GaussianMethod {
    /// Ziggurat rejection over precomputed strips.
    #[default]
    Ziggurat,
    /// Marsaglia polar method with a buffered second deviate.
    Polar,
}

/// Standard exponential deviate (mean 1).
#[inline]
pub fn exponential<R: RngCore + ?Sized>(rng: &mut R) -> f64 {
    Exp1.sample(rng)
}

/// Normal distribution `N(mean, std_dev²)` sampled by the Ziggurat.
///
/// The polar method keeps state between draws, so it is only available
/// through [`PolarGaussian`] or the enhanced generator.
///
/// # Examples
/// ```
/// use rand::SeedableRng;
/// use rand_distr::Distribution;
/// use rand_xoshiro::Xoshiro256PlusPlus;
/// use variate_rng::variates::Gaussian;
///
/// let dist = Gaussian::new(10.0, 2.0).unwrap();
/// let mut rng = Xoshiro256PlusPlus::seed_from_u64(3);
/// let x: f64 = dist.sample(&mut rng);
/// assert!(x.is_finite());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gaussian {
    mean: f64,
    std_dev: f64,
}

impl Gaussian {
    /// Create a normal distribution.
    ///
    /// # Errors
    /// `RandomError::InvalidParameter` if `mean` is not finite or `std_dev` is
    /// negative or not finite.
    pub fn new(mean: f64, std_dev: f64) -> Result<Self, RandomError> {
        if !mean.is_finite() {
            return Err(RandomError::invalid_parameter(
                "mean",
                format!("must be finite, got {}", mean),
            ));
        }
        if !(std_dev >= 0.0) || !std_dev.is_finite() {
            return Err(RandomError::invalid_parameter(
                "std_dev",
                format!("must be non-negative and finite, got {}", std_dev),
            ));
        }
        Ok(Self { mean, std_dev })
    }

    /// The standard normal distribution.
    pub fn standard() -> Self {
        Self {
            mean: 0.0,
            std_dev: 1.0,
        }
    }

    /// Mean.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Standard deviation.
    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }
}

impl Default for Gaussian {
    fn default() -> Self {
        Self::standard()
    }
}

impl Distribution<f64> for Gaussian {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.mean + self.std_dev * standard_normal(rng)
    }
}
