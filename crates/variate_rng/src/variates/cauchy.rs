//! Cauchy variates by inversion.

use std::f64::consts::PI;

use rand::{Rng, RngCore};
use rand_distr::Distribution;

use crate::error::RandomError;
use crate::uniform::{coin, unit_f64};

/// Draw from Cauchy(median, scale) as `median + scale · tan(π·u)`.
///
/// `u` is uniform on `[0, 1)`. At `u = 0.5` the tangent would overflow towards
/// `+∞` only; a fair coin maps half of those draws to `-0.5` so both infinite
/// directions stay equally likely. No argument checks are made.
pub fn cauchy<R: RngCore + ?Sized>(rng: &mut R, median: f64, scale: f64) -> f64 {
    let mut u = unit_f64(rng);
    if u == 0.5 && coin(rng) {
        u = -0.5;
    }
    median + scale * (PI * u).tan()
}

/// Cauchy distribution with validated parameters.
///
/// # Examples
/// ```
/// use rand::SeedableRng;
/// use rand_distr::Distribution;
/// use rand_xoshiro::Xoshiro256PlusPlus;
/// use variate_rng::variates::Cauchy;
///
/// let dist = Cauchy::new(1.0, 0.5).unwrap();
/// let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
/// let x: f64 = dist.sample(&mut rng);
/// assert!(x.is_finite());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cauchy {
    median: f64,
    scale: f64,
}

impl Cauchy {
    /// Create a Cauchy distribution.
    ///
    /// # Errors
    /// `RandomError::InvalidParameter` if `median` is not finite or `scale` is
    /// not a positive finite number.
    pub fn new(median: f64, scale: f64) -> Result<Self, RandomError> {
        if !median.is_finite() {
            return Err(RandomError::invalid_parameter(
                "median",
                format!("must be finite, got {}", median),
            ));
        }
        if !(scale > 0.0) || !scale.is_finite() {
            return Err(RandomError::invalid_parameter(
                "scale",
                format!("must be positive and finite, got {}", scale),
            ));
        }
        Ok(Self { median, scale })
    }

    /// Median (location).
    pub fn median(&self) -> f64 {
        self.median
    }

    /// Scale (half width at half maximum).
    pub fn scale(&self) -> f64 {
        self.scale
    }
}

impl Distribution<f64> for Cauchy {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        cauchy(rng, self.median, self.scale)
    }
}
