//! The enhanced generator wrapper.
//!
//! [`EnhancedRng`] owns a uniform source and layers on top of it everything the
//! rest of the crate offers: bounded and biased draws, non-uniform variates,
//! index sampling and, when the source supports them, stream operations.
//! The wrapper never re-implements the source; stream operations are exposed
//! only in `impl` blocks bounded on the matching capability trait (see
//! [`streams`]) or, for [`AnyRng`](crate::source::AnyRng), as fallible `try_`
//! methods checked at run time (see [`dynamic`]).

pub mod dynamic;
pub mod streams;

use std::ops::Range;

use rand::{RngCore, SeedableRng};

use crate::error::RandomError;
use crate::sampling::{self, SampleOrder};
use crate::uniform::{
    bounded_u32, bounded_u64, bounded_usize, coin, f32_in_range, f64_in_range, int_in_range,
    int_width, long_in_range, skewed_index, unit_f32, unit_f64,
};
use crate::variates::{self, Binomial, Cauchy, GaussianMethod, PolarGaussian};
use crate::DefaultSource;

/// A uniform source together with the per-instance state of the variate
/// algorithms.
///
/// Besides the source, an instance keeps the spare deviate of the polar
/// method and the constants of the last binomial distribution drawn from.
/// Neither is copied into generators derived by splitting or jumping, and an
/// in-place jump discards both.
///
/// # Examples
/// ```
/// use variate_rng::EnhancedRng;
///
/// let mut rng: EnhancedRng = EnhancedRng::from_seed(42);
/// let die = rng.next_int_in(1, 7).unwrap();
/// assert!((1..7).contains(&die));
///
/// let z = rng.next_gaussian();
/// assert!(z.is_finite());
///
/// let picks = rng.sample(100, 5).unwrap();
/// assert_eq!(picks.len(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct EnhancedRng<S = DefaultSource> {
    source: S,
    seed: Option<u64>,
    gaussian: GaussianMethod,
    polar: PolarGaussian,
    binomial: Option<Binomial>,
}

impl<S: RngCore> EnhancedRng<S> {
    /// Wrap an existing source.
    pub fn new(source: S) -> Self {
        Self {
            source,
            seed: None,
            gaussian: GaussianMethod::default(),
            polar: PolarGaussian::new(),
            binomial: None,
        }
    }

    /// Use `method` for [`next_gaussian`](Self::next_gaussian).
    pub fn with_gaussian_method(mut self, method: GaussianMethod) -> Self {
        self.gaussian = method;
        self
    }

    /// A sibling around `source` with the same configuration and fresh caches.
    pub(crate) fn derive(&self, source: S) -> Self {
        Self::new(source).with_gaussian_method(self.gaussian)
    }

    /// Discard per-instance caches after the source has been repositioned.
    pub(crate) fn clear_caches(&mut self) {
        self.polar.clear();
        self.binomial = None;
    }

    /// The Gaussian method used by [`next_gaussian`](Self::next_gaussian).
    pub fn gaussian_method(&self) -> GaussianMethod {
        self.gaussian
    }

    /// The wrapped source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutable access to the wrapped source.
    ///
    /// Drawing from the source directly leaves any buffered polar deviate in
    /// place; call [`reset`](Self::reset) if that matters.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Unwrap the source.
    pub fn into_inner(self) -> S {
        self.source
    }

    /// The seed this instance was created from, if it was created from one.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Drop the buffered polar deviate and the cached binomial constants.
    pub fn reset(&mut self) {
        self.clear_caches();
    }

    // ---------------------------------------------------------------------
    // Raw uniform draws
    // ---------------------------------------------------------------------

    /// Next 32 random bits.
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        self.source.next_u32()
    }

    /// Next 64 random bits.
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.source.next_u64()
    }

    /// Next 32 random bits as a signed integer.
    #[inline]
    pub fn next_i32(&mut self) -> i32 {
        self.source.next_u32() as i32
    }

    /// Next 64 random bits as a signed integer.
    #[inline]
    pub fn next_i64(&mut self) -> i64 {
        self.source.next_u64() as i64
    }

    /// Fair coin.
    #[inline]
    pub fn next_bool(&mut self) -> bool {
        coin(&mut self.source)
    }

    /// Uniform in `[0, 1)` with 24 random bits.
    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        unit_f32(&mut self.source)
    }

    /// Uniform in `[0, 1)` with 53 random bits.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        unit_f64(&mut self.source)
    }

    /// Fill `dest` with random bytes.
    pub fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.source.fill_bytes(dest);
    }

    /// Fill `buffer` with uniform values in `[0, 1)`.
    ///
    /// # Examples
    /// ```
    /// use variate_rng::EnhancedRng;
    ///
    /// let mut rng: EnhancedRng = EnhancedRng::from_seed(42);
    /// let mut buffer = vec![0.0; 1000];
    /// rng.fill_uniform(&mut buffer);
    /// assert!(buffer.iter().all(|&u| (0.0..1.0).contains(&u)));
    /// ```
    pub fn fill_uniform(&mut self, buffer: &mut [f64]) {
        for value in buffer.iter_mut() {
            *value = unit_f64(&mut self.source);
        }
    }

    // ---------------------------------------------------------------------
    // Bounded draws
    // ---------------------------------------------------------------------

    /// Uniform in `[0, bound)`.
    ///
    /// # Errors
    /// `RandomError::InvalidBound` if `bound <= 0`.
    pub fn next_int(&mut self, bound: i32) -> Result<i32, RandomError> {
        if bound <= 0 {
            return Err(RandomError::invalid_bound(0, bound));
        }
        Ok(bounded_u32(&mut self.source, bound as u32) as i32)
    }

    /// Uniform in `[origin, bound)`, for any `origin < bound` including
    /// ranges wider than `i32::MAX`.
    ///
    /// # Errors
    /// `RandomError::InvalidBound` if `origin >= bound`.
    pub fn next_int_in(&mut self, origin: i32, bound: i32) -> Result<i32, RandomError> {
        int_in_range(&mut self.source, origin, bound)
    }

    /// Uniform in `[0, bound)`.
    ///
    /// # Errors
    /// `RandomError::InvalidBound` if `bound <= 0`.
    pub fn next_long(&mut self, bound: i64) -> Result<i64, RandomError> {
        if bound <= 0 {
            return Err(RandomError::invalid_bound(0, bound));
        }
        Ok(bounded_u64(&mut self.source, bound as u64) as i64)
    }

    /// Uniform in `[origin, bound)`.
    ///
    /// # Errors
    /// `RandomError::InvalidBound` if `origin >= bound`.
    pub fn next_long_in(&mut self, origin: i64, bound: i64) -> Result<i64, RandomError> {
        long_in_range(&mut self.source, origin, bound)
    }

    /// Uniform index in `[0, bound)`.
    ///
    /// # Errors
    /// `RandomError::InvalidBound` if `bound == 0`.
    pub fn next_index(&mut self, bound: usize) -> Result<usize, RandomError> {
        if bound == 0 {
            return Err(RandomError::invalid_bound(0, 0));
        }
        Ok(bounded_usize(&mut self.source, bound))
    }

    /// Uniform in `[0, bound)`.
    ///
    /// # Errors
    /// `RandomError::InvalidBound` if `bound <= 0` or is not finite.
    pub fn next_f64_below(&mut self, bound: f64) -> Result<f64, RandomError> {
        f64_in_range(&mut self.source, 0.0, bound)
    }

    /// Uniform in `[origin, bound)`.
    ///
    /// # Errors
    /// `RandomError::InvalidBound` if `origin >= bound` or the interval is not
    /// finite.
    pub fn next_f64_in(&mut self, origin: f64, bound: f64) -> Result<f64, RandomError> {
        f64_in_range(&mut self.source, origin, bound)
    }

    /// Uniform in `[origin, bound)`.
    ///
    /// # Errors
    /// As [`next_f64_in`](Self::next_f64_in).
    pub fn next_f32_in(&mut self, origin: f32, bound: f32) -> Result<f32, RandomError> {
        f32_in_range(&mut self.source, origin, bound)
    }

    // ---------------------------------------------------------------------
    // Biased draws
    // ---------------------------------------------------------------------

    /// Integer in `[0, bound)` with smaller values more likely.
    ///
    /// Computed as `floor(bound · u²)` for one uniform `u`, giving
    /// `P(X <= x) = sqrt((x + 1) / bound)`.
    ///
    /// # Errors
    /// `RandomError::InvalidBound` if `bound <= 0`.
    pub fn next_biased_int(&mut self, bound: i32) -> Result<i32, RandomError> {
        self.next_skewed_int(bound, 2.0)
    }

    /// Integer in `[0, bound)` as `floor(bound · u^exponent)`.
    ///
    /// `exponent = 1` is uniform; larger exponents favour small values more
    /// strongly.
    ///
    /// # Errors
    /// - `RandomError::InvalidBound` if `bound <= 0`
    /// - `RandomError::InvalidParameter` if `exponent < 1` or is not finite
    pub fn next_skewed_int(&mut self, bound: i32, exponent: f64) -> Result<i32, RandomError> {
        if bound <= 0 {
            return Err(RandomError::invalid_bound(0, bound));
        }
        Ok(skewed_index(&mut self.source, bound as usize, exponent)? as i32)
    }

    /// Integer in `[origin, bound)` with values near `origin` more likely.
    ///
    /// # Errors
    /// `RandomError::InvalidBound` if `origin >= bound`.
    pub fn next_biased_int_in(&mut self, origin: i32, bound: i32) -> Result<i32, RandomError> {
        let width = int_width(origin, bound)?;
        let offset = skewed_index(&mut self.source, width as usize, 2.0)?;
        Ok(origin.wrapping_add(offset as u32 as i32))
    }

    // ---------------------------------------------------------------------
    // Non-uniform variates
    // ---------------------------------------------------------------------

    /// Standard exponential (mean 1).
    pub fn next_exponential(&mut self) -> f64 {
        variates::exponential(&mut self.source)
    }

    /// Standard normal by the configured [`GaussianMethod`].
    pub fn next_gaussian(&mut self) -> f64 {
        match self.gaussian {
            GaussianMethod::Ziggurat => variates::standard_normal(&mut self.source),
            GaussianMethod::Polar => self.polar.sample(&mut self.source),
        }
    }

    /// Standard normal by the polar method.
    pub fn next_gaussian_polar(&mut self) -> f64 {
        self.polar.sample(&mut self.source)
    }

    /// Standard normal by the Ziggurat.
    pub fn next_gaussian_ziggurat(&mut self) -> f64 {
        variates::standard_normal(&mut self.source)
    }

    /// Normal with mean 0 and standard deviation `std_dev`.
    pub fn next_gaussian_scaled(&mut self, std_dev: f64) -> f64 {
        std_dev * self.next_gaussian()
    }

    /// Normal with the given mean and standard deviation.
    pub fn next_gaussian_with(&mut self, mean: f64, std_dev: f64) -> f64 {
        mean + std_dev * self.next_gaussian()
    }

    /// Fill `buffer` with standard normal variates.
    pub fn fill_gaussian(&mut self, buffer: &mut [f64]) {
        for value in buffer.iter_mut() {
            *value = self.next_gaussian();
        }
    }

    /// Cauchy with median 0.
    ///
    /// # Errors
    /// `RandomError::InvalidParameter` if `scale` is not positive and finite.
    pub fn next_cauchy(&mut self, scale: f64) -> Result<f64, RandomError> {
        self.next_cauchy_with(0.0, scale)
    }

    /// Cauchy with the given median and scale.
    ///
    /// # Errors
    /// `RandomError::InvalidParameter` if `median` is not finite or `scale` is
    /// not positive and finite.
    pub fn next_cauchy_with(&mut self, median: f64, scale: f64) -> Result<f64, RandomError> {
        let dist = Cauchy::new(median, scale)?;
        Ok(variates::cauchy(&mut self.source, dist.median(), dist.scale()))
    }

    fn cached_binomial(&mut self, n: u64, p: f64) -> Result<Binomial, RandomError> {
        match self.binomial {
            Some(cached) if cached.matches(n, p) => Ok(cached),
            _ => {
                let fresh = Binomial::new(n, p)?;
                self.binomial = Some(fresh);
                Ok(fresh)
            }
        }
    }

    /// Binomial with `n` trials of probability `p`.
    ///
    /// The distribution constants are kept until a call with different
    /// `(n, p)`, so repeated draws with the same parameters skip the setup.
    ///
    /// # Errors
    /// `RandomError::InvalidParameter` if `p` is NaN.
    pub fn next_binomial(&mut self, n: u64, p: f64) -> Result<u64, RandomError> {
        let dist = self.cached_binomial(n, p)?;
        Ok(dist.draw(&mut self.source))
    }

    // ---------------------------------------------------------------------
    // Index sampling
    // ---------------------------------------------------------------------

    /// `k` distinct indices from `[0, n)`. See [`sampling::sample`].
    ///
    /// # Errors
    /// `RandomError::SampleTooLarge` if `k > n`.
    pub fn sample(&mut self, n: usize, k: usize) -> Result<Vec<usize>, RandomError> {
        sampling::sample(&mut self.source, n, k)
    }

    /// `k` distinct indices from `[0, n)` written to `dest[..k]`.
    ///
    /// # Errors
    /// `RandomError::SampleTooLarge` if `k > n`, `RandomError::BufferTooSmall`
    /// if `dest` is shorter than `k`.
    pub fn sample_into<'a>(
        &mut self,
        n: usize,
        k: usize,
        dest: &'a mut [usize],
    ) -> Result<&'a mut [usize], RandomError> {
        sampling::sample_into(&mut self.source, n, k, dest)
    }

    /// `k` distinct indices from `[0, n)` in the requested order.
    ///
    /// # Errors
    /// `RandomError::SampleTooLarge` if `k > n`.
    pub fn sample_ordered(
        &mut self,
        n: usize,
        k: usize,
        order: SampleOrder,
    ) -> Result<Vec<usize>, RandomError> {
        sampling::sample_ordered(&mut self.source, n, k, order)
    }

    /// Each index of `[0, n)` independently with probability `p`.
    ///
    /// # Errors
    /// `RandomError::InvalidParameter` if `p` is NaN.
    pub fn sample_p(&mut self, n: usize, p: f64) -> Result<Vec<usize>, RandomError> {
        let dist = self.cached_binomial(n as u64, p)?;
        sampling::sample_p_with(&mut self.source, n, &dist)
    }

    /// Two distinct indices from `[0, n)`.
    ///
    /// # Errors
    /// `RandomError::PopulationTooSmall` if `n < 2`.
    pub fn next_int_pair(&mut self, n: usize) -> Result<[usize; 2], RandomError> {
        sampling::int_pair(&mut self.source, n)
    }

    /// Two distinct indices from `[0, n)`, ascending.
    ///
    /// # Errors
    /// `RandomError::PopulationTooSmall` if `n < 2`.
    pub fn next_sorted_int_pair(&mut self, n: usize) -> Result<[usize; 2], RandomError> {
        sampling::sorted_int_pair(&mut self.source, n)
    }

    /// Three distinct indices from `[0, n)`.
    ///
    /// # Errors
    /// `RandomError::PopulationTooSmall` if `n < 3`.
    pub fn next_int_triple(&mut self, n: usize) -> Result<[usize; 3], RandomError> {
        sampling::int_triple(&mut self.source, n)
    }

    /// Three distinct indices from `[0, n)`, ascending.
    ///
    /// # Errors
    /// `RandomError::PopulationTooSmall` if `n < 3`.
    pub fn next_sorted_int_triple(&mut self, n: usize) -> Result<[usize; 3], RandomError> {
        sampling::sorted_int_triple(&mut self.source, n)
    }

    /// Two distinct indices at most `window` apart.
    ///
    /// # Errors
    /// See [`sampling::windowed_int_pair`].
    pub fn next_windowed_int_pair(
        &mut self,
        n: usize,
        window: usize,
    ) -> Result<[usize; 2], RandomError> {
        sampling::windowed_int_pair(&mut self.source, n, window)
    }

    /// Three distinct indices spanning at most `window`.
    ///
    /// # Errors
    /// See [`sampling::windowed_int_triple`].
    pub fn next_windowed_int_triple(
        &mut self,
        n: usize,
        window: usize,
    ) -> Result<[usize; 3], RandomError> {
        sampling::windowed_int_triple(&mut self.source, n, window)
    }

    /// Three distinct indices spanning at most `window`, ascending.
    ///
    /// # Errors
    /// See [`sampling::windowed_int_triple`].
    pub fn next_sorted_windowed_int_triple(
        &mut self,
        n: usize,
        window: usize,
    ) -> Result<[usize; 3], RandomError> {
        sampling::sorted_windowed_int_triple(&mut self.source, n, window)
    }

    /// `n` fair coin flips.
    pub fn array_mask(&mut self, n: usize) -> Vec<bool> {
        sampling::array_mask(&mut self.source, n)
    }

    /// A mask of length `n` with exactly `min(count, n)` positions set.
    pub fn array_mask_count(&mut self, n: usize, count: usize) -> Vec<bool> {
        sampling::array_mask_count(&mut self.source, n, count)
    }

    /// A mask of length `n`, each position set with probability `p`.
    ///
    /// # Errors
    /// `RandomError::InvalidParameter` if `p` is NaN.
    pub fn array_mask_p(&mut self, n: usize, p: f64) -> Result<Vec<bool>, RandomError> {
        let mut mask = vec![false; n];
        for i in self.sample_p(n, p)? {
            mask[i] = true;
        }
        Ok(mask)
    }

    /// Shuffle `values` in place.
    pub fn shuffle<T>(&mut self, values: &mut [T]) {
        sampling::shuffle(&mut self.source, values);
    }

    /// Shuffle `values[range]` in place.
    ///
    /// # Errors
    /// `RandomError::InvalidBound` if `range` is not within `values`.
    pub fn shuffle_range<T>(
        &mut self,
        values: &mut [T],
        range: Range<usize>,
    ) -> Result<(), RandomError> {
        sampling::shuffle_range(&mut self.source, values, range)
    }
}

impl<S: RngCore + SeedableRng> EnhancedRng<S> {
    /// Seed a new source from a 64-bit value.
    ///
    /// The same seed always yields the same sequence for a given source type.
    pub fn from_seed(seed: u64) -> Self {
        let mut rng = Self::new(S::seed_from_u64(seed));
        rng.seed = Some(seed);
        rng
    }

    /// Seed a new source from operating-system entropy.
    pub fn from_entropy() -> Self {
        Self::new(S::from_entropy())
    }
}

impl<S: RngCore + SeedableRng> Default for EnhancedRng<S> {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl<S: RngCore> From<S> for EnhancedRng<S> {
    fn from(source: S) -> Self {
        Self::new(source)
    }
}

impl<S: RngCore> RngCore for EnhancedRng<S> {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        self.source.next_u32()
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        self.source.next_u64()
    }

    #[inline]
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.source.fill_bytes(dest)
    }

    #[inline]
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.source.try_fill_bytes(dest)
    }
}
