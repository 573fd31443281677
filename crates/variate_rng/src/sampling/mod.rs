//! Random selection of distinct indices.
//!
//! Drawing `k` distinct values from `[0, n)` is served by three algorithms
//! with different cost profiles:
//!
//! | Algorithm | Time | Extra space | Uniform draws | Output order |
//! |-----------|------|-------------|---------------|--------------|
//! | [`Insertion`](SampleAlgorithm::Insertion) | O(k²) | O(1) | k | sorted |
//! | [`Pool`](SampleAlgorithm::Pool) | O(n) | O(n) | k | generation |
//! | [`Reservoir`](SampleAlgorithm::Reservoir) | O(n) | O(1) | n − k | generation |
//!
//! [`sample`] picks one with [`SampleAlgorithm::select`]. Every function comes
//! in an allocating form and an `_into` form writing the first `k` slots of a
//! caller-supplied buffer.
//!
//! Fixed-size combinations, windowed or not, live in [`combos`]; boolean
//! masks in [`mask`]; permutations in [`shuffle`].
//!
//! # Examples
//! ```
//! use rand::SeedableRng;
//! use rand_xoshiro::Xoshiro256PlusPlus;
//! use variate_rng::sampling;
//!
//! let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
//! let picks = sampling::sample(&mut rng, 1000, 5).unwrap();
//! assert_eq!(picks.len(), 5);
//! assert!(picks.iter().all(|&i| i < 1000));
//! ```

pub mod combos;
pub mod mask;
pub mod shuffle;

use rand::RngCore;
use tracing::trace;

use crate::error::RandomError;
use crate::uniform::bounded_usize;
use crate::variates::Binomial;

pub use combos::{
    int_pair, int_triple, sorted_int_pair, sorted_int_triple, sorted_windowed_int_triple,
    windowed_int_pair, windowed_int_triple,
};
pub use mask::{array_mask, array_mask_count, array_mask_p};
pub use shuffle::{shuffle, shuffle_range};

/// A k-subset sampling algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SampleAlgorithm {
    /// Sorted insertion with logical shifting; best for very small `k`.
    Insertion,
    /// Swap-remove from a materialised pool of all `n` indices.
    Pool,
    /// Reservoir sampling; best once `k` reaches half of `n`.
    Reservoir,
}

impl SampleAlgorithm {
    /// The cheapest algorithm for drawing `k` of `n`.
    ///
    /// Insertion costs about `k²` shifts against the pool's `n` initial
    /// writes, so it wins when `k² < n`. Once `2k >= n` the reservoir needs
    /// only `n − k` draws against the pool's `k`.
    ///
    /// # Examples
    /// ```
    /// use variate_rng::sampling::SampleAlgorithm;
    ///
    /// assert_eq!(SampleAlgorithm::select(1000, 10), SampleAlgorithm::Insertion);
    /// assert_eq!(SampleAlgorithm::select(1000, 100), SampleAlgorithm::Pool);
    /// assert_eq!(SampleAlgorithm::select(1000, 600), SampleAlgorithm::Reservoir);
    /// ```
    pub fn select(n: usize, k: usize) -> Self {
        if k.saturating_add(k) < n {
            if k.saturating_mul(k) < n {
                SampleAlgorithm::Insertion
            } else {
                SampleAlgorithm::Pool
            }
        } else {
            SampleAlgorithm::Reservoir
        }
    }
}

/// Order of the indices returned by [`sample_ordered`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SampleOrder {
    /// Whatever order the chosen algorithm produces.
    #[default]
    Generation,
    /// Ascending.
    Sorted,
}

fn check_request(n: usize, k: usize, capacity: usize) -> Result<(), RandomError> {
    if k > n {
        return Err(RandomError::SampleTooLarge { k, n });
    }
    if capacity < k {
        return Err(RandomError::BufferTooSmall {
            needed: k,
            got: capacity,
        });
    }
    Ok(())
}

fn insertion<R: RngCore + ?Sized>(rng: &mut R, n: usize, dest: &mut [usize]) {
    let k = dest.len();
    for i in 0..k {
        let mut value = bounded_usize(rng, n - i);
        let mut j = k - i;
        while j < k && value >= dest[j] {
            value += 1;
            dest[j - 1] = dest[j];
            j += 1;
        }
        dest[j - 1] = value;
    }
}

fn pool<R: RngCore + ?Sized>(rng: &mut R, n: usize, dest: &mut [usize]) {
    let mut pool: Vec<usize> = (0..n).collect();
    let mut remaining = n;
    for slot in dest.iter_mut() {
        let pick = bounded_usize(rng, remaining);
        *slot = pool[pick];
        remaining -= 1;
        pool[pick] = pool[remaining];
    }
}

fn reservoir<R: RngCore + ?Sized>(rng: &mut R, n: usize, dest: &mut [usize]) {
    let k = dest.len();
    for (i, slot) in dest.iter_mut().enumerate() {
        *slot = i;
    }
    for i in k..n {
        let j = bounded_usize(rng, i + 1);
        if j < k {
            dest[j] = i;
        }
    }
}

fn run<R: RngCore + ?Sized>(rng: &mut R, algorithm: SampleAlgorithm, n: usize, dest: &mut [usize]) {
    if dest.is_empty() {
        return;
    }
    match algorithm {
        SampleAlgorithm::Insertion => insertion(rng, n, dest),
        SampleAlgorithm::Pool => pool(rng, n, dest),
        SampleAlgorithm::Reservoir => reservoir(rng, n, dest),
    }
}

/// Draw `k` distinct indices from `[0, n)` with `algorithm` into `dest[..k]`.
///
/// # Errors
/// - `RandomError::SampleTooLarge` if `k > n`
/// - `RandomError::BufferTooSmall` if `dest.len() < k`
pub fn sample_with_into<'a, R: RngCore + ?Sized>(
    rng: &mut R,
    algorithm: SampleAlgorithm,
    n: usize,
    k: usize,
    dest: &'a mut [usize],
) -> Result<&'a mut [usize], RandomError> {
    check_request(n, k, dest.len())?;
    let dest = &mut dest[..k];
    run(rng, algorithm, n, dest);
    Ok(dest)
}

/// Draw `k` distinct indices from `[0, n)` with `algorithm`.
///
/// # Errors
/// `RandomError::SampleTooLarge` if `k > n`.
pub fn sample_with<R: RngCore + ?Sized>(
    rng: &mut R,
    algorithm: SampleAlgorithm,
    n: usize,
    k: usize,
) -> Result<Vec<usize>, RandomError> {
    check_request(n, k, k)?;
    let mut out = vec![0; k];
    run(rng, algorithm, n, &mut out);
    Ok(out)
}

/// Insertion sampling: the `i`-th draw is uniform in `[0, n − i)` and is
/// shifted past every chosen index not greater than it, so the result comes
/// out sorted with no redraws.
///
/// # Errors
/// `RandomError::SampleTooLarge` if `k > n`.
pub fn sample_insertion<R: RngCore + ?Sized>(
    rng: &mut R,
    n: usize,
    k: usize,
) -> Result<Vec<usize>, RandomError> {
    sample_with(rng, SampleAlgorithm::Insertion, n, k)
}

/// [`sample_insertion`] into a caller-supplied buffer.
///
/// # Errors
/// As [`sample_with_into`].
pub fn sample_insertion_into<'a, R: RngCore + ?Sized>(
    rng: &mut R,
    n: usize,
    k: usize,
    dest: &'a mut [usize],
) -> Result<&'a mut [usize], RandomError> {
    sample_with_into(rng, SampleAlgorithm::Insertion, n, k, dest)
}

/// Pool sampling: materialise `0..n` and swap-remove `k` uniform picks.
///
/// # Errors
/// `RandomError::SampleTooLarge` if `k > n`.
pub fn sample_pool<R: RngCore + ?Sized>(
    rng: &mut R,
    n: usize,
    k: usize,
) -> Result<Vec<usize>, RandomError> {
    sample_with(rng, SampleAlgorithm::Pool, n, k)
}

/// [`sample_pool`] into a caller-supplied buffer.
///
/// # Errors
/// As [`sample_with_into`].
pub fn sample_pool_into<'a, R: RngCore + ?Sized>(
    rng: &mut R,
    n: usize,
    k: usize,
    dest: &'a mut [usize],
) -> Result<&'a mut [usize], RandomError> {
    sample_with_into(rng, SampleAlgorithm::Pool, n, k, dest)
}

/// Reservoir sampling: start from `0..k`, then each later index `i` replaces
/// slot `j` when a draw `j` in `[0, i]` lands inside the reservoir.
///
/// # Errors
/// `RandomError::SampleTooLarge` if `k > n`.
pub fn sample_reservoir<R: RngCore + ?Sized>(
    rng: &mut R,
    n: usize,
    k: usize,
) -> Result<Vec<usize>, RandomError> {
    sample_with(rng, SampleAlgorithm::Reservoir, n, k)
}

/// [`sample_reservoir`] into a caller-supplied buffer.
///
/// # Errors
/// As [`sample_with_into`].
pub fn sample_reservoir_into<'a, R: RngCore + ?Sized>(
    rng: &mut R,
    n: usize,
    k: usize,
    dest: &'a mut [usize],
) -> Result<&'a mut [usize], RandomError> {
    sample_with_into(rng, SampleAlgorithm::Reservoir, n, k, dest)
}

/// Draw `k` distinct indices from `[0, n)`, choosing the algorithm by
/// [`SampleAlgorithm::select`]. All `C(n, k)` subsets are equally likely.
///
/// `k = 0` draws nothing; `k = n` returns `0..n` without drawing.
///
/// # Errors
/// `RandomError::SampleTooLarge` if `k > n`.
pub fn sample<R: RngCore + ?Sized>(
    rng: &mut R,
    n: usize,
    k: usize,
) -> Result<Vec<usize>, RandomError> {
    let algorithm = SampleAlgorithm::select(n, k);
    trace!(n, k, ?algorithm, "sampling distinct indices");
    sample_with(rng, algorithm, n, k)
}

/// [`sample`] into a caller-supplied buffer.
///
/// # Errors
/// As [`sample_with_into`].
pub fn sample_into<'a, R: RngCore + ?Sized>(
    rng: &mut R,
    n: usize,
    k: usize,
    dest: &'a mut [usize],
) -> Result<&'a mut [usize], RandomError> {
    let algorithm = SampleAlgorithm::select(n, k);
    trace!(n, k, ?algorithm, "sampling distinct indices into buffer");
    sample_with_into(rng, algorithm, n, k, dest)
}

/// [`sample`] with control over the output order.
///
/// # Errors
/// `RandomError::SampleTooLarge` if `k > n`.
pub fn sample_ordered<R: RngCore + ?Sized>(
    rng: &mut R,
    n: usize,
    k: usize,
    order: SampleOrder,
) -> Result<Vec<usize>, RandomError> {
    let mut out = sample(rng, n, k)?;
    if order == SampleOrder::Sorted {
        out.sort_unstable();
    }
    Ok(out)
}

/// Include each index of `[0, n)` independently with probability `p`.
///
/// The sample size is drawn from `Binomial(n, p)` and the members by
/// [`sample`]. `p <= 0` gives an empty sample and `p >= 1` all of `0..n`,
/// neither consuming randomness.
///
/// # Errors
/// `RandomError::InvalidParameter` if `p` is NaN.
pub fn sample_p<R: RngCore + ?Sized>(
    rng: &mut R,
    n: usize,
    p: f64,
) -> Result<Vec<usize>, RandomError> {
    let binomial = Binomial::new(n as u64, p)?;
    sample_p_with(rng, n, &binomial)
}

/// [`sample_p`] with a prebuilt `Binomial(n, p)`.
pub(crate) fn sample_p_with<R: RngCore + ?Sized>(
    rng: &mut R,
    n: usize,
    binomial: &Binomial,
) -> Result<Vec<usize>, RandomError> {
    if binomial.p() <= 0.0 {
        return Ok(Vec::new());
    }
    if binomial.p() >= 1.0 {
        return Ok((0..n).collect());
    }
    let k = binomial.draw(rng) as usize;
    sample(rng, n, k.min(n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    fn rng() -> Xoshiro256PlusPlus {
        Xoshiro256PlusPlus::seed_from_u64(42)
    }

    fn assert_distinct_in_range(values: &[usize], n: usize) {
        let mut seen = vec![false; n];
        for &v in values {
            assert!(v < n, "{} out of range for n = {}", v, n);
            assert!(!seen[v], "{} repeated", v);
            seen[v] = true;
        }
    }

    #[test]
    fn test_select_boundaries() {
        assert_eq!(SampleAlgorithm::select(100, 0), SampleAlgorithm::Insertion);
        assert_eq!(SampleAlgorithm::select(100, 9), SampleAlgorithm::Insertion);
        assert_eq!(SampleAlgorithm::select(100, 10), SampleAlgorithm::Pool);
        assert_eq!(SampleAlgorithm::select(100, 49), SampleAlgorithm::Pool);
        assert_eq!(SampleAlgorithm::select(100, 50), SampleAlgorithm::Reservoir);
        assert_eq!(SampleAlgorithm::select(100, 100), SampleAlgorithm::Reservoir);
        assert_eq!(SampleAlgorithm::select(0, 0), SampleAlgorithm::Reservoir);
        assert_eq!(
            SampleAlgorithm::select(usize::MAX, usize::MAX / 2),
            SampleAlgorithm::Pool
        );
    }

    #[test]
    fn test_each_algorithm_distinct() {
        let mut rng = rng();
        for algorithm in [
            SampleAlgorithm::Insertion,
            SampleAlgorithm::Pool,
            SampleAlgorithm::Reservoir,
        ] {
            for (n, k) in [(1, 1), (10, 3), (50, 25), (200, 199), (30, 30)] {
                let s = sample_with(&mut rng, algorithm, n, k).unwrap();
                assert_eq!(s.len(), k);
                assert_distinct_in_range(&s, n);
            }
        }
    }

    #[test]
    fn test_insertion_is_sorted() {
        let mut rng = rng();
        for _ in 0..100 {
            let s = sample_insertion(&mut rng, 1000, 20).unwrap();
            assert!(s.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_k_zero_draws_nothing() {
        let mut a = rng();
        let b = a.clone();
        assert!(sample(&mut a, 10, 0).unwrap().is_empty());
        assert_eq!(a, b);
    }

    #[test]
    fn test_k_equals_n_is_identity_without_draws() {
        let mut a = rng();
        let b = a.clone();
        assert_eq!(sample(&mut a, 8, 8).unwrap(), (0..8).collect::<Vec<_>>());
        assert_eq!(a, b);
    }

    #[test]
    fn test_k_n_minus_one_misses_one() {
        let mut rng = rng();
        let mut s = sample(&mut rng, 50, 49).unwrap();
        s.sort_unstable();
        let missing: Vec<usize> = (0..50).filter(|i| s.binary_search(i).is_err()).collect();
        assert_eq!(missing.len(), 1);
    }

    #[test]
    fn test_sample_too_large() {
        let mut rng = rng();
        assert_eq!(
            sample(&mut rng, 3, 5),
            Err(RandomError::SampleTooLarge { k: 5, n: 3 })
        );
    }

    #[test]
    fn test_into_uses_prefix() {
        let mut rng = rng();
        let mut buf = [usize::MAX; 8];
        let out = sample_into(&mut rng, 100, 3, &mut buf).unwrap();
        assert_eq!(out.len(), 3);
        assert_distinct_in_range(out, 100);
        assert!(buf[3..].iter().all(|&v| v == usize::MAX));
    }

    #[test]
    fn test_into_buffer_too_small() {
        let mut rng = rng();
        let mut buf = [0usize; 2];
        assert_eq!(
            sample_pool_into(&mut rng, 10, 3, &mut buf).unwrap_err(),
            RandomError::BufferTooSmall { needed: 3, got: 2 }
        );
    }

    #[test]
    fn test_sample_ordered() {
        let mut rng = rng();
        let s = sample_ordered(&mut rng, 100, 60, SampleOrder::Sorted).unwrap();
        assert!(s.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_sample_p_extremes() {
        let mut rng = rng();
        assert!(sample_p(&mut rng, 10, 0.0).unwrap().is_empty());
        assert_eq!(sample_p(&mut rng, 4, 1.0).unwrap(), vec![0, 1, 2, 3]);
        assert!(sample_p(&mut rng, 10, f64::NAN).is_err());
    }

    #[test]
    fn test_sample_p_mean_size() {
        let mut rng = rng();
        let trials = 2000;
        let total: usize = (0..trials)
            .map(|_| sample_p(&mut rng, 100, 0.2).unwrap().len())
            .sum();
        let mean = total as f64 / trials as f64;
        assert!((mean - 20.0).abs() < 0.5, "mean = {}", mean);
    }
}
