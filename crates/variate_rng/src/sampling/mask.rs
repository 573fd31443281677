//! Boolean masks over `n` positions.

use rand::RngCore;

use super::{run, sample_p, SampleAlgorithm};
use crate::error::RandomError;
use crate::uniform::coin;

/// `n` independent fair coin flips.
pub fn array_mask<R: RngCore + ?Sized>(rng: &mut R, n: usize) -> Vec<bool> {
    (0..n).map(|_| coin(rng)).collect()
}

/// A mask of length `n` with exactly `min(count, n)` positions set, every such
/// mask equally likely.
pub fn array_mask_count<R: RngCore + ?Sized>(rng: &mut R, n: usize, count: usize) -> Vec<bool> {
    if count >= n {
        return vec![true; n];
    }
    let mut indices = vec![0; count];
    run(rng, SampleAlgorithm::select(n, count), n, &mut indices);
    let mut mask = vec![false; n];
    for i in indices {
        mask[i] = true;
    }
    mask
}

/// A mask of length `n` where each position is set independently with
/// probability `p`.
///
/// # Errors
/// `RandomError::InvalidParameter` if `p` is NaN.
pub fn array_mask_p<R: RngCore + ?Sized>(
    rng: &mut R,
    n: usize,
    p: f64,
) -> Result<Vec<bool>, RandomError> {
    let mut mask = vec![false; n];
    for i in sample_p(rng, n, p)? {
        mask[i] = true;
    }
    Ok(mask)
}
