//! Fisher–Yates shuffling.

use std::ops::Range;

use rand::RngCore;

use crate::error::RandomError;
use crate::uniform::bounded_usize;

/// Shuffle `values` in place; every permutation is equally likely.
///
/// Swap positions come from [`bounded_usize`] rather than
/// `rand::seq::SliceRandom::shuffle`, so a seeded shuffle consumes the same
/// bounded draws as the rest of this crate and stays stable across `rand`
/// releases.
pub fn shuffle<T, R: RngCore + ?Sized>(rng: &mut R, values: &mut [T]) {
    for i in (1..values.len()).rev() {
        let j = bounded_usize(rng, i + 1);
        values.swap(i, j);
    }
}

/// Shuffle only `values[range]`, leaving the rest untouched.
///
/// # Errors
/// `RandomError::InvalidBound` if the range is reversed or extends past the
/// end of the slice.
pub fn shuffle_range<T, R: RngCore + ?Sized>(
    rng: &mut R,
    values: &mut [T],
    range: Range<usize>,
) -> Result<(), RandomError> {
    let (start, end) = (range.start, range.end);
    let window = values
        .get_mut(range)
        .ok_or_else(|| RandomError::invalid_bound(start, end))?;
    shuffle(rng, window);
    Ok(())
}
