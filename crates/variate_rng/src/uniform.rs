//! Uniform draws over bounded ranges.
//!
//! Integer ranges use Lemire's multiply-shift method: one draw of the native
//! width is multiplied by the range width and the high half of the product is
//! the result. The draw is retried only when the low half falls below
//! `2^w mod width`, which removes modulo bias for every width with fewer than
//! two draws on average. The rejection threshold itself is only computed when
//! the low half is smaller than the width.
//!
//! Functions here are generic over `R: RngCore + ?Sized` so they work with any
//! source, with `&mut dyn RngCore`, and with [`EnhancedRng`](crate::EnhancedRng),
//! whose methods delegate to them.

use rand::RngCore;

use crate::error::RandomError;

/// 2^-53, the spacing of 53-bit uniform doubles.
const DOUBLE_UNIT: f64 = 1.0 / (1u64 << 53) as f64;

/// 2^-24, the spacing of 24-bit uniform floats.
const FLOAT_UNIT: f32 = 1.0 / (1u32 << 24) as f32;

/// Uniform `u32` in `[0, bound)`.
///
/// `bound` must be positive; a zero bound returns 0.
#[inline]
pub fn bounded_u32<R: RngCore + ?Sized>(rng: &mut R, bound: u32) -> u32 {
    if bound == 0 {
        return 0;
    }
    let mut m = u64::from(rng.next_u32()) * u64::from(bound);
    let mut low = m as u32;
    if low < bound {
        let threshold = bound.wrapping_neg() % bound;
        while low < threshold {
            m = u64::from(rng.next_u32()) * u64::from(bound);
            low = m as u32;
        }
    }
    (m >> 32) as u32
}

/// Uniform `u64` in `[0, bound)`.
///
/// `bound` must be positive; a zero bound returns 0.
#[inline]
pub fn bounded_u64<R: RngCore + ?Sized>(rng: &mut R, bound: u64) -> u64 {
    if bound == 0 {
        return 0;
    }
    let mut m = u128::from(rng.next_u64()) * u128::from(bound);
    let mut low = m as u64;
    if low < bound {
        let threshold = bound.wrapping_neg() % bound;
        while low < threshold {
            m = u128::from(rng.next_u64()) * u128::from(bound);
            low = m as u64;
        }
    }
    (m >> 64) as u64
}

/// Uniform index in `[0, bound)`.
///
/// Widths that fit in 32 bits consume a single `u32` per attempt, so index
/// sequences are identical on 32- and 64-bit targets.
#[inline]
pub fn bounded_usize<R: RngCore + ?Sized>(rng: &mut R, bound: usize) -> usize {
    match u32::try_from(bound) {
        Ok(narrow) => bounded_u32(rng, narrow) as usize,
        Err(_) => bounded_u64(rng, bound as u64) as usize,
    }
}

/// Uniform `i32` in `[origin, bound)`.
///
/// # Errors
/// `RandomError::InvalidBound` if `origin >= bound`.
pub fn int_in_range<R: RngCore + ?Sized>(
    rng: &mut R,
    origin: i32,
    bound: i32,
) -> Result<i32, RandomError> {
    let width = int_width(origin, bound)?;
    Ok(origin.wrapping_add(bounded_u32(rng, width) as i32))
}

/// Width of `[origin, bound)` as an unsigned count.
pub(crate) fn int_width(origin: i32, bound: i32) -> Result<u32, RandomError> {
    if origin >= bound {
        return Err(RandomError::invalid_bound(origin, bound));
    }
    Ok(bound.wrapping_sub(origin) as u32)
}

/// Uniform `i64` in `[origin, bound)`.
///
/// # Errors
/// `RandomError::InvalidBound` if `origin >= bound`.
pub fn long_in_range<R: RngCore + ?Sized>(
    rng: &mut R,
    origin: i64,
    bound: i64,
) -> Result<i64, RandomError> {
    let width = long_width(origin, bound)?;
    Ok(origin.wrapping_add(bounded_u64(rng, width) as i64))
}

/// Width of `[origin, bound)` as an unsigned count.
pub(crate) fn long_width(origin: i64, bound: i64) -> Result<u64, RandomError> {
    if origin >= bound {
        return Err(RandomError::invalid_bound(origin, bound));
    }
    Ok(bound.wrapping_sub(origin) as u64)
}

/// Uniform `f64` in `[0, 1)` with 53 random bits.
#[inline]
pub fn unit_f64<R: RngCore + ?Sized>(rng: &mut R) -> f64 {
    (rng.next_u64() >> 11) as f64 * DOUBLE_UNIT
}

/// Uniform `f32` in `[0, 1)` with 24 random bits.
#[inline]
pub fn unit_f32<R: RngCore + ?Sized>(rng: &mut R) -> f32 {
    (rng.next_u32() >> 8) as f32 * FLOAT_UNIT
}

/// Fair coin.
#[inline]
pub fn coin<R: RngCore + ?Sized>(rng: &mut R) -> bool {
    (rng.next_u32() as i32) < 0
}

/// Largest `f64` strictly below `x` (for finite, non-zero `x`).
fn prev_f64(x: f64) -> f64 {
    if x > 0.0 {
        f64::from_bits(x.to_bits() - 1)
    } else if x < 0.0 {
        f64::from_bits(x.to_bits() + 1)
    } else {
        -f64::from_bits(1)
    }
}

/// Largest `f32` strictly below `x`.
fn prev_f32(x: f32) -> f32 {
    if x > 0.0 {
        f32::from_bits(x.to_bits() - 1)
    } else if x < 0.0 {
        f32::from_bits(x.to_bits() + 1)
    } else {
        -f32::from_bits(1)
    }
}

/// Validated width of the float interval `[origin, bound)`.
pub(crate) fn f64_width(origin: f64, bound: f64) -> Result<f64, RandomError> {
    let width = bound - origin;
    if !(origin < bound) || !width.is_finite() {
        return Err(RandomError::invalid_bound(origin, bound));
    }
    Ok(width)
}

/// `origin + u · width` clamped below `bound`.
#[inline]
pub(crate) fn scale_f64(u: f64, origin: f64, width: f64, bound: f64) -> f64 {
    let r = origin + u * width;
    if r >= bound {
        prev_f64(bound)
    } else {
        r
    }
}

/// Uniform `f64` in `[origin, bound)`.
///
/// Rounding can push `origin + u · (bound - origin)` onto `bound`; such
/// results are replaced by the largest double below `bound`.
///
/// # Errors
/// `RandomError::InvalidBound` if `origin >= bound`, either end is not finite,
/// or the width overflows.
pub fn f64_in_range<R: RngCore + ?Sized>(
    rng: &mut R,
    origin: f64,
    bound: f64,
) -> Result<f64, RandomError> {
    let width = f64_width(origin, bound)?;
    Ok(scale_f64(unit_f64(rng), origin, width, bound))
}

/// Uniform `f32` in `[origin, bound)`.
///
/// # Errors
/// Same conditions as [`f64_in_range`].
pub fn f32_in_range<R: RngCore + ?Sized>(
    rng: &mut R,
    origin: f32,
    bound: f32,
) -> Result<f32, RandomError> {
    let width = bound - origin;
    if !(origin < bound) || !width.is_finite() {
        return Err(RandomError::invalid_bound(origin, bound));
    }
    let r = origin + unit_f32(rng) * width;
    Ok(if r >= bound { prev_f32(bound) } else { r })
}

/// Index in `[0, bound)` drawn as `floor(bound · u^exponent)`.
///
/// With `exponent = 1` this is uniform; larger exponents concentrate mass on
/// small values, with `P(X <= x) = ((x + 1) / bound)^(1 / exponent)`. A single
/// uniform is consumed and there is no rejection.
///
/// # Errors
/// - `RandomError::InvalidBound` if `bound == 0`
/// - `RandomError::InvalidParameter` if `exponent < 1` or is not finite
pub fn skewed_index<R: RngCore + ?Sized>(
    rng: &mut R,
    bound: usize,
    exponent: f64,
) -> Result<usize, RandomError> {
    if bound == 0 {
        return Err(RandomError::invalid_bound(0, 0));
    }
    if !(exponent >= 1.0) || !exponent.is_finite() {
        return Err(RandomError::invalid_parameter(
            "exponent",
            format!("must be a finite value >= 1, got {}", exponent),
        ));
    }
    let u = unit_f64(rng);
    let skewed = if exponent == 2.0 { u * u } else { u.powf(exponent) };
    let index = (skewed * bound as f64) as usize;
    Ok(index.min(bound - 1))
}
