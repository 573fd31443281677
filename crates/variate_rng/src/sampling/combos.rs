//! Distinct pairs and triples, optionally constrained to a window.
//!
//! All draws are constant time with no rejection: the second and third values
//! are drawn from a range one or two smaller and then shifted past the values
//! already chosen. Windowed variants map a single uniform draw onto the set of
//! windowed combinations laid out as "interior" positions, where the smallest
//! member has a full window above it, followed by the cramped positions at the
//! top of the range.

use rand::RngCore;

use crate::error::RandomError;
use crate::uniform::bounded_usize;

fn require_population(n: usize, needed: usize) -> Result<(), RandomError> {
    if n < needed {
        Err(RandomError::PopulationTooSmall { n, needed })
    } else {
        Ok(())
    }
}

fn require_window(window: usize, min: usize) -> Result<(), RandomError> {
    if window < min {
        Err(RandomError::InvalidWindow { window, min })
    } else {
        Ok(())
    }
}

/// Two distinct indices from `[0, n)`; all ordered pairs equally likely.
///
/// # Errors
/// `RandomError::PopulationTooSmall` if `n < 2`.
pub fn int_pair<R: RngCore + ?Sized>(rng: &mut R, n: usize) -> Result<[usize; 2], RandomError> {
    require_population(n, 2)?;
    let a = bounded_usize(rng, n);
    let b = bounded_usize(rng, n - 1);
    Ok(if b >= a { [a, b + 1] } else { [a, b] })
}

/// Two distinct indices from `[0, n)` in ascending order.
///
/// # Errors
/// `RandomError::PopulationTooSmall` if `n < 2`.
pub fn sorted_int_pair<R: RngCore + ?Sized>(
    rng: &mut R,
    n: usize,
) -> Result<[usize; 2], RandomError> {
    require_population(n, 2)?;
    let a = bounded_usize(rng, n);
    let b = bounded_usize(rng, n - 1);
    Ok(if b >= a { [a, b + 1] } else { [b, a] })
}

/// If `r[upper] >= r[lower]`, bump `r[upper]` past it.
#[inline]
fn bump(r: &mut [usize; 3], upper: usize, lower: usize) -> bool {
    if r[upper] >= r[lower] {
        r[upper] += 1;
        true
    } else {
        false
    }
}

fn draw_triple<R: RngCore + ?Sized>(rng: &mut R, n: usize) -> [usize; 3] {
    [
        bounded_usize(rng, n),
        bounded_usize(rng, n - 1),
        bounded_usize(rng, n - 2),
    ]
}

fn adjust_triple(r: &mut [usize; 3]) {
    if bump(r, 1, 0) {
        bump(r, 2, 0);
        bump(r, 2, 1);
    } else {
        bump(r, 2, 1);
        bump(r, 2, 0);
    }
}

fn adjust_sorted_triple(r: &mut [usize; 3]) {
    if !bump(r, 1, 0) {
        r.swap(0, 1);
    }
    if bump(r, 2, 0) {
        if !bump(r, 2, 1) {
            r.swap(1, 2);
        }
    } else {
        r.rotate_right(1);
    }
}

/// Three distinct indices from `[0, n)`; all ordered triples equally likely.
///
/// # Errors
/// `RandomError::PopulationTooSmall` if `n < 3`.
pub fn int_triple<R: RngCore + ?Sized>(rng: &mut R, n: usize) -> Result<[usize; 3], RandomError> {
    require_population(n, 3)?;
    let mut r = draw_triple(rng, n);
    adjust_triple(&mut r);
    Ok(r)
}

/// Three distinct indices from `[0, n)` in ascending order.
///
/// # Errors
/// `RandomError::PopulationTooSmall` if `n < 3`.
pub fn sorted_int_triple<R: RngCore + ?Sized>(
    rng: &mut R,
    n: usize,
) -> Result<[usize; 3], RandomError> {
    require_population(n, 3)?;
    let mut r = draw_triple(rng, n);
    adjust_sorted_triple(&mut r);
    Ok(r)
}

/// Two distinct indices `a, b` from `[0, n)` with `|a − b| <= window`,
/// uniformly over all such ordered pairs.
///
/// A window of `n − 1` or more places no constraint and falls back to
/// [`int_pair`].
///
/// # Errors
/// - `RandomError::PopulationTooSmall` if `n < 2`
/// - `RandomError::InvalidWindow` if `window < 1`
pub fn windowed_int_pair<R: RngCore + ?Sized>(
    rng: &mut R,
    n: usize,
    window: usize,
) -> Result<[usize; 2], RandomError> {
    require_population(n, 2)?;
    require_window(window, 1)?;
    if window >= n - 1 {
        return int_pair(rng, n);
    }
    let z1 = n - window;
    let z2 = 2 * z1;
    let mut i = bounded_usize(rng, z2 + window - 1);
    let mut j = bounded_usize(rng, window);
    if i < z2 {
        let x = i & 1;
        let mut r = [0; 2];
        r[x] = i >> 1;
        r[x ^ 1] = r[x] + 1 + j;
        Ok(r)
    } else {
        i -= z1;
        j += z1;
        Ok([if i >= j { i + 1 } else { i }, j])
    }
}

struct WindowedTripleDraw {
    i: usize,
    j: usize,
    k: usize,
    z1: usize,
    z3: usize,
}

fn draw_windowed_triple<R: RngCore + ?Sized>(
    rng: &mut R,
    n: usize,
    window: usize,
) -> WindowedTripleDraw {
    let z1 = n - window;
    let z3 = 3 * z1;
    WindowedTripleDraw {
        i: bounded_usize(rng, z3 + window - 2),
        j: bounded_usize(rng, window),
        k: bounded_usize(rng, window - 1),
        z1,
        z3,
    }
}

/// Shift `i` past `lower` and then `higher` where it collides.
#[inline]
fn step_past(mut i: usize, lower: usize, higher: usize) -> usize {
    if i >= lower {
        i += 1;
        if i >= higher {
            i += 1;
        }
    }
    i
}

/// Three distinct indices from `[0, n)` with `max − min <= window`, uniformly
/// over all such ordered triples.
///
/// A window of `n − 1` or more falls back to [`int_triple`].
///
/// # Errors
/// - `RandomError::PopulationTooSmall` if `n < 3`
/// - `RandomError::InvalidWindow` if `window < 2`
pub fn windowed_int_triple<R: RngCore + ?Sized>(
    rng: &mut R,
    n: usize,
    window: usize,
) -> Result<[usize; 3], RandomError> {
    require_population(n, 3)?;
    require_window(window, 2)?;
    if window >= n - 1 {
        return int_triple(rng, n);
    }
    let WindowedTripleDraw {
        mut i,
        mut j,
        mut k,
        z1,
        z3,
    } = draw_windowed_triple(rng, n, window);
    if k >= j {
        k += 1;
    }
    if i < z3 {
        let q = i / 3;
        let rem = i % 3;
        let mut r = [0; 3];
        r[rem] = q;
        if rem < 2 {
            r[rem ^ 1] = q + 1 + j;
            r[2] = q + 1 + k;
        } else {
            r[0] = q + 1 + j;
            r[1] = q + 1 + k;
        }
        Ok(r)
    } else {
        i = i - z3 + z1;
        j += z1;
        k += z1;
        i = if j < k {
            step_past(i, j, k)
        } else {
            step_past(i, k, j)
        };
        Ok([i, j, k])
    }
}

/// [`windowed_int_triple`] in ascending order.
///
/// # Errors
/// As [`windowed_int_triple`].
pub fn sorted_windowed_int_triple<R: RngCore + ?Sized>(
    rng: &mut R,
    n: usize,
    window: usize,
) -> Result<[usize; 3], RandomError> {
    require_population(n, 3)?;
    require_window(window, 2)?;
    if window >= n - 1 {
        return sorted_int_triple(rng, n);
    }
    let WindowedTripleDraw {
        mut i,
        mut j,
        mut k,
        z1,
        z3,
    } = draw_windowed_triple(rng, n, window);
    if k >= j {
        k += 1;
    } else {
        std::mem::swap(&mut j, &mut k);
    }
    if i < z3 {
        let q = i / 3;
        return Ok([q, q + 1 + j, q + 1 + k]);
    }
    i = i - z3 + z1;
    j += z1;
    k += z1;
    if i >= j {
        i += 1;
        if i >= k {
            Ok([j, k, i + 1])
        } else {
            Ok([j, i, k])
        }
    } else {
        Ok([i, j, k])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;
    use std::collections::HashMap;

    fn rng() -> Xoshiro256PlusPlus {
        Xoshiro256PlusPlus::seed_from_u64(2024)
    }

    fn distinct<const N: usize>(r: &[usize; N]) -> bool {
        (0..N).all(|a| (a + 1..N).all(|b| r[a] != r[b]))
    }

    fn spread<const N: usize>(r: &[usize; N]) -> usize {
        r.iter().max().unwrap() - r.iter().min().unwrap()
    }

    #[test]
    fn test_population_checks() {
        let mut rng = rng();
        assert_eq!(
            int_pair(&mut rng, 1),
            Err(RandomError::PopulationTooSmall { n: 1, needed: 2 })
        );
        assert!(int_triple(&mut rng, 2).is_err());
        assert!(sorted_int_triple(&mut rng, 2).is_err());
        assert_eq!(
            windowed_int_pair(&mut rng, 10, 0),
            Err(RandomError::InvalidWindow { window: 0, min: 1 })
        );
        assert_eq!(
            windowed_int_triple(&mut rng, 10, 1),
            Err(RandomError::InvalidWindow { window: 1, min: 2 })
        );
    }

    #[test]
    fn test_pairs_distinct() {
        let mut rng = rng();
        for n in [2, 3, 10] {
            for _ in 0..500 {
                let p = int_pair(&mut rng, n).unwrap();
                assert!(distinct(&p) && p.iter().all(|&v| v < n));
                let s = sorted_int_pair(&mut rng, n).unwrap();
                assert!(s[0] < s[1] && s[1] < n);
            }
        }
    }

    #[test]
    fn test_triples_distinct() {
        let mut rng = rng();
        for n in [3, 4, 10] {
            for _ in 0..500 {
                let t = int_triple(&mut rng, n).unwrap();
                assert!(distinct(&t) && t.iter().all(|&v| v < n));
                let s = sorted_int_triple(&mut rng, n).unwrap();
                assert!(s[0] < s[1] && s[1] < s[2] && s[2] < n);
            }
        }
    }

    #[test]
    fn test_adjust_sorted_triple_covers_all_orders() {
        // every raw draw for n = 4 must map to a sorted distinct triple
        for a in 0..4 {
            for b in 0..3 {
                for c in 0..2 {
                    let mut r = [a, b, c];
                    adjust_sorted_triple(&mut r);
                    assert!(r[0] < r[1] && r[1] < r[2] && r[2] < 4, "{:?}", r);
                    let mut u = [a, b, c];
                    adjust_triple(&mut u);
                    assert!(distinct(&u) && u.iter().all(|&v| v < 4), "{:?}", u);
                }
            }
        }
    }

    #[test]
    fn test_windowed_pair_respects_window() {
        let mut rng = rng();
        for (n, window) in [(10, 1), (10, 3), (100, 5), (6, 4)] {
            for _ in 0..1000 {
                let p = windowed_int_pair(&mut rng, n, window).unwrap();
                assert!(distinct(&p) && p.iter().all(|&v| v < n));
                assert!(spread(&p) <= window, "{:?} window {}", p, window);
            }
        }
    }

    #[test]
    fn test_windowed_pair_uniform_over_ordered_pairs() {
        // n = 6, window = 2: ordered pairs with |a - b| <= 2 number 2 * (5 + 4) = 18
        let mut rng = rng();
        let trials = 36_000;
        let mut counts: HashMap<[usize; 2], usize> = HashMap::new();
        for _ in 0..trials {
            *counts
                .entry(windowed_int_pair(&mut rng, 6, 2).unwrap())
                .or_default() += 1;
        }
        assert_eq!(counts.len(), 18);
        for (&pair, &count) in &counts {
            assert!((1700..2300).contains(&count), "{:?} drawn {} times", pair, count);
        }
    }

    #[test]
    fn test_windowed_triple_respects_window() {
        let mut rng = rng();
        for (n, window) in [(10, 2), (10, 4), (100, 7), (7, 5)] {
            for _ in 0..1000 {
                let t = windowed_int_triple(&mut rng, n, window).unwrap();
                assert!(distinct(&t) && t.iter().all(|&v| v < n));
                assert!(spread(&t) <= window, "{:?} window {}", t, window);
                let s = sorted_windowed_int_triple(&mut rng, n, window).unwrap();
                assert!(s[0] < s[1] && s[1] < s[2] && s[2] < n);
                assert!(s[2] - s[0] <= window, "{:?} window {}", s, window);
            }
        }
    }

    #[test]
    fn test_windowed_triple_uniform_over_sets() {
        // n = 7, window = 3: count the sets {a < b < c} with c - a <= 3
        let expected: usize = (0..7usize)
            .flat_map(|a| (a + 1..7).flat_map(move |b| (b + 1..7).map(move |c| (a, c))))
            .filter(|&(a, c)| c - a <= 3)
            .count();
        let mut rng = rng();
        let trials = expected * 2000;
        let mut counts: HashMap<[usize; 3], usize> = HashMap::new();
        for _ in 0..trials {
            *counts
                .entry(sorted_windowed_int_triple(&mut rng, 7, 3).unwrap())
                .or_default() += 1;
        }
        assert_eq!(counts.len(), expected);
        for (&set, &count) in &counts {
            assert!((1700..2300).contains(&count), "{:?} drawn {} times", set, count);
        }
    }

    #[test]
    fn test_wide_window_falls_back() {
        let mut a = rng();
        let mut b = rng();
        assert_eq!(
            windowed_int_pair(&mut a, 5, 4).unwrap(),
            int_pair(&mut b, 5).unwrap()
        );
        assert_eq!(
            windowed_int_triple(&mut a, 5, 10).unwrap(),
            int_triple(&mut b, 5).unwrap()
        );
    }
}
