//! Distributional tests for the uniform and non-uniform generators.
//!
//! # Test Categories
//!
//! 1. **Gaussians**: Anderson–Darling against N(0, 1) and N(μ, σ)
//! 2. **Binomial**: exact PMF in the inversion regime, range and mean in BTPE
//! 3. **Bounded draws**: chi-square for widths that are not powers of two
//!
//! All generators are seeded, so every statistic below is deterministic.

mod common;

use approx::assert_abs_diff_eq;
use common::{anderson_darling, chi_square, chi_square_critical, chi_square_uniform, choose};
use variate_rng::source::{ChaCha8Rng, Pcg64, Xoshiro256PlusPlus};
use variate_rng::{EnhancedRng, GaussianMethod};

const AD_CRITICAL: f64 = 6.0;
// Large enough for A² to resolve a misplaced Ziggurat layer or edge test
const GAUSSIAN_DRAWS: usize = 1_000_000;

// ============================================================================
// Gaussian Tests
// ============================================================================

#[test]
fn test_ziggurat_is_standard_normal() {
    let mut rng: EnhancedRng<Xoshiro256PlusPlus> = EnhancedRng::from_seed(101);
    let samples: Vec<f64> = (0..GAUSSIAN_DRAWS)
        .map(|_| rng.next_gaussian_ziggurat())
        .collect();
    let a2 = anderson_darling(&samples, 0.0, 1.0);
    assert!(a2 < AD_CRITICAL, "Ziggurat A² = {:.3}", a2);
}

#[test]
fn test_polar_is_standard_normal() {
    let mut rng: EnhancedRng<Pcg64> = EnhancedRng::from_seed(102);
    let samples: Vec<f64> = (0..GAUSSIAN_DRAWS).map(|_| rng.next_gaussian_polar()).collect();
    let a2 = anderson_darling(&samples, 0.0, 1.0);
    assert!(a2 < AD_CRITICAL, "Polar A² = {:.3}", a2);
}

#[test]
fn test_configured_method_is_standard_normal() {
    for method in [GaussianMethod::Ziggurat, GaussianMethod::Polar] {
        let mut rng: EnhancedRng<ChaCha8Rng> =
            EnhancedRng::from_seed(103).with_gaussian_method(method);
        let mut samples = vec![0.0; GAUSSIAN_DRAWS];
        rng.fill_gaussian(&mut samples);
        let a2 = anderson_darling(&samples, 0.0, 1.0);
        assert!(a2 < AD_CRITICAL, "{:?} A² = {:.3}", method, a2);
    }
}

#[test]
fn test_scaled_gaussians() {
    let mut rng: EnhancedRng<Xoshiro256PlusPlus> = EnhancedRng::from_seed(104);

    let shifted: Vec<f64> = (0..GAUSSIAN_DRAWS)
        .map(|_| rng.next_gaussian_with(3.0, 2.0))
        .collect();
    let a2 = anderson_darling(&shifted, 3.0, 2.0);
    assert!(a2 < AD_CRITICAL, "N(3, 2) A² = {:.3}", a2);

    let narrow: Vec<f64> = (0..GAUSSIAN_DRAWS).map(|_| rng.next_gaussian_scaled(0.5)).collect();
    let a2 = anderson_darling(&narrow, 0.0, 0.5);
    assert!(a2 < AD_CRITICAL, "N(0, 0.5) A² = {:.3}", a2);

    // Wrong parameters must be detected by the same statistic
    let a2 = anderson_darling(&narrow, 0.0, 1.0);
    assert!(a2 > AD_CRITICAL, "N(0, 0.5) accepted as N(0, 1): A² = {:.3}", a2);
}

#[test]
fn test_ziggurat_tail_frequency() {
    // P(|Z| > 3.5) = 4.653e-4
    let mut rng: EnhancedRng<Xoshiro256PlusPlus> = EnhancedRng::from_seed(105);
    let n = 200_000;
    let tail = (0..n)
        .filter(|_| rng.next_gaussian_ziggurat().abs() > 3.5)
        .count();
    assert!((55..135).contains(&tail), "{} tail draws, expected ~93", tail);
}

// ============================================================================
// Other Continuous Variates
// ============================================================================

#[test]
fn test_exponential_mean() {
    let mut rng: EnhancedRng = EnhancedRng::from_seed(106);
    let n = 100_000;
    let mean = (0..n).map(|_| rng.next_exponential()).sum::<f64>() / n as f64;
    assert_abs_diff_eq!(mean, 1.0, epsilon = 0.015);
}

#[test]
fn test_cauchy_quartiles() {
    let mut rng: EnhancedRng = EnhancedRng::from_seed(107);
    let n = 40_000;
    let mut samples: Vec<f64> = (0..n)
        .map(|_| rng.next_cauchy_with(2.0, 3.0).unwrap())
        .collect();
    samples.sort_by(|a, b| a.total_cmp(b));
    // Quartiles of Cauchy(2, 3) are 2 ± 3
    assert_abs_diff_eq!(samples[n / 4], -1.0, epsilon = 0.15);
    assert_abs_diff_eq!(samples[n / 2], 2.0, epsilon = 0.1);
    assert_abs_diff_eq!(samples[3 * n / 4], 5.0, epsilon = 0.15);
}

// ============================================================================
// Binomial Tests
// ============================================================================

#[test]
fn test_binomial_matches_exact_pmf() {
    let mut rng: EnhancedRng<Pcg64> = EnhancedRng::from_seed(108);
    let draws = 100_000;
    let mut observed = [0_usize; 11];
    for _ in 0..draws {
        let k = rng.next_binomial(10, 0.5).unwrap();
        observed[k as usize] += 1;
    }
    let expected: Vec<f64> = (0..=10)
        .map(|k| draws as f64 * choose(10, k) / 1024.0)
        .collect();
    let stat = chi_square(&observed, &expected);
    assert!(stat < chi_square_critical(10), "chi-square = {:.2}", stat);
}

#[test]
fn test_skewed_binomial_matches_exact_pmf() {
    // n·p = 3.2 < 10 keeps this in the inversion regime; p > 0.5 mirrors it
    let mut rng: EnhancedRng = EnhancedRng::from_seed(109);
    let (n, p) = (16_u64, 0.8);
    let draws = 100_000;
    let mut observed = [0_usize; 17];
    for _ in 0..draws {
        observed[rng.next_binomial(n, p).unwrap() as usize] += 1;
    }
    // Pool the sparse low end, everything up to 8 successes
    let pmf: Vec<f64> = (0..=n)
        .map(|k| choose(n, k) * p.powi(k as i32) * (1.0 - p).powi((n - k) as i32))
        .collect();
    let mut pooled_obs = vec![observed[..=8].iter().sum::<usize>()];
    let mut pooled_exp = vec![draws as f64 * pmf[..=8].iter().sum::<f64>()];
    for k in 9..=16 {
        pooled_obs.push(observed[k]);
        pooled_exp.push(draws as f64 * pmf[k]);
    }
    let stat = chi_square(&pooled_obs, &pooled_exp);
    assert!(stat < chi_square_critical(8), "chi-square = {:.2}", stat);
}

#[test]
fn test_large_binomial_range_and_mean() {
    let mut rng: EnhancedRng<Xoshiro256PlusPlus> = EnhancedRng::from_seed(110);
    let (n, p) = (1_000_000_u64, 0.3);
    let draws = 2_000;
    let mut total = 0.0;
    for _ in 0..draws {
        let k = rng.next_binomial(n, p).unwrap();
        assert!(k <= n);
        total += k as f64;
    }
    // Standard error of the mean is about 10.2
    assert_abs_diff_eq!(total / draws as f64, 300_000.0, epsilon = 60.0);
}

#[test]
fn test_binomial_variance_in_btpe_regime() {
    let mut rng: EnhancedRng = EnhancedRng::from_seed(111);
    let (n, p) = (500_u64, 0.4);
    let draws = 50_000;
    let values: Vec<f64> = (0..draws)
        .map(|_| rng.next_binomial(n, p).unwrap() as f64)
        .collect();
    let mean = variate_core::stats::mean(&values).unwrap();
    let var = variate_core::stats::variance_sample(&values).unwrap();
    assert_abs_diff_eq!(mean, 200.0, epsilon = 0.25);
    // Var = 120; relative standard error of the sample variance is ~0.6%
    assert_abs_diff_eq!(var, 120.0, epsilon = 3.0);
}

// ============================================================================
// Bounded Draw Tests
// ============================================================================

#[test]
fn test_ranged_int_is_uniform() {
    let mut rng: EnhancedRng = EnhancedRng::from_seed(112);
    let mut counts = [0_usize; 13];
    for _ in 0..130_000 {
        let v = rng.next_int_in(-7, 6).unwrap();
        counts[(v + 7) as usize] += 1;
    }
    let stat = chi_square_uniform(&counts);
    assert!(stat < chi_square_critical(12), "chi-square = {:.2}", stat);
}

#[test]
fn test_wide_int_bound_is_uniform() {
    // 1000 is not a power of two and 2^32 mod 1000 ≠ 0
    let mut rng: EnhancedRng<Pcg64> = EnhancedRng::from_seed(113);
    let mut counts = vec![0_usize; 1000];
    for _ in 0..500_000 {
        counts[rng.next_int(1000).unwrap() as usize] += 1;
    }
    let stat = chi_square_uniform(&counts);
    assert!(stat < chi_square_critical(999), "chi-square = {:.2}", stat);
}

#[test]
fn test_long_range_has_no_modulo_bias() {
    // A plain `% width` would put a third of the draws in the lowest bin
    let mut rng: EnhancedRng = EnhancedRng::from_seed(114);
    let width = 3_i64 << 61;
    let mut counts = [0_usize; 3];
    for _ in 0..60_000 {
        let v = rng.next_long(width).unwrap();
        counts[(v >> 61) as usize] += 1;
    }
    let stat = chi_square_uniform(&counts);
    assert!(stat < chi_square_critical(2), "counts {:?}", counts);
}

#[test]
fn test_biased_int_follows_square_law() {
    // P(X ≤ x) = sqrt((x + 1) / bound)
    let mut rng: EnhancedRng = EnhancedRng::from_seed(115);
    let bound = 10;
    let draws = 100_000;
    let mut observed = [0_usize; 10];
    for _ in 0..draws {
        observed[rng.next_biased_int(bound).unwrap() as usize] += 1;
    }
    let expected: Vec<f64> = (0..bound)
        .map(|x| {
            let hi = ((x + 1) as f64 / bound as f64).sqrt();
            let lo = (x as f64 / bound as f64).sqrt();
            draws as f64 * (hi - lo)
        })
        .collect();
    let stat = chi_square(&observed, &expected);
    assert!(stat < chi_square_critical(9), "chi-square = {:.2}", stat);
    assert!(observed[0] > observed[9]);
}

#[test]
fn test_full_int_range() {
    let mut rng: EnhancedRng = EnhancedRng::from_seed(116);
    let mut negative = 0;
    for _ in 0..10_000 {
        let v = rng.next_int_in(i32::MIN, i32::MAX).unwrap();
        assert!(v < i32::MAX);
        if v < 0 {
            negative += 1;
        }
    }
    assert!((4_700..5_300).contains(&negative));
}
