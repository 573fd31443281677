//! Goodness-of-fit helpers shared by the integration tests.

#![allow(dead_code)]

use variate_core::math::norm_cdf;

/// Pearson's chi-square statistic of `observed` counts against `expected`.
pub fn chi_square(observed: &[usize], expected: &[f64]) -> f64 {
    assert_eq!(observed.len(), expected.len());
    observed
        .iter()
        .zip(expected)
        .map(|(&o, &e)| {
            let d = o as f64 - e;
            d * d / e
        })
        .sum()
}

/// Chi-square statistic against a uniform expectation over every cell.
pub fn chi_square_uniform(observed: &[usize]) -> f64 {
    let total: usize = observed.iter().sum();
    let e = total as f64 / observed.len() as f64;
    chi_square(observed, &vec![e; observed.len()])
}

/// Upper 0.1% point of the chi-square distribution, Wilson–Hilferty
/// approximation.
pub fn chi_square_critical(degrees_of_freedom: usize) -> f64 {
    let k = degrees_of_freedom as f64;
    let z = 3.09;
    let h = 2.0 / (9.0 * k);
    k * (1.0 - h + z * h.sqrt()).powi(3)
}

/// Anderson–Darling statistic of `samples` against N(mean, std_dev).
///
/// Values above about 6.0 reject normality at the 0.1% level.
pub fn anderson_darling(samples: &[f64], mean: f64, std_dev: f64) -> f64 {
    let mut z: Vec<f64> = samples.iter().map(|x| (x - mean) / std_dev).collect();
    z.sort_by(|a, b| a.total_cmp(b));
    let n = z.len();
    let nf = n as f64;
    let sum: f64 = (0..n)
        .map(|i| {
            let lower = norm_cdf(z[i]).max(1e-300);
            let upper = norm_cdf(-z[n - 1 - i]).max(1e-300);
            (2 * i + 1) as f64 * (lower.ln() + upper.ln())
        })
        .sum();
    -nf - sum / nf
}

/// Binomial coefficient as `f64`.
pub fn choose(n: u64, k: u64) -> f64 {
    (0..k).fold(1.0, |acc, i| acc * (n - i) as f64 / (i + 1) as f64)
}
