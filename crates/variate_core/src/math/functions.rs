//! Special functions.
//!
//! This module provides:
//! - `ln_gamma`: natural logarithm of |Γ(x)| (Lanczos approximation)
//! - `pow_int`: integer power by repeated squaring
//! - `betai`: regularised incomplete beta function I_x(a, b)
//! - `erfc`, `norm_cdf`, `norm_pdf`: error function and standard normal helpers
//!
//! The normal helpers are generic over `T: Float`; the remaining functions work
//! on `f64` directly.

use num_traits::Float;
use tracing::warn;

use crate::error::MathError;

/// ln(sqrt(2π))
const LN_SQRT_2PI: f64 = 0.918_938_533_204_672_8;

/// 1 / sqrt(2π)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Lanczos parameter g.
const LANCZOS_G: f64 = 7.0;

/// Lanczos series coefficients for g = 7, n = 9.
const LANCZOS_COEFFICIENTS: [f64; 9] = [
    0.999_999_999_999_809_9,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_1,
    -176.615_029_162_140_6,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_572e-6,
    1.505_632_735_149_311_6e-7,
];

/// Iteration budget for the incomplete beta continued fraction.
const BETACF_MAX_ITERATIONS: usize = 300;

/// Relative convergence threshold for the continued fraction.
const BETACF_EPSILON: f64 = 1e-14;

/// Guard against division by zero in the modified Lentz recurrence.
const BETACF_TINY: f64 = 1e-300;

/// Natural logarithm of the absolute value of the gamma function.
///
/// Uses the Lanczos approximation for `x >= 0.5` and the reflection formula
/// `Γ(x)Γ(1-x) = π / sin(πx)` below. Relative accuracy is close to machine
/// precision over the positive axis.
///
/// # Returns
/// - `+∞` at the poles `x = 0, -1, -2, ...`
/// - `NaN` for `NaN` input
///
/// # Examples
/// ```
/// use variate_core::math::functions::ln_gamma;
///
/// // Γ(5) = 4! = 24
/// assert!((ln_gamma(5.0) - 24.0_f64.ln()).abs() < 1e-12);
/// // Γ(1/2) = sqrt(π)
/// assert!((ln_gamma(0.5) - std::f64::consts::PI.sqrt().ln()).abs() < 1e-12);
/// ```
pub fn ln_gamma(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    if x <= 0.0 && x == x.floor() {
        return f64::INFINITY;
    }
    if x < 0.5 {
        let sin_pi_x = (std::f64::consts::PI * x).sin().abs();
        return std::f64::consts::PI.ln() - sin_pi_x.ln() - ln_gamma(1.0 - x);
    }

    let z = x - 1.0;
    let mut series = LANCZOS_COEFFICIENTS[0];
    for (i, &c) in LANCZOS_COEFFICIENTS.iter().enumerate().skip(1) {
        series += c / (z + i as f64);
    }
    let t = z + LANCZOS_G + 0.5;
    LN_SQRT_2PI + (z + 0.5) * t.ln() - t + series.ln()
}

/// Raise `base` to an integer power by repeated squaring.
///
/// Negative exponents return the reciprocal of the positive power.
///
/// # Examples
/// ```
/// use variate_core::math::functions::pow_int;
///
/// assert_eq!(pow_int(2.0, 10), 1024.0);
/// assert_eq!(pow_int(2.0, -2), 0.25);
/// assert_eq!(pow_int(7.5, 0), 1.0);
/// ```
pub fn pow_int(base: f64, exponent: i64) -> f64 {
    let mut result = 1.0;
    let mut square = base;
    let mut remaining = exponent.unsigned_abs();
    while remaining > 0 {
        if remaining & 1 == 1 {
            result *= square;
        }
        remaining >>= 1;
        if remaining > 0 {
            square *= square;
        }
    }
    if exponent < 0 {
        1.0 / result
    } else {
        result
    }
}

/// Regularised incomplete beta function I_x(a, b).
///
/// Evaluated with the continued-fraction expansion, using the symmetry
/// `I_x(a, b) = 1 - I_{1-x}(b, a)` so the fraction is always evaluated on the
/// side where it converges quickly.
///
/// # Arguments
/// * `a` - First shape parameter (`a > 0`)
/// * `b` - Second shape parameter (`b > 0`)
/// * `x` - Evaluation point in `[0, 1]`
///
/// # Errors
/// - `MathError::DomainError` if `a <= 0`, `b <= 0` or `x` lies outside `[0, 1]`
/// - `MathError::NotConverged` if the continued fraction does not settle
///
/// # Examples
/// ```
/// use variate_core::math::functions::betai;
///
/// // I_x(1, 1) = x
/// assert!((betai(1.0, 1.0, 0.3).unwrap() - 0.3).abs() < 1e-12);
/// assert!(betai(2.0, 3.0, 1.5).is_err());
/// ```
pub fn betai(a: f64, b: f64, x: f64) -> Result<f64, MathError> {
    if !(a > 0.0 && b > 0.0) {
        return Err(MathError::DomainError(format!(
            "beta shape parameters must be positive, got a = {}, b = {}",
            a, b
        )));
    }
    if !(0.0..=1.0).contains(&x) {
        return Err(MathError::DomainError(format!(
            "incomplete beta argument must lie in [0, 1], got {}",
            x
        )));
    }
    if x == 0.0 {
        return Ok(0.0);
    }
    if x == 1.0 {
        return Ok(1.0);
    }

    let ln_front =
        ln_gamma(a + b) - ln_gamma(a) - ln_gamma(b) + a * x.ln() + b * (1.0 - x).ln();
    let front = ln_front.exp();

    if x < (a + 1.0) / (a + b + 2.0) {
        Ok(front * betacf(a, b, x)? / a)
    } else {
        Ok(1.0 - front * betacf(b, a, 1.0 - x)? / b)
    }
}

/// Continued fraction for the incomplete beta function (modified Lentz).
fn betacf(a: f64, b: f64, x: f64) -> Result<f64, MathError> {
    let qab = a + b;
    let qap = a + 1.0;
    let qam = a - 1.0;

    let clamp_tiny = |v: f64| if v.abs() < BETACF_TINY { BETACF_TINY } else { v };

    let mut c = 1.0;
    let mut d = 1.0 / clamp_tiny(1.0 - qab * x / qap);
    let mut h = d;

    for m in 1..=BETACF_MAX_ITERATIONS {
        let m = m as f64;
        let m2 = 2.0 * m;

        // Even step
        let aa = m * (b - m) * x / ((qam + m2) * (a + m2));
        d = 1.0 / clamp_tiny(1.0 + aa * d);
        c = clamp_tiny(1.0 + aa / c);
        h *= d * c;

        // Odd step
        let aa = -(a + m) * (qab + m) * x / ((a + m2) * (qap + m2));
        d = 1.0 / clamp_tiny(1.0 + aa * d);
        c = clamp_tiny(1.0 + aa / c);
        let delta = d * c;
        h *= delta;

        if (delta - 1.0).abs() < BETACF_EPSILON {
            return Ok(h);
        }
    }

    warn!(
        a,
        b,
        x,
        iterations = BETACF_MAX_ITERATIONS,
        "incomplete beta continued fraction did not converge"
    );
    Err(MathError::NotConverged {
        iterations: BETACF_MAX_ITERATIONS,
    })
}

/// Complementary error function.
///
/// Chebyshev-fitted rational approximation with fractional error below 1.2e-7
/// everywhere, including deep in the tails where `1 - erf(x)` would lose all
/// relative precision.
///
/// # Mathematical Definition
/// erfc(x) = 1 - erf(x) = (2/√π) ∫_x^∞ e^(-t²) dt
///
/// # Examples
/// ```
/// use variate_core::math::functions::erfc;
///
/// assert!((erfc(0.0_f64) - 1.0).abs() < 1e-7);
/// assert!((erfc(1.0_f64) - 0.157_299_207_050_285_1).abs() < 1e-7);
/// ```
pub fn erfc<T: Float>(x: T) -> T {
    let c = |v: f64| T::from(v).unwrap_or_else(T::nan);
    let one = T::one();

    let z = x.abs();
    let t = one / (one + c(0.5) * z);

    let poly = c(-1.265_512_23)
        + t * (c(1.000_023_68)
            + t * (c(0.374_091_96)
                + t * (c(0.096_784_18)
                    + t * (c(-0.186_288_06)
                        + t * (c(0.278_868_07)
                            + t * (c(-1.135_203_98)
                                + t * (c(1.488_515_87)
                                    + t * (c(-0.822_152_23) + t * c(0.170_872_77)))))))));
    let ans = t * (-z * z + poly).exp();

    if x >= T::zero() {
        ans
    } else {
        c(2.0) - ans
    }
}

/// Standard normal cumulative distribution function.
///
/// Computes P(X <= x) where X ~ N(0, 1).
///
/// # Mathematical Definition
/// Φ(x) = (1/2) * erfc(-x / sqrt(2))
///
/// # Examples
/// ```
/// use variate_core::math::functions::norm_cdf;
///
/// assert!((norm_cdf(0.0_f64) - 0.5).abs() < 1e-7);
/// assert!(norm_cdf(-3.0_f64) < 0.01);
/// assert!(norm_cdf(3.0_f64) > 0.99);
/// ```
#[inline]
pub fn norm_cdf<T: Float>(x: T) -> T {
    let sqrt_2 = T::from(std::f64::consts::SQRT_2).unwrap_or_else(T::nan);
    let half = T::from(0.5).unwrap_or_else(T::nan);
    half * erfc(-x / sqrt_2)
}

/// Standard normal probability density function.
///
/// # Mathematical Definition
/// φ(x) = (1 / sqrt(2π)) * exp(-x² / 2)
///
/// # Examples
/// ```
/// use variate_core::math::functions::norm_pdf;
///
/// assert!((norm_pdf(0.0_f64) - 0.398_942_280_4).abs() < 1e-9);
/// ```
#[inline]
pub fn norm_pdf<T: Float>(x: T) -> T {
    let frac_1_sqrt_2pi = T::from(FRAC_1_SQRT_2PI).unwrap_or_else(T::nan);
    let half = T::from(0.5).unwrap_or_else(T::nan);
    frac_1_sqrt_2pi * (-half * x * x).exp()
}
