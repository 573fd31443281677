//! Descriptive statistics over numeric slices.
//!
//! All functions accept any element type convertible to `f64` (`f64`, `f32`,
//! `i32`, `u32`, ...) and accumulate in `f64`. Variances use the corrected
//! two-pass algorithm; covariance uses the shifted-data algorithm, both of which
//! stay accurate when the data sit far from zero.
//!
//! # Examples
//! ```
//! use variate_core::stats;
//!
//! let x = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
//! assert_eq!(stats::mean(&x).unwrap(), 5.0);
//! assert_eq!(stats::variance_population(&x).unwrap(), 4.0);
//! ```

use crate::error::MathError;
use crate::math::functions::betai;

fn to_f64<T: Copy + Into<f64>>(data: &[T]) -> impl Iterator<Item = f64> + '_ {
    data.iter().map(|&v| v.into())
}

fn ensure_non_empty<T>(data: &[T]) -> Result<(), MathError> {
    if data.is_empty() {
        Err(MathError::EmptyInput)
    } else {
        Ok(())
    }
}

/// Arithmetic mean.
///
/// # Errors
/// `MathError::EmptyInput` if `data` is empty.
pub fn mean<T: Copy + Into<f64>>(data: &[T]) -> Result<f64, MathError> {
    ensure_non_empty(data)?;
    Ok(to_f64(data).sum::<f64>() / data.len() as f64)
}

/// Sum of squared deviations from the mean, with the rounding correction of
/// the two-pass algorithm applied.
fn sum_squared_deviations<T: Copy + Into<f64>>(data: &[T]) -> Result<f64, MathError> {
    let m = mean(data)?;
    let (squares, deviations) = to_f64(data).fold((0.0, 0.0), |(sq, dev), v| {
        let d = v - m;
        (sq + d * d, dev + d)
    });
    Ok(squares - deviations * deviations / data.len() as f64)
}

/// Population variance (divisor `n`).
///
/// Returns `0.0` for a single observation.
///
/// # Errors
/// `MathError::EmptyInput` if `data` is empty.
pub fn variance_population<T: Copy + Into<f64>>(data: &[T]) -> Result<f64, MathError> {
    if data.len() < 2 {
        ensure_non_empty(data)?;
        return Ok(0.0);
    }
    Ok(sum_squared_deviations(data)? / data.len() as f64)
}

/// Sample variance (divisor `n - 1`).
///
/// Returns `0.0` for a single observation.
///
/// # Errors
/// `MathError::EmptyInput` if `data` is empty.
pub fn variance_sample<T: Copy + Into<f64>>(data: &[T]) -> Result<f64, MathError> {
    if data.len() < 2 {
        ensure_non_empty(data)?;
        return Ok(0.0);
    }
    Ok(sum_squared_deviations(data)? / (data.len() - 1) as f64)
}

/// Sample standard deviation, `sqrt(variance_sample)`.
///
/// # Errors
/// `MathError::EmptyInput` if `data` is empty.
pub fn std_dev<T: Copy + Into<f64>>(data: &[T]) -> Result<f64, MathError> {
    variance_sample(data).map(f64::sqrt)
}

/// Population covariance of two equally long series.
///
/// Uses the shifted-data algorithm with the first observation of each series
/// as the shift. Returns `0.0` for series of length 1.
///
/// # Errors
/// - `MathError::EmptyInput` if either series is empty
/// - `MathError::DimensionMismatch` if the lengths differ
pub fn covariance<T: Copy + Into<f64>>(x: &[T], y: &[T]) -> Result<f64, MathError> {
    ensure_non_empty(x)?;
    ensure_non_empty(y)?;
    if x.len() != y.len() {
        return Err(MathError::length_mismatch(x.len(), y.len()));
    }
    if x.len() < 2 {
        return Ok(0.0);
    }

    let kx: f64 = x[0].into();
    let ky: f64 = y[0].into();
    let (mut sx, mut sy, mut sxy) = (0.0, 0.0, 0.0);
    for (a, b) in to_f64(x).zip(to_f64(y)) {
        let dx = a - kx;
        let dy = b - ky;
        sx += dx;
        sy += dy;
        sxy += dx * dy;
    }
    let n = x.len() as f64;
    Ok((sxy - sx * sy / n) / n)
}

/// Pearson correlation coefficient of two equally long series.
///
/// Returns `0.0` when either series has zero variance or the covariance is
/// zero. Otherwise the magnitude is evaluated in log space to avoid overflow in
/// the product of variances.
///
/// # Errors
/// Same conditions as [`covariance`].
pub fn correlation<T: Copy + Into<f64>>(x: &[T], y: &[T]) -> Result<f64, MathError> {
    let cov = covariance(x, y)?;
    let var_x = variance_population(x)?;
    let var_y = variance_population(y)?;
    if cov == 0.0 || var_x == 0.0 || var_y == 0.0 {
        return Ok(0.0);
    }
    let magnitude = (cov.abs().ln() - 0.5 * var_x.ln() - 0.5 * var_y.ln()).exp();
    Ok(magnitude.copysign(cov).clamp(-1.0, 1.0))
}

/// Matrix of pairwise correlations between several series.
///
/// The result is symmetric with ones on the diagonal (zero for a constant
/// series, following [`correlation`]).
///
/// # Errors
/// - `MathError::EmptyInput` if there are no series or any series is empty
/// - `MathError::DimensionMismatch` if the series lengths differ
pub fn correlation_matrix<T, S>(series: &[S]) -> Result<Vec<Vec<f64>>, MathError>
where
    T: Copy + Into<f64>,
    S: AsRef<[T]>,
{
    ensure_non_empty(series)?;
    let m = series.len();
    let mut result = vec![vec![0.0; m]; m];
    for i in 0..m {
        let own = variance_population(series[i].as_ref())?;
        result[i][i] = if own == 0.0 { 0.0 } else { 1.0 };
        for j in (i + 1)..m {
            let r = correlation(series[i].as_ref(), series[j].as_ref())?;
            result[i][j] = r;
            result[j][i] = r;
        }
    }
    Ok(result)
}

/// Result of Welch's unequal-variances t-test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WelchTTest {
    /// The t statistic, `(mean_a - mean_b) / sqrt(var_a/n_a + var_b/n_b)`.
    pub t: f64,
    /// Welch–Satterthwaite degrees of freedom, rounded down.
    pub degrees_of_freedom: f64,
}

impl WelchTTest {
    /// Two-tailed p-value of the statistic under Student's t distribution.
    ///
    /// # Errors
    /// Propagates [`betai`] failures.
    pub fn p_value(&self) -> Result<f64, MathError> {
        let df = self.degrees_of_freedom;
        betai(0.5 * df, 0.5, df / (df + self.t * self.t))
    }
}

fn welch_terms<T: Copy + Into<f64>>(a: &[T], b: &[T]) -> Result<(f64, f64, f64), MathError> {
    for sample in [a, b] {
        if sample.len() < 2 {
            return Err(MathError::DomainError(format!(
                "each sample needs at least two observations, got {}",
                sample.len()
            )));
        }
    }
    let term_a = variance_sample(a)? / a.len() as f64;
    let term_b = variance_sample(b)? / b.len() as f64;
    if term_a + term_b == 0.0 {
        return Err(MathError::DomainError(
            "both samples have zero variance".to_string(),
        ));
    }
    let t = (mean(a)? - mean(b)?) / (term_a + term_b).sqrt();
    Ok((t, term_a, term_b))
}

/// t statistic for two samples with unequal variances.
///
/// # Errors
/// `MathError::DomainError` if either sample has fewer than two observations or
/// both samples are constant.
pub fn t_test_unequal_variances<T: Copy + Into<f64>>(a: &[T], b: &[T]) -> Result<f64, MathError> {
    welch_terms(a, b).map(|(t, _, _)| t)
}

/// Welch's t-test: the t statistic together with its degrees of freedom.
///
/// # Errors
/// Same conditions as [`t_test_unequal_variances`].
///
/// # Examples
/// ```
/// use variate_core::stats::welch_t_test;
///
/// let a = [19.8, 20.4, 19.6, 17.8, 18.5, 18.9, 18.3, 18.9, 19.5, 22.0];
/// let b = [28.2, 26.6, 20.1, 23.3, 25.2, 22.1, 17.7, 27.6, 20.6, 13.7];
/// let test = welch_t_test(&a, &b).unwrap();
/// assert!(test.t < 0.0);
/// assert_eq!(test.degrees_of_freedom, 10.0);
/// ```
pub fn welch_t_test<T: Copy + Into<f64>>(a: &[T], b: &[T]) -> Result<WelchTTest, MathError> {
    let (t, term_a, term_b) = welch_terms(a, b)?;
    let denominator = term_a * term_a / (a.len() - 1) as f64
        + term_b * term_b / (b.len() - 1) as f64;
    let dof = (term_a + term_b) * (term_a + term_b) / denominator;
    Ok(WelchTTest {
        t,
        degrees_of_freedom: dof.floor(),
    })
}
