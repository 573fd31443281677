//! Binomial variates.
//!
//! Two exact algorithms are used depending on the mean of the smaller tail,
//! `n·min(p, 1-p)`:
//!
//! - below 10, inverse transform by sequential search starting at `P(0) = qⁿ`;
//! - otherwise BTPE (Kachitvichyanukul & Schmeiser, 1988), a rejection scheme
//!   over a triangle, two parallelograms and two exponential tails with a
//!   squeeze and a Stirling-corrected final acceptance test.
//!
//! All constants depending only on `(n, p)` are computed once in
//! [`Binomial::new`], so a caller repeatedly drawing with the same parameters
//! should keep the distribution object around.

use rand::{Rng, RngCore};
use rand_distr::Distribution;
use variate_core::math::pow_int;

use crate::error::RandomError;
use crate::uniform::unit_f64;

/// Mean of the smaller tail below which inversion is used.
const INVERSION_THRESHOLD: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Method {
    /// `p <= 0`, `p >= 1` or `n == 0`.
    Constant(u64),
    Inversion {
        /// `P(0)` for the smaller tail probability.
        pmf0: f64,
        /// `(n + 1)·s`.
        a: f64,
        /// `r / q`.
        s: f64,
    },
    Btpe(Btpe),
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Btpe {
    m: f64,
    nrq: f64,
    x_m: f64,
    x_l: f64,
    x_r: f64,
    c: f64,
    lambda_l: f64,
    lambda_r: f64,
    p1: f64,
    p2: f64,
    p3: f64,
    p4: f64,
}

/// Binomial distribution `B(n, p)`.
///
/// # Examples
/// ```
/// use rand::SeedableRng;
/// use rand_distr::Distribution;
/// use rand_xoshiro::Xoshiro256PlusPlus;
/// use variate_rng::variates::Binomial;
///
/// let dist = Binomial::new(20, 0.25).unwrap();
/// let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
/// let k = dist.sample(&mut rng);
/// assert!(k <= 20);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Binomial {
    n: u64,
    p: f64,
    /// Smaller of `p` and `1 - p`.
    r: f64,
    q: f64,
    method: Method,
}

impl Binomial {
    /// Create a binomial distribution with `n` trials of success probability `p`.
    ///
    /// Probabilities at or below zero always give 0, at or above one always `n`.
    ///
    /// # Errors
    /// `RandomError::InvalidParameter` if `p` is NaN.
    pub fn new(n: u64, p: f64) -> Result<Self, RandomError> {
        if p.is_nan() {
            return Err(RandomError::invalid_parameter("p", "probability is NaN"));
        }
        let r = p.min(1.0 - p);
        let q = 1.0 - r;

        let method = if n == 0 || p <= 0.0 {
            Method::Constant(0)
        } else if p >= 1.0 {
            Method::Constant(n)
        } else if n as f64 * r < INVERSION_THRESHOLD {
            let s = r / q;
            let pmf0 = match i64::try_from(n) {
                Ok(exponent) => pow_int(q, exponent),
                Err(_) => (n as f64 * q.ln()).exp(),
            };
            Method::Inversion {
                pmf0,
                a: (n as f64 + 1.0) * s,
                s,
            }
        } else {
            Method::Btpe(Btpe::new(n as f64, r, q))
        };

        Ok(Self { n, p, r, q, method })
    }

    /// Number of trials.
    pub fn n(&self) -> u64 {
        self.n
    }

    /// Success probability.
    pub fn p(&self) -> f64 {
        self.p
    }

    /// Whether this distribution was built for exactly `(n, p)`.
    pub fn matches(&self, n: u64, p: f64) -> bool {
        self.n == n && self.p.to_bits() == p.to_bits()
    }

    /// Whether draws go through BTPE rather than inversion.
    pub fn uses_btpe(&self) -> bool {
        matches!(self.method, Method::Btpe(_))
    }

    /// Draw one variate from `rng`.
    pub fn draw<R: RngCore + ?Sized>(&self, rng: &mut R) -> u64 {
        let y = match self.method {
            Method::Constant(value) => return value,
            Method::Inversion { pmf0, a, s } => inversion(rng, self.n, pmf0, a, s),
            Method::Btpe(ref btpe) => btpe.sample(rng, self.n, self.r, self.q),
        };
        let y = y.min(self.n);
        if self.p > 0.5 {
            self.n - y
        } else {
            y
        }
    }
}

impl Distribution<u64> for Binomial {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u64 {
        self.draw(rng)
    }
}

fn inversion<R: RngCore + ?Sized>(rng: &mut R, n: u64, pmf0: f64, a: f64, s: f64) -> u64 {
    'restart: loop {
        let mut u = unit_f64(rng);
        let mut pmf = pmf0;
        let mut y = 0u64;
        while u > pmf {
            u -= pmf;
            y += 1;
            // rounding left mass beyond n; start over
            if y > n {
                continue 'restart;
            }
            pmf *= a / y as f64 - s;
        }
        return y;
    }
}

impl Btpe {
    fn new(n: f64, r: f64, q: f64) -> Self {
        let nr = n * r;
        let f_m = nr + r;
        let m = f_m.floor();
        let nrq = nr * q;
        let p1 = (2.195 * nrq.sqrt() - 4.6 * q).floor() + 0.5;
        let x_m = m + 0.5;
        let x_l = x_m - p1;
        let x_r = x_m + p1;
        let c = 0.134 + 20.5 / (15.3 + m);

        let a = (f_m - x_l) / (f_m - x_l * r);
        let lambda_l = a * (1.0 + 0.5 * a);
        let a = (x_r - f_m) / (x_r * q);
        let lambda_r = a * (1.0 + 0.5 * a);

        let p2 = p1 * (1.0 + 2.0 * c);
        let p3 = p2 + c / lambda_l;
        let p4 = p3 + c / lambda_r;

        Self {
            m,
            nrq,
            x_m,
            x_l,
            x_r,
            c,
            lambda_l,
            lambda_r,
            p1,
            p2,
            p3,
            p4,
        }
    }

    fn sample<R: RngCore + ?Sized>(&self, rng: &mut R, n: u64, r: f64, q: f64) -> u64 {
        let n_f = n as f64;
        loop {
            let u = unit_f64(rng) * self.p4;
            let mut v = unit_f64(rng);

            // triangular region: accept immediately
            if u <= self.p1 {
                return (self.x_m - self.p1 * v + u).floor() as u64;
            }

            let y: f64;
            if u <= self.p2 {
                // parallelograms
                let x = self.x_l + (u - self.p1) / self.c;
                v = v * self.c + 1.0 - (self.m - x + 0.5).abs() / self.p1;
                if v > 1.0 {
                    continue;
                }
                y = x.floor();
            } else if u <= self.p3 {
                // left exponential tail
                y = (self.x_l + v.ln() / self.lambda_l).floor();
                if !(y >= 0.0) {
                    continue;
                }
                v *= (u - self.p2) * self.lambda_l;
            } else {
                // right exponential tail
                y = (self.x_r - v.ln() / self.lambda_r).floor();
                if !(y <= n_f) {
                    continue;
                }
                v *= (u - self.p3) * self.lambda_r;
            }

            let k = (y - self.m).abs();
            if k <= 20.0 || k >= 0.5 * self.nrq - 1.0 {
                // explicit evaluation of f(y) / f(m)
                let s = r / q;
                let a = s * (n_f + 1.0);
                let mut f = 1.0;
                if self.m < y {
                    let mut i = self.m + 1.0;
                    while i <= y {
                        f *= a / i - s;
                        i += 1.0;
                    }
                } else if self.m > y {
                    let mut i = y + 1.0;
                    while i <= self.m {
                        f /= a / i - s;
                        i += 1.0;
                    }
                }
                if v <= f {
                    return y as u64;
                }
                continue;
            }

            // squeeze using upper and lower bounds on log f(y)
            let rho =
                (k / self.nrq) * ((k * (k / 3.0 + 0.625) + 1.0 / 6.0) / self.nrq + 0.5);
            let t = -k * k / (2.0 * self.nrq);
            let log_v = v.ln();
            if log_v < t - rho {
                return y as u64;
            }
            if log_v > t + rho {
                continue;
            }

            // final test against log f(y) / f(m) with Stirling's correction
            let x1 = y + 1.0;
            let f1 = self.m + 1.0;
            let z = n_f + 1.0 - self.m;
            let w = n_f - y + 1.0;
            let bound = self.x_m * (f1 / x1).ln()
                + (n_f - self.m + 0.5) * (z / w).ln()
                + (y - self.m) * (w * r / (x1 * q)).ln()
                + stirling_correction(f1)
                + stirling_correction(z)
                + stirling_correction(x1)
                + stirling_correction(w);
            if log_v <= bound {
                return y as u64;
            }
        }
    }
}

/// Stirling series remainder for `ln(x!)`, accurate for `x >= 1`.
#[inline]
fn stirling_correction(x: f64) -> f64 {
    let x2 = x * x;
    (13860.0 - (462.0 - (132.0 - (99.0 - 140.0 / x2) / x2) / x2) / x2) / x / 166320.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    #[test]
    fn test_nan_rejected() {
        assert!(matches!(
            Binomial::new(10, f64::NAN),
            Err(RandomError::InvalidParameter { name: "p", .. })
        ));
    }

    #[test]
    fn test_degenerate_parameters() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
        assert_eq!(Binomial::new(10, 0.0).unwrap().draw(&mut rng), 0);
        assert_eq!(Binomial::new(10, -0.5).unwrap().draw(&mut rng), 0);
        assert_eq!(Binomial::new(10, 1.0).unwrap().draw(&mut rng), 10);
        assert_eq!(Binomial::new(10, 2.0).unwrap().draw(&mut rng), 10);
        assert_eq!(Binomial::new(0, 0.5).unwrap().draw(&mut rng), 0);
    }

    #[test]
    fn test_method_choice() {
        assert!(!Binomial::new(10, 0.5).unwrap().uses_btpe());
        assert!(!Binomial::new(1000, 0.001).unwrap().uses_btpe());
        assert!(Binomial::new(100, 0.5).unwrap().uses_btpe());
        assert!(Binomial::new(100, 0.9).unwrap().uses_btpe());
    }

    #[test]
    fn test_matches() {
        let b = Binomial::new(50, 0.3).unwrap();
        assert!(b.matches(50, 0.3));
        assert!(!b.matches(51, 0.3));
        assert!(!b.matches(50, 0.31));
    }

    #[test]
    fn test_stirling_correction() {
        // ln(x!) - Stirling's approximation at x = 10
        let x: f64 = 10.0;
        let exact = variate_core::math::ln_gamma(x + 1.0);
        let approx = (x + 0.5) * x.ln() - x + 0.5 * (2.0 * std::f64::consts::PI).ln();
        assert!((stirling_correction(x) - (exact - approx)).abs() < 1e-9);
    }

    fn mean_and_variance(dist: &Binomial, draws: usize, seed: u64) -> (f64, f64) {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        let values: Vec<f64> = (0..draws).map(|_| dist.draw(&mut rng) as f64).collect();
        let mean = values.iter().sum::<f64>() / draws as f64;
        let var = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / draws as f64;
        (mean, var)
    }

    #[test]
    fn test_inversion_moments() {
        let dist = Binomial::new(40, 0.1).unwrap();
        let (mean, var) = mean_and_variance(&dist, 100_000, 5);
        assert!((mean - 4.0).abs() < 0.03, "mean = {}", mean);
        assert!((var - 3.6).abs() < 0.1, "variance = {}", var);
    }

    #[test]
    fn test_btpe_moments() {
        let dist = Binomial::new(1000, 0.3).unwrap();
        let (mean, var) = mean_and_variance(&dist, 100_000, 6);
        assert!((mean - 300.0).abs() < 0.25, "mean = {}", mean);
        assert!((var - 210.0).abs() < 5.0, "variance = {}", var);
    }

    #[test]
    fn test_mirrored_moments() {
        let dist = Binomial::new(1000, 0.8).unwrap();
        let (mean, _) = mean_and_variance(&dist, 50_000, 7);
        assert!((mean - 800.0).abs() < 0.3, "mean = {}", mean);

        let dist = Binomial::new(30, 0.9).unwrap();
        let (mean, _) = mean_and_variance(&dist, 50_000, 8);
        assert!((mean - 27.0).abs() < 0.05, "mean = {}", mean);
    }
}
