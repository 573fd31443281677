//! Ziggurat sampler for the standard normal distribution.
//!
//! The density `f(x) = exp(-x²/2)` is covered by 128 horizontal strips of equal
//! area `V`: strip 0 is the base rectangle of width `V / f(R)` plus the tail
//! beyond `R`, and strips `1..128` are rectangles whose right edges `x[i]`
//! satisfy `x[i] · (f(x[i+1]) - f(x[i])) = V`. A draw picks a strip and a signed
//! uniform `u`; when `|u| < x[i+1] / x[i]` the point lies inside the next strip
//! up and `u · x[i]` is accepted with no further work, which happens about 99%
//! of the time.
//!
//! Layout after Marsaglia & Tsang (2000) with the index/uniform split from
//! Doornik (2005): both come from one 64-bit draw.

use std::sync::OnceLock;

use rand::RngCore;
use rand_distr::{Distribution, Exp1};

use crate::uniform::unit_f64;

/// Number of strips.
pub(crate) const STRIPS: usize = 128;

/// Right edge of strip 1, where the tail begins.
pub(crate) const R: f64 = 3.442_619_855_899;

/// Area of each strip.
pub(crate) const V: f64 = 9.912_563_035_262_17e-3;

/// 2^-53.
const DOUBLE_UNIT: f64 = 1.0 / (1u64 << 53) as f64;

/// Strip edges and acceptance ratios.
#[derive(Debug)]
pub(crate) struct ZigguratTable {
    /// `x[0] = V / f(R)`, `x[1] = R`, decreasing to `x[128] = 0`.
    pub(crate) x: [f64; STRIPS + 1],
    /// `x[i + 1] / x[i]`.
    pub(crate) ratio: [f64; STRIPS],
}

#[inline]
fn density(x: f64) -> f64 {
    (-0.5 * x * x).exp()
}

impl ZigguratTable {
    fn build() -> Self {
        let mut x = [0.0; STRIPS + 1];
        x[0] = V / density(R);
        x[1] = R;
        for i in 2..STRIPS {
            x[i] = (-2.0 * (V / x[i - 1] + density(x[i - 1])).ln()).sqrt();
        }
        x[STRIPS] = 0.0;

        let mut ratio = [0.0; STRIPS];
        for i in 0..STRIPS {
            ratio[i] = x[i + 1] / x[i];
        }
        ZigguratTable { x, ratio }
    }
}

/// The process-wide table, built on first use.
pub(crate) fn table() -> &'static ZigguratTable {
    static TABLE: OnceLock<ZigguratTable> = OnceLock::new();
    TABLE.get_or_init(ZigguratTable::build)
}

/// Draw one standard normal deviate.
pub fn standard_normal<G: RngCore + ?Sized>(rng: &mut G) -> f64 {
    let table = table();
    loop {
        let bits = rng.next_u64();
        let strip = (bits & 0x7f) as usize;
        let u = 2.0 * ((bits >> 11) as f64 * DOUBLE_UNIT) - 1.0;

        if u.abs() < table.ratio[strip] {
            return u * table.x[strip];
        }

        if strip == 0 {
            return tail(rng, u < 0.0);
        }

        let x = u * table.x[strip];
        let x_sq = x * x;
        let f0 = (-0.5 * (table.x[strip] * table.x[strip] - x_sq)).exp();
        let f1 = (-0.5 * (table.x[strip + 1] * table.x[strip + 1] - x_sq)).exp();
        if f1 + unit_f64(rng) * (f0 - f1) < 1.0 {
            return x;
        }
    }
}

/// Sample from the normal tail beyond `R` (Marsaglia 1964).
fn tail<G: RngCore + ?Sized>(rng: &mut G, negative: bool) -> f64 {
    loop {
        let e1: f64 = Exp1.sample(rng);
        let e2: f64 = Exp1.sample(rng);
        let x = e1 / R;
        if 2.0 * e2 > x * x {
            return if negative { -(R + x) } else { R + x };
        }
    }
}
