//! Marsaglia polar method for standard normal deviates.
//!
//! Each accepted point `(u, v)` in the unit disc yields two independent
//! deviates. The second is kept in [`PolarGaussian`] and returned by the next
//! call, so the state belongs to one generator instance and must be discarded
//! whenever that generator's position in its sequence changes.

use rand::RngCore;

use crate::uniform::unit_f64;

/// Polar-method sampler with its buffered spare deviate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolarGaussian {
    spare: Option<f64>,
}

impl PolarGaussian {
    /// A sampler with an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw one standard normal deviate, using the buffered one if present.
    pub fn sample<R: RngCore + ?Sized>(&mut self, rng: &mut R) -> f64 {
        if let Some(spare) = self.spare.take() {
            return spare;
        }
        loop {
            let u = 2.0 * unit_f64(rng) - 1.0;
            let v = 2.0 * unit_f64(rng) - 1.0;
            let s = u * u + v * v;
            if s < 1.0 && s > 0.0 {
                let m = (-2.0 * s.ln() / s).sqrt();
                self.spare = Some(v * m);
                return u * m;
            }
        }
    }

    /// Whether a spare deviate is buffered.
    pub fn has_spare(&self) -> bool {
        self.spare.is_some()
    }

    /// Drop the buffered deviate.
    pub fn clear(&mut self) {
        self.spare = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    #[test]
    fn test_spare_is_buffered_and_consumed() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
        let mut polar = PolarGaussian::new();
        assert!(!polar.has_spare());
        polar.sample(&mut rng);
        assert!(polar.has_spare());
        polar.sample(&mut rng);
        assert!(!polar.has_spare());
    }

    #[test]
    fn test_spare_draws_nothing_from_source() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
        let mut polar = PolarGaussian::new();
        polar.sample(&mut rng);
        let mut reference = rng.clone();
        polar.sample(&mut rng);
        assert_eq!(rng.next_u64(), reference.next_u64());
    }

    #[test]
    fn test_clear() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
        let mut polar = PolarGaussian::new();
        polar.sample(&mut rng);
        polar.clear();
        assert_eq!(polar, PolarGaussian::new());
    }

    #[test]
    fn test_moments() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(99);
        let mut polar = PolarGaussian::new();
        let n = 200_000;
        let draws: Vec<f64> = (0..n).map(|_| polar.sample(&mut rng)).collect();
        let mean = draws.iter().sum::<f64>() / n as f64;
        let var = draws.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / n as f64;
        assert!(mean.abs() < 0.01, "mean = {}", mean);
        assert!((var - 1.0).abs() < 0.02, "variance = {}", var);
    }
}
