//! Process-wide default generator.
//!
//! The instance is created on first use. If `VARIATE_SEED` holds a decimal
//! 64-bit value the generator is seeded from it, which makes whole-program runs
//! reproducible; otherwise it is seeded from operating-system entropy. Access
//! is serialised through a mutex, so prefer a local [`EnhancedRng`] (or one
//! obtained from [`fork_default`]) in hot loops.

use std::sync::{Mutex, OnceLock, PoisonError};

use tracing::{debug, warn};

use crate::config::{parse_seed, SEED_VAR};
use crate::enhanced::EnhancedRng;
use crate::DefaultSource;

static DEFAULT_RNG: OnceLock<Mutex<EnhancedRng<DefaultSource>>> = OnceLock::new();

fn initialise() -> Mutex<EnhancedRng<DefaultSource>> {
    let rng = match std::env::var(SEED_VAR) {
        Ok(value) => match parse_seed(&value) {
            Ok(seed) => {
                debug!(seed, "default generator seeded from {}", SEED_VAR);
                EnhancedRng::from_seed(seed)
            }
            Err(err) => {
                warn!(%err, "ignoring {}; default generator seeded from entropy", SEED_VAR);
                EnhancedRng::from_entropy()
            }
        },
        Err(_) => {
            debug!("default generator seeded from entropy");
            EnhancedRng::from_entropy()
        }
    };
    Mutex::new(rng)
}

/// Run `f` with exclusive access to the default generator.
///
/// A panic inside `f` leaves the generator in a valid state, so a poisoned
/// lock is recovered rather than propagated.
///
/// # Examples
/// ```
/// use variate_rng::global::with_default_rng;
///
/// let roll = with_default_rng(|rng| rng.next_int_in(1, 7)).unwrap();
/// assert!((1..7).contains(&roll));
/// ```
pub fn with_default_rng<F, T>(f: F) -> T
where
    F: FnOnce(&mut EnhancedRng<DefaultSource>) -> T,
{
    let lock = DEFAULT_RNG.get_or_init(initialise);
    let mut guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
    f(&mut guard)
}

/// A generator for local use, positioned where the default generator stood;
/// the default generator jumps past it.
///
/// Successive forks never overlap each other or the default stream for
/// `2^128` outputs.
pub fn fork_default() -> EnhancedRng<DefaultSource> {
    with_default_rng(|rng| rng.copy_and_jump())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rng_is_usable() {
        let x = with_default_rng(|rng| rng.next_f64());
        assert!((0.0..1.0).contains(&x));
        let sample = with_default_rng(|rng| rng.sample(10, 4)).unwrap();
        assert_eq!(sample.len(), 4);
    }

    #[test]
    fn test_forks_differ() {
        let mut a = fork_default();
        let mut b = fork_default();
        assert_ne!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn test_recovers_from_poison() {
        let result = std::thread::spawn(|| {
            with_default_rng(|_| panic!("poison the lock"));
        })
        .join();
        assert!(result.is_err());
        let x = with_default_rng(|rng| rng.next_f64());
        assert!((0.0..1.0).contains(&x));
    }
}
