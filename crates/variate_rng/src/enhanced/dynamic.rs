//! Run-time checked stream operations for generators over [`AnyRng`].
//!
//! When the algorithm is picked by name or configuration, the compiler can no
//! longer rule out unsupported operations. The `try_` methods here check the
//! source's [`CapabilitySet`] first and return
//! [`RandomError::UnsupportedCapability`] without touching any state when the
//! capability is missing.
//!
//! # Examples
//! ```
//! use variate_rng::{EnhancedRng, RandomError};
//!
//! let mut pcg = EnhancedRng::from_name_seeded("pcg64", 1).unwrap();
//! let child = pcg.try_split().unwrap();
//! assert_eq!(child.algorithm(), pcg.algorithm());
//!
//! let mut plain = EnhancedRng::from_name_seeded("StdRng", 1).unwrap();
//! assert!(matches!(
//!     plain.try_jump(),
//!     Err(RandomError::UnsupportedCapability { .. })
//! ));
//! ```

use tracing::debug;

use crate::error::RandomError;
use crate::source::{Algorithm, AnyRng, Capability, CapabilitySet};

use super::EnhancedRng;

impl EnhancedRng<AnyRng> {
    /// A generator for the named algorithm, seeded from entropy.
    ///
    /// Names are matched case-insensitively, ignoring `-` and `_`.
    ///
    /// # Errors
    /// `RandomError::UnknownAlgorithm` if the name is not recognised.
    pub fn from_name(name: &str) -> Result<Self, RandomError> {
        let algorithm: Algorithm = name.parse()?;
        Ok(Self::from_algorithm(algorithm, None))
    }

    /// A generator for the named algorithm with a fixed seed.
    ///
    /// # Errors
    /// `RandomError::UnknownAlgorithm` if the name is not recognised.
    pub fn from_name_seeded(name: &str, seed: u64) -> Result<Self, RandomError> {
        let algorithm: Algorithm = name.parse()?;
        Ok(Self::from_algorithm(algorithm, Some(seed)))
    }

    /// A generator for `algorithm`, seeded from `seed` or from entropy.
    pub fn from_algorithm(algorithm: Algorithm, seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => {
                debug!(%algorithm, seed, "creating seeded generator");
                let mut rng = Self::new(algorithm.seeded(seed));
                rng.seed = Some(seed);
                rng
            }
            None => {
                debug!(%algorithm, "creating generator from entropy");
                Self::new(algorithm.from_entropy())
            }
        }
    }

    /// The algorithm behind the source.
    pub fn algorithm(&self) -> Algorithm {
        self.source.algorithm()
    }

    /// Capabilities of the source.
    pub fn capabilities(&self) -> CapabilitySet {
        self.source.capabilities()
    }

    /// Whether the source has `capability`.
    pub fn supports(&self, capability: Capability) -> bool {
        self.capabilities().contains(capability)
    }

    /// Fail unless the source has every capability in `required`.
    ///
    /// # Errors
    /// `RandomError::UnsupportedCapability` naming the weakest missing one.
    pub fn require(&self, required: CapabilitySet) -> Result<(), RandomError> {
        self.source.require(required)
    }

    /// Split off an independent generator.
    ///
    /// # Errors
    /// `RandomError::UnsupportedCapability` if the algorithm has no split.
    pub fn try_split(&mut self) -> Result<Self, RandomError> {
        let source = self.source.try_split()?;
        Ok(self.derive(source))
    }

    /// Jump ahead in place.
    ///
    /// # Errors
    /// `RandomError::UnsupportedCapability` if the algorithm cannot jump.
    pub fn try_jump(&mut self) -> Result<(), RandomError> {
        self.source.try_jump()?;
        self.clear_caches();
        Ok(())
    }

    /// Return a copy at the current position, then jump.
    ///
    /// # Errors
    /// `RandomError::UnsupportedCapability` if the algorithm cannot jump.
    pub fn try_copy_and_jump(&mut self) -> Result<Self, RandomError> {
        self.require(CapabilitySet::from(Capability::Jumpable))?;
        let copy = self.derive(self.source.clone());
        self.try_jump()?;
        Ok(copy)
    }

    /// Leap ahead in place.
    ///
    /// # Errors
    /// `RandomError::UnsupportedCapability` if the algorithm cannot leap.
    pub fn try_leap(&mut self) -> Result<(), RandomError> {
        self.source.try_leap()?;
        self.clear_caches();
        Ok(())
    }

    /// Return a copy at the current position, then leap.
    ///
    /// # Errors
    /// `RandomError::UnsupportedCapability` if the algorithm cannot leap.
    pub fn try_copy_and_leap(&mut self) -> Result<Self, RandomError> {
        self.require(CapabilitySet::from(Capability::Leapable))?;
        let copy = self.derive(self.source.clone());
        self.try_leap()?;
        Ok(copy)
    }

    /// Advance by `distance` outputs.
    ///
    /// # Errors
    /// `RandomError::UnsupportedCapability` if the algorithm cannot jump by
    /// arbitrary distances.
    pub fn try_jump_by(&mut self, distance: u128) -> Result<(), RandomError> {
        self.source.try_jump_by(distance)?;
        self.clear_caches();
        Ok(())
    }

    /// Advance by `2^log_distance` outputs.
    ///
    /// # Errors
    /// `RandomError::UnsupportedCapability` if the algorithm cannot jump by
    /// arbitrary distances.
    pub fn try_jump_power_of_two(&mut self, log_distance: u32) -> Result<(), RandomError> {
        self.source.try_jump_power_of_two(log_distance)?;
        self.clear_caches();
        Ok(())
    }
}
