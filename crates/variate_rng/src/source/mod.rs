//! Uniform sources and their capabilities.
//!
//! A *source* is any [`RngCore`] producing uniformly distributed bits. Beyond
//! plain generation a source may support additional operations for creating
//! parallel streams; each is modelled as a trait so that the enhanced wrapper
//! only exposes an operation when its source really implements it:
//!
//! | Trait | Operation |
//! |-------|-----------|
//! | [`StreamableSource`] | derive a new, independently seeded source |
//! | [`SplittableSource`] | split off a child through the algorithm's own split |
//! | [`JumpableSource`] | advance by a fixed large distance |
//! | [`LeapableSource`] | advance by a much larger fixed distance |
//! | [`ArbitrarilyJumpableSource`] | advance by any distance |
//!
//! The same hierarchy is mirrored at run time by [`Capability`] and
//! [`CapabilitySet`], used when the algorithm is chosen dynamically through
//! [`AnyRng`].

pub mod any;
mod impls;

use std::fmt;

use rand::{RngCore, SeedableRng};

use crate::error::RandomError;

pub use any::{Algorithm, AnyRng};
pub use rand::rngs::StdRng;
pub use rand_chacha::{ChaCha12Rng, ChaCha20Rng, ChaCha8Rng};
pub use rand_pcg::{Pcg32, Pcg64, Pcg64Mcg};
pub use rand_xoshiro::{
    SplitMix64, Xoroshiro128PlusPlus, Xoshiro256PlusPlus, Xoshiro256StarStar, Xoshiro512PlusPlus,
};

/// A source that can produce a new source seeded from its own output.
///
/// Blanket-implemented for every seedable generator.
pub trait StreamableSource: RngCore + Sized {
    /// Create a new source seeded from this one's output.
    fn next_source(&mut self) -> Self;
}

impl<R: RngCore + SeedableRng> StreamableSource for R {
    fn next_source(&mut self) -> Self {
        match R::from_rng(&mut *self) {
            Ok(child) => child,
            Err(_) => R::seed_from_u64(self.next_u64()),
        }
    }
}

/// A source with a native split operation.
pub trait SplittableSource: StreamableSource {
    /// Split off a statistically independent child, advancing this source.
    fn split(&mut self) -> Self;
}

/// A source that can advance its state by a fixed distance in constant time.
pub trait JumpableSource: StreamableSource + Clone {
    /// Base-2 logarithm of the number of outputs skipped by [`jump`](Self::jump).
    const JUMP_LOG2: u32;

    /// Advance by `2^JUMP_LOG2` outputs.
    fn jump(&mut self);

    /// Number of outputs skipped by one jump.
    fn jump_distance() -> f64 {
        2f64.powi(Self::JUMP_LOG2 as i32)
    }
}

/// A jumpable source with a second, longer jump.
pub trait LeapableSource: JumpableSource {
    /// Base-2 logarithm of the number of outputs skipped by [`leap`](Self::leap).
    const LEAP_LOG2: u32;

    /// Advance by `2^LEAP_LOG2` outputs.
    fn leap(&mut self);

    /// Number of outputs skipped by one leap.
    fn leap_distance() -> f64 {
        2f64.powi(Self::LEAP_LOG2 as i32)
    }
}

/// A source that can advance by an arbitrary number of outputs.
pub trait ArbitrarilyJumpableSource: LeapableSource {
    /// Advance by `distance` outputs, modulo the period.
    fn jump_by(&mut self, distance: u128);

    /// Advance by `2^log_distance` outputs.
    ///
    /// Every source implementing this trait has a power-of-two period no
    /// larger than 2^128, so distances of 2^128 and beyond are whole periods
    /// and leave the state unchanged.
    fn jump_power_of_two(&mut self, log_distance: u32) {
        if let Some(distance) = 1u128.checked_shl(log_distance) {
            self.jump_by(distance);
        }
    }
}

/// Run-time view of the source capability hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Capability {
    /// Uniform generation. Every source has it.
    Basic,
    /// New sources can be seeded from the stream.
    Streamable,
    /// Native split operation.
    Splittable,
    /// Fixed-distance jump.
    Jumpable,
    /// Fixed-distance leap, longer than the jump.
    Leapable,
    /// Jump by any distance.
    ArbitrarilyJumpable,
}

impl Capability {
    /// All capabilities, from weakest to strongest.
    pub const ALL: [Capability; 6] = [
        Capability::Basic,
        Capability::Streamable,
        Capability::Splittable,
        Capability::Jumpable,
        Capability::Leapable,
        Capability::ArbitrarilyJumpable,
    ];

    /// Capability name as used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            Capability::Basic => "Basic",
            Capability::Streamable => "Streamable",
            Capability::Splittable => "Splittable",
            Capability::Jumpable => "Jumpable",
            Capability::Leapable => "Leapable",
            Capability::ArbitrarilyJumpable => "ArbitrarilyJumpable",
        }
    }

    fn bit(self) -> u8 {
        1 << self as u8
    }

    /// The capability this one directly extends, if any.
    pub fn parent(self) -> Option<Capability> {
        match self {
            Capability::Basic => None,
            Capability::Streamable => Some(Capability::Basic),
            Capability::Splittable | Capability::Jumpable => Some(Capability::Streamable),
            Capability::Leapable => Some(Capability::Jumpable),
            Capability::ArbitrarilyJumpable => Some(Capability::Leapable),
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A set of capabilities, closed under the hierarchy: adding a capability also
/// adds every capability it extends.
///
/// # Examples
/// ```
/// use variate_rng::source::{Capability, CapabilitySet};
///
/// let set = CapabilitySet::basic().with(Capability::Leapable);
/// assert!(set.contains(Capability::Jumpable));
/// assert!(set.contains(Capability::Streamable));
/// assert!(!set.contains(Capability::Splittable));
/// ```
///
/// Serialised as its bit pattern. Deserialisation goes through `TryFrom<u8>`,
/// so decoded sets are closed as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u8", into = "u8")
)]
pub struct CapabilitySet(u8);

impl CapabilitySet {
    /// The set every source has: just [`Capability::Basic`].
    pub const fn basic() -> Self {
        CapabilitySet(1)
    }

    /// This set extended by `capability` and everything it implies.
    pub fn with(self, capability: Capability) -> Self {
        let mut bits = self.0;
        let mut current = Some(capability);
        while let Some(cap) = current {
            bits |= cap.bit();
            current = cap.parent();
        }
        CapabilitySet(bits)
    }

    /// Whether `capability` is in the set.
    pub fn contains(self, capability: Capability) -> bool {
        self.0 & capability.bit() != 0
    }

    /// Whether every capability of `other` is in this set.
    pub fn contains_all(self, other: CapabilitySet) -> bool {
        self.0 & other.0 == other.0
    }

    /// The weakest capability of `required` missing from this set.
    pub fn first_missing(self, required: CapabilitySet) -> Option<Capability> {
        required.iter().find(|&cap| !self.contains(cap))
    }

    /// Capabilities in the set, weakest first.
    pub fn iter(self) -> impl Iterator<Item = Capability> {
        Capability::ALL.into_iter().filter(move |&cap| self.contains(cap))
    }
}

impl Default for CapabilitySet {
    fn default() -> Self {
        CapabilitySet::basic()
    }
}

impl From<Capability> for CapabilitySet {
    fn from(capability: Capability) -> Self {
        CapabilitySet::basic().with(capability)
    }
}

impl From<CapabilitySet> for u8 {
    fn from(set: CapabilitySet) -> Self {
        set.0
    }
}

impl TryFrom<u8> for CapabilitySet {
    type Error = RandomError;

    /// Decode a bit pattern, one bit per [`Capability`] in [`Capability::ALL`]
    /// order. The result is closed under the hierarchy and always contains
    /// [`Capability::Basic`].
    ///
    /// # Errors
    /// `RandomError::InvalidParameter` if a bit above the strongest capability
    /// is set.
    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        let known = Capability::ALL.iter().fold(0, |acc, cap| acc | cap.bit());
        if bits & !known != 0 {
            return Err(RandomError::invalid_parameter(
                "capabilities",
                format!("unknown capability bits {:#010b}", bits & !known),
            ));
        }
        Ok(Capability::ALL
            .into_iter()
            .filter(|cap| bits & cap.bit() != 0)
            .collect())
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        iter.into_iter().fold(CapabilitySet::basic(), CapabilitySet::with)
    }
}

impl fmt::Display for CapabilitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(Capability::name).collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}
