//! Dynamically selected sources.
//!
//! [`Algorithm`] names every bundled generator and reports its
//! [`CapabilitySet`]. [`AnyRng`] holds one of them behind an enum, so the
//! algorithm can be picked at run time (from a string, an environment variable
//! or a configuration file). Capability operations on `AnyRng` are checked at
//! run time and fail with [`RandomError::UnsupportedCapability`] before any
//! state is touched.

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rand_chacha::{ChaCha12Rng, ChaCha20Rng, ChaCha8Rng};
use rand_pcg::{Pcg32, Pcg64, Pcg64Mcg};
use rand_xoshiro::{
    SplitMix64, Xoroshiro128PlusPlus, Xoshiro256PlusPlus, Xoshiro256StarStar, Xoshiro512PlusPlus,
};

use super::{
    ArbitrarilyJumpableSource, Capability, CapabilitySet, JumpableSource, LeapableSource,
    SplittableSource, StreamableSource,
};
use crate::error::RandomError;

macro_rules! any_rng {
    ($(
        $(#[$meta:meta])*
        $variant:ident($ty:ty) = $name:literal, [$($cap:ident),*];
    )*) => {
        /// Identifier of a bundled generator algorithm.
        ///
        /// Parsing is case-insensitive and ignores `-` and `_`, so
        /// `"xoshiro256++"` is not accepted but `"Xoshiro256PlusPlus"`,
        /// `"xoshiro256_plus_plus"` and `"XOSHIRO256PLUSPLUS"` all are.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum Algorithm {
            $(
                $(#[$meta])*
                $variant,
            )*
        }

        impl Algorithm {
            /// Every bundled algorithm.
            pub const ALL: &'static [Algorithm] = &[$(Algorithm::$variant),*];

            /// Canonical name.
            pub fn name(self) -> &'static str {
                match self {
                    $(Algorithm::$variant => $name,)*
                }
            }

            /// Capabilities of the algorithm's source.
            pub fn capabilities(self) -> CapabilitySet {
                match self {
                    $(Algorithm::$variant => {
                        CapabilitySet::basic()$(.with(Capability::$cap))*
                    })*
                }
            }

            /// A source seeded deterministically from `seed`.
            pub fn seeded(self, seed: u64) -> AnyRng {
                match self {
                    $(Algorithm::$variant => AnyRng::$variant(<$ty>::seed_from_u64(seed)),)*
                }
            }

            /// A source seeded from operating-system entropy.
            pub fn from_entropy(self) -> AnyRng {
                match self {
                    $(Algorithm::$variant => AnyRng::$variant(<$ty>::from_entropy()),)*
                }
            }
        }

        /// A source whose algorithm is chosen at run time.
        #[derive(Debug, Clone)]
        pub enum AnyRng {
            $(
                $(#[$meta])*
                $variant($ty),
            )*
        }

        impl AnyRng {
            /// The algorithm behind this source.
            pub fn algorithm(&self) -> Algorithm {
                match self {
                    $(AnyRng::$variant(_) => Algorithm::$variant,)*
                }
            }
        }

        impl RngCore for AnyRng {
            #[inline]
            fn next_u32(&mut self) -> u32 {
                match self {
                    $(AnyRng::$variant(rng) => rng.next_u32(),)*
                }
            }

            #[inline]
            fn next_u64(&mut self) -> u64 {
                match self {
                    $(AnyRng::$variant(rng) => rng.next_u64(),)*
                }
            }

            fn fill_bytes(&mut self, dest: &mut [u8]) {
                match self {
                    $(AnyRng::$variant(rng) => rng.fill_bytes(dest),)*
                }
            }

            fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
                match self {
                    $(AnyRng::$variant(rng) => rng.try_fill_bytes(dest),)*
                }
            }
        }

        impl StreamableSource for AnyRng {
            fn next_source(&mut self) -> Self {
                match self {
                    $(AnyRng::$variant(rng) => AnyRng::$variant(rng.next_source()),)*
                }
            }
        }
    };
}

any_rng! {
    /// xoshiro256++ (Blackman & Vigna).
    Xoshiro256PlusPlus(Xoshiro256PlusPlus) = "Xoshiro256PlusPlus", [Leapable];
    /// xoshiro256** (Blackman & Vigna).
    Xoshiro256StarStar(Xoshiro256StarStar) = "Xoshiro256StarStar", [Leapable];
    /// xoroshiro128++ (Blackman & Vigna).
    Xoroshiro128PlusPlus(Xoroshiro128PlusPlus) = "Xoroshiro128PlusPlus", [Leapable];
    /// xoshiro512++ (Blackman & Vigna).
    Xoshiro512PlusPlus(Xoshiro512PlusPlus) = "Xoshiro512PlusPlus", [Leapable];
    /// PCG XSL RR 128/64 with selectable stream.
    Pcg64(Pcg64) = "Pcg64", [Splittable, ArbitrarilyJumpable];
    /// PCG XSL RR 128/64 multiplicative variant.
    Pcg64Mcg(Pcg64Mcg) = "Pcg64Mcg", [Splittable, ArbitrarilyJumpable];
    /// PCG XSH RR 64/32 with selectable stream.
    Pcg32(Pcg32) = "Pcg32", [Splittable, ArbitrarilyJumpable];
    /// ChaCha with 8 rounds.
    ChaCha8(ChaCha8Rng) = "ChaCha8", [Splittable, ArbitrarilyJumpable];
    /// ChaCha with 12 rounds.
    ChaCha12(ChaCha12Rng) = "ChaCha12", [Splittable, ArbitrarilyJumpable];
    /// ChaCha with 20 rounds.
    ChaCha20(ChaCha20Rng) = "ChaCha20", [Splittable, ArbitrarilyJumpable];
    /// SplitMix64 (Steele, Lea & Flood).
    SplitMix64(SplitMix64) = "SplitMix64", [Splittable];
    /// The `rand` crate's standard generator.
    StdRng(StdRng) = "StdRng", [Streamable];
}

impl Default for Algorithm {
    fn default() -> Self {
        Algorithm::Xoshiro256PlusPlus
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn normalise(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

impl FromStr for Algorithm {
    type Err = RandomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalise(s.trim());
        Algorithm::ALL
            .iter()
            .copied()
            .find(|alg| normalise(alg.name()) == wanted)
            .ok_or_else(|| RandomError::UnknownAlgorithm(s.to_string()))
    }
}

macro_rules! with_capability {
    ($self:ident, $capability:expr, [$($variant:ident),*], $rng:ident => $body:expr) => {{
        let algorithm = $self.algorithm();
        match $self {
            $(AnyRng::$variant($rng) => Ok($body),)*
            #[allow(unreachable_patterns)]
            _ => Err(unsupported(algorithm, $capability)),
        }
    }};
}

fn unsupported(algorithm: Algorithm, capability: Capability) -> RandomError {
    RandomError::UnsupportedCapability {
        algorithm: algorithm.name().to_string(),
        capability,
    }
}

impl AnyRng {
    /// Capabilities of the source.
    pub fn capabilities(&self) -> CapabilitySet {
        self.algorithm().capabilities()
    }

    /// Fail unless the source has every capability in `required`.
    ///
    /// # Errors
    /// `RandomError::UnsupportedCapability` naming the weakest missing capability.
    pub fn require(&self, required: CapabilitySet) -> Result<(), RandomError> {
        match self.capabilities().first_missing(required) {
            Some(capability) => Err(unsupported(self.algorithm(), capability)),
            None => Ok(()),
        }
    }

    /// Split off an independent child.
    ///
    /// # Errors
    /// `RandomError::UnsupportedCapability` if the algorithm has no split.
    pub fn try_split(&mut self) -> Result<AnyRng, RandomError> {
        with_capability!(
            self,
            Capability::Splittable,
            [Pcg64, Pcg64Mcg, Pcg32, ChaCha8, ChaCha12, ChaCha20, SplitMix64],
            rng => rng.split().into()
        )
    }

    /// Jump ahead by [`jump_distance`](Self::jump_distance) outputs.
    ///
    /// # Errors
    /// `RandomError::UnsupportedCapability` if the algorithm cannot jump.
    pub fn try_jump(&mut self) -> Result<(), RandomError> {
        with_capability!(
            self,
            Capability::Jumpable,
            [
                Xoshiro256PlusPlus, Xoshiro256StarStar, Xoroshiro128PlusPlus, Xoshiro512PlusPlus,
                Pcg64, Pcg64Mcg, Pcg32, ChaCha8, ChaCha12, ChaCha20
            ],
            rng => JumpableSource::jump(rng)
        )
    }

    /// Leap ahead by [`leap_distance`](Self::leap_distance) outputs.
    ///
    /// # Errors
    /// `RandomError::UnsupportedCapability` if the algorithm cannot leap.
    pub fn try_leap(&mut self) -> Result<(), RandomError> {
        with_capability!(
            self,
            Capability::Leapable,
            [
                Xoshiro256PlusPlus, Xoshiro256StarStar, Xoroshiro128PlusPlus, Xoshiro512PlusPlus,
                Pcg64, Pcg64Mcg, Pcg32, ChaCha8, ChaCha12, ChaCha20
            ],
            rng => LeapableSource::leap(rng)
        )
    }

    /// Advance by `distance` outputs.
    ///
    /// # Errors
    /// `RandomError::UnsupportedCapability` if the algorithm cannot jump by
    /// arbitrary distances.
    pub fn try_jump_by(&mut self, distance: u128) -> Result<(), RandomError> {
        with_capability!(
            self,
            Capability::ArbitrarilyJumpable,
            [Pcg64, Pcg64Mcg, Pcg32, ChaCha8, ChaCha12, ChaCha20],
            rng => rng.jump_by(distance)
        )
    }

    /// Advance by `2^log_distance` outputs.
    ///
    /// # Errors
    /// `RandomError::UnsupportedCapability` if the algorithm cannot jump by
    /// arbitrary distances.
    pub fn try_jump_power_of_two(&mut self, log_distance: u32) -> Result<(), RandomError> {
        with_capability!(
            self,
            Capability::ArbitrarilyJumpable,
            [Pcg64, Pcg64Mcg, Pcg32, ChaCha8, ChaCha12, ChaCha20],
            rng => rng.jump_power_of_two(log_distance)
        )
    }

    /// Outputs skipped by one jump, or `None` if the algorithm cannot jump.
    pub fn jump_distance(&self) -> Option<f64> {
        let log2 = match self {
            AnyRng::Xoshiro256PlusPlus(_) => Xoshiro256PlusPlus::JUMP_LOG2,
            AnyRng::Xoshiro256StarStar(_) => Xoshiro256StarStar::JUMP_LOG2,
            AnyRng::Xoroshiro128PlusPlus(_) => Xoroshiro128PlusPlus::JUMP_LOG2,
            AnyRng::Xoshiro512PlusPlus(_) => Xoshiro512PlusPlus::JUMP_LOG2,
            AnyRng::Pcg64(_) => Pcg64::JUMP_LOG2,
            AnyRng::Pcg64Mcg(_) => Pcg64Mcg::JUMP_LOG2,
            AnyRng::Pcg32(_) => Pcg32::JUMP_LOG2,
            AnyRng::ChaCha8(_) => ChaCha8Rng::JUMP_LOG2,
            AnyRng::ChaCha12(_) => ChaCha12Rng::JUMP_LOG2,
            AnyRng::ChaCha20(_) => ChaCha20Rng::JUMP_LOG2,
            AnyRng::SplitMix64(_) | AnyRng::StdRng(_) => return None,
        };
        Some(2f64.powi(log2 as i32))
    }

    /// Outputs skipped by one leap, or `None` if the algorithm cannot leap.
    pub fn leap_distance(&self) -> Option<f64> {
        let log2 = match self {
            AnyRng::Xoshiro256PlusPlus(_) => Xoshiro256PlusPlus::LEAP_LOG2,
            AnyRng::Xoshiro256StarStar(_) => Xoshiro256StarStar::LEAP_LOG2,
            AnyRng::Xoroshiro128PlusPlus(_) => Xoroshiro128PlusPlus::LEAP_LOG2,
            AnyRng::Xoshiro512PlusPlus(_) => Xoshiro512PlusPlus::LEAP_LOG2,
            AnyRng::Pcg64(_) => Pcg64::LEAP_LOG2,
            AnyRng::Pcg64Mcg(_) => Pcg64Mcg::LEAP_LOG2,
            AnyRng::Pcg32(_) => Pcg32::LEAP_LOG2,
            AnyRng::ChaCha8(_) => ChaCha8Rng::LEAP_LOG2,
            AnyRng::ChaCha12(_) => ChaCha12Rng::LEAP_LOG2,
            AnyRng::ChaCha20(_) => ChaCha20Rng::LEAP_LOG2,
            AnyRng::SplitMix64(_) | AnyRng::StdRng(_) => return None,
        };
        Some(2f64.powi(log2 as i32))
    }
}

macro_rules! impl_into_any {
    ($($variant:ident($ty:ty)),*) => {$(
        impl From<$ty> for AnyRng {
            fn from(rng: $ty) -> Self {
                AnyRng::$variant(rng)
            }
        }
    )*};
}

impl_into_any!(
    Xoshiro256PlusPlus(Xoshiro256PlusPlus),
    Xoshiro256StarStar(Xoshiro256StarStar),
    Xoroshiro128PlusPlus(Xoroshiro128PlusPlus),
    Xoshiro512PlusPlus(Xoshiro512PlusPlus),
    Pcg64(Pcg64),
    Pcg64Mcg(Pcg64Mcg),
    Pcg32(Pcg32),
    ChaCha8(ChaCha8Rng),
    ChaCha12(ChaCha12Rng),
    ChaCha20(ChaCha20Rng),
    SplitMix64(SplitMix64),
    StdRng(StdRng)
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!("Pcg64".parse::<Algorithm>().unwrap(), Algorithm::Pcg64);
        assert_eq!("chacha20".parse::<Algorithm>().unwrap(), Algorithm::ChaCha20);
        assert_eq!(
            "xoshiro256_plus_plus".parse::<Algorithm>().unwrap(),
            Algorithm::Xoshiro256PlusPlus
        );
        assert_eq!(
            "Mersenne".parse::<Algorithm>(),
            Err(RandomError::UnknownAlgorithm("Mersenne".to_string()))
        );
    }

    #[test]
    fn test_every_name_round_trips() {
        for &alg in Algorithm::ALL {
            assert_eq!(alg.to_string().parse::<Algorithm>().unwrap(), alg);
            assert_eq!(alg.seeded(1).algorithm(), alg);
        }
    }

    #[test]
    fn test_default_algorithm() {
        assert_eq!(Algorithm::default(), Algorithm::Xoshiro256PlusPlus);
    }

    #[test]
    fn test_capability_table() {
        let xoshiro = Algorithm::Xoshiro256PlusPlus.capabilities();
        assert!(xoshiro.contains(Capability::Leapable));
        assert!(!xoshiro.contains(Capability::Splittable));
        assert!(!xoshiro.contains(Capability::ArbitrarilyJumpable));

        let pcg = Algorithm::Pcg64.capabilities();
        assert!(pcg.contains(Capability::Splittable));
        assert!(pcg.contains(Capability::ArbitrarilyJumpable));

        let std = Algorithm::StdRng.capabilities();
        assert!(std.contains(Capability::Streamable));
        assert!(!std.contains(Capability::Jumpable));
    }

    #[test]
    fn test_capability_table_matches_operations() {
        for &alg in Algorithm::ALL {
            let caps = alg.capabilities();
            let mut rng = alg.seeded(3);
            assert_eq!(rng.try_split().is_ok(), caps.contains(Capability::Splittable), "{}", alg);
            assert_eq!(rng.try_jump().is_ok(), caps.contains(Capability::Jumpable), "{}", alg);
            assert_eq!(rng.try_leap().is_ok(), caps.contains(Capability::Leapable), "{}", alg);
            assert_eq!(
                rng.try_jump_by(12).is_ok(),
                caps.contains(Capability::ArbitrarilyJumpable),
                "{}",
                alg
            );
            assert_eq!(rng.jump_distance().is_some(), caps.contains(Capability::Jumpable));
            assert_eq!(rng.leap_distance().is_some(), caps.contains(Capability::Leapable));
        }
    }

    #[test]
    fn test_unsupported_leaves_state_untouched() {
        let mut rng = Algorithm::StdRng.seeded(77);
        let mut reference = rng.clone();
        let err = rng.try_jump().unwrap_err();
        assert_eq!(
            err,
            RandomError::UnsupportedCapability {
                algorithm: "StdRng".to_string(),
                capability: Capability::Jumpable,
            }
        );
        assert!(rng.try_split().is_err());
        assert_eq!(rng.next_u64(), reference.next_u64());
    }

    #[test]
    fn test_require() {
        let rng = Algorithm::Xoshiro256PlusPlus.seeded(1);
        assert!(rng.require(Capability::Leapable.into()).is_ok());
        let err = rng.require(Capability::ArbitrarilyJumpable.into()).unwrap_err();
        assert!(matches!(
            err,
            RandomError::UnsupportedCapability {
                capability: Capability::ArbitrarilyJumpable,
                ..
            }
        ));
    }

    #[test]
    fn test_seeded_is_deterministic() {
        let mut a = Algorithm::ChaCha12.seeded(2024);
        let mut b = Algorithm::ChaCha12.seeded(2024);
        for _ in 0..8 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }
}
