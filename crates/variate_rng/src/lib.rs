//! # variate_rng: Capability-Layered Random Generation
//!
//! ## Layer 2 (Engine) Role
//!
//! variate_rng builds on variate_core and provides:
//! - Capability traits over uniform sources and the bundled generators (`source`)
//! - Unbiased bounded draws and biased index draws (`uniform`)
//! - Non-uniform variates: Ziggurat and polar Gaussians, Cauchy, binomial,
//!   exponential (`variates`)
//! - Index sampling without replacement, pairs, triples, masks and shuffling
//!   (`sampling`)
//! - The generator wrapper that ties them together (`enhanced`)
//! - Validated generator configuration and a process-wide default instance
//!   (`config`, `global`)
//!
//! ## Capabilities
//!
//! What a generator can do beyond producing uniform bits depends on its
//! source. Statically typed wrappers expose stream operations only when the
//! source implements the matching trait:
//!
//! | Trait | Operations on [`EnhancedRng`] |
//! |-------|-------------------------------|
//! | [`StreamableSource`](source::StreamableSource) | `ints`, `doubles`, `rngs`, ... |
//! | [`SplittableSource`](source::SplittableSource) | `split`, `splits` |
//! | [`JumpableSource`](source::JumpableSource) | `jump`, `copy_and_jump`, `jumps` |
//! | [`LeapableSource`](source::LeapableSource) | `leap`, `copy_and_leap`, `leaps` |
//! | [`ArbitrarilyJumpableSource`](source::ArbitrarilyJumpableSource) | `jump_by`, `jumps_by` |
//!
//! A wrapper over [`AnyRng`] picks the algorithm at run time and offers the
//! same operations as fallible `try_` methods.
//!
//! ## Usage Examples
//!
//! ```rust
//! use variate_rng::source::Pcg64;
//! use variate_rng::EnhancedRng;
//!
//! let mut rng: EnhancedRng<Pcg64> = EnhancedRng::from_seed(2024);
//!
//! // Bounded and non-uniform draws
//! let index = rng.next_index(10).unwrap();
//! let z = rng.next_gaussian_with(1.0, 0.5);
//! let successes = rng.next_binomial(50, 0.2).unwrap();
//! assert!(index < 10 && z.is_finite() && successes <= 50);
//!
//! // Sampling without replacement
//! let picks = rng.sample(1_000, 10).unwrap();
//! assert_eq!(picks.len(), 10);
//!
//! // Independent streams for parallel work
//! let workers: Vec<_> = rng.splits().take(4).collect();
//! assert_eq!(workers.len(), 4);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for `GeneratorConfig` and the enums it holds

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod config;
pub mod enhanced;
pub mod error;
pub mod global;
pub mod sampling;
pub mod source;
pub mod uniform;
pub mod variates;

/// Source used when none is named.
pub type DefaultSource = source::Xoshiro256PlusPlus;

pub use config::{ConfigError, GeneratorConfig};
pub use enhanced::EnhancedRng;
pub use error::RandomError;
pub use sampling::{SampleAlgorithm, SampleOrder};
pub use source::{Algorithm, AnyRng, Capability, CapabilitySet};
pub use variates::GaussianMethod;
