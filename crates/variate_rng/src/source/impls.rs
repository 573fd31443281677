//! Capability implementations for the bundled sources.
//!
//! | Source | Split | Jump | Leap | Arbitrary |
//! |--------|-------|------|------|-----------|
//! | Xoshiro256++/\*\* | – | 2^128 | 2^192 | – |
//! | Xoroshiro128++ | – | 2^64 | 2^96 | – |
//! | Xoshiro512++ | – | 2^256 | 2^384 | – |
//! | Pcg64 | new stream | 2^64 | 2^96 | any |
//! | Pcg64Mcg | reseed | 2^64 | 2^96 | any |
//! | Pcg32 | new stream | 2^32 | 2^48 | any (mod 2^64) |
//! | ChaCha8/12/20 | new stream id | 2^64 | 2^66 | any |
//! | SplitMix64 | reseed | – | – | – |

use rand::{RngCore, SeedableRng};
use rand_chacha::{ChaCha12Rng, ChaCha20Rng, ChaCha8Rng};
use rand_pcg::{Pcg32, Pcg64, Pcg64Mcg};
use rand_xoshiro::{
    SplitMix64, Xoroshiro128PlusPlus, Xoshiro256PlusPlus, Xoshiro256StarStar, Xoshiro512PlusPlus,
};

use super::{ArbitrarilyJumpableSource, JumpableSource, LeapableSource, SplittableSource};

fn next_u128<R: RngCore + ?Sized>(rng: &mut R) -> u128 {
    (u128::from(rng.next_u64()) << 64) | u128::from(rng.next_u64())
}

// ----------------------------------------------------------------------------
// xoshiro family: jump() and long_jump() from the reference implementation
// ----------------------------------------------------------------------------

macro_rules! impl_xoshiro_jumps {
    ($($ty:ident => $jump:expr, $leap:expr;)*) => {$(
        impl JumpableSource for $ty {
            const JUMP_LOG2: u32 = $jump;

            fn jump(&mut self) {
                $ty::jump(self)
            }
        }

        impl LeapableSource for $ty {
            const LEAP_LOG2: u32 = $leap;

            fn leap(&mut self) {
                self.long_jump()
            }
        }
    )*};
}

impl_xoshiro_jumps! {
    Xoshiro256PlusPlus => 128, 192;
    Xoshiro256StarStar => 128, 192;
    Xoroshiro128PlusPlus => 64, 96;
    Xoshiro512PlusPlus => 256, 384;
}

// ----------------------------------------------------------------------------
// PCG family: O(log n) advance
// ----------------------------------------------------------------------------

impl SplittableSource for Pcg64 {
    fn split(&mut self) -> Self {
        let state = next_u128(self);
        let stream = next_u128(self);
        Pcg64::new(state, stream)
    }
}

impl SplittableSource for Pcg64Mcg {
    fn split(&mut self) -> Self {
        Pcg64Mcg::new(next_u128(self))
    }
}

impl SplittableSource for Pcg32 {
    fn split(&mut self) -> Self {
        let state = self.next_u64();
        let stream = self.next_u64();
        Pcg32::new(state, stream)
    }
}

macro_rules! impl_pcg128_jumps {
    ($($ty:ident),*) => {$(
        impl JumpableSource for $ty {
            const JUMP_LOG2: u32 = 64;

            fn jump(&mut self) {
                self.advance(1 << 64);
            }
        }

        impl LeapableSource for $ty {
            const LEAP_LOG2: u32 = 96;

            fn leap(&mut self) {
                self.advance(1 << 96);
            }
        }

        impl ArbitrarilyJumpableSource for $ty {
            fn jump_by(&mut self, distance: u128) {
                self.advance(distance);
            }
        }
    )*};
}

impl_pcg128_jumps!(Pcg64, Pcg64Mcg);

impl JumpableSource for Pcg32 {
    const JUMP_LOG2: u32 = 32;

    fn jump(&mut self) {
        self.advance(1 << 32);
    }
}

impl LeapableSource for Pcg32 {
    const LEAP_LOG2: u32 = 48;

    fn leap(&mut self) {
        self.advance(1 << 48);
    }
}

impl ArbitrarilyJumpableSource for Pcg32 {
    fn jump_by(&mut self, distance: u128) {
        // period is 2^64
        self.advance(distance as u64);
    }
}

// ----------------------------------------------------------------------------
// ChaCha family: counter mode, one u64 output is two 32-bit words
// ----------------------------------------------------------------------------

macro_rules! impl_chacha {
    ($($ty:ident),*) => {$(
        impl SplittableSource for $ty {
            fn split(&mut self) -> Self {
                let mut child = $ty::from_seed(self.get_seed());
                child.set_stream(self.next_u64());
                child
            }
        }

        impl JumpableSource for $ty {
            const JUMP_LOG2: u32 = 64;

            fn jump(&mut self) {
                self.jump_by(1 << 64);
            }
        }

        impl LeapableSource for $ty {
            const LEAP_LOG2: u32 = 66;

            fn leap(&mut self) {
                self.jump_by(1 << 66);
            }
        }

        impl ArbitrarilyJumpableSource for $ty {
            fn jump_by(&mut self, distance: u128) {
                let words = distance.wrapping_mul(2);
                self.set_word_pos(self.get_word_pos().wrapping_add(words));
            }
        }
    )*};
}

impl_chacha!(ChaCha8Rng, ChaCha12Rng, ChaCha20Rng);

// ----------------------------------------------------------------------------
// SplitMix64: split only
// ----------------------------------------------------------------------------

impl SplittableSource for SplitMix64 {
    fn split(&mut self) -> Self {
        SplitMix64::seed_from_u64(self.next_u64())
    }
}
