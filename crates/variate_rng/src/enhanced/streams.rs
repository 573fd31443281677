//! Stream operations, available according to the source's capabilities.
//!
//! Each block below is bounded on one capability trait, so calling, say,
//! [`EnhancedRng::jump`] on a generator whose source cannot jump does not
//! compile. Generators produced here start with empty caches and inherit the
//! parent's Gaussian method; in-place jumps and leaps discard the parent's
//! caches.
//!
//! All iterators are infinite and borrow the generator; bound them with
//! [`Iterator::take`].
//!
//! # Examples
//! ```
//! use variate_rng::source::Xoshiro256PlusPlus;
//! use variate_rng::EnhancedRng;
//!
//! let mut root: EnhancedRng<Xoshiro256PlusPlus> = EnhancedRng::from_seed(7);
//! // four non-overlapping generators, 2^128 outputs apart
//! let workers: Vec<_> = root.jumps().take(4).collect();
//! assert_eq!(workers.len(), 4);
//! ```

use std::iter;

use crate::error::RandomError;
use crate::source::{
    ArbitrarilyJumpableSource, JumpableSource, LeapableSource, SplittableSource, StreamableSource,
};
use crate::uniform::{
    bounded_u32, bounded_u64, f64_width, int_width, long_width, scale_f64, unit_f64,
};

use super::EnhancedRng;

impl<S: StreamableSource> EnhancedRng<S> {
    /// Uniform `i32` values.
    pub fn ints(&mut self) -> impl Iterator<Item = i32> + '_ {
        iter::repeat_with(move || self.next_i32())
    }

    /// Uniform `i32` values in `[origin, bound)`.
    ///
    /// # Errors
    /// `RandomError::InvalidBound` if `origin >= bound`, raised before the
    /// iterator is created.
    pub fn ints_in(
        &mut self,
        origin: i32,
        bound: i32,
    ) -> Result<impl Iterator<Item = i32> + '_, RandomError> {
        let width = int_width(origin, bound)?;
        Ok(iter::repeat_with(move || {
            origin.wrapping_add(bounded_u32(&mut self.source, width) as i32)
        }))
    }

    /// Uniform `i64` values.
    pub fn longs(&mut self) -> impl Iterator<Item = i64> + '_ {
        iter::repeat_with(move || self.next_i64())
    }

    /// Uniform `i64` values in `[origin, bound)`.
    ///
    /// # Errors
    /// `RandomError::InvalidBound` if `origin >= bound`.
    pub fn longs_in(
        &mut self,
        origin: i64,
        bound: i64,
    ) -> Result<impl Iterator<Item = i64> + '_, RandomError> {
        let width = long_width(origin, bound)?;
        Ok(iter::repeat_with(move || {
            origin.wrapping_add(bounded_u64(&mut self.source, width) as i64)
        }))
    }

    /// Uniform `f64` values in `[0, 1)`.
    pub fn doubles(&mut self) -> impl Iterator<Item = f64> + '_ {
        iter::repeat_with(move || self.next_f64())
    }

    /// Uniform `f64` values in `[origin, bound)`.
    ///
    /// # Errors
    /// `RandomError::InvalidBound` if the interval is empty or not finite.
    pub fn doubles_in(
        &mut self,
        origin: f64,
        bound: f64,
    ) -> Result<impl Iterator<Item = f64> + '_, RandomError> {
        let width = f64_width(origin, bound)?;
        Ok(iter::repeat_with(move || {
            scale_f64(unit_f64(&mut self.source), origin, width, bound)
        }))
    }

    /// A new generator whose source is seeded from this one.
    pub fn next_rng(&mut self) -> Self {
        let source = self.source.next_source();
        self.derive(source)
    }

    /// New generators seeded from this one.
    pub fn rngs(&mut self) -> impl Iterator<Item = Self> + '_ {
        iter::repeat_with(move || self.next_rng())
    }
}

impl<S: SplittableSource> EnhancedRng<S> {
    /// Split off an independent generator using the source's own split.
    ///
    /// The child is a deterministic function of this generator's state, which
    /// advances.
    pub fn split(&mut self) -> Self {
        let source = self.source.split();
        self.derive(source)
    }

    /// Successive splits.
    pub fn splits(&mut self) -> impl Iterator<Item = Self> + '_ {
        iter::repeat_with(move || self.split())
    }
}

impl<S: JumpableSource> EnhancedRng<S> {
    /// A generator at the same position as this one, with fresh caches.
    pub fn copy(&self) -> Self {
        self.derive(self.source.clone())
    }

    /// Advance by [`jump_distance`](Self::jump_distance) outputs.
    pub fn jump(&mut self) {
        self.source.jump();
        self.clear_caches();
    }

    /// Return a copy at the current position, then jump.
    pub fn copy_and_jump(&mut self) -> Self {
        let copy = self.copy();
        self.jump();
        copy
    }

    /// Number of outputs skipped by one jump.
    pub fn jump_distance(&self) -> f64 {
        S::jump_distance()
    }

    /// Copies one jump apart, each taken before the jump.
    pub fn jumps(&mut self) -> impl Iterator<Item = Self> + '_ {
        iter::repeat_with(move || self.copy_and_jump())
    }
}

impl<S: LeapableSource> EnhancedRng<S> {
    /// Advance by [`leap_distance`](Self::leap_distance) outputs.
    pub fn leap(&mut self) {
        self.source.leap();
        self.clear_caches();
    }

    /// Return a copy at the current position, then leap.
    pub fn copy_and_leap(&mut self) -> Self {
        let copy = self.copy();
        self.leap();
        copy
    }

    /// Number of outputs skipped by one leap.
    pub fn leap_distance(&self) -> f64 {
        S::leap_distance()
    }

    /// Copies one leap apart, each taken before the leap.
    pub fn leaps(&mut self) -> impl Iterator<Item = Self> + '_ {
        iter::repeat_with(move || self.copy_and_leap())
    }
}

impl<S: ArbitrarilyJumpableSource> EnhancedRng<S> {
    /// Advance by `distance` outputs.
    pub fn jump_by(&mut self, distance: u128) {
        self.source.jump_by(distance);
        self.clear_caches();
    }

    /// Advance by `2^log_distance` outputs.
    pub fn jump_power_of_two(&mut self, log_distance: u32) {
        self.source.jump_power_of_two(log_distance);
        self.clear_caches();
    }

    /// Return a copy at the current position, then advance by `distance`.
    pub fn copy_and_jump_by(&mut self, distance: u128) -> Self {
        let copy = self.copy();
        self.jump_by(distance);
        copy
    }

    /// Copies `distance` outputs apart.
    pub fn jumps_by(&mut self, distance: u128) -> impl Iterator<Item = Self> + '_ {
        iter::repeat_with(move || self.copy_and_jump_by(distance))
    }
}
