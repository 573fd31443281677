//! Dense linear algebra on row-major `Vec<Vec<T>>` matrices.
//!
//! This module provides:
//! - [`matrix`]: element-wise sum and difference, matrix product and in-place
//!   transposition of square matrices
//! - [`jacobi`]: eigen-decomposition of symmetric matrices by cyclic Jacobi
//!   rotations
//! - [`JacobiConfig`]: tolerance and sweep limit for the Jacobi method

pub mod config;
pub mod jacobi;
pub mod matrix;

pub use config::JacobiConfig;
pub use jacobi::{JacobiDiagonalization, JacobiOutcome};
pub use matrix::{difference, product, sum, transpose_square_in_place};
