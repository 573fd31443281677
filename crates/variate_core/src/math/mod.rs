//! Mathematical functions.
//!
//! - [`functions`]: log-gamma, integer powers, regularised incomplete beta,
//!   complementary error function and the standard normal CDF/PDF

pub mod functions;

pub use functions::{betai, erfc, ln_gamma, norm_cdf, norm_pdf, pow_int};
