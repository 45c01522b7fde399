//! Core model for quantitative information flow (QIF).
//!
//! Given a prior distribution on a finite set of secrets and a channel
//! that maps secrets to observable outputs, this crate derives the
//! hyper-distribution of posteriors the adversary may end up with, and
//! quantifies how much the observation helps the adversary through
//! vulnerability, entropy and leakage measures.
//!
//! The crate works in `no_std` environments with an allocator.
//!
//! # Features
//!
//! - `std` (default): Enable standard library support for convenience
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use qif_core::{measures, Channel, Distribution, HyperDistribution};
//!
//! let prior = Arc::new(Distribution::new(vec![0.25, 0.25, 0.5])?);
//! let channel = Channel::new(
//!     Arc::clone(&prior),
//!     &[vec![1.0, 0.0], vec![0.0, 1.0], vec![0.0, 1.0]],
//! )?;
//! let hyper = HyperDistribution::new(&prior, &channel)?;
//!
//! assert_eq!(measures::bayes_vulnerability(&prior), 0.5);
//! assert!((measures::posterior_bayes_vulnerability(&hyper) - 0.75).abs() < 1e-12);
//! # Ok::<(), qif_core::QifError>(())
//! ```
//!
//! Objects are immutable after construction; channels, gain functions and
//! hyper-distributions share their prior through an [`Arc`](alloc::sync::Arc),
//! so all of them can be read from several threads at once.

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]

extern crate alloc;

pub mod channel;
pub mod constants;
pub mod distribution;
pub mod error;
pub mod gain;
pub mod hyper;
pub mod math;
pub mod measures;
pub mod types;

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

// Re-export commonly used items at crate root
pub use channel::Channel;
pub use constants::{DEFAULT_SEED, EPS};
pub use distribution::Distribution;
pub use error::{QifError, Result};
pub use gain::GainFunction;
pub use hyper::HyperDistribution;
pub use measures::Measure;
pub use types::Matrix;

/// Deterministic RNG for the generators.
///
/// Same seed, same generated objects.
pub fn seeded_rng(seed: u64) -> Xoshiro256PlusPlus {
    Xoshiro256PlusPlus::seed_from_u64(seed)
}
