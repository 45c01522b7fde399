//! # qif
//!
//! Quantitative information flow: how much does observing a system's
//! output tell an adversary about its secret input?
//!
//! This crate wraps the model and measures of [`qif_core`] with:
//! - text loaders and serializers for distributions, channels, gain
//!   functions and hyper-distributions ([`data`]);
//! - output [`Config`] (delimiter, precision, generator seed);
//! - a [`MeasureReport`] of every measure, rendered for the terminal or as
//!   JSON ([`output`]).
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use qif::data::{parse_channel, parse_distribution};
//! use qif::{HyperDistribution, MeasureReport};
//!
//! let prior = Arc::new(parse_distribution("3\n0.25 0.25 0.5")?);
//! let channel = parse_channel("3 2\n1 0\n0 1\n0 1", &prior)?;
//! let hyper = HyperDistribution::new(&prior, &channel)?;
//!
//! let report = MeasureReport::compute(&hyper, None, 1)?;
//! let bayes = report.get("Bayes vulnerability").unwrap();
//! assert!((bayes.posterior - 0.75).abs() < 1e-12);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod report;

pub mod data;
pub mod output;

pub use config::{Config, Delimiter, MAX_PRECISION};
pub use report::{MeasureEntry, MeasureReport};

// Re-export the core model
pub use qif_core::{
    measures, seeded_rng, Channel, Distribution, GainFunction, HyperDistribution, Matrix, Measure,
    QifError, DEFAULT_SEED, EPS,
};
