//! Numeric constants shared by the model and the measures.

/// Absolute tolerance used for every floating-point comparison in the crate.
///
/// Two probabilities are considered equal when their difference is at most
/// `EPS`; a probability vector is a distribution when its entries sum to
/// `1 ± EPS`.
pub const EPS: f64 = 1e-6;

/// Integer budget used by the residual-splitting generators.
///
/// Random distributions are drawn in whole units out of this budget and then
/// scaled to `[0, 1]`, so the generated entries always sum to exactly
/// `PROBABILITY_UNITS` units before scaling.
pub const PROBABILITY_UNITS: u64 = (1 << 31) - 1;

/// Default deterministic seed for the random generators.
///
/// The value `0x716966` is "qif" encoded in ASCII.
pub const DEFAULT_SEED: u64 = 0x716966;

/// Default lower bound for randomly generated gains.
pub const DEFAULT_GAIN_MIN: i32 = -5;

/// Default upper bound for randomly generated gains.
pub const DEFAULT_GAIN_MAX: i32 = 5;
