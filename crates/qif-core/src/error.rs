//! Error types for model construction and measure evaluation.
//!
//! Every failure is detected eagerly at the boundary where the violated
//! invariant would otherwise propagate. An object either satisfies its
//! invariants or is never constructed.

use alloc::string::String;

/// Errors raised by the QIF model and measure library.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QifError {
    /// A probability vector has a negative/oversized entry or does not sum
    /// to `1 ± EPS`.
    #[error("invalid distribution: {0}")]
    InvalidDistribution(String),

    /// A channel matrix does not match its prior, or one of its rows is not
    /// a probability distribution.
    #[error("invalid channel: {0}")]
    InvalidChannel(String),

    /// A gain matrix does not match its prior or holds non-finite gains.
    #[error("invalid gain function: {0}")]
    InvalidGainFunction(String),

    /// Generation or measure parameters that cannot produce a valid result,
    /// e.g. `max_prob * n < 1` or `k` outside `1..=n`.
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// Two objects combined by a measure are tied to different priors.
    #[error("mismatched prior: {0}")]
    MismatchedPrior(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, QifError>;
