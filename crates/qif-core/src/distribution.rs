//! Probability distributions over a finite set of secrets.
//!
//! A [`Distribution`] is immutable once built: every constructor validates
//! its input, and no method hands out mutable access to the probabilities.

use alloc::format;
use alloc::vec::Vec;
use core::fmt;
use core::ops::Index;

use rand::Rng;
use tracing::trace;

use crate::constants::{EPS, PROBABILITY_UNITS};
use crate::error::{QifError, Result};
use crate::math::slices_approx_eq;

/// A probability distribution on `n` secrets.
///
/// Entry `i` is the probability of the `i`th secret. Entries lie in
/// `[0, 1 + EPS]` and sum to `1 ± EPS`.
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    probabilities: Vec<f64>,
}

impl Distribution {
    /// Check whether `probabilities` form a probability distribution.
    ///
    /// - every entry is in `[0, 1 + EPS]` (NaN is rejected);
    /// - the sum of all entries is in `[1 - EPS, 1 + EPS]`.
    ///
    /// An empty slice sums to 0 and is therefore never a distribution.
    pub fn validate(probabilities: &[f64]) -> bool {
        let mut sum = 0.0;
        for &p in probabilities {
            if !(0.0..=1.0 + EPS).contains(&p) {
                return false;
            }
            sum += p;
        }
        (1.0 - EPS..=1.0 + EPS).contains(&sum)
    }

    /// Build a distribution from an explicit probability vector.
    ///
    /// # Errors
    ///
    /// [`QifError::InvalidDistribution`] if [`Distribution::validate`] fails.
    /// Values are never clamped.
    pub fn new(probabilities: Vec<f64>) -> Result<Self> {
        if probabilities.is_empty() {
            return Err(QifError::InvalidDistribution(
                "a distribution needs at least one secret".into(),
            ));
        }
        if let Some((i, p)) = probabilities
            .iter()
            .enumerate()
            .find(|(_, p)| !(0.0..=1.0 + EPS).contains(*p))
        {
            return Err(QifError::InvalidDistribution(format!(
                "probability {p} of secret {i} is outside [0, 1]"
            )));
        }
        if !Self::validate(&probabilities) {
            let sum: f64 = probabilities.iter().sum();
            return Err(QifError::InvalidDistribution(format!(
                "probabilities sum to {sum}, expected 1 ± {EPS}"
            )));
        }
        Ok(Self { probabilities })
    }

    /// The uniform distribution on `n` secrets: every entry is `1/n`.
    ///
    /// # Errors
    ///
    /// [`QifError::InvalidParameters`] if `n == 0`.
    pub fn uniform(n: usize) -> Result<Self> {
        if n == 0 {
            return Err(QifError::InvalidParameters(
                "a uniform distribution needs at least one secret".into(),
            ));
        }
        Ok(Self {
            probabilities: alloc::vec![1.0 / n as f64; n],
        })
    }

    /// A random distribution on `n` secrets drawn by residual splitting.
    ///
    /// Each of the first `n - 1` entries takes a uniformly random share of the
    /// probability mass that is still unassigned, clipped to `max_prob`; the
    /// last entry absorbs whatever remains. Mass is counted in whole
    /// [`PROBABILITY_UNITS`], so the entries always add up to 1.
    ///
    /// # Errors
    ///
    /// [`QifError::InvalidParameters`] if `n == 0`, `max_prob` is not in
    /// `(0, 1]`, or `max_prob * n < 1`.
    pub fn random<R: Rng + ?Sized>(n: usize, max_prob: f64, rng: &mut R) -> Result<Self> {
        check_split_parameters(n, max_prob, "secrets")?;
        let probabilities = residual_split(n, max_prob, rng);
        debug_assert!(Self::validate(&probabilities));
        Ok(Self { probabilities })
    }

    /// Wrap a vector that is a distribution by construction (e.g. a marginal
    /// computed from a valid joint matrix), skipping validation.
    pub(crate) fn from_derived(probabilities: Vec<f64>) -> Self {
        Self { probabilities }
    }

    /// Number of secrets.
    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    /// Always `false` for a validated distribution; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }

    /// The probability vector.
    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    /// Probability of secret `i`, or `None` if out of range.
    pub fn get(&self, i: usize) -> Option<f64> {
        self.probabilities.get(i).copied()
    }

    /// Iterate over the probabilities in secret order.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.probabilities.iter().copied()
    }

    /// Entrywise equality within `EPS`.
    pub fn approx_eq(&self, other: &Distribution) -> bool {
        slices_approx_eq(&self.probabilities, &other.probabilities)
    }

    /// Whether `other` describes the same secret set as `self`.
    ///
    /// Two priors match when they are the same object or, failing that, when
    /// their probabilities agree entrywise within `EPS`. Objects built on
    /// separately loaded copies of one prior can therefore be combined.
    pub fn matches(&self, other: &Distribution) -> bool {
        core::ptr::eq(self, other) || self.approx_eq(other)
    }
}

impl Index<usize> for Distribution {
    type Output = f64;

    fn index(&self, i: usize) -> &f64 {
        &self.probabilities[i]
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, p) in self.probabilities.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match f.precision() {
                Some(prec) => write!(f, "{p:.prec$}")?,
                None => write!(f, "{p}")?,
            }
        }
        Ok(())
    }
}

/// Validate residual-splitting parameters for `n` entries bounded by
/// `max_prob`. `what` names the entries in the error message.
pub(crate) fn check_split_parameters(n: usize, max_prob: f64, what: &str) -> Result<()> {
    if n == 0 {
        return Err(QifError::InvalidParameters(format!(
            "cannot generate a distribution over 0 {what}"
        )));
    }
    if !(max_prob > 0.0 && max_prob <= 1.0) {
        return Err(QifError::InvalidParameters(format!(
            "max_prob must be in (0, 1], got {max_prob}"
        )));
    }
    if max_prob * (n as f64) < 1.0 - EPS {
        return Err(QifError::InvalidParameters(format!(
            "max_prob * {what} must be >= 1, got {max_prob} * {n}"
        )));
    }
    Ok(())
}

/// Draw `n` probabilities summing to 1 by residual splitting.
///
/// Callers must have checked the parameters with [`check_split_parameters`].
pub(crate) fn residual_split<R: Rng + ?Sized>(n: usize, max_prob: f64, rng: &mut R) -> Vec<f64> {
    let scale = PROBABILITY_UNITS as f64;
    let cap = (scale * max_prob) as u64;
    let mut remaining = PROBABILITY_UNITS;
    let mut probabilities = Vec::with_capacity(n);

    for _ in 1..n {
        let mut units = if remaining == 0 {
            0
        } else {
            rng.random_range(0..remaining)
        };
        if units > cap {
            units = cap;
        }
        probabilities.push(units as f64 / scale);
        remaining -= units;
    }
    probabilities.push(remaining as f64 / scale);

    trace!(n, max_prob, "residual split drawn");
    probabilities
}
