//! Vulnerability measures: how likely or how profitable is the adversary's
//! best action, before and after observing the channel output.

use alloc::format;
use alloc::vec::Vec;

use crate::distribution::Distribution;
use crate::error::{QifError, Result};
use crate::gain::GainFunction;
use crate::hyper::HyperDistribution;
use crate::math::max_of;

/// Bayes vulnerability `max_x π[x]`: the probability of guessing the
/// secret correctly in one try.
pub fn bayes_vulnerability(prior: &Distribution) -> f64 {
    max_of(prior.iter()).unwrap_or(0.0)
}

/// Posterior Bayes vulnerability `Σ_y outer[y] · max_x inner[x][y]`.
pub fn posterior_bayes_vulnerability(hyper: &HyperDistribution) -> f64 {
    hyper
        .outer()
        .iter()
        .zip(hyper.inners().column_iter())
        .map(|(p, col)| p * max_of(col.iter().copied()).unwrap_or(0.0))
        .sum()
}

/// Probability of guessing the secret within `k` tries: the sum of the `k`
/// largest probabilities.
///
/// # Errors
///
/// [`QifError::InvalidParameters`] if `k` is not in `1..=n`.
pub fn k_tries(prior: &Distribution, k: usize) -> Result<f64> {
    check_k(k, prior.len())?;
    Ok(top_k_sum(prior.iter(), k))
}

/// Posterior k-tries vulnerability `Σ_y outer[y] · kTries(inner[·][y], k)`.
///
/// # Errors
///
/// [`QifError::InvalidParameters`] if `k` is not in `1..=n`.
pub fn posterior_k_tries(hyper: &HyperDistribution, k: usize) -> Result<f64> {
    check_k(k, hyper.secrets())?;
    Ok(hyper
        .outer()
        .iter()
        .zip(hyper.inners().column_iter())
        .map(|(p, col)| p * top_k_sum(col.iter().copied(), k))
        .sum())
}

/// g-vulnerability `max_w Σ_x π[x] · g(w, x)` on the gain function's prior.
pub fn g_vulnerability(gain: &GainFunction) -> f64 {
    expected_best_gain(gain, gain.prior().iter())
}

/// Posterior g-vulnerability `Σ_y outer[y] · max_w Σ_x inner[x][y] · g(w, x)`.
///
/// # Errors
///
/// [`QifError::MismatchedPrior`] if the gain function was built on a prior
/// that does not match the hyper-distribution's (see
/// [`Distribution::matches`]).
pub fn posterior_g_vulnerability(hyper: &HyperDistribution, gain: &GainFunction) -> Result<f64> {
    check_same_prior(hyper, gain)?;
    Ok(hyper
        .outer()
        .iter()
        .zip(hyper.inners().column_iter())
        .map(|(p, col)| p * expected_best_gain(gain, col.iter().copied()))
        .sum())
}

/// g-vulnerability of `gain` evaluated on the hyper-distribution's prior.
pub(crate) fn prior_g_vulnerability(hyper: &HyperDistribution, gain: &GainFunction) -> Result<f64> {
    check_same_prior(hyper, gain)?;
    Ok(expected_best_gain(gain, hyper.prior().iter()))
}

pub(crate) fn check_same_prior(hyper: &HyperDistribution, gain: &GainFunction) -> Result<()> {
    if hyper.prior().matches(gain.prior()) {
        Ok(())
    } else {
        Err(QifError::MismatchedPrior(
            "the gain function and the hyper-distribution are defined on different priors".into(),
        ))
    }
}

pub(crate) fn check_k(k: usize, n: usize) -> Result<()> {
    if k == 0 || k > n {
        return Err(QifError::InvalidParameters(format!(
            "k must be in 1..={n}, got {k}"
        )));
    }
    Ok(())
}

/// Best expected gain over all actions for the distribution `weights`.
fn expected_best_gain<I: Iterator<Item = f64>>(gain: &GainFunction, weights: I) -> f64 {
    let weights: Vec<f64> = weights.collect();
    let best = gain.matrix().row_iter().map(|row| {
        row.iter()
            .zip(&weights)
            .map(|(g, p)| g * p)
            .sum::<f64>()
    });
    max_of(best).unwrap_or(0.0)
}

/// Sum of the `k` largest values.
fn top_k_sum<I: Iterator<Item = f64>>(values: I, k: usize) -> f64 {
    let mut sorted: Vec<f64> = values.collect();
    sorted.sort_by(|a, b| b.total_cmp(a));
    sorted.iter().take(k).sum()
}
