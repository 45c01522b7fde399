//! Leakage: how much a channel changes a measure of the adversary's
//! knowledge, as a difference or a ratio of posterior and prior values.

use core::fmt;

use tracing::warn;

use crate::constants::EPS;
use crate::distribution::Distribution;
use crate::error::Result;
use crate::gain::GainFunction;
use crate::hyper::HyperDistribution;
use crate::math::{abs, approx_zero, log2, max_of};

use super::entropy::{
    guessing_entropy, posterior_guessing_entropy, posterior_shannon_entropy, shannon_entropy,
};
use super::vulnerability::{
    bayes_vulnerability, k_tries, posterior_bayes_vulnerability, posterior_g_vulnerability,
    posterior_k_tries, prior_g_vulnerability,
};

/// A measure with a prior form (on a distribution) and a posterior form (on
/// a hyper-distribution).
#[derive(Debug, Clone, Copy)]
pub enum Measure<'a> {
    /// Bayes vulnerability.
    Bayes,
    /// Shannon entropy.
    Shannon,
    /// Guessing entropy.
    Guessing,
    /// k-tries vulnerability.
    KTries(usize),
    /// g-vulnerability for the given gain function.
    Gain(&'a GainFunction),
}

impl Measure<'_> {
    /// Value of the measure on the hyper-distribution's prior.
    ///
    /// # Errors
    ///
    /// [`QifError::InvalidParameters`](crate::QifError::InvalidParameters)
    /// for `KTries(k)` with `k` outside `1..=n`;
    /// [`QifError::MismatchedPrior`](crate::QifError::MismatchedPrior) for a
    /// gain function on a different prior.
    pub fn prior_value(&self, hyper: &HyperDistribution) -> Result<f64> {
        let prior: &Distribution = hyper.prior();
        match *self {
            Measure::Bayes => Ok(bayes_vulnerability(prior)),
            Measure::Shannon => Ok(shannon_entropy(prior)),
            Measure::Guessing => Ok(guessing_entropy(prior)),
            Measure::KTries(k) => k_tries(prior, k),
            Measure::Gain(gain) => prior_g_vulnerability(hyper, gain),
        }
    }

    /// Value of the measure averaged over the posteriors.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Measure::prior_value`].
    pub fn posterior_value(&self, hyper: &HyperDistribution) -> Result<f64> {
        match *self {
            Measure::Bayes => Ok(posterior_bayes_vulnerability(hyper)),
            Measure::Shannon => Ok(posterior_shannon_entropy(hyper)),
            Measure::Guessing => Ok(posterior_guessing_entropy(hyper)),
            Measure::KTries(k) => posterior_k_tries(hyper, k),
            Measure::Gain(gain) => posterior_g_vulnerability(hyper, gain),
        }
    }
}

impl fmt::Display for Measure<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Measure::Bayes => write!(f, "Bayes vulnerability"),
            Measure::Shannon => write!(f, "Shannon entropy"),
            Measure::Guessing => write!(f, "guessing entropy"),
            Measure::KTries(k) => write!(f, "{k}-tries vulnerability"),
            Measure::Gain(_) => write!(f, "g-vulnerability"),
        }
    }
}

/// Additive leakage: posterior value minus prior value of `measure`.
///
/// Non-negative for vulnerabilities; non-positive for entropies, since
/// observing an output never increases the expected uncertainty.
///
/// # Errors
///
/// Same conditions as [`Measure::prior_value`].
pub fn additive_leakage(hyper: &HyperDistribution, measure: Measure<'_>) -> Result<f64> {
    Ok(measure.posterior_value(hyper)? - measure.prior_value(hyper)?)
}

/// Multiplicative g-leakage: posterior over prior g-vulnerability.
///
/// When the prior g-vulnerability is 0 the ratio is defined as 1 if the
/// posterior g-vulnerability is also 0, and as `f64::INFINITY` otherwise,
/// so the result is never NaN. "Zero" is judged relative to the largest
/// absolute gain, so scaling every gain by a positive constant leaves the
/// ratio unchanged.
///
/// # Errors
///
/// [`QifError::MismatchedPrior`](crate::QifError::MismatchedPrior) if the
/// gain function is on a different prior.
pub fn multiplicative_leakage(hyper: &HyperDistribution, gain: &GainFunction) -> Result<f64> {
    let prior = prior_g_vulnerability(hyper, gain)?;
    let posterior = posterior_g_vulnerability(hyper, gain)?;
    let tolerance = EPS * max_of(gain.matrix().iter().copied().map(abs)).unwrap_or(0.0);
    if approx_zero(prior, tolerance) {
        if approx_zero(posterior, tolerance) {
            return Ok(1.0);
        }
        warn!(posterior, "prior g-vulnerability is zero, leakage is unbounded");
        return Ok(f64::INFINITY);
    }
    Ok(posterior / prior)
}

/// Min-entropy leakage `log2(V_post / V_prior)` in bits for Bayes
/// vulnerability. Bayes vulnerability is at least `1/n`, so the ratio is
/// always defined.
pub fn min_entropy_leakage(hyper: &HyperDistribution) -> f64 {
    log2(posterior_bayes_vulnerability(hyper) / bayes_vulnerability(hyper.prior()))
}

/// Mutual information between secret and output in bits: prior Shannon
/// entropy minus expected posterior Shannon entropy.
pub fn mutual_information(hyper: &HyperDistribution) -> f64 {
    shannon_entropy(hyper.prior()) - posterior_shannon_entropy(hyper)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::Channel;
    use crate::error::QifError;
    use alloc::sync::Arc;
    use alloc::vec;
    use alloc::vec::Vec;

    fn hyper(prior: Vec<f64>, rows: &[Vec<f64>]) -> HyperDistribution {
        let prior = Arc::new(Distribution::new(prior).unwrap());
        HyperDistribution::from_channel(&Channel::new(prior, rows).unwrap())
    }

    #[test]
    fn test_additive_leakage_bayes() {
        let h = hyper(
            vec![0.25, 0.25, 0.5],
            &[vec![1.0, 0.0], vec![0.0, 1.0], vec![0.0, 1.0]],
        );
        // Posteriors: [1, 0, 0] with mass 0.25, [0, 1/3, 2/3] with mass 0.75
        let leak = additive_leakage(&h, Measure::Bayes).unwrap();
        assert!(abs(leak - 0.25) < 1e-12, "expected 0.25, got {}", leak);
    }

    #[test]
    fn test_additive_leakage_entropy_is_non_positive() {
        let h = hyper(vec![0.5, 0.5], &[vec![0.9, 0.1], vec![0.3, 0.7]]);
        let leak = additive_leakage(&h, Measure::Shannon).unwrap();
        assert!(leak < 0.0);
        assert!(abs(leak + mutual_information(&h)) < 1e-12);
    }

    #[test]
    fn test_additive_leakage_k_tries_validates_k() {
        let h = hyper(vec![0.5, 0.5], &[vec![0.9, 0.1], vec![0.3, 0.7]]);
        assert!(matches!(
            additive_leakage(&h, Measure::KTries(3)),
            Err(QifError::InvalidParameters(_))
        ));
        assert!(abs(additive_leakage(&h, Measure::KTries(2)).unwrap()) < 1e-12);
    }

    #[test]
    fn test_multiplicative_leakage() {
        let h = hyper(
            vec![0.25, 0.25, 0.5],
            &[vec![1.0, 0.0], vec![0.0, 1.0], vec![0.0, 1.0]],
        );
        let g = GainFunction::identity(Arc::clone(h.prior()));
        let leak = multiplicative_leakage(&h, &g).unwrap();
        assert!(abs(leak - 1.5) < 1e-12, "expected 0.75 / 0.5, got {}", leak);
        assert!(abs(min_entropy_leakage(&h) - log2(1.5)) < 1e-12);
    }

    #[test]
    fn test_multiplicative_leakage_zero_prior_vulnerability() {
        let h = hyper(vec![0.5, 0.5], &[vec![1.0, 0.0], vec![0.0, 1.0]]);

        // Both vulnerabilities zero: ratio is 1
        let zero = GainFunction::new(Arc::clone(h.prior()), &[vec![0.0, 0.0]]).unwrap();
        assert_eq!(multiplicative_leakage(&h, &zero).unwrap(), 1.0);

        // Prior expected gain 0, but knowing the secret lets the adversary win
        let g = GainFunction::new(
            Arc::clone(h.prior()),
            &[vec![1.0, -1.0], vec![-1.0, 1.0]],
        )
        .unwrap();
        let leak = multiplicative_leakage(&h, &g).unwrap();
        assert!(leak.is_infinite() && leak > 0.0);
    }

    #[test]
    fn test_multiplicative_leakage_is_scale_invariant() {
        let h = hyper(vec![0.5, 0.5], &[vec![1.0, 0.0], vec![0.0, 1.0]]);
        let identity = GainFunction::identity(Arc::clone(h.prior()));
        let tiny = GainFunction::new(
            Arc::clone(h.prior()),
            &[vec![1e-6, 0.0], vec![0.0, 1e-6]],
        )
        .unwrap();

        let expected = multiplicative_leakage(&h, &identity).unwrap();
        assert!(abs(expected - 2.0) < 1e-12);
        let scaled = multiplicative_leakage(&h, &tiny).unwrap();
        assert!(
            abs(scaled - expected) < 1e-9,
            "scaled ratio {} differs from {}",
            scaled,
            expected
        );
    }

    #[test]
    fn test_leakage_rejects_mismatched_prior() {
        let h = hyper(vec![0.5, 0.5], &[vec![1.0, 0.0], vec![0.0, 1.0]]);
        let other = Arc::new(Distribution::new(vec![0.2, 0.8]).unwrap());
        let g = GainFunction::identity(other);
        assert!(matches!(
            multiplicative_leakage(&h, &g),
            Err(QifError::MismatchedPrior(_))
        ));
        assert!(matches!(
            additive_leakage(&h, Measure::Gain(&g)),
            Err(QifError::MismatchedPrior(_))
        ));
    }

    #[test]
    fn test_measure_display() {
        assert_eq!(alloc::format!("{}", Measure::KTries(3)), "3-tries vulnerability");
        assert_eq!(alloc::format!("{}", Measure::Bayes), "Bayes vulnerability");
    }
}
