//! Uncertainty measures: Shannon and guessing entropy.

use alloc::vec::Vec;

use crate::distribution::Distribution;
use crate::hyper::HyperDistribution;
use crate::math::entropy_term;

/// Shannon entropy `-Σ_x π[x] log2 π[x]` in bits, in `[0, log2 n]`.
pub fn shannon_entropy(prior: &Distribution) -> f64 {
    prior.iter().map(entropy_term).sum()
}

/// Expected Shannon entropy of the posteriors,
/// `-Σ_y outer[y] Σ_x inner[x][y] log2 inner[x][y]`.
pub fn posterior_shannon_entropy(hyper: &HyperDistribution) -> f64 {
    hyper
        .outer()
        .iter()
        .zip(hyper.inners().column_iter())
        .map(|(p, col)| p * col.iter().copied().map(entropy_term).sum::<f64>())
        .sum()
}

/// Guessing entropy: the expected number of guesses needed when secrets are
/// tried in decreasing order of probability, `Σ_i (i + 1) · sorted[i]`.
pub fn guessing_entropy(prior: &Distribution) -> f64 {
    ranked_sum(prior.iter())
}

/// Expected guessing entropy over the posteriors,
/// `Σ_y outer[y] · guessingEntropy(inner[·][y])`.
///
/// After seeing output `y` the adversary guesses in decreasing order of
/// the posterior probabilities for `y`, so the ranks are taken within each
/// inner distribution.
pub fn posterior_guessing_entropy(hyper: &HyperDistribution) -> f64 {
    hyper
        .outer()
        .iter()
        .zip(hyper.inners().column_iter())
        .map(|(p, col)| p * ranked_sum(col.iter().copied()))
        .sum()
}

/// `Σ_i (i + 1) · v[i]` with `v` sorted in decreasing order.
fn ranked_sum<I: Iterator<Item = f64>>(values: I) -> f64 {
    let mut sorted: Vec<f64> = values.collect();
    sorted.sort_by(|a, b| b.total_cmp(a));
    sorted
        .iter()
        .enumerate()
        .map(|(i, p)| (i + 1) as f64 * p)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::Channel;
    use crate::math::{abs, log2};
    use alloc::sync::Arc;
    use alloc::vec;

    #[test]
    fn test_shannon_entropy_bounds() {
        let uniform = Distribution::uniform(8).unwrap();
        assert!(abs(shannon_entropy(&uniform) - 3.0) < 1e-12);

        let point = Distribution::new(vec![0.0, 1.0, 0.0]).unwrap();
        assert_eq!(shannon_entropy(&point), 0.0);

        let skewed = Distribution::new(vec![0.5, 0.25, 0.25]).unwrap();
        assert!(abs(shannon_entropy(&skewed) - 1.5) < 1e-12);
        assert!(shannon_entropy(&skewed) < log2(3.0));
    }

    #[test]
    fn test_guessing_entropy() {
        let d = Distribution::new(vec![0.2, 0.5, 0.3]).unwrap();
        // 1·0.5 + 2·0.3 + 3·0.2
        assert!(abs(guessing_entropy(&d) - 1.7) < 1e-12);

        let uniform = Distribution::uniform(4).unwrap();
        assert!(abs(guessing_entropy(&uniform) - 2.5) < 1e-12);
    }

    #[test]
    fn test_posterior_entropies_of_transparent_channel() {
        let prior = Arc::new(Distribution::new(vec![0.1, 0.3, 0.6]).unwrap());
        let c = Channel::new(
            prior,
            &[vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0], vec![0.0, 0.0, 1.0]],
        )
        .unwrap();
        let h = HyperDistribution::from_channel(&c);
        assert!(abs(posterior_shannon_entropy(&h)) < 1e-12);
        assert!(abs(posterior_guessing_entropy(&h) - 1.0) < 1e-12);
    }

    #[test]
    fn test_posterior_entropies_of_opaque_channel() {
        let prior = Arc::new(Distribution::new(vec![0.1, 0.3, 0.6]).unwrap());
        let c = Channel::new(
            Arc::clone(&prior),
            &[vec![0.5, 0.5], vec![0.5, 0.5], vec![0.5, 0.5]],
        )
        .unwrap();
        let h = HyperDistribution::from_channel(&c);
        assert_eq!(h.num_posteriors(), 1);
        assert!(abs(posterior_shannon_entropy(&h) - shannon_entropy(&prior)) < 1e-9);
        assert!(abs(posterior_guessing_entropy(&h) - guessing_entropy(&prior)) < 1e-9);
    }

    #[test]
    fn test_posterior_guessing_entropy_ranks_within_each_posterior() {
        let prior = Arc::new(Distribution::uniform(2).unwrap());
        // Outputs: [0.8, 0.2] posterior with mass 0.5, [0.2, 0.8] with mass 0.5
        let c = Channel::new(prior, &[vec![0.8, 0.2], vec![0.2, 0.8]]).unwrap();
        let h = HyperDistribution::from_channel(&c);
        // Each posterior: 1·0.8 + 2·0.2 = 1.2
        assert!(abs(posterior_guessing_entropy(&h) - 1.2) < 1e-12);
    }
}
