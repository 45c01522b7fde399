//! Property-based tests for the measures and the hyper-distribution
//! invariants they rely on.

use alloc::sync::Arc;
use alloc::vec::Vec;

use proptest::prelude::*;

use super::*;
use crate::math::{abs, log2};
use crate::{Channel, Distribution, GainFunction, HyperDistribution};

const TOL: f64 = 1e-9;

/// Scale non-negative weights to sum to 1; an all-zero vector becomes a
/// point mass on the first entry.
fn normalize(mut weights: Vec<f64>) -> Vec<f64> {
    let sum: f64 = weights.iter().sum();
    if sum <= 0.0 {
        weights.iter_mut().for_each(|w| *w = 0.0);
        weights[0] = 1.0;
    } else {
        weights.iter_mut().for_each(|w| *w /= sum);
    }
    weights
}

/// Weights with frequent exact zeros.
fn weights(len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(prop_oneof![Just(0.0), 0.01f64..1.0], len)
}

/// Small integer weights, so that equal posterior columns are common.
fn coarse_weights(len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec((0u8..3).prop_map(f64::from), len)
}

fn distribution_strategy() -> impl Strategy<Value = Distribution> {
    (1usize..8)
        .prop_flat_map(weights)
        .prop_map(|w| Distribution::new(normalize(w)).unwrap())
}

/// A prior together with a channel of `1..6` outputs on it.
fn hyper_strategy() -> impl Strategy<Value = HyperDistribution> {
    (1usize..6, 1usize..6)
        .prop_flat_map(|(n, y)| {
            (
                weights(n),
                prop::collection::vec(prop_oneof![weights(y), coarse_weights(y)], n),
            )
        })
        .prop_map(|(prior, rows)| {
            let prior = Arc::new(Distribution::new(normalize(prior)).unwrap());
            let rows: Vec<Vec<f64>> = rows.into_iter().map(normalize).collect();
            HyperDistribution::from_channel(&Channel::new(prior, &rows).unwrap())
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// 1/n <= V(π) <= 1
    #[test]
    fn prop_bayes_vulnerability_bounds(d in distribution_strategy()) {
        let v = bayes_vulnerability(&d);
        prop_assert!(v >= 1.0 / d.len() as f64 - TOL, "V = {} below 1/n", v);
        prop_assert!(v <= 1.0 + TOL);
    }

    /// 0 <= H(π) <= log2 n
    #[test]
    fn prop_shannon_entropy_bounds(d in distribution_strategy()) {
        let h = shannon_entropy(&d);
        prop_assert!(h >= -TOL);
        prop_assert!(h <= log2(d.len() as f64) + TOL, "H = {} above log2 n", h);
        if d.iter().any(|p| p == 1.0) {
            prop_assert!(abs(h) < TOL);
        }
    }

    /// Guessing entropy lies between 1 and (n + 1) / 2.
    #[test]
    fn prop_guessing_entropy_bounds(d in distribution_strategy()) {
        let g = guessing_entropy(&d);
        prop_assert!(g >= 1.0 - TOL);
        prop_assert!(g <= (d.len() as f64 + 1.0) / 2.0 + TOL);
    }

    /// Observing the output never decreases Bayes vulnerability.
    #[test]
    fn prop_posterior_bayes_not_below_prior(h in hyper_strategy()) {
        let prior = bayes_vulnerability(h.prior());
        let post = posterior_bayes_vulnerability(&h);
        prop_assert!(post >= prior - TOL, "posterior {} < prior {}", post, prior);
        prop_assert!(min_entropy_leakage(&h) >= -TOL);
    }

    /// Observing the output never increases expected Shannon entropy.
    #[test]
    fn prop_posterior_shannon_not_above_prior(h in hyper_strategy()) {
        let prior = shannon_entropy(h.prior());
        let post = posterior_shannon_entropy(&h);
        prop_assert!(post <= prior + TOL, "posterior {} > prior {}", post, prior);
        prop_assert!(mutual_information(&h) >= -TOL);
    }

    /// Posterior g-vulnerability dominates prior g-vulnerability for any gain.
    #[test]
    fn prop_g_leakage_non_negative(
        h in hyper_strategy(),
        gains in prop::collection::vec(-5.0f64..5.0, 1..30),
    ) {
        let n = h.secrets();
        let rows: Vec<Vec<f64>> = gains.chunks(n).filter(|c| c.len() == n).map(<[f64]>::to_vec).collect();
        prop_assume!(!rows.is_empty());
        let g = GainFunction::new(Arc::clone(h.prior()), &rows).unwrap();
        let leak = additive_leakage(&h, Measure::Gain(&g)).unwrap();
        prop_assert!(leak >= -TOL, "g-leakage {} is negative", leak);
    }

    /// Outer sums to one and every posterior is a distribution.
    #[test]
    fn prop_hyper_is_consistent(h in hyper_strategy()) {
        let sum: f64 = h.outer().iter().sum();
        prop_assert!(abs(sum - 1.0) < TOL, "outer sums to {}", sum);
        prop_assert_eq!(h.labels().len(), h.num_posteriors());
        prop_assert_eq!(h.inners().ncols(), h.num_posteriors());
        for j in 0..h.num_posteriors() {
            prop_assert!(Distribution::validate(&h.inner(j)), "posterior {} invalid", j);
        }
    }

    /// Each class collects exactly the joint mass of the outputs merged into it.
    #[test]
    fn prop_labels_account_for_joint_mass(h in hyper_strategy()) {
        for (k, members) in h.labels().iter().enumerate() {
            let mass: f64 = members.iter().map(|&y| h.joint().column(y).sum()).sum();
            prop_assert!(abs(mass - h.outer()[k]) < TOL);
        }
        // Outputs that appear in no class carry no probability
        for y in 0..h.joint().ncols() {
            if !h.labels().iter().any(|m| m.contains(&y)) {
                prop_assert!(h.joint().column(y).sum() <= crate::EPS);
            }
        }
    }

    /// A second reduction pass changes nothing.
    #[test]
    fn prop_reduction_is_idempotent(h in hyper_strategy()) {
        let again = h.reduce();
        prop_assert_eq!(again.labels(), h.labels());
        prop_assert_eq!(again.inners(), h.inners());
        prop_assert!(again.outer().approx_eq(h.outer()));
    }

    /// No two reduced posteriors remain equal.
    #[test]
    fn prop_reduced_posteriors_are_distinct(h in hyper_strategy()) {
        for a in 0..h.num_posteriors() {
            for b in a + 1..h.num_posteriors() {
                prop_assert!(!crate::math::slices_approx_eq(&h.inner(a), &h.inner(b)));
            }
        }
    }
}
