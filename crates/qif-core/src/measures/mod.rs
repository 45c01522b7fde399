//! Measure library: vulnerability, entropy and leakage.
//!
//! Every function is pure: it reads its arguments and never mutates them.
//! Prior measures take a [`Distribution`](crate::Distribution) (or a gain
//! function, which carries its prior); posterior measures take a
//! [`HyperDistribution`](crate::HyperDistribution) and average the prior
//! measure over the posteriors, weighted by the outer distribution.

mod entropy;
mod leakage;
mod vulnerability;

#[cfg(test)]
mod proptests;

pub use entropy::{
    guessing_entropy, posterior_guessing_entropy, posterior_shannon_entropy, shannon_entropy,
};
pub use leakage::{
    additive_leakage, min_entropy_leakage, multiplicative_leakage, mutual_information, Measure,
};
pub use vulnerability::{
    bayes_vulnerability, g_vulnerability, k_tries, posterior_bayes_vulnerability,
    posterior_g_vulnerability, posterior_k_tries,
};
