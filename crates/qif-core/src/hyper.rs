//! Hyper-distributions: distributions on posterior distributions.
//!
//! Running a channel on a prior yields, for every output `y`, a posterior
//! ("inner") distribution on the secrets together with the probability
//! ("outer") that `y` is observed. Construction is staged:
//!
//! 1. joint: `J[x][y] = C[x][y] * π[x]`
//! 2. outer: column sums of `J`
//! 3. inners: `J[x][y] / outer[y]`, or the zero column when `outer[y] == 0`
//! 4. reduction: outputs with the same posterior (within `EPS`) are merged
//!    into one class, and zero-probability outputs are dropped.
//!
//! The reduction builds fresh outer/inner structures from the unreduced
//! ones rather than erasing columns in place.

use alloc::collections::BTreeSet;
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;

use tracing::{debug, trace};

use crate::channel::Channel;
use crate::constants::EPS;
use crate::distribution::Distribution;
use crate::error::{QifError, Result};
use crate::math::{approx_eq, approx_zero};
use crate::types::Matrix;

/// A hyper-distribution derived from a prior and a channel.
///
/// After construction the hyper-distribution is read-only: `outer` and the
/// columns of `inners` are indexed by reduced output (equivalence class),
/// while `joint` keeps one column per original channel output.
#[derive(Debug, Clone)]
pub struct HyperDistribution {
    prior: Arc<Distribution>,
    joint: Matrix,
    outer: Distribution,
    inners: Matrix,
    labels: Vec<BTreeSet<usize>>,
}

/// Outcome of merging equivalent posterior columns.
struct Reduction {
    /// Original column that seeds each class, in class order.
    seeds: Vec<usize>,
    /// Accumulated outer probability of each class.
    outer: Vec<f64>,
    /// Original columns merged into each class.
    members: Vec<BTreeSet<usize>>,
}

impl HyperDistribution {
    /// Build the hyper-distribution of `channel` on `prior`.
    ///
    /// # Errors
    ///
    /// [`QifError::MismatchedPrior`] if `prior` does not match the channel's
    /// own prior (see [`Distribution::matches`]).
    pub fn new(prior: &Arc<Distribution>, channel: &Channel) -> Result<Self> {
        if !prior.matches(channel.prior()) {
            return Err(QifError::MismatchedPrior(
                "the channel was built on a different prior".into(),
            ));
        }
        Ok(Self::build(Arc::clone(prior), channel))
    }

    /// Build the hyper-distribution of `channel` on the prior it was built
    /// with.
    pub fn from_channel(channel: &Channel) -> Self {
        Self::build(Arc::clone(channel.prior()), channel)
    }

    fn build(prior: Arc<Distribution>, channel: &Channel) -> Self {
        let secrets = channel.secrets();
        let outputs = channel.outputs();

        let joint = Matrix::from_fn(secrets, outputs, |x, y| {
            channel.matrix()[(x, y)] * prior[x]
        });

        let outer: Vec<f64> = joint.column_iter().map(|col| col.sum()).collect();

        let inners = Matrix::from_fn(secrets, outputs, |x, y| {
            if outer[y] == 0.0 {
                0.0
            } else {
                joint[(x, y)] / outer[y]
            }
        });

        let reduction = reduce(&inners, &outer);
        let labels = reduction.members.clone();
        let (outer, inners) = reduction.apply(&inners);

        debug!(
            secrets,
            outputs,
            posteriors = labels.len(),
            "hyper-distribution built"
        );

        Self {
            prior,
            joint,
            outer,
            inners,
            labels,
        }
    }

    /// Run the reduction again on an already built hyper-distribution.
    ///
    /// Construction already reduces, so this returns an equal
    /// hyper-distribution; labels of classes merged by a second pass would be
    /// unioned.
    pub fn reduce(&self) -> Self {
        let reduction = reduce(&self.inners, self.outer.probabilities());
        let labels = reduction
            .members
            .iter()
            .map(|members| {
                members
                    .iter()
                    .flat_map(|&k| self.labels[k].iter().copied())
                    .collect()
            })
            .collect();
        let (outer, inners) = reduction.apply(&self.inners);
        Self {
            prior: Arc::clone(&self.prior),
            joint: self.joint.clone(),
            outer,
            inners,
            labels,
        }
    }

    /// The prior on the secrets.
    pub fn prior(&self) -> &Arc<Distribution> {
        &self.prior
    }

    /// The `secrets × outputs` joint matrix, one column per original output.
    pub fn joint(&self) -> &Matrix {
        &self.joint
    }

    /// The outer distribution, one entry per reduced output.
    pub fn outer(&self) -> &Distribution {
        &self.outer
    }

    /// The `secrets × posteriors` matrix of inner distributions.
    ///
    /// Column `j` is the posterior on the secrets given reduced output `j`.
    pub fn inners(&self) -> &Matrix {
        &self.inners
    }

    /// Posterior distribution of reduced output `j`.
    ///
    /// # Panics
    ///
    /// Panics if `j >= self.num_posteriors()`.
    pub fn inner(&self, j: usize) -> Vec<f64> {
        self.inners.column(j).iter().copied().collect()
    }

    /// For each reduced output, the original channel outputs merged into it.
    pub fn labels(&self) -> &[BTreeSet<usize>] {
        &self.labels
    }

    /// Number of posterior distributions (reduced outputs).
    pub fn num_posteriors(&self) -> usize {
        self.outer.len()
    }

    /// Number of secrets.
    pub fn secrets(&self) -> usize {
        self.joint.nrows()
    }

    /// Iterate over `(outer probability, posterior column)` pairs.
    pub fn posteriors(&self) -> impl Iterator<Item = (f64, Vec<f64>)> + '_ {
        self.outer
            .iter()
            .zip(self.inners.column_iter())
            .map(|(p, col)| (p, col.iter().copied().collect()))
    }
}

impl Reduction {
    /// Build the reduced outer distribution and inner matrix.
    fn apply(&self, inners: &Matrix) -> (Distribution, Matrix) {
        let reduced = Matrix::from_fn(inners.nrows(), self.seeds.len(), |x, k| {
            inners[(x, self.seeds[k])]
        });
        (Distribution::from_derived(self.outer.clone()), reduced)
    }
}

/// Whether column `j` is the zero vector within `EPS`.
fn is_zero_column(inners: &Matrix, j: usize) -> bool {
    inners.column(j).iter().all(|&p| approx_zero(p, EPS))
}

/// Whether columns `a` and `b` agree entrywise within `EPS`.
fn columns_approx_eq(inners: &Matrix, a: usize, b: usize) -> bool {
    inners
        .column(a)
        .iter()
        .zip(inners.column(b).iter())
        .all(|(p, q)| approx_eq(*p, *q, EPS))
}

/// Group the columns of `inners` into classes of equal posteriors.
///
/// Columns are scanned left to right. A column not yet absorbed either is
/// a zero column and is dropped, or seeds a new class that absorbs every
/// later column equal to it. Classes are numbered by their seed.
fn reduce(inners: &Matrix, outer: &[f64]) -> Reduction {
    let columns = inners.ncols();
    let mut absorbed = vec![false; columns];
    let mut reduction = Reduction {
        seeds: Vec::new(),
        outer: Vec::new(),
        members: Vec::new(),
    };

    for i in 0..columns {
        if absorbed[i] {
            continue;
        }
        absorbed[i] = true;
        if is_zero_column(inners, i) {
            trace!(output = i, "dropping zero-probability output");
            continue;
        }

        let mut mass = outer[i];
        let mut members = BTreeSet::from([i]);
        for j in i + 1..columns {
            if absorbed[j] {
                continue;
            }
            if is_zero_column(inners, j) {
                trace!(output = j, "dropping zero-probability output");
                absorbed[j] = true;
            } else if columns_approx_eq(inners, i, j) {
                trace!(output = j, into = i, "merging equivalent posterior");
                mass += outer[j];
                members.insert(j);
                absorbed[j] = true;
            }
        }

        reduction.seeds.push(i);
        reduction.outer.push(mass);
        reduction.members.push(members);
    }

    if reduction.seeds.len() < columns {
        debug!(
            before = columns,
            after = reduction.seeds.len(),
            "posterior columns reduced"
        );
    }
    reduction
}
