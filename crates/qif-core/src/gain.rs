//! Gain functions: payoffs of adversary actions for each secret value.

use alloc::format;
use alloc::sync::Arc;
use alloc::vec::Vec;

use rand::Rng;

use crate::distribution::Distribution;
use crate::error::{QifError, Result};
use crate::types::Matrix;

/// An `actions × secrets` gain matrix tied to a prior.
///
/// Entry `(w, x)` is the gain an adversary achieves by taking action `w`
/// when the secret is `x`. Gains may be any finite real; there is no
/// stochastic constraint on rows or columns.
#[derive(Debug, Clone)]
pub struct GainFunction {
    prior: Arc<Distribution>,
    matrix: Matrix,
}

impl GainFunction {
    /// Build a gain function from one row per action.
    ///
    /// # Errors
    ///
    /// [`QifError::InvalidGainFunction`] if there are no actions, a row's
    /// length differs from the prior's number of secrets, or a gain is not
    /// finite.
    pub fn new(prior: Arc<Distribution>, rows: &[Vec<f64>]) -> Result<Self> {
        let secrets = prior.len();
        if let Some(w) = rows.iter().position(|row| row.len() != secrets) {
            return Err(QifError::InvalidGainFunction(format!(
                "action {w} has {} gains but the prior has {secrets} secrets",
                rows[w].len()
            )));
        }
        let matrix = Matrix::from_fn(rows.len(), secrets, |w, x| rows[w][x]);
        Self::from_matrix(prior, matrix)
    }

    /// Build a gain function from an `actions × secrets` matrix.
    ///
    /// # Errors
    ///
    /// Same conditions as [`GainFunction::new`].
    pub fn from_matrix(prior: Arc<Distribution>, matrix: Matrix) -> Result<Self> {
        if matrix.nrows() == 0 {
            return Err(QifError::InvalidGainFunction(
                "a gain function needs at least one action".into(),
            ));
        }
        if matrix.ncols() != prior.len() {
            return Err(QifError::InvalidGainFunction(format!(
                "prior has {} secrets but the matrix has {} columns",
                prior.len(),
                matrix.ncols()
            )));
        }
        if let Some(g) = matrix.iter().find(|g| !g.is_finite()) {
            return Err(QifError::InvalidGainFunction(format!(
                "gain {g} is not finite"
            )));
        }
        Ok(Self { prior, matrix })
    }

    /// A random gain function with `actions` rows and integer gains drawn
    /// uniformly from `[min, max]`.
    ///
    /// # Errors
    ///
    /// [`QifError::InvalidParameters`] if `actions == 0` or `min > max`.
    pub fn random<R: Rng + ?Sized>(
        prior: Arc<Distribution>,
        actions: usize,
        min: i32,
        max: i32,
        rng: &mut R,
    ) -> Result<Self> {
        if actions == 0 {
            return Err(QifError::InvalidParameters(
                "cannot generate a gain function with 0 actions".into(),
            ));
        }
        if min > max {
            return Err(QifError::InvalidParameters(format!(
                "gain bounds are reversed: min {min} > max {max}"
            )));
        }
        let matrix = Matrix::from_fn(actions, prior.len(), |_, _| {
            f64::from(rng.random_range(min..=max))
        });
        Ok(Self { prior, matrix })
    }

    /// The identity gain function: one action per secret, gain 1 for
    /// guessing the secret exactly and 0 otherwise.
    ///
    /// Its g-vulnerability is Bayes vulnerability.
    pub fn identity(prior: Arc<Distribution>) -> Self {
        let n = prior.len();
        Self {
            prior,
            matrix: Matrix::identity(n, n),
        }
    }

    /// The k-tries gain function: one action per `k`-subset of secrets, gain
    /// 1 when the secret is in the subset and 0 otherwise.
    ///
    /// Its g-vulnerability equals the k-tries vulnerability. The number of
    /// actions is `C(n, k)`, so this is only practical for small priors.
    ///
    /// # Errors
    ///
    /// [`QifError::InvalidParameters`] if `k` is not in `1..=n`.
    pub fn k_tries(prior: Arc<Distribution>, k: usize) -> Result<Self> {
        let n = prior.len();
        if k == 0 || k > n {
            return Err(QifError::InvalidParameters(format!(
                "k must be in 1..={n}, got {k}"
            )));
        }
        let subsets = combinations(n, k);
        let mut matrix = Matrix::zeros(subsets.len(), n);
        for (w, subset) in subsets.iter().enumerate() {
            for &x in subset {
                matrix[(w, x)] = 1.0;
            }
        }
        Ok(Self { prior, matrix })
    }

    /// The prior on the secrets this gain function is defined for.
    pub fn prior(&self) -> &Arc<Distribution> {
        &self.prior
    }

    /// Number of actions (rows).
    pub fn actions(&self) -> usize {
        self.matrix.nrows()
    }

    /// Number of secrets (columns).
    pub fn secrets(&self) -> usize {
        self.matrix.ncols()
    }

    /// The `actions × secrets` gain matrix.
    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// Gain of action `w` when the secret is `x`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn gain(&self, w: usize, x: usize) -> f64 {
        self.matrix[(w, x)]
    }
}

/// All `k`-subsets of `0..n` in lexicographic order.
fn combinations(n: usize, k: usize) -> Vec<Vec<usize>> {
    let mut out = Vec::new();
    let mut current: Vec<usize> = (0..k).collect();
    loop {
        out.push(current.clone());
        // Rightmost position that can still advance
        let Some(i) = (0..k).rev().find(|&i| current[i] < n - k + i) else {
            return out;
        };
        current[i] += 1;
        for j in i + 1..k {
            current[j] = current[j - 1] + 1;
        }
    }
}
