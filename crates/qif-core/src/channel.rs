//! Information-theoretic channels from secrets to observable outputs.

use alloc::format;
use alloc::sync::Arc;
use alloc::vec::Vec;

use rand::Rng;
use tracing::debug;

use crate::distribution::{check_split_parameters, residual_split, Distribution};
use crate::error::{QifError, Result};
use crate::types::Matrix;

/// A row-stochastic channel matrix tied to a prior on its secrets.
///
/// Entry `(x, y)` is the conditional probability `p(y | x)` of observing
/// output `y` when the secret is `x`, so every row is itself a probability
/// distribution. The prior is shared, not owned: several channels and gain
/// functions may point at the same [`Distribution`].
#[derive(Debug, Clone)]
pub struct Channel {
    prior: Arc<Distribution>,
    matrix: Matrix,
}

impl Channel {
    /// Check that every row is a probability distribution.
    pub fn is_channel(rows: &[Vec<f64>]) -> bool {
        rows.iter().all(|row| Distribution::validate(row))
    }

    /// Build a channel from one row per secret.
    ///
    /// # Errors
    ///
    /// [`QifError::InvalidChannel`] if the number of rows differs from the
    /// prior's number of secrets, rows have different lengths or no
    /// outputs, or any row fails [`Distribution::validate`].
    pub fn new(prior: Arc<Distribution>, rows: &[Vec<f64>]) -> Result<Self> {
        if rows.len() != prior.len() {
            return Err(QifError::InvalidChannel(format!(
                "prior has {} secrets but the matrix has {} rows",
                prior.len(),
                rows.len()
            )));
        }
        let outputs = rows.first().map_or(0, Vec::len);
        if let Some(i) = rows.iter().position(|row| row.len() != outputs) {
            return Err(QifError::InvalidChannel(format!(
                "row {i} has {} outputs, expected {outputs}",
                rows[i].len()
            )));
        }
        let matrix = Matrix::from_fn(rows.len(), outputs, |i, j| rows[i][j]);
        Self::from_matrix(prior, matrix)
    }

    /// Build a channel from a `secrets × outputs` matrix.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Channel::new`].
    pub fn from_matrix(prior: Arc<Distribution>, matrix: Matrix) -> Result<Self> {
        if matrix.nrows() != prior.len() {
            return Err(QifError::InvalidChannel(format!(
                "prior has {} secrets but the matrix has {} rows",
                prior.len(),
                matrix.nrows()
            )));
        }
        if matrix.ncols() == 0 {
            return Err(QifError::InvalidChannel(
                "a channel needs at least one output".into(),
            ));
        }
        for (i, row) in matrix.row_iter().enumerate() {
            let row: Vec<f64> = row.iter().copied().collect();
            if !Distribution::validate(&row) {
                return Err(QifError::InvalidChannel(format!(
                    "row {i} is not a probability distribution"
                )));
            }
        }
        debug!(
            secrets = matrix.nrows(),
            outputs = matrix.ncols(),
            "channel built"
        );
        Ok(Self { prior, matrix })
    }

    /// A random channel with `outputs` columns.
    ///
    /// Each row is drawn independently by residual splitting with entries
    /// bounded by `max_prob` (see [`Distribution::random`]).
    ///
    /// # Errors
    ///
    /// [`QifError::InvalidParameters`] if `outputs == 0`, `max_prob` is not
    /// in `(0, 1]`, or `max_prob * outputs < 1`.
    pub fn random<R: Rng + ?Sized>(
        prior: Arc<Distribution>,
        outputs: usize,
        max_prob: f64,
        rng: &mut R,
    ) -> Result<Self> {
        check_split_parameters(outputs, max_prob, "outputs")?;
        let secrets = prior.len();
        let mut matrix = Matrix::zeros(secrets, outputs);
        for i in 0..secrets {
            for (j, p) in residual_split(outputs, max_prob, rng).into_iter().enumerate() {
                matrix[(i, j)] = p;
            }
        }
        Ok(Self { prior, matrix })
    }

    /// The prior on the channel's secrets.
    pub fn prior(&self) -> &Arc<Distribution> {
        &self.prior
    }

    /// Number of secrets (rows).
    pub fn secrets(&self) -> usize {
        self.matrix.nrows()
    }

    /// Number of outputs (columns).
    pub fn outputs(&self) -> usize {
        self.matrix.ncols()
    }

    /// The `secrets × outputs` channel matrix.
    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// Output distribution for secret `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.secrets()`.
    pub fn row(&self, i: usize) -> Vec<f64> {
        self.matrix.row(i).iter().copied().collect()
    }
}
