//! Serialization to the text formats read by the loaders.

use std::fmt::Write as _;
use std::path::Path;

use tracing::debug;

use qif_core::{Channel, Distribution, GainFunction, HyperDistribution, Matrix};

use super::DataError;
use crate::config::Config;

/// Which part of a hyper-distribution to serialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HyperPart {
    /// The `n × y` joint matrix, in channel layout (`n y` header).
    Joint,
    /// The outer distribution, in distribution layout (`k` header).
    Outer,
    /// The `n × k` matrix of posteriors, one per column (`n k` header).
    Inners,
}

impl HyperPart {
    /// Lowercase name used in file names and on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            HyperPart::Joint => "joint",
            HyperPart::Outer => "outer",
            HyperPart::Inners => "inners",
        }
    }
}

fn push_row<I: IntoIterator<Item = f64>>(out: &mut String, values: I, config: &Config) {
    let sep = config.delimiter.as_str();
    let prec = config.precision;
    for (i, v) in values.into_iter().enumerate() {
        if i > 0 {
            out.push_str(sep);
        }
        // Writing into a String cannot fail
        let _ = write!(out, "{v:.prec$}");
    }
    out.push('\n');
}

fn push_header(out: &mut String, dims: &[usize], config: &Config) {
    let sep = config.delimiter.as_str();
    let header: Vec<String> = dims.iter().map(usize::to_string).collect();
    out.push_str(&header.join(sep));
    out.push('\n');
}

fn matrix_to_string(matrix: &Matrix, config: &Config) -> String {
    let mut out = String::new();
    push_header(&mut out, &[matrix.nrows(), matrix.ncols()], config);
    for row in matrix.row_iter() {
        push_row(&mut out, row.iter().copied(), config);
    }
    out
}

/// Serialize a distribution: `n` then the probabilities on one line.
pub fn distribution_to_string(distribution: &Distribution, config: &Config) -> String {
    let mut out = String::new();
    push_header(&mut out, &[distribution.len()], config);
    push_row(&mut out, distribution.iter(), config);
    out
}

/// Serialize a channel: `n y` then one line per secret.
pub fn channel_to_string(channel: &Channel, config: &Config) -> String {
    matrix_to_string(channel.matrix(), config)
}

/// Serialize a gain function: `w n` then one line per action.
pub fn gain_to_string(gain: &GainFunction, config: &Config) -> String {
    matrix_to_string(gain.matrix(), config)
}

/// Serialize one part of a hyper-distribution.
///
/// The outer part is a distribution file and the joint part has the shape
/// of a channel file, so both can be loaded back; the inners are written in
/// the same `rows cols` layout.
pub fn hyper_to_string(hyper: &HyperDistribution, part: HyperPart, config: &Config) -> String {
    match part {
        HyperPart::Joint => matrix_to_string(hyper.joint(), config),
        HyperPart::Outer => distribution_to_string(hyper.outer(), config),
        HyperPart::Inners => matrix_to_string(hyper.inners(), config),
    }
}

fn save(path: &Path, text: &str, what: &str) -> Result<(), DataError> {
    std::fs::write(path, text)?;
    debug!(path = %path.display(), bytes = text.len(), "saved {what}");
    Ok(())
}

/// Write [`distribution_to_string`] to `path`.
pub fn save_distribution(
    path: &Path,
    distribution: &Distribution,
    config: &Config,
) -> Result<(), DataError> {
    save(path, &distribution_to_string(distribution, config), "distribution")
}

/// Write [`channel_to_string`] to `path`.
pub fn save_channel(path: &Path, channel: &Channel, config: &Config) -> Result<(), DataError> {
    save(path, &channel_to_string(channel, config), "channel")
}

/// Write [`gain_to_string`] to `path`.
pub fn save_gain(path: &Path, gain: &GainFunction, config: &Config) -> Result<(), DataError> {
    save(path, &gain_to_string(gain, config), "gain function")
}

/// Write [`hyper_to_string`] to `path`.
pub fn save_hyper(
    path: &Path,
    hyper: &HyperDistribution,
    part: HyperPart,
    config: &Config,
) -> Result<(), DataError> {
    save(path, &hyper_to_string(hyper, part, config), part.name())
}
