//! Parsing of the text formats.

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use qif_core::{Channel, Distribution, GainFunction, Matrix};

use super::DataError;

/// Numeric tokens of a file, each tagged with its 1-indexed line.
struct Tokens<'a> {
    tokens: Vec<(usize, &'a str)>,
    pos: usize,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        let tokens = text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim_start().starts_with('#'))
            .flat_map(|(i, line)| {
                line.split(|c: char| c == ',' || c.is_whitespace())
                    .filter(|t| !t.is_empty())
                    .map(move |t| (i + 1, t))
            })
            .collect();
        Self { tokens, pos: 0 }
    }

    fn last_line(&self) -> usize {
        self.tokens.last().map_or(1, |&(line, _)| line)
    }

    fn next_count(&mut self, what: &str) -> Result<usize, DataError> {
        let &(line, token) = self.tokens.get(self.pos).ok_or_else(|| DataError::Parse {
            line: self.last_line(),
            message: format!("missing {what}"),
        })?;
        self.pos += 1;
        token.parse().map_err(|_| DataError::InvalidValue {
            line,
            value: token.to_string(),
        })
    }

    /// Read exactly `count` reals and then require the input to end.
    fn values(&mut self, count: usize) -> Result<Vec<f64>, DataError> {
        let remaining = &self.tokens[self.pos..];
        if remaining.len() != count {
            return Err(DataError::Dimension {
                expected: count,
                found: remaining.len(),
            });
        }
        let values = remaining
            .iter()
            .map(|&(line, token)| {
                token.parse::<f64>().map_err(|_| DataError::InvalidValue {
                    line,
                    value: token.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.pos = self.tokens.len();
        Ok(values)
    }
}

/// Number of entries of a `rows × cols` matrix.
fn cells(rows: usize, cols: usize) -> Result<usize, DataError> {
    rows.checked_mul(cols).ok_or_else(|| DataError::Parse {
        line: 1,
        message: format!("matrix {rows} x {cols} is too large"),
    })
}

/// Parse a distribution: `n` followed by `n` probabilities.
///
/// # Errors
///
/// [`DataError::Dimension`] if the number of values is not `n`;
/// [`DataError::Model`] if they are not a probability distribution.
pub fn parse_distribution(text: &str) -> Result<Distribution, DataError> {
    let mut tokens = Tokens::new(text);
    let n = tokens.next_count("size n")?;
    let values = tokens.values(n)?;
    Ok(Distribution::new(values)?)
}

/// Parse a channel on `prior`: `n y` followed by an `n × y` matrix.
///
/// # Errors
///
/// [`DataError::Dimension`] if `n` differs from the prior size or the
/// number of values is not `n · y`; [`DataError::Model`] if a row is not a
/// distribution.
pub fn parse_channel(text: &str, prior: &Arc<Distribution>) -> Result<Channel, DataError> {
    let mut tokens = Tokens::new(text);
    let n = tokens.next_count("number of secrets n")?;
    let y = tokens.next_count("number of outputs y")?;
    if n != prior.len() {
        return Err(DataError::Dimension {
            expected: prior.len(),
            found: n,
        });
    }
    let values = tokens.values(cells(n, y)?)?;
    let matrix = Matrix::from_row_slice(n, y, &values);
    Ok(Channel::from_matrix(Arc::clone(prior), matrix)?)
}

/// Parse a gain function on `prior`: `w n` followed by a `w × n` matrix.
///
/// # Errors
///
/// [`DataError::Dimension`] if `n` differs from the prior size or the
/// number of values is not `w · n`; [`DataError::Model`] if there are no
/// actions or a gain is not finite.
pub fn parse_gain(text: &str, prior: &Arc<Distribution>) -> Result<GainFunction, DataError> {
    let mut tokens = Tokens::new(text);
    let w = tokens.next_count("number of actions w")?;
    let n = tokens.next_count("number of secrets n")?;
    if n != prior.len() {
        return Err(DataError::Dimension {
            expected: prior.len(),
            found: n,
        });
    }
    let values = tokens.values(cells(w, n)?)?;
    let matrix = Matrix::from_row_slice(w, n, &values);
    Ok(GainFunction::from_matrix(Arc::clone(prior), matrix)?)
}

/// Load a distribution from a file. See [`parse_distribution`].
pub fn load_distribution(path: &Path) -> Result<Distribution, DataError> {
    let text = std::fs::read_to_string(path)?;
    let d = parse_distribution(&text)?;
    debug!(path = %path.display(), n = d.len(), "loaded distribution");
    Ok(d)
}

/// Load a channel on `prior` from a file. See [`parse_channel`].
pub fn load_channel(path: &Path, prior: &Arc<Distribution>) -> Result<Channel, DataError> {
    let text = std::fs::read_to_string(path)?;
    let c = parse_channel(&text, prior)?;
    debug!(
        path = %path.display(),
        secrets = c.secrets(),
        outputs = c.outputs(),
        "loaded channel"
    );
    Ok(c)
}

/// Load a gain function on `prior` from a file. See [`parse_gain`].
pub fn load_gain(path: &Path, prior: &Arc<Distribution>) -> Result<GainFunction, DataError> {
    let text = std::fs::read_to_string(path)?;
    let g = parse_gain(&text, prior)?;
    debug!(
        path = %path.display(),
        actions = g.actions(),
        secrets = g.secrets(),
        "loaded gain function"
    );
    Ok(g)
}
