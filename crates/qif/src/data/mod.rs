//! Text loaders and serializers for the QIF model.
//!
//! Every object is stored as a header line of dimensions followed by its
//! values, separated by whitespace and/or commas:
//!
//! | Object              | Header | Body                              |
//! |---------------------|--------|-----------------------------------|
//! | distribution        | `n`    | `n` probabilities                 |
//! | channel             | `n y`  | `n` rows of `y` probabilities     |
//! | gain function       | `w n`  | `w` rows of `n` gains             |
//!
//! Lines starting with `#` are comments. Line breaks inside the body are not
//! significant, only the number of values is.
//!
//! # Example
//!
//! ```
//! use qif::data::{distribution_to_string, parse_distribution};
//! use qif::{Config, Distribution};
//!
//! let d = parse_distribution("3\n0.25, 0.25, 0.5\n")?;
//! assert_eq!(d.len(), 3);
//! assert_eq!(distribution_to_string(&d, &Config::new().precision(2)), "3\n0.25 0.25 0.50\n");
//! # Ok::<(), qif::data::DataError>(())
//! ```

mod reader;
mod writer;

pub use reader::{
    load_channel, load_distribution, load_gain, parse_channel, parse_distribution, parse_gain,
};
pub use writer::{
    channel_to_string, distribution_to_string, gain_to_string, hyper_to_string, save_channel,
    save_distribution, save_gain, save_hyper, HyperPart,
};

use qif_core::QifError;

/// Errors that can occur while reading or writing model files.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// IO error reading or writing a file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed input at a specific line.
    #[error("Parse error at line {line}: {message}")]
    Parse {
        /// Line number where the error occurred (1-indexed).
        line: usize,
        /// Description of the parse error.
        message: String,
    },

    /// A token that is not a number of the expected kind.
    #[error("Invalid value at line {line}: '{value}'")]
    InvalidValue {
        /// Line number where the invalid value was found (1-indexed).
        line: usize,
        /// The invalid token.
        value: String,
    },

    /// Dimensions in the file disagree with the data or the prior.
    #[error("Dimension mismatch: expected {expected}, found {found}")]
    Dimension {
        /// Expected count.
        expected: usize,
        /// Count actually present.
        found: usize,
    },

    /// The values were read but do not form a valid object.
    #[error(transparent)]
    Model(#[from] QifError),
}
