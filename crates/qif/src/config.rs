//! Configuration for text output and random generation.

use serde::{Deserialize, Serialize};

use qif_core::constants::{DEFAULT_GAIN_MAX, DEFAULT_GAIN_MIN, DEFAULT_SEED};

/// Separator written between numbers in serialized files.
///
/// Loaders accept either separator regardless of this setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    /// A single space: `0.25 0.75`.
    #[default]
    Space,
    /// A comma: `0.25,0.75`.
    Comma,
}

impl Delimiter {
    /// The separator text.
    pub fn as_str(&self) -> &'static str {
        match self {
            Delimiter::Space => " ",
            Delimiter::Comma => ",",
        }
    }
}

/// Largest supported decimal precision; more digits than an `f64` carries
/// would only print noise.
pub const MAX_PRECISION: usize = 17;

/// Options shared by the serializers and the random generators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Text output
    // =========================================================================

    /// Separator between numbers. Default: space.
    pub delimiter: Delimiter,

    /// Decimal digits written for every number.
    ///
    /// Serialized distributions round-trip only when the accumulated rounding
    /// error stays within `EPS`, so keep this well above 6 for large
    /// objects. Default: 9.
    pub precision: usize,

    // =========================================================================
    // Random generation
    // =========================================================================

    /// Seed for the generators. Default: [`DEFAULT_SEED`].
    pub seed: u64,

    /// Upper bound on generated probabilities. Default: 1.0 (unbounded).
    pub max_prob: f64,

    /// Inclusive integer range for generated gains. Default: `(-5, 5)`.
    pub gain_range: (i32, i32),
}

impl Default for Config {
    fn default() -> Self {
        Self {
            delimiter: Delimiter::Space,
            precision: 9,
            seed: DEFAULT_SEED,
            max_prob: 1.0,
            gain_range: (DEFAULT_GAIN_MIN, DEFAULT_GAIN_MAX),
        }
    }
}

impl Config {
    /// Create with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number separator.
    pub fn delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the decimal precision.
    ///
    /// # Panics
    ///
    /// Panics if `digits > MAX_PRECISION`.
    pub fn precision(mut self, digits: usize) -> Self {
        assert!(
            digits <= MAX_PRECISION,
            "precision must be <= {MAX_PRECISION}"
        );
        self.precision = digits;
        self
    }

    /// Set the generator seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the upper bound on generated probabilities.
    ///
    /// # Panics
    ///
    /// Panics if `p` is not in `(0, 1]`.
    pub fn max_prob(mut self, p: f64) -> Self {
        assert!(p > 0.0 && p <= 1.0, "max_prob must be in (0, 1]");
        self.max_prob = p;
        self
    }

    /// Set the inclusive range of generated gains.
    ///
    /// # Panics
    ///
    /// Panics if `min > max`.
    pub fn gain_range(mut self, min: i32, max: i32) -> Self {
        assert!(min <= max, "gain_range requires min <= max");
        self.gain_range = (min, max);
        self
    }
}
