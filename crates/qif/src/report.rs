//! All measures of one hyper-distribution, collected for display.

use serde::{Deserialize, Serialize};

use qif_core::measures::{
    additive_leakage, min_entropy_leakage, multiplicative_leakage, mutual_information, Measure,
};
use qif_core::{GainFunction, HyperDistribution, Result};

/// Prior value, posterior value and additive leakage of one measure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasureEntry {
    /// Human-readable measure name, e.g. `"Bayes vulnerability"`.
    pub name: String,
    /// Value on the prior.
    pub prior: f64,
    /// Expected value over the posteriors.
    pub posterior: f64,
    /// `posterior - prior`.
    pub additive_leakage: f64,
}

/// Summary of a hyper-distribution: its shape and every measure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasureReport {
    /// Number of secrets.
    pub secrets: usize,
    /// Number of channel outputs before reduction.
    pub outputs: usize,
    /// Number of distinct posteriors after reduction.
    pub posteriors: usize,

    /// Bayes, Shannon, guessing, k-tries and (if given) g-vulnerability.
    pub measures: Vec<MeasureEntry>,

    /// `log2(V_post / V_prior)` for Bayes vulnerability, in bits.
    pub min_entropy_leakage: f64,
    /// Prior minus expected posterior Shannon entropy, in bits.
    pub mutual_information: f64,

    /// Posterior over prior g-vulnerability, absent without a gain
    /// function. An unbounded ratio serializes as the string `"inf"`.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "ratio")]
    pub multiplicative_g_leakage: Option<f64>,
}

/// JSON has no infinity, so `f64::INFINITY` is written as `"inf"`.
mod ratio {
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Label(String),
    }

    pub fn serialize<S: Serializer>(value: &Option<f64>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) if *v == f64::INFINITY => s.serialize_some("inf"),
            other => other.serialize(s),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        match Option::<Repr>::deserialize(d)? {
            None => Ok(None),
            Some(Repr::Number(v)) => Ok(Some(v)),
            Some(Repr::Label(s)) if s == "inf" => Ok(Some(f64::INFINITY)),
            Some(Repr::Label(s)) => Err(de::Error::custom(format!("invalid ratio '{s}'"))),
        }
    }
}

impl MeasureReport {
    /// Compute every measure of `hyper`, with k-tries vulnerability for `k`
    /// guesses and g-measures when a gain function is given.
    ///
    /// # Errors
    ///
    /// [`QifError::InvalidParameters`](qif_core::QifError::InvalidParameters)
    /// if `k` is not in `1..=n`;
    /// [`QifError::MismatchedPrior`](qif_core::QifError::MismatchedPrior) if
    /// `gain` is on another prior.
    pub fn compute(
        hyper: &HyperDistribution,
        gain: Option<&GainFunction>,
        k: usize,
    ) -> Result<Self> {
        let mut kinds = vec![
            Measure::Bayes,
            Measure::Shannon,
            Measure::Guessing,
            Measure::KTries(k),
        ];
        kinds.extend(gain.map(Measure::Gain));

        let measures = kinds
            .into_iter()
            .map(|m| -> Result<MeasureEntry> {
                let prior = m.prior_value(hyper)?;
                let posterior = m.posterior_value(hyper)?;
                Ok(MeasureEntry {
                    name: m.to_string(),
                    prior,
                    posterior,
                    additive_leakage: additive_leakage(hyper, m)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let multiplicative_g_leakage = gain
            .map(|g| multiplicative_leakage(hyper, g))
            .transpose()?;

        Ok(Self {
            secrets: hyper.secrets(),
            outputs: hyper.joint().ncols(),
            posteriors: hyper.num_posteriors(),
            measures,
            min_entropy_leakage: min_entropy_leakage(hyper),
            mutual_information: mutual_information(hyper),
            multiplicative_g_leakage,
        })
    }

    /// Look up a measure by its name.
    pub fn get(&self, name: &str) -> Option<&MeasureEntry> {
        self.measures.iter().find(|m| m.name == name)
    }
}
