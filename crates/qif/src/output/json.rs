//! JSON serialization for measure reports.

use crate::report::MeasureReport;

/// Serialize a report to a compact JSON string.
///
/// # Errors
///
/// Returns an error if serialization fails (should not happen for
/// `MeasureReport`).
pub fn to_json(report: &MeasureReport) -> Result<String, serde_json::Error> {
    serde_json::to_string(report)
}

/// Serialize a report to a pretty-printed JSON string.
///
/// # Errors
///
/// Returns an error if serialization fails (should not happen for
/// `MeasureReport`).
pub fn to_json_pretty(report: &MeasureReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::MeasureEntry;

    fn make_report(multiplicative: Option<f64>) -> MeasureReport {
        MeasureReport {
            secrets: 2,
            outputs: 2,
            posteriors: 2,
            measures: vec![MeasureEntry {
                name: "Bayes vulnerability".into(),
                prior: 0.5,
                posterior: 1.0,
                additive_leakage: 0.5,
            }],
            min_entropy_leakage: 1.0,
            mutual_information: 1.0,
            multiplicative_g_leakage: multiplicative,
        }
    }

    #[test]
    fn test_json_contains_fields() {
        let json = to_json(&make_report(Some(2.0))).unwrap();
        assert!(json.contains("\"secrets\":2"));
        assert!(json.contains("\"Bayes vulnerability\""));
        assert!(json.contains("\"multiplicative_g_leakage\":2.0"));
    }

    #[test]
    fn test_json_omits_missing_gain() {
        let json = to_json(&make_report(None)).unwrap();
        assert!(!json.contains("multiplicative_g_leakage"));
    }

    #[test]
    fn test_json_infinite_leakage_roundtrip() {
        let report = make_report(Some(f64::INFINITY));
        let json = to_json(&report).unwrap();
        assert!(json.contains("\"multiplicative_g_leakage\":\"inf\""));
        let parsed: MeasureReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.multiplicative_g_leakage, Some(f64::INFINITY));
    }

    #[test]
    fn test_json_missing_gain_roundtrip() {
        let parsed: MeasureReport = serde_json::from_str(&to_json(&make_report(None)).unwrap()).unwrap();
        assert_eq!(parsed.multiplicative_g_leakage, None);
    }

    #[test]
    fn test_json_rejects_unknown_ratio_label() {
        let json = to_json(&make_report(Some(1.0)))
            .unwrap()
            .replace("\"multiplicative_g_leakage\":1.0", "\"multiplicative_g_leakage\":\"nan\"");
        assert!(serde_json::from_str::<MeasureReport>(&json).is_err());
    }

    #[test]
    fn test_json_roundtrip() {
        let report = make_report(Some(1.5));
        let parsed: MeasureReport = serde_json::from_str(&to_json_pretty(&report).unwrap()).unwrap();
        assert_eq!(parsed, report);
    }
}
