//! Terminal output formatting with colors.

use colored::Colorize;

use crate::report::MeasureReport;

/// Format a report as an aligned, colored table for the terminal.
///
/// Additive leakage within `EPS` of zero is shown in green, any other
/// leakage in red.
pub fn format_report(report: &MeasureReport) -> String {
    let mut out = String::new();
    let sep = "\u{2500}".repeat(62);

    out.push_str(&sep);
    out.push_str("\n\n");
    out.push_str(&format!(
        "  {} secrets, {} outputs, {} distinct posteriors\n\n",
        report.secrets, report.outputs, report.posteriors
    ));

    out.push_str(&format!(
        "  {:<24} {:>10} {:>10} {:>12}\n",
        "Measure".bold(),
        "Prior".bold(),
        "Posterior".bold(),
        "Leakage".bold()
    ));
    for m in &report.measures {
        let leak = format!("{:+.6}", m.additive_leakage);
        let leak = if m.additive_leakage.abs() < qif_core::EPS {
            leak.green().to_string()
        } else {
            leak.red().to_string()
        };
        out.push_str(&format!(
            "  {:<24} {:>10.6} {:>10.6} {:>12}\n",
            m.name, m.prior, m.posterior, leak
        ));
    }
    out.push('\n');

    out.push_str(&format!(
        "  Min-entropy leakage:  {:.6} bits\n",
        report.min_entropy_leakage
    ));
    out.push_str(&format!(
        "  Mutual information:   {:.6} bits\n",
        report.mutual_information
    ));
    if let Some(ratio) = report.multiplicative_g_leakage {
        let value = if ratio.is_infinite() {
            "unbounded".yellow().to_string()
        } else {
            format!("{ratio:.6}")
        };
        out.push_str(&format!("  Multiplicative g-leakage: {value}\n"));
    }

    out.push('\n');
    out.push_str(&sep);
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::MeasureEntry;

    #[test]
    fn test_format_report_lists_measures() {
        colored::control::set_override(false);
        let report = MeasureReport {
            secrets: 3,
            outputs: 2,
            posteriors: 2,
            measures: vec![MeasureEntry {
                name: "Shannon entropy".into(),
                prior: 1.5,
                posterior: 0.688722,
                additive_leakage: -0.811278,
            }],
            min_entropy_leakage: 0.584963,
            mutual_information: 0.811278,
            multiplicative_g_leakage: Some(f64::INFINITY),
        };
        let text = format_report(&report);
        assert!(text.contains("3 secrets, 2 outputs, 2 distinct posteriors"));
        assert!(text.contains("Shannon entropy"));
        assert!(text.contains("-0.811278"));
        assert!(text.contains("Mutual information:   0.811278 bits"));
        assert!(text.contains("unbounded"));
    }
}
