//! Report rendering for ANOVA results.
//!
//! An explicit collaborator over [`AnovaResult`]: computation never prints,
//! rendering never computes.

use std::fmt::Write;

use colored::Colorize;

use crate::anova::{AnovaResult, Conclusion, ALPHA};

const H0: &str = "H₀: All group means are equal (μ₁ = μ₂ = ... = μₖ).";
const H1: &str = "H₁: At least one group mean is different.";

/// The fixed conclusion sentence for a decision.
#[must_use]
pub const fn conclusion_sentence(conclusion: Conclusion) -> &'static str {
    match conclusion {
        Conclusion::RejectNull => {
            "Reject the null hypothesis (H₀). There is a statistically significant \
             difference between at least two group means."
        }
        Conclusion::FailToRejectNull => {
            "Fail to reject the null hypothesis (H₀). There is no statistically \
             significant difference between the group means."
        }
    }
}

fn title(result: &AnovaResult) -> String {
    format!(
        "One-way ANOVA: {} by {}",
        result.variable_column, result.group_column
    )
}

/// Sums of squares, mean squares and F values print with 4 decimal places,
/// the p-value with 10; an infinite F statistic prints as `inf`.
fn result_lines(result: &AnovaResult) -> Vec<String> {
    vec![
        format!("Group column: {}", result.group_column),
        format!("Variable column: {}", result.variable_column),
        format!("Groups: {}", result.groups.join(", ")),
        format!("SSB (between groups): {:.4}", result.ssb),
        format!("SSW (within groups): {:.4}", result.ssw),
        format!("SST (total): {:.4}", result.sst),
        format!("df between: {}", result.df_between),
        format!("df within: {}", result.df_within),
        format!("MSB: {:.4}", result.msb),
        format!("MSW: {:.4}", result.msw),
        format!("F statistic: {:.4}", result.f_statistic),
        format!("p-value: {:.10}", result.p_value),
        format!("F critical (α = {ALPHA}): {:.4}", result.f_critical),
    ]
}

/// Renders the full report as plain text: hypotheses, results, conclusion.
#[must_use]
pub fn render_text(result: &AnovaResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", title(result));
    let _ = writeln!(out);
    let _ = writeln!(out, "Hypotheses");
    let _ = writeln!(out, "  {H0}");
    let _ = writeln!(out, "  {H1}");
    let _ = writeln!(out);
    let _ = writeln!(out, "Results");
    for line in result_lines(result) {
        let _ = writeln!(out, "  {line}");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Conclusion");
    let _ = writeln!(out, "  {}", conclusion_sentence(result.conclusion()));
    out
}

/// Prints the report to stdout with terminal styling: bold title, cyan
/// section headers, a green or red conclusion line.
pub fn print_report(result: &AnovaResult) {
    println!("{}", title(result).bold());
    println!("{}", "=".repeat(60));
    println!();
    println!("{}", "Hypotheses".cyan());
    println!("  {H0}");
    println!("  {H1}");
    println!();
    println!("{}", "Results".cyan());
    for line in result_lines(result) {
        println!("  {line}");
    }
    println!();
    println!("{}", "Conclusion".cyan());
    let sentence = conclusion_sentence(result.conclusion());
    match result.conclusion() {
        Conclusion::RejectNull => println!("  {} {}", "✓".green(), sentence.green()),
        Conclusion::FailToRejectNull => println!("  {} {}", "✗".red(), sentence.red()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(p_value: f64, f_statistic: f64) -> AnovaResult {
        AnovaResult {
            group_column: "group".to_string(),
            variable_column: "score".to_string(),
            groups: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            ssb: 54.0,
            ssw: 6.0,
            sst: 60.0,
            df_between: 2,
            df_within: 6,
            msb: 27.0,
            msw: 1.0,
            f_statistic,
            p_value,
            f_critical: 5.143_252_849_784_719,
        }
    }

    #[test]
    fn test_report_lists_every_figure() {
        let report = render_text(&fixture(0.001, 27.0));

        for expected in [
            "One-way ANOVA: score by group",
            "Group column: group",
            "Variable column: score",
            "Groups: a, b, c",
            "SSB (between groups): 54.0000",
            "SSW (within groups): 6.0000",
            "SST (total): 60.0000",
            "df between: 2",
            "df within: 6",
            "MSB: 27.0000",
            "MSW: 1.0000",
            "F statistic: 27.0000",
            "p-value: 0.0010000000",
            "F critical (α = 0.05): 5.1433",
        ] {
            assert!(report.contains(expected), "missing {expected:?} in:\n{report}");
        }
    }

    #[test]
    fn test_hypotheses_are_stated() {
        let report = render_text(&fixture(0.001, 27.0));
        assert!(report.contains("H₀: All group means are equal (μ₁ = μ₂ = ... = μₖ)."));
        assert!(report.contains("H₁: At least one group mean is different."));
    }

    #[test]
    fn test_conclusion_sentences_are_fixed() {
        assert_eq!(
            conclusion_sentence(Conclusion::RejectNull),
            "Reject the null hypothesis (H₀). There is a statistically significant \
             difference between at least two group means."
        );
        assert_eq!(
            conclusion_sentence(Conclusion::FailToRejectNull),
            "Fail to reject the null hypothesis (H₀). There is no statistically \
             significant difference between the group means."
        );
    }

    #[test]
    fn test_report_picks_the_right_conclusion() {
        let reject = render_text(&fixture(0.001, 27.0));
        assert!(reject.contains("Reject the null hypothesis"));
        assert!(!reject.contains("Fail to reject"));

        let keep = render_text(&fixture(0.2, 1.5));
        assert!(keep.contains("Fail to reject the null hypothesis"));
        assert!(!keep.contains("statistically significant difference between at least two"));
    }

    #[test]
    fn test_infinite_f_renders_as_inf() {
        let report = render_text(&fixture(0.0, f64::INFINITY));
        assert!(report.contains("F statistic: inf"));
        assert!(report.contains("p-value: 0.0000000000"));
        assert!(report.contains("Reject the null hypothesis"));
    }
}
