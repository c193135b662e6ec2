//! Plain-text rendering of analysis results, for saving to a file.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::analysis::{AnalysisCriteria, AnalysisResult, BatchReport, Tier};
use crate::Error;

pub static CHECK_MARK: &str = "✓";
pub static CROSS_MARK: &str = "✗";

pub fn verdict(result: &AnalysisResult) -> &'static str {
    if result.passed {
        "STRONG"
    } else {
        "WEAK"
    }
}

pub fn mark(satisfied: bool) -> &'static str {
    if satisfied {
        CHECK_MARK
    } else {
        CROSS_MARK
    }
}

/// Render every result followed by the pass-count summary, without any terminal styling.
pub fn render_plain(report: &BatchReport, criteria: &AnalysisCriteria) -> String {
    let mut out = String::new();
    for (idx, result) in report.results.iter().enumerate() {
        // Writing to a `String` cannot fail.
        let _ = writeln!(
            out,
            "Password {}: {} {}",
            idx + 1,
            verdict(result),
            mark(result.passed)
        );
        for check in &result.checks {
            let _ = writeln!(
                out,
                "  {} {}",
                mark(check.satisfied),
                check.describe(result.length, criteria)
            );
        }
        out.push('\n');
    }
    let _ = writeln!(out, "{}", summary_line(report.passed, report.total));
    out
}

pub fn summary_line(passed: usize, total: usize) -> String {
    format!("Summary: {passed}/{total} passwords meet all criteria")
}

/// The friendlier, tiered version of [`summary_line`].
pub fn summary_headline(tier: Tier, passed: usize, total: usize) -> String {
    match tier {
        Tier::Excellent => format!("Excellent! All {total} passwords are strong!"),
        Tier::Good => format!("Good! {passed}/{total} passwords meet criteria"),
        Tier::Warning => format!("Warning! Only {passed}/{total} passwords meet criteria"),
    }
}

pub fn write_report(path: &Path, text: &str) -> Result<(), Error> {
    fs::write(path, text).map_err(|err| Error::io(path, err))
}
