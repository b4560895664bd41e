//! Test run documents under `tests/`.
//!
//! Every function orders runs newest first on its own, so callers may pass
//! records in collection order.

use super::{Doc, RenderContext, format_timestamp};
use crate::domain::{TestReport, display_value};

/// Quality band for an overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rating {
    Excellent,
    Good,
    Attention,
    Warning,
}

impl Rating {
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            Self::Excellent
        } else if score >= 80.0 {
            Self::Good
        } else if score >= 70.0 {
            Self::Attention
        } else {
            Self::Warning
        }
    }

    pub const fn describe(&self) -> &'static str {
        match self {
            Self::Excellent => "🟢 Excellent - the system is holding a high quality bar",
            Self::Good => "🟡 Good - minor improvements would raise quality further",
            Self::Attention => "🟠 Attention - some areas need improvement",
            Self::Warning => "🔴 Warning - significant problems were found",
        }
    }
}

fn newest_first(reports: &[TestReport]) -> Vec<&TestReport> {
    let mut sorted: Vec<&TestReport> = reports.iter().collect();
    sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    sorted
}

fn seconds(ms: u64) -> String {
    format!("{:.1}s", ms as f64 / 1000.0)
}

fn signed(value: f64) -> String {
    if value >= 0.0 {
        format!("+{value:.1}")
    } else {
        format!("{value:.1}")
    }
}

/// `tests/integrated-test-report.md`
pub fn integrated(reports: &[TestReport], ctx: &RenderContext) -> String {
    let sorted = newest_first(reports);
    let mut doc = Doc::new();
    doc.para("# Integrated Test Report");

    let Some(latest) = sorted.first() else {
        doc.para("No test runs have been recorded.");
        return doc.finish();
    };

    let s = &latest.summary;
    doc.line(format!("**Project:** {}", ctx.project_name));
    doc.line(format!("**Latest run:** {}", format_timestamp(&latest.timestamp)));
    doc.line(format!("**Environment:** {}", latest.environment));
    doc.line(format!("**Test run ID:** {}", latest.test_run_id));
    doc.blank();

    doc.para("## Summary");
    doc.line(format!("- **Overall score:** {:.1}/100", s.overall_score));
    doc.line(format!("- **Total tests:** {}", s.total_tests));
    doc.line(format!("- **Passed:** {} ({:.1}%)", s.passed_tests, s.pass_rate()));
    doc.line(format!("- **Failed:** {} ({:.1}%)", s.failed_tests, s.fail_rate()));
    doc.line(format!("- **Skipped:** {}", s.skipped_tests));
    doc.blank();
    doc.para(format!(
        "**Rating:** {}",
        Rating::from_score(s.overall_score).describe()
    ));

    doc.para("## Suite Results");
    doc.line("| Suite | Result | Score | Duration | Tests |");
    doc.line("|-------|--------|-------|----------|-------|");
    for suite in &latest.suite_results {
        doc.line(format!(
            "| {} | {} | {:.1}/100 | {} | {} |",
            suite.suite_name,
            if suite.success { "✅" } else { "❌" },
            suite.score,
            seconds(suite.duration),
            suite.test_count
        ));
    }
    doc.blank();

    if !latest.recommendations.is_empty() {
        doc.para("## Recommendations");
        for (i, rec) in latest.recommendations.iter().enumerate() {
            doc.line(format!("{}. {rec}", i + 1));
        }
        doc.blank();
    }

    if let Some(previous) = sorted.get(1) {
        doc.para("## Trend Analysis");
        trend(&mut doc, latest, previous);
    }

    doc.finish()
}

fn trend(doc: &mut Doc, latest: &TestReport, previous: &TestReport) {
    let score_diff = latest.summary.overall_score - previous.summary.overall_score;
    let rate_diff = latest.summary.pass_rate() - previous.summary.pass_rate();
    let arrow = |d: f64| if d >= 0.0 { "📈" } else { "📉" };

    doc.line("Compared with the previous run:");
    doc.line(format!(
        "- **Score change:** {} points {}",
        signed(score_diff),
        arrow(score_diff)
    ));
    doc.line(format!(
        "- **Pass rate change:** {}% {}",
        signed(rate_diff),
        arrow(rate_diff)
    ));
    doc.blank();

    let verdict = if score_diff > 5.0 {
        "🎉 Quality improved significantly."
    } else if score_diff > 0.0 {
        "✅ Quality is improving."
    } else if score_diff < -5.0 {
        "⚠️ Quality dropped significantly. Investigate."
    } else if score_diff < 0.0 {
        "📉 Quality dipped slightly."
    } else {
        "➡️ Quality is stable."
    };
    doc.para(verdict);
}

/// `tests/<environment>-<testRunId>.md`
pub fn run(report: &TestReport) -> String {
    let mut doc = Doc::new();
    doc.para(format!("# Test Report - {}", report.environment));
    doc.line(format!("**Executed:** {}", format_timestamp(&report.timestamp)));
    doc.line(format!("**Test run ID:** {}", report.test_run_id));
    doc.blank();

    for suite in &report.suite_results {
        doc.para(format!("## {} suite", suite.suite_name));
        doc.line(format!(
            "- **Result:** {}",
            if suite.success { "✅ Passed" } else { "❌ Failed" }
        ));
        doc.line(format!("- **Score:** {:.1}/100", suite.score));
        doc.line(format!("- **Duration:** {}", seconds(suite.duration)));
        doc.line(format!("- **Tests:** {}", suite.test_count));
        doc.blank();

        if !suite.details.is_empty() {
            doc.para("### Details");
            for (key, value) in &suite.details {
                doc.line(format!("- **{key}:** {}", display_value(value)));
            }
            doc.blank();
        }
    }

    doc.finish()
}

/// `tests/test-history.md`
pub fn history(reports: &[TestReport]) -> String {
    let sorted = newest_first(reports);
    let mut doc = Doc::new();
    doc.para("# Test Run History");

    if let (Some(newest), Some(oldest)) = (sorted.first(), sorted.last()) {
        doc.line(format!(
            "**Period:** {} - {}",
            oldest.timestamp.format("%Y-%m-%d"),
            newest.timestamp.format("%Y-%m-%d")
        ));
    }
    doc.line(format!("**Runs:** {}", sorted.len()));
    doc.blank();

    doc.para("## Runs");
    doc.line("| Date | Environment | Overall score | Pass rate | Duration |");
    doc.line("|------|-------------|---------------|-----------|----------|");
    for report in &sorted {
        doc.line(format!(
            "| {} | {} | {:.1} | {:.1}% | {:.1}min |",
            format_timestamp(&report.timestamp),
            report.environment,
            report.summary.overall_score,
            report.summary.pass_rate(),
            report.total_duration_ms() as f64 / 60_000.0
        ));
    }
    doc.blank();

    doc.finish()
}

/// `tests/README.md`
pub fn index(reports: &[TestReport], ctx: &RenderContext) -> String {
    let sorted = newest_first(reports);
    let mut doc = Doc::new();
    doc.para(format!("# {} Test Reports", ctx.project_name));

    if sorted.is_empty() {
        doc.para("No test runs have been recorded.");
        return doc.finish();
    }

    doc.para("## Overview");
    doc.line("- [Integrated test report](integrated-test-report.md)");
    doc.line("- [Run history](test-history.md)");
    doc.blank();

    doc.para("## Runs");
    for report in &sorted {
        doc.line(format!(
            "- [{} - {}]({}) score {:.1}",
            report.environment,
            report.test_run_id,
            report.file_name(),
            report.summary.overall_score
        ));
    }
    doc.blank();

    doc.finish()
}
