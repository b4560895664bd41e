//! Test run history records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One recorded test run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestReport {
    pub test_run_id: String,
    pub timestamp: DateTime<Utc>,
    pub environment: String,
    pub summary: TestSummary,
    #[serde(default)]
    pub suite_results: Vec<TestSuiteReport>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

impl TestReport {
    /// Name of the per-run artifact, `<environment>-<testRunId>.md`.
    pub fn file_name(&self) -> String {
        format!("{}-{}.md", self.environment, self.test_run_id)
    }

    /// Sum of suite durations, in milliseconds.
    pub fn total_duration_ms(&self) -> u64 {
        self.suite_results.iter().map(|s| s.duration).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestSummary {
    pub total_tests: u32,
    pub passed_tests: u32,
    pub failed_tests: u32,
    pub skipped_tests: u32,
    pub overall_score: f64,
}

impl TestSummary {
    /// Passed tests as a percentage of the total; `0.0` when there are none.
    pub fn pass_rate(&self) -> f64 {
        percentage(self.passed_tests, self.total_tests)
    }

    pub fn fail_rate(&self) -> f64 {
        percentage(self.failed_tests, self.total_tests)
    }
}

fn percentage(part: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        f64::from(part) / f64::from(total) * 100.0
    }
}

/// Result of one suite inside a run. `duration` is milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestSuiteReport {
    pub suite_name: String,
    pub success: bool,
    pub score: f64,
    pub duration: u64,
    pub test_count: u32,
    #[serde(default)]
    pub details: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(total: u32, passed: u32, failed: u32) -> TestSummary {
        TestSummary {
            total_tests: total,
            passed_tests: passed,
            failed_tests: failed,
            skipped_tests: 0,
            overall_score: 0.0,
        }
    }

    #[test]
    fn rates_are_percentages() {
        let s = summary(200, 150, 50);
        assert!((s.pass_rate() - 75.0).abs() < f64::EPSILON);
        assert!((s.fail_rate() - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rates_guard_zero_total() {
        let s = summary(0, 0, 0);
        assert_eq!(s.pass_rate(), 0.0);
        assert_eq!(s.fail_rate(), 0.0);
    }
}
