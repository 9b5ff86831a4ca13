//! Console output and JSON reports for a game day run

use crate::errors::Result;
use crate::scenarios::{ScenarioResult, ScenarioStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

const RULE_WIDTH: usize = 60;

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Print a framed heading
pub fn print_banner(title: &str) {
    println!("\n{}", rule());
    println!("{}", title);
    println!("{}", rule());
}

/// Print the closing verdict block of a scenario
pub fn print_verdict(status: ScenarioStatus, lines: &[String]) {
    println!("\n{}", rule());
    println!("RESULTS: {}", status);
    for line in lines {
        println!("{}", line);
    }
    println!("{}", rule());
}

/// Pass/partial/fail counts across a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub passed: usize,
    pub partial: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn from_results(results: &[ScenarioResult]) -> Self {
        results.iter().fold(Self::default(), |mut summary, result| {
            match result.status {
                ScenarioStatus::Passed => summary.passed += 1,
                ScenarioStatus::Partial => summary.partial += 1,
                ScenarioStatus::Failed => summary.failed += 1,
            }
            summary
        })
    }

    pub fn total(&self) -> usize {
        self.passed + self.partial + self.failed
    }

    pub fn all_passed(&self) -> bool {
        self.passed == self.total()
    }

    pub fn print(&self) {
        print_banner("GAME DAY SUMMARY");
        println!("  Passed:  {}", self.passed);
        println!("  Partial: {}", self.partial);
        println!("  Failed:  {}", self.failed);
        println!("{}", rule());
    }
}

/// Process exit code: 0 only if every scenario passed
pub fn exit_code(results: &[ScenarioResult]) -> u8 {
    if RunSummary::from_results(results).all_passed() {
        0
    } else {
        1
    }
}

/// File written by `--output`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameDayReport {
    pub game_day_run: DateTime<Utc>,
    pub results: Vec<ScenarioResult>,
}

impl GameDayReport {
    pub fn new(results: Vec<ScenarioResult>) -> Self {
        Self {
            game_day_run: Utc::now(),
            results,
        }
    }

    pub async fn write_to(&self, path: &Path) -> Result<()> {
        let body = serde_json::to_vec_pretty(self)?;
        tokio::fs::write(path, body).await?;
        info!(
            "Wrote game day report with {} results to {}",
            self.results.len(),
            path.display()
        );
        Ok(())
    }

    pub async fn read_from(path: &Path) -> Result<Self> {
        let body = tokio::fs::read(path).await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn result(scenario: &str, status: ScenarioStatus, duration_ms: f64) -> ScenarioResult {
        ScenarioResult {
            scenario: scenario.to_string(),
            status,
            duration_ms,
            details: json!({"healthy": 3, "checks": {"loki": {"success": false}}}),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_summary_counts() {
        let results = vec![
            result("health_sweep", ScenarioStatus::Passed, 10.0),
            result("slo_check", ScenarioStatus::Failed, 5.0),
            result("trace_verify", ScenarioStatus::Partial, 3000.5),
            result("load_test", ScenarioStatus::Passed, 120.25),
        ];

        let summary = RunSummary::from_results(&results);
        assert_eq!(
            summary,
            RunSummary {
                passed: 2,
                partial: 1,
                failed: 1
            }
        );
        assert_eq!(summary.total(), 4);
        assert!(!summary.all_passed());
        assert_eq!(exit_code(&results), 1);
    }

    #[test]
    fn test_exit_code_all_passed() {
        let results = vec![
            result("health_sweep", ScenarioStatus::Passed, 1.0),
            result("slo_check", ScenarioStatus::Passed, 1.0),
        ];
        assert_eq!(exit_code(&results), 0);
    }

    #[tokio::test]
    async fn test_report_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game_day.json");

        let report = GameDayReport::new(vec![
            result("health_sweep", ScenarioStatus::Partial, 1234.5),
            result("slo_check", ScenarioStatus::Passed, 12.25),
        ]);
        report.write_to(&path).await.unwrap();

        let loaded = GameDayReport::read_from(&path).await.unwrap();
        assert_eq!(loaded, report);
    }

    #[tokio::test]
    async fn test_report_wire_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        let report = GameDayReport::new(vec![result("load_test", ScenarioStatus::Failed, 0.0)]);
        report.write_to(&path).await.unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(raw["game_day_run"].is_string());
        let entry = &raw["results"][0];
        assert_eq!(entry["scenario"], "load_test");
        assert_eq!(entry["status"], "failed");
        assert_eq!(entry["duration_ms"], 0.0);
        assert_eq!(entry["details"]["healthy"], 3);
        assert!(entry["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_read_missing_report() {
        let dir = tempfile::tempdir().unwrap();
        let err = GameDayReport::read_from(&dir.path().join("absent.json")).await;
        tokio_test::assert_err!(err);
    }
}
