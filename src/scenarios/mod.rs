//! Game day scenarios and their shared result types

pub mod health_sweep;
pub mod slo_check;
pub mod trace_verify;

pub use health_sweep::HealthSweep;
pub use load_test::LoadTest;
pub use slo_check::SloCheck;
pub use trace_verify::TraceVerify;

use crate::config::Config;
use crate::errors::Result;
use crate::probe::HttpProber;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Instant;

/// Verdict of one scenario run
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioStatus {
    Passed,
    Partial,
    Failed,
}

impl std::fmt::Display for ScenarioStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScenarioStatus::Passed => write!(f, "PASSED"),
            ScenarioStatus::Partial => write!(f, "PARTIAL"),
            ScenarioStatus::Failed => write!(f, "FAILED"),
        }
    }
}

impl ScenarioStatus {
    /// All succeeded -> passed, some -> partial, none -> failed
    pub fn from_counts(successes: usize, total: usize) -> Self {
        if successes >= total {
            ScenarioStatus::Passed
        } else if successes > 0 {
            ScenarioStatus::Partial
        } else {
            ScenarioStatus::Failed
        }
    }
}

/// One scenario invocation, the unit of the JSON report
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ScenarioResult {
    pub scenario: String,
    pub status: ScenarioStatus,
    pub duration_ms: f64,
    pub details: Value,
    pub timestamp: DateTime<Utc>,
}

impl ScenarioResult {
    pub fn new(scenario: &str, status: ScenarioStatus, started: Instant, details: Value) -> Self {
        Self {
            scenario: scenario.to_string(),
            status,
            duration_ms: started.elapsed().as_secs_f64() * 1000.0,
            details,
            timestamp: Utc::now(),
        }
    }

    /// Result recorded when a scenario errors out or panics
    pub fn crashed(scenario: &str, error: &str) -> Self {
        Self {
            scenario: scenario.to_string(),
            status: ScenarioStatus::Failed,
            duration_ms: 0.0,
            details: json!({ "error": error }),
            timestamp: Utc::now(),
        }
    }
}

/// Shared dependencies handed to every scenario
#[derive(Debug, Clone)]
pub struct ScenarioContext {
    pub config: Arc<Config>,
    pub prober: HttpProber,
}

impl ScenarioContext {
    pub fn new(config: Config) -> Result<Self> {
        let prober = HttpProber::new(config.http_timeout)?;
        Ok(Self {
            config: Arc::new(config),
            prober,
        })
    }

    /// Full URL for `path` on a registered service
    pub fn url(&self, service: &str, path: &str) -> Result<String> {
        Ok(format!("{}{}", self.config.endpoint(service)?, path))
    }
}

#[async_trait]
pub trait Scenario: Send + Sync {
    /// Machine name used in reports, e.g. `health_sweep`
    fn name(&self) -> &'static str;

    /// Heading printed before the scenario runs
    fn title(&self) -> &'static str;

    async fn run(&self) -> Result<ScenarioResult>;
}
