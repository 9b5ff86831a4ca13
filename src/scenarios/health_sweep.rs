//! Health sweep across every platform service

use super::{Scenario, ScenarioContext, ScenarioResult, ScenarioStatus};
use crate::endpoints::{ALLOY, GO_CONTROLLER, GRAFANA, LOKI, PROMETHEUS, RUST_API};
use crate::errors::Result;
use crate::report::{print_banner, print_verdict};
use async_trait::async_trait;
use serde_json::{Map, Value, json};
use std::time::Instant;
use tracing::{info, instrument};

/// (label, service, path) for each health check, in probe order
pub const HEALTH_CHECKS: [(&str, &str, &str); 6] = [
    ("rust-api", RUST_API, "/health"),
    ("go-controller", GO_CONTROLLER, "/health"),
    ("prometheus", PROMETHEUS, "/-/ready"),
    ("grafana", GRAFANA, "/api/health"),
    ("loki", LOKI, "/ready"),
    ("alloy", ALLOY, "/-/ready"),
];

pub struct HealthSweep {
    ctx: ScenarioContext,
}

impl HealthSweep {
    pub fn new(ctx: ScenarioContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Scenario for HealthSweep {
    fn name(&self) -> &'static str {
        "health_sweep"
    }

    fn title(&self) -> &'static str {
        "Health Sweep"
    }

    #[instrument(skip(self))]
    async fn run(&self) -> Result<ScenarioResult> {
        print_banner("GAME DAY SCENARIO: Health Sweep");

        let start_time = Instant::now();
        let mut checks = Map::new();
        let mut healthy_count = 0;

        for (label, service, path) in HEALTH_CHECKS {
            let url = self.ctx.url(service, path)?;
            let result = self.ctx.prober.get(&url).await;

            let status_str = if result.success { "✓ HEALTHY" } else { "✗ UNHEALTHY" };
            println!("  {}: {} ({:.0}ms)", label, status_str, result.latency_ms);

            if result.success {
                healthy_count += 1;
            }
            checks.insert(label.to_string(), serde_json::to_value(&result)?);
        }

        let total_services = HEALTH_CHECKS.len();
        let status = ScenarioStatus::from_counts(healthy_count, total_services);
        info!("Health sweep finished: {}/{} healthy", healthy_count, total_services);

        print_verdict(
            status,
            &[format!("  {}/{} services healthy", healthy_count, total_services)],
        );

        Ok(ScenarioResult::new(
            self.name(),
            status,
            start_time,
            json!({
                "total_services": total_services,
                "healthy": healthy_count,
                "unhealthy": total_services - healthy_count,
                "checks": Value::Object(checks),
            }),
        ))
    }
}
