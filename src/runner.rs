//! Sequential scenario runner with per-scenario failure isolation

use crate::report::{RunSummary, print_banner};
use crate::scenarios::{
    HealthSweep, LoadTest, Scenario, ScenarioContext, ScenarioResult, SloCheck, TraceVerify,
};
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use tracing::{error, info};

/// Which scenarios a run covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Single,
    FullSuite,
}

pub struct GameDay {
    scenarios: Vec<Box<dyn Scenario>>,
    mode: RunMode,
}

impl GameDay {
    pub fn new(scenarios: Vec<Box<dyn Scenario>>, mode: RunMode) -> Self {
        Self { scenarios, mode }
    }

    /// Health sweep, SLO check, trace verify, then a short load test.
    ///
    /// `load_target` replaces the load test's default sync endpoint.
    pub fn full_suite(ctx: &ScenarioContext, load_target: Option<String>) -> Self {
        let requests = ctx.config.suite_load_requests;
        Self::new(
            vec![
                Box::new(HealthSweep::new(ctx.clone())),
                Box::new(SloCheck::new(ctx.clone())),
                Box::new(TraceVerify::new(ctx.clone())),
                Box::new(LoadTest::new(ctx.clone(), requests).with_target(load_target)),
            ],
            RunMode::FullSuite,
        )
    }

    pub fn single(scenario: Box<dyn Scenario>) -> Self {
        Self::new(vec![scenario], RunMode::Single)
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// Run every scenario in order; always yields one result per scenario
    pub async fn run(&self) -> Vec<ScenarioResult> {
        if self.mode == RunMode::FullSuite {
            print_banner("ATLAS PLATFORM GAME DAY - FULL SUITE");
        }

        let mut results = Vec::with_capacity(self.scenarios.len());
        for scenario in &self.scenarios {
            results.push(run_isolated(scenario.as_ref()).await);
        }

        if self.mode == RunMode::FullSuite {
            RunSummary::from_results(&results).print();
        }

        results
    }
}

async fn run_isolated(scenario: &dyn Scenario) -> ScenarioResult {
    info!("Running scenario {}", scenario.name());

    let error = match AssertUnwindSafe(scenario.run()).catch_unwind().await {
        Ok(Ok(result)) => return result,
        Ok(Err(e)) => e.to_string(),
        Err(panic) => panic_message(panic.as_ref()),
    };

    println!("\n✗ Scenario '{}' crashed: {}", scenario.title(), error);
    error!("Scenario {} crashed: {}", scenario.name(), error);
    ScenarioResult::crashed(scenario.name(), &error)
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        "scenario panicked".to_string()
    }
}
