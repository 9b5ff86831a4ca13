//! Command-line interface

use crate::errors::Result;
use crate::runner::GameDay;
use crate::scenarios::{
    HealthSweep, LoadTest, ScenarioContext, SloCheck, TraceVerify, load_test::DEFAULT_REQUESTS,
};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

const AFTER_HELP: &str = "\
Scenarios:
  load_test     Generate realistic traffic against the API
  health_sweep  Verify all services are healthy
  trace_verify  Validate distributed tracing connectivity
  slo_check     Validate SLO metrics are being captured

Examples:
  game-day health_sweep
  game-day load_test --requests 100
  game-day --all --output game_day.json";

/// Atlas platform game day toolkit
#[derive(Parser, Debug)]
#[command(name = "game-day")]
#[command(about = "Run game day exercises against the Atlas platform services")]
#[command(version, after_help = AFTER_HELP)]
pub struct Cli {
    /// Scenario to run
    #[arg(value_enum)]
    pub scenario: Option<ScenarioName>,

    /// Run all scenarios
    #[arg(long)]
    pub all: bool,

    /// Number of requests for load_test
    #[arg(
        long,
        default_value_t = DEFAULT_REQUESTS,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub requests: u32,

    /// Target URL for load_test, also used by --all (defaults to the API sync endpoint)
    #[arg(long, env = "GAME_DAY_LOAD_TARGET")]
    pub target: Option<String>,

    /// Write results to a JSON file
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
#[value(rename_all = "snake_case")]
pub enum ScenarioName {
    LoadTest,
    HealthSweep,
    TraceVerify,
    SloCheck,
}

impl Cli {
    /// Build the run described by the arguments, or `None` if nothing was selected
    pub fn game_day(&self, ctx: &ScenarioContext) -> Option<GameDay> {
        if self.all {
            return Some(GameDay::full_suite(ctx, self.target.clone()));
        }

        let ctx = ctx.clone();
        let game_day = match self.scenario? {
            ScenarioName::LoadTest => GameDay::single(Box::new(
                LoadTest::new(ctx, self.requests).with_target(self.target.clone()),
            )),
            ScenarioName::HealthSweep => GameDay::single(Box::new(HealthSweep::new(ctx))),
            ScenarioName::TraceVerify => GameDay::single(Box::new(TraceVerify::new(ctx))),
            ScenarioName::SloCheck => GameDay::single(Box::new(SloCheck::new(ctx))),
        };
        Some(game_day)
    }

    /// Print the generated help text
    pub fn print_help() -> Result<()> {
        use clap::CommandFactory;
        Cli::command().print_help()?;
        Ok(())
    }
}
