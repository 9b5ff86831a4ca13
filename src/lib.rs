//! Game Day Runner Library
//!
//! Drives synthetic traffic and health probes against the platform services
//! during planned game day exercises, and reports a pass/partial/fail verdict
//! per scenario.

pub mod cli;
pub mod config;
pub mod endpoints;
pub mod errors;
pub mod probe;
pub mod report;
pub mod runner;
pub mod scenarios;
pub mod stats;

pub use config::Config;
pub use endpoints::{EndpointRegistry, ServiceEndpoint};
pub use errors::{GameDayError, Result};
pub use probe::{HttpProber, ProbeOptions, ProbeResult};
pub use runner::GameDay;
pub use scenarios::{Scenario, ScenarioContext, ScenarioResult, ScenarioStatus};
