//! Configuration management for the game day runner

use crate::endpoints::{self, EndpointRegistry};
use crate::errors::GameDayError;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

pub const ENDPOINT_MODE_INTERNAL: &str = "internal";
pub const ENDPOINT_MODE_EXTERNAL: &str = "external";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Service name to base URL table
    pub endpoints: EndpointRegistry,

    /// `internal` for in-cluster addresses, `external` for port-forwarded ones
    pub endpoint_mode: String,

    /// Default timeout for a single probe
    pub http_timeout: Duration,

    /// Lower bound of the pause between load test requests
    pub load_pause_min: Duration,

    /// Upper bound of the pause between load test requests
    pub load_pause_max: Duration,

    /// Load test volume when running the full suite
    pub suite_load_requests: u32,

    /// Wait between the traced request and the backend check
    pub trace_propagation_delay: Duration,

    /// Metric names the SLO check reports as present
    pub expected_slo_metrics: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoints: EndpointRegistry::default(),
            endpoint_mode: ENDPOINT_MODE_INTERNAL.to_string(),
            http_timeout: Duration::from_secs(5),
            load_pause_min: Duration::from_millis(50),
            load_pause_max: Duration::from_millis(300),
            suite_load_requests: 20,
            trace_propagation_delay: Duration::from_secs(3),
            expected_slo_metrics: vec![
                "shield_system_health_score".to_string(),
                "shield_active_scans_total".to_string(),
            ],
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(mode) = lookup("GAME_DAY_ENDPOINT_MODE") {
            config.endpoint_mode = mode.trim().to_lowercase();
        }

        if let Some(timeout) = lookup("GAME_DAY_HTTP_TIMEOUT_SECONDS") {
            if let Ok(seconds) = timeout.parse::<u64>() {
                config.http_timeout = Duration::from_secs(seconds);
            }
        }

        if let Some(pause) = lookup("GAME_DAY_LOAD_PAUSE_MIN_MS") {
            if let Ok(ms) = pause.parse::<u64>() {
                config.load_pause_min = Duration::from_millis(ms);
            }
        }

        if let Some(pause) = lookup("GAME_DAY_LOAD_PAUSE_MAX_MS") {
            if let Ok(ms) = pause.parse::<u64>() {
                config.load_pause_max = Duration::from_millis(ms);
            }
        }

        if let Some(requests) = lookup("GAME_DAY_SUITE_LOAD_REQUESTS") {
            if let Ok(count) = requests.parse() {
                config.suite_load_requests = count;
            }
        }

        if let Some(delay) = lookup("GAME_DAY_TRACE_PROPAGATION_SECONDS") {
            if let Ok(seconds) = delay.parse::<u64>() {
                config.trace_propagation_delay = Duration::from_secs(seconds);
            }
        }

        if let Some(metrics) = lookup("GAME_DAY_EXPECTED_SLO_METRICS") {
            config.expected_slo_metrics = metrics
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        config.endpoints.apply_overrides(&lookup);

        config
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.endpoint_mode != ENDPOINT_MODE_INTERNAL
            && self.endpoint_mode != ENDPOINT_MODE_EXTERNAL
        {
            return Err(format!(
                "endpoint_mode must be '{}' or '{}', got '{}'",
                ENDPOINT_MODE_INTERNAL, ENDPOINT_MODE_EXTERNAL, self.endpoint_mode
            ));
        }

        if self.http_timeout.is_zero() {
            return Err("http_timeout must be greater than 0".to_string());
        }

        if self.load_pause_min > self.load_pause_max {
            return Err("load_pause_min cannot exceed load_pause_max".to_string());
        }

        if self.suite_load_requests == 0 {
            return Err("suite_load_requests must be greater than 0".to_string());
        }

        for service in [
            endpoints::RUST_API,
            endpoints::GO_CONTROLLER,
            endpoints::PROMETHEUS,
            endpoints::GRAFANA,
            endpoints::LOKI,
            endpoints::ALLOY,
        ] {
            if !self.endpoints.contains(service) {
                return Err(format!("no endpoint configured for {}", service));
            }
        }

        Ok(())
    }

    /// Validate, turning a failure into `GameDayError::Config`
    pub fn validated(self) -> crate::Result<Self> {
        self.validate().map_err(GameDayError::Config)?;
        Ok(self)
    }

    pub fn prefer_internal(&self) -> bool {
        self.endpoint_mode != ENDPOINT_MODE_EXTERNAL
    }

    /// Base URL for a service in the configured address mode
    pub fn endpoint(&self, service: &str) -> crate::Result<&str> {
        self.endpoints.resolve(service, self.prefer_internal())
    }
}
