//! Static registry of the services exercised during a game day

use crate::errors::{GameDayError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const RUST_API: &str = "rust_api";
pub const GO_CONTROLLER: &str = "go_controller";
pub const PROMETHEUS: &str = "prometheus";
pub const GRAFANA: &str = "grafana";
pub const LOKI: &str = "loki";
pub const ALLOY: &str = "alloy";
pub const SHIELD: &str = "shield";

/// Base URLs for one logical service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEndpoint {
    /// Address reachable from inside the cluster network
    pub internal_url: String,

    /// Address reachable through a local port-forward or ingress
    pub external_url: String,
}

impl ServiceEndpoint {
    pub fn new(internal_url: impl Into<String>, external_url: impl Into<String>) -> Self {
        Self {
            internal_url: trim_base(internal_url.into()),
            external_url: trim_base(external_url.into()),
        }
    }

    pub fn url(&self, prefer_internal: bool) -> &str {
        if prefer_internal {
            &self.internal_url
        } else {
            &self.external_url
        }
    }
}

/// Read-only mapping of service name to its endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointRegistry {
    services: BTreeMap<String, ServiceEndpoint>,
}

impl Default for EndpointRegistry {
    fn default() -> Self {
        Self::empty()
            .with_service(
                RUST_API,
                ServiceEndpoint::new("http://rust-api:3000", "http://localhost"),
            )
            .with_service(
                GO_CONTROLLER,
                ServiceEndpoint::new("http://go-controller:8081", "http://localhost:8081"),
            )
            .with_service(
                PROMETHEUS,
                ServiceEndpoint::new("http://prometheus:9090", "http://localhost:9090"),
            )
            .with_service(
                GRAFANA,
                ServiceEndpoint::new("http://grafana:3000", "http://localhost:3000"),
            )
            .with_service(LOKI, ServiceEndpoint::new("http://loki:3100", "http://localhost:3100"))
            .with_service(
                ALLOY,
                ServiceEndpoint::new("http://alloy:12345", "http://localhost:12345"),
            )
            .with_service(
                SHIELD,
                ServiceEndpoint::new("http://shield:8000", "http://localhost:8000"),
            )
    }
}

impl EndpointRegistry {
    pub fn empty() -> Self {
        Self {
            services: BTreeMap::new(),
        }
    }

    /// Registry where every known service points at the same base URL
    pub fn uniform(base_url: &str) -> Self {
        Self::default()
            .services
            .keys()
            .fold(Self::empty(), |registry, name| {
                registry.with_service(name, ServiceEndpoint::new(base_url, base_url))
            })
    }

    pub fn with_service(mut self, name: &str, endpoint: ServiceEndpoint) -> Self {
        self.services.insert(name.to_string(), endpoint);
        self
    }

    /// Resolve the base URL for a service
    pub fn resolve(&self, service: &str, prefer_internal: bool) -> Result<&str> {
        self.services
            .get(service)
            .map(|endpoint| endpoint.url(prefer_internal))
            .ok_or_else(|| GameDayError::UnknownService(service.to_string()))
    }

    pub fn contains(&self, service: &str) -> bool {
        self.services.contains_key(service)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.services.keys().map(String::as_str)
    }

    /// Apply `GAME_DAY_<SERVICE>_INTERNAL_URL` / `_EXTERNAL_URL` overrides
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        for (name, endpoint) in self.services.iter_mut() {
            let prefix = format!("GAME_DAY_{}", name.to_uppercase());

            if let Some(url) = lookup(&format!("{}_INTERNAL_URL", prefix)) {
                endpoint.internal_url = trim_base(url);
            }

            if let Some(url) = lookup(&format!("{}_EXTERNAL_URL", prefix)) {
                endpoint.external_url = trim_base(url);
            }
        }
    }
}

fn trim_base(url: String) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_resolve_prefers_internal() {
        let registry = EndpointRegistry::default();
        assert_eq!(registry.resolve(RUST_API, true).unwrap(), "http://rust-api:3000");
        assert_eq!(registry.resolve(RUST_API, false).unwrap(), "http://localhost");
        assert_eq!(registry.resolve(ALLOY, false).unwrap(), "http://localhost:12345");
    }

    #[test]
    fn test_resolve_unknown_service() {
        let registry = EndpointRegistry::default();
        let err = registry.resolve("tempo", true).unwrap_err();
        assert!(matches!(err, GameDayError::UnknownService(ref name) if name == "tempo"));
    }

    #[test]
    fn test_default_table_has_every_service() {
        let registry = EndpointRegistry::default();
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names.len(), 7);
        for service in [RUST_API, GO_CONTROLLER, PROMETHEUS, GRAFANA, LOKI, ALLOY, SHIELD] {
            assert!(registry.contains(service), "missing {}", service);
        }
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("GAME_DAY_LOKI_INTERNAL_URL", "http://loki.observability:3100/"),
            ("GAME_DAY_GRAFANA_EXTERNAL_URL", "http://grafana.local"),
        ]);

        let mut registry = EndpointRegistry::default();
        registry.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(registry.resolve(LOKI, true).unwrap(), "http://loki.observability:3100");
        assert_eq!(registry.resolve(LOKI, false).unwrap(), "http://localhost:3100");
        assert_eq!(registry.resolve(GRAFANA, false).unwrap(), "http://grafana.local");
    }

    #[test]
    fn test_uniform_registry() {
        let registry = EndpointRegistry::uniform("http://127.0.0.1:9999/");
        assert_eq!(registry.resolve(PROMETHEUS, true).unwrap(), "http://127.0.0.1:9999");
        assert_eq!(registry.resolve(SHIELD, false).unwrap(), "http://127.0.0.1:9999");
    }
}
