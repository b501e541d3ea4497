//! Telemetry configuration from environment variables.

use std::env;

/// Configuration for log output.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Service name attached to every log line
    pub service_name: String,

    /// Component within the service (chaincode name, test harness, ...)
    pub component: String,

    /// Log level filter (trace, debug, info, warn, error)
    pub log_level: String,

    /// Whether to enable JSON formatted logs
    pub json_logs: bool,

    /// Ledger network identifier (dev, test, prod)
    pub network: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "market-ledger".to_string(),
            component: String::new(),
            log_level: "info".to_string(),
            json_logs: false,
            network: "dev".to_string(),
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `ML_SERVICE_NAME`: Service name (default: market-ledger)
    /// - `ML_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `ML_JSON_LOGS`: Enable JSON logs (default: false, true in containers)
    /// - `ML_NETWORK`: Network name (default: dev)
    pub fn from_env() -> Self {
        let is_container =
            env::var("KUBERNETES_SERVICE_HOST").is_ok() || env::var("DOCKER_CONTAINER").is_ok();

        Self {
            service_name: env::var("ML_SERVICE_NAME")
                .unwrap_or_else(|_| "market-ledger".to_string()),

            component: String::new(),

            log_level: env::var("ML_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or_else(|_| "info".to_string()),

            json_logs: env::var("ML_JSON_LOGS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(is_container),

            network: env::var("ML_NETWORK").unwrap_or_else(|_| "dev".to_string()),
        }
    }

    /// Create configuration for a named component.
    pub fn for_component(component: &str) -> Self {
        let mut config = Self::from_env();
        config.component = component.to_string();
        config
    }

    /// Service name including the component, if any.
    pub fn full_service_name(&self) -> String {
        if self.component.is_empty() {
            self.service_name.clone()
        } else {
            format!("{}-{}", self.service_name, self.component)
        }
    }
}
