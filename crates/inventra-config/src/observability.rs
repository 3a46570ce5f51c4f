use std::env;

use crate::env_or;

#[derive(Clone, Debug)]
pub struct ObservabilityConfig {
    /// Turns the Prometheus recorder and metrics middleware on or off.
    pub enabled: bool,
    pub metrics_port: u16,
    /// When set, JSON logs are also written to daily-rolling files in this directory.
    pub log_dir: Option<String>,
}

impl ObservabilityConfig {
    pub fn from_env() -> Self {
        Self {
            enabled: env::var("OBSERVABILITY_ENABLED")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(true),
            metrics_port: env_or("METRICS_PORT", 9000),
            log_dir: env::var("LOG_DIR").ok().filter(|s| !s.trim().is_empty()),
        }
    }
}
