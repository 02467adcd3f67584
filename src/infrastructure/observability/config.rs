//! Metrics section of the application config

use serde::Deserialize;

const DEFAULT_SCRAPE_PATH: &str = "/metrics";

/// Prometheus exporter settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub enabled: bool,
    /// Route serving the scrape output
    pub path: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: DEFAULT_SCRAPE_PATH.to_string(),
        }
    }
}

impl MetricsConfig {
    /// The scrape route with a leading slash; blank paths use `/metrics`
    pub fn route(&self) -> String {
        let trimmed = self.path.trim().trim_start_matches('/');

        if trimmed.is_empty() {
            DEFAULT_SCRAPE_PATH.to_string()
        } else {
            format!("/{}", trimmed)
        }
    }
}
