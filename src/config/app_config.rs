use std::time::Duration;

use serde::Deserialize;

use crate::domain::{DomainError, RecencyToken, RetryPolicy};
use crate::infrastructure::observability::MetricsConfig;
use crate::infrastructure::rate_limit::RateLimitConfig;
use crate::infrastructure::services::CompsServiceConfig;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub comps: CompsConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub retry: RetryPolicy,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// External provider endpoints and credentials
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    pub rentcast: ProviderEndpoint,
    pub opencage: ProviderEndpoint,
    /// Per-call HTTP timeout
    pub http_timeout_secs: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProviderEndpoint {
    pub api_key: Option<String>,
    /// Overrides the provider's public endpoint
    pub url: Option<String>,
}

impl ProviderEndpoint {
    /// The API key, treating blank values as unset
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}

/// Pipeline defaults, caches and degraded mode
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CompsConfig {
    pub default_radius_miles: f64,
    pub default_days_old: String,
    pub max_results: usize,
    pub request_timeout_secs: u64,
    pub cache_ttl_secs: u64,
    pub cache_max_capacity: u64,
    pub geocode_cache_ttl_secs: u64,
    pub geocode_cache_max_capacity: u64,
    /// Serve synthetic listings when the listings provider is unreachable or unconfigured
    pub mock_fallback: bool,
    pub mock_seed: u64,
    pub strict_no_results: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            rentcast: ProviderEndpoint::default(),
            opencage: ProviderEndpoint::default(),
            http_timeout_secs: 10,
        }
    }
}

impl Default for CompsConfig {
    fn default() -> Self {
        Self {
            default_radius_miles: 5.0,
            default_days_old: "*:270".to_string(),
            max_results: 5,
            request_timeout_secs: 12,
            cache_ttl_secs: 600,
            cache_max_capacity: 1000,
            geocode_cache_ttl_secs: 600,
            geocode_cache_max_capacity: 1000,
            mock_fallback: true,
            mock_seed: 42,
            strict_no_results: false,
        }
    }
}

impl CompsConfig {
    /// Service settings derived from this section
    pub fn service_config(&self) -> Result<CompsServiceConfig, DomainError> {
        let default_days_old = RecencyToken::parse(&self.default_days_old).map_err(|e| {
            DomainError::configuration(format!("comps.default_days_old: {}", e))
        })?;

        Ok(CompsServiceConfig {
            default_radius_miles: self.default_radius_miles,
            default_days_old,
            max_results: self.max_results,
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            strict_no_results: self.strict_no_results,
        })
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Reject settings the service cannot run with
    pub fn validate(&self) -> Result<(), DomainError> {
        let comps = &self.comps;

        if comps.max_results == 0 {
            return Err(DomainError::configuration("comps.max_results must be at least 1"));
        }

        if !(comps.default_radius_miles.is_finite() && comps.default_radius_miles > 0.0) {
            return Err(DomainError::configuration(
                "comps.default_radius_miles must be greater than 0",
            ));
        }

        for (name, value) in [
            ("comps.request_timeout_secs", comps.request_timeout_secs),
            ("comps.cache_ttl_secs", comps.cache_ttl_secs),
            ("comps.geocode_cache_ttl_secs", comps.geocode_cache_ttl_secs),
            ("providers.http_timeout_secs", self.providers.http_timeout_secs),
        ] {
            if value == 0 {
                return Err(DomainError::configuration(format!(
                    "{} must be greater than 0",
                    name
                )));
            }
        }

        comps.service_config()?;

        if self.providers.rentcast.api_key().is_none() && !comps.mock_fallback {
            return Err(DomainError::configuration(
                "providers.rentcast.api_key is required when comps.mock_fallback is disabled",
            ));
        }

        Ok(())
    }
}
