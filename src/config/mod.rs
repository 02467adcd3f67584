//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, CompsConfig, LogFormat, LoggingConfig, ProviderEndpoint, ProvidersConfig,
    ServerConfig,
};
