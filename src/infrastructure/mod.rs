//! Infrastructure layer - External service implementations

pub mod cache;
pub mod geocoding;
pub mod http_client;
pub mod listings;
pub mod logging;
pub mod observability;
pub mod rate_limit;
pub mod services;
