//! Infrastructure services

mod comps_service;

pub use comps_service::{
    CompsCacheStats, CompsLookup, CompsService, CompsServiceConfig, CompsServiceTrait,
};

#[cfg(test)]
pub use comps_service::MockCompsServiceTrait;
