//! Application state for shared services

use std::sync::Arc;

use serde::Serialize;

use crate::infrastructure::services::CompsServiceTrait;

/// How the service obtains candidate listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingsMode {
    /// Real provider only
    Live,
    /// Real provider, synthetic listings when it cannot be reached
    LiveWithFallback,
    /// Synthetic listings only
    Synthetic,
}

/// Which collaborators are configured, reported by the health endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProviderStatus {
    pub listings: ListingsMode,
    pub geocoding_enabled: bool,
}

/// Application state containing shared services using dynamic dispatch
#[derive(Debug, Clone)]
pub struct AppState {
    pub comps_service: Arc<dyn CompsServiceTrait>,
    pub providers: ProviderStatus,
}

impl AppState {
    pub fn new(comps_service: Arc<dyn CompsServiceTrait>, providers: ProviderStatus) -> Self {
        Self {
            comps_service,
            providers,
        }
    }
}
