//! A batch of candidate listings together with where it came from

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::RawListing;

/// Origin of a candidate batch, echoed in the response metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingSource {
    /// Fetched from the listings provider for this request
    Provider,
    /// Served from the listings cache
    Cache,
    /// Synthetic listings from the mock generator (degraded mode)
    Mock,
}

impl std::fmt::Display for ListingSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Provider => write!(f, "provider"),
            Self::Cache => write!(f, "cache"),
            Self::Mock => write!(f, "mock"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ListingsBatch {
    pub listings: Arc<Vec<RawListing>>,
    pub source: ListingSource,
}

impl ListingsBatch {
    pub fn new(listings: Arc<Vec<RawListing>>, source: ListingSource) -> Self {
        Self { listings, source }
    }
}
