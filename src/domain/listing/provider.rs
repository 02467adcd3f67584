use async_trait::async_trait;
use std::fmt::Debug;

#[cfg(test)]
use mockall::automock;

use super::{CompQuery, RawListing};
use crate::domain::DomainError;

/// Trait for rental listings providers (RentCast, synthetic generator, ...)
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ListingsProvider: Send + Sync + Debug {
    /// Fetch up to `limit` candidate listings around the query point.
    ///
    /// Radius, recency and bed/bath filters are passed server-side when the
    /// provider supports them; callers must still filter locally.
    async fn fetch_listings(
        &self,
        query: &CompQuery,
        limit: u32,
    ) -> Result<Vec<RawListing>, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}
