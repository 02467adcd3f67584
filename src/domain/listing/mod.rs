//! Listing domain - search criteria, provider listings and comps

mod batch;
mod comp;
mod provider;
mod query;
mod raw;
mod recency;

pub use batch::{ListingSource, ListingsBatch};
pub use comp::Comp;
pub use provider::ListingsProvider;
pub use query::{Bathrooms, CompQuery};
pub use raw::RawListing;
pub use recency::RecencyToken;

#[cfg(test)]
pub use provider::MockListingsProvider;
