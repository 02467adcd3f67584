//! Domain layer - Core business logic and entities

pub mod cache;
pub mod error;
pub mod geo;
pub mod geocoding;
pub mod listing;
pub mod pipeline;
pub mod retry;

pub use cache::CacheKey;
pub use error::DomainError;
pub use geo::{distance_miles, round_miles, GeoPoint};
pub use geocoding::{GeocodedAddress, Geocoder, ResolvedLocation};
pub use listing::{
    Bathrooms, Comp, CompQuery, ListingSource, ListingsBatch, ListingsProvider, RawListing,
    RecencyToken,
};
pub use pipeline::{build_response, CompsResponse, InputSummary, ResponseMeta};
pub use retry::{RetryPolicy, Sleeper, TokioSleeper};
