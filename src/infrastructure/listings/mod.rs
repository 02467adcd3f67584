//! Listings infrastructure - provider client, synthetic generator and gateway

mod gateway;
mod mock_generator;
mod rentcast;

pub use gateway::{ListingsBackend, ListingsCache, ListingsGateway, CANDIDATE_LIMIT};
pub use mock_generator::MockListingsGenerator;
pub use rentcast::{RentCastProvider, DEFAULT_RENTCAST_URL};
