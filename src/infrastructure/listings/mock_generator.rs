//! Synthetic listings used when the real provider is unavailable

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::domain::geo::destination;
use crate::domain::{CompQuery, DomainError, ListingsProvider, RawListing};

const STREETS: &[&str] = &[
    "Mock St",
    "Sample Ave",
    "Demo Blvd",
    "Placeholder Ln",
    "Fixture Ct",
    "Stub Rd",
    "Synthetic Way",
    "Harness Dr",
];

/// Bedroom counts above this price like this many
const PRICED_BEDROOMS_MAX: u32 = 10;

const PROPERTY_TYPES: &[&str] = &["Single Family", "Condo", "Townhouse", "Apartment"];

/// Deterministic generator of plausible listings around the query point
///
/// The same seed and query always produce the same listings. Generated
/// listings sit inside the query radius and carry the requested bed/bath
/// counts, so they survive the filter stage.
#[derive(Debug, Clone)]
pub struct MockListingsGenerator {
    seed: u64,
    count: usize,
}

impl MockListingsGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed, count: 8 }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Mix the configured seed with the query so nearby searches differ
    fn rng_for(&self, query: &CompQuery) -> StdRng {
        let lat = (query.point().latitude() * 1e4).round() as i64 as u64;
        let lng = (query.point().longitude() * 1e4).round() as i64 as u64;
        let beds = query.bedrooms().map_or(u64::MAX, u64::from);

        let mixed = self
            .seed
            .wrapping_mul(0x9E37_79B9_7F4A_7C15)
            .wrapping_add(lat.rotate_left(21))
            ^ lng.rotate_left(42)
            ^ beds;

        StdRng::seed_from_u64(mixed)
    }

    pub fn generate(&self, query: &CompQuery, limit: u32) -> Vec<RawListing> {
        let mut rng = self.rng_for(query);
        let count = self.count.min(limit as usize);
        let radius = query.radius_miles();

        (0..count)
            .map(|i| {
                let bearing = rng.gen_range(0.0..360.0);
                let miles = rng.gen_range(0.05..=0.95) * radius;
                let point = destination(query.point(), bearing, miles);

                let bedrooms = query.bedrooms().unwrap_or_else(|| rng.gen_range(1..=4));
                let bathrooms = query
                    .bathrooms()
                    .map(|b| b.value())
                    .unwrap_or_else(|| f64::from(rng.gen_range(2..=6u32)) / 2.0);

                let sized = bedrooms.min(PRICED_BEDROOMS_MAX);
                let base = 900 + sized * 450;
                let price = f64::from((base + rng.gen_range(0..=800)) / 25 * 25);
                let square_footage = 550 + sized * 350 + rng.gen_range(0..=400);

                let days_old = query.days_old();
                let days_on_market =
                    rng.gen_range(days_old.min_days().unwrap_or(0)..=days_old.max_days());

                let street = STREETS[i % STREETS.len()];
                let number = rng.gen_range(100..=9899);

                RawListing {
                    address: format!("{} {}, Test City, FL 33301", number, street),
                    price: Some(price),
                    bedrooms: Some(bedrooms),
                    bathrooms: Some(bathrooms),
                    square_footage: Some(square_footage),
                    latitude: Some(point.latitude()),
                    longitude: Some(point.longitude()),
                    city: Some("Test City".to_string()),
                    state: Some("FL".to_string()),
                    zip_code: Some("33301".to_string()),
                    county: Some("Broward".to_string()),
                    property_type: PROPERTY_TYPES.choose(&mut rng).map(|t| t.to_string()),
                    days_on_market: Some(days_on_market),
                }
            })
            .collect()
    }
}

#[async_trait]
impl ListingsProvider for MockListingsGenerator {
    async fn fetch_listings(
        &self,
        query: &CompQuery,
        limit: u32,
    ) -> Result<Vec<RawListing>, DomainError> {
        Ok(self.generate(query, limit))
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}
