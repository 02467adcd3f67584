//! Comp pipeline - the pure stages between a candidate batch and the response
//!
//! Stages run strictly in order: filter (with distance annotation), dedup,
//! rank, assemble. None of them can fail on valid input.

mod assembler;
mod dedup;
mod filter;
mod ranker;

pub use assembler::{assemble_response, CompsResponse, InputSummary, ResponseMeta};
pub use dedup::dedup_comps;
pub use filter::{admit, filter_listings, Rejection};
pub use ranker::{compare_comps, rank_comps};

use crate::domain::geocoding::ResolvedLocation;
use crate::domain::listing::{CompQuery, ListingsBatch};

/// Run every stage over a candidate batch
pub fn build_response(
    batch: &ListingsBatch,
    query: &CompQuery,
    location: &ResolvedLocation,
    cap: usize,
) -> CompsResponse {
    let total_candidates = batch.listings.len();

    let survivors = filter_listings(&batch.listings, query);
    let unique = dedup_comps(survivors);
    let ranked = rank_comps(unique);

    tracing::debug!(
        total_candidates,
        matches = ranked.len(),
        source = %batch.source,
        "Comp pipeline complete"
    );

    assemble_response(
        ranked,
        InputSummary::new(location, query),
        batch.source,
        total_candidates,
        cap,
    )
}
