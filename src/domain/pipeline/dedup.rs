//! Dedup engine - one comp per normalized address

use std::collections::HashSet;

use crate::domain::geocoding::normalize_address;
use crate::domain::listing::Comp;

/// Keep the first comp per normalized address, in the order given
pub fn dedup_comps(comps: Vec<Comp>) -> Vec<Comp> {
    let mut seen = HashSet::with_capacity(comps.len());

    comps
        .into_iter()
        .filter(|comp| seen.insert(normalize_address(&comp.address)))
        .collect()
}
