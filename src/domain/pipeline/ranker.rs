//! Ranker - canonical ordering of comps

use std::cmp::Ordering;

use crate::domain::listing::Comp;

/// Sort by distance ascending, price ascending, then square footage
/// descending with missing footage last. The sort is stable, so any
/// remaining ties keep their incoming order.
pub fn rank_comps(mut comps: Vec<Comp>) -> Vec<Comp> {
    comps.sort_by(compare_comps);
    comps
}

pub fn compare_comps(a: &Comp, b: &Comp) -> Ordering {
    a.distance_miles
        .total_cmp(&b.distance_miles)
        .then_with(|| a.price.cmp(&b.price))
        .then_with(|| match (a.square_footage, b.square_footage) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
}
