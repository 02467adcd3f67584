//! Address validation and normalization

use once_cell::sync::Lazy;
use regex::Regex;

/// `<number> <street>, <city>, <ST>[ <zip>[-<plus4>]]`
static US_ADDRESS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\d+\s+.+,\s*.+,\s*[A-Z]{2}(\s+\d{5}(-\d{4})?)?$")
        .expect("US address pattern is valid")
});

/// Basic shape check for US street addresses before they reach the geocoder
pub fn is_valid_us_address(address: &str) -> bool {
    let trimmed = address.trim();
    trimmed.len() >= 10 && US_ADDRESS.is_match(trimmed)
}

/// Case-fold and collapse whitespace so equivalent addresses compare equal
pub fn normalize_address(address: &str) -> String {
    address
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
