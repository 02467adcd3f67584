//! Recency token - listing age window understood by the listings provider

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// A days-on-market window such as `*:270`, `30:90` or `90`
///
/// `*` means "no lower bound". A bare number is an upper bound.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecencyToken {
    raw: String,
    min_days: Option<u32>,
    max_days: u32,
}

impl RecencyToken {
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let raw = value.trim();

        if raw.is_empty() {
            return Err(DomainError::invalid_input("Recency token cannot be empty"));
        }

        let (min_days, max_days) = match raw.split_once(':') {
            Some((min, max)) => {
                let min_days = match min.trim() {
                    "*" => None,
                    other => Some(parse_days(other, raw)?),
                };
                (min_days, parse_days(max.trim(), raw)?)
            }
            None => (None, parse_days(raw, raw)?),
        };

        if let Some(min) = min_days {
            if min > max_days {
                return Err(DomainError::invalid_input(format!(
                    "Malformed recency token '{}': lower bound exceeds upper bound",
                    raw
                )));
            }
        }

        Ok(Self {
            raw: raw.to_string(),
            min_days,
            max_days,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn min_days(&self) -> Option<u32> {
        self.min_days
    }

    pub fn max_days(&self) -> u32 {
        self.max_days
    }

    /// Whether a listing that has been on the market for `days` falls inside the window
    pub fn admits(&self, days: u32) -> bool {
        days <= self.max_days && self.min_days.is_none_or(|min| days >= min)
    }
}

fn parse_days(value: &str, raw: &str) -> Result<u32, DomainError> {
    value.parse::<u32>().map_err(|_| {
        DomainError::invalid_input(format!(
            "Malformed recency token '{}': expected '*:<days>', '<min>:<max>' or '<days>'",
            raw
        ))
    })
}

impl TryFrom<String> for RecencyToken {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<RecencyToken> for String {
    fn from(token: RecencyToken) -> Self {
        token.raw
    }
}

/// Up to 270 days on market
impl Default for RecencyToken {
    fn default() -> Self {
        Self {
            raw: "*:270".to_string(),
            min_days: None,
            max_days: 270,
        }
    }
}

impl std::fmt::Display for RecencyToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}
