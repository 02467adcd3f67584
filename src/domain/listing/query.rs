//! Comp query - the fully resolved search criteria

use serde::{Deserialize, Serialize};

use super::RecencyToken;
use crate::domain::cache::CacheKey;
use crate::domain::geo::GeoPoint;
use crate::domain::DomainError;

/// Bathroom count constrained to 0.5 steps, stored as half-baths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Bathrooms(u32);

impl Bathrooms {
    /// Accept a value only when it is a non-negative multiple of 0.5
    pub fn new(value: f64) -> Result<Self, DomainError> {
        if !value.is_finite() || value < 0.0 {
            return Err(DomainError::invalid_input(
                "Bathrooms must be a non-negative number",
            ));
        }

        let halves = value * 2.0;

        if halves.fract() != 0.0 || halves > u32::MAX as f64 {
            return Err(DomainError::invalid_input(
                "Bathrooms must be in 0.5 increments (e.g., 1, 1.5, 2)",
            ));
        }

        Ok(Self(halves as u32))
    }

    pub fn value(&self) -> f64 {
        f64::from(self.0) / 2.0
    }

    /// Exact comparison against a provider-reported count
    pub fn matches(&self, reported: f64) -> bool {
        reported == self.value()
    }
}

impl Serialize for Bathrooms {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.value())
    }
}

impl<'de> Deserialize<'de> for Bathrooms {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for Bathrooms {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// Immutable search criteria around a resolved subject point
#[derive(Debug, Clone, PartialEq)]
pub struct CompQuery {
    point: GeoPoint,
    bedrooms: Option<u32>,
    bathrooms: Option<Bathrooms>,
    radius_miles: f64,
    days_old: RecencyToken,
}

impl CompQuery {
    pub fn new(
        point: GeoPoint,
        bedrooms: Option<u32>,
        bathrooms: Option<Bathrooms>,
        radius_miles: f64,
        days_old: RecencyToken,
    ) -> Result<Self, DomainError> {
        if !radius_miles.is_finite() || radius_miles <= 0.0 {
            return Err(DomainError::invalid_input(
                "radius_miles must be greater than zero",
            ));
        }

        Ok(Self {
            point,
            bedrooms,
            bathrooms,
            radius_miles,
            days_old,
        })
    }

    pub fn point(&self) -> &GeoPoint {
        &self.point
    }

    pub fn bedrooms(&self) -> Option<u32> {
        self.bedrooms
    }

    pub fn bathrooms(&self) -> Option<Bathrooms> {
        self.bathrooms
    }

    pub fn radius_miles(&self) -> f64 {
        self.radius_miles
    }

    pub fn days_old(&self) -> &RecencyToken {
        &self.days_old
    }

    /// Canonical cache key. Coordinates are rounded to 6 decimals (~0.1 m).
    pub fn cache_key(&self, namespace: &'static str) -> CacheKey {
        let point = format!("{:.6},{:.6}", self.point.latitude(), self.point.longitude());

        CacheKey::new(namespace, point)
            .with_optional("bedrooms", self.bedrooms)
            .with_optional("bathrooms", self.bathrooms)
            .with("radius", self.radius_miles)
            .with("days_old", self.days_old.as_str())
    }
}
