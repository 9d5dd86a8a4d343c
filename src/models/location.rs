//! Coordinate model for observer and sample locations

use haversine::{Location as HaversineLocation, Units, distance};
use serde::{Deserialize, Serialize};

use crate::error::AfterglowError;

/// Geographic coordinate in decimal degrees
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Coordinate {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Reject coordinates that cannot be a point on Earth
    pub fn validate(&self) -> crate::Result<()> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(AfterglowError::validation(format!(
                "latitude {} must be between -90 and 90",
                self.latitude
            )));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(AfterglowError::validation(format!(
                "longitude {} must be between -180 and 180",
                self.longitude
            )));
        }
        Ok(())
    }

    /// Same point with longitude folded into [-180, 180)
    #[must_use]
    pub fn wrapped(&self) -> Self {
        Self::new(self.latitude, (self.longitude + 180.0).rem_euclid(360.0) - 180.0)
    }

    /// Great-circle distance in statute miles
    #[must_use]
    pub fn distance_miles(&self, other: &Coordinate) -> f64 {
        distance(
            HaversineLocation {
                latitude: self.latitude,
                longitude: self.longitude,
            },
            HaversineLocation {
                latitude: other.latitude,
                longitude: other.longitude,
            },
            Units::Miles,
        )
    }

    /// Format coordinate as a short string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }

    /// Generate cache key for this coordinate
    #[must_use]
    pub fn cache_key(&self) -> String {
        format!("forecast:{:.3}:{:.3}", self.latitude, self.longitude)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({})", self.format_coordinates())
    }
}
