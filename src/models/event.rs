//! Sun event model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which side of the day the event is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SunEventKind {
    Sunrise,
    Sunset,
}

/// Compass side the approaching light comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    East,
    West,
}

impl SunEventKind {
    /// Sunrise light arrives from the east, sunset light from the west
    #[must_use]
    pub fn direction(self) -> Direction {
        match self {
            SunEventKind::Sunrise => Direction::East,
            SunEventKind::Sunset => Direction::West,
        }
    }
}

/// A sunrise or sunset at a unix timestamp (seconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SunEvent {
    pub kind: SunEventKind,
    pub time: i64,
}

impl SunEvent {
    #[must_use]
    pub fn new(kind: SunEventKind, time: i64) -> Self {
        Self { kind, time }
    }

    #[must_use]
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.time, 0)
    }
}

/// Upcoming sunrise and sunset timestamps for one location
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyEvents {
    pub sunrise: Vec<i64>,
    pub sunset: Vec<i64>,
}

impl DailyEvents {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sunrise.is_empty() && self.sunset.is_empty()
    }
}

impl std::fmt::Display for SunEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SunEventKind::Sunrise => write!(f, "Sunrise"),
            SunEventKind::Sunset => write!(f, "Sunset"),
        }
    }
}
