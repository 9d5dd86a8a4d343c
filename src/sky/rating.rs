//! Sky quality rating
//!
//! Three sub-scores on a 0-100 scale:
//! - blocking penalty: low and mid cloud in the near zones hiding the horizon
//! - color potential: high and mid cloud in the far zones catching the light
//! - clear path: overall and low cloud between the observer and the far zones
//!
//! A fully blocked near zone short-circuits the rating to zero.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::round_half_up;
use crate::models::{Reach, WeatherSnapshot, Zone};

/// High cloud coverage (%) that scores best for colour
pub const IDEAL_HIGH_CLOUD: f64 = 55.0;
/// Mid cloud coverage (%) that scores best for texture
pub const IDEAL_MID_CLOUD: f64 = 30.0;

const LOW_BLOCKING_WEIGHT: f64 = 0.8;
const MID_BLOCKING_WEIGHT: f64 = 0.4;

const HIGH_COLOR_WEIGHT: f64 = 0.7;
const MID_COLOR_WEIGHT: f64 = 0.3;

const BASE_WEIGHT: f64 = 0.4;
const COLOR_WEIGHT: f64 = 0.4;
const CLEAR_PATH_WEIGHT: f64 = 0.2;

/// Sky quality on a 0-100 scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rating(u8);

impl Rating {
    pub const MAX: Rating = Rating(100);

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }

    /// Clamp to [0, 100] and round half up
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        Rating(round_half_up(score.clamp(0.0, 100.0)) as u8)
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self.0 {
            85..=100 => "Spectacular",
            65..=84 => "Great",
            45..=64 => "Good",
            25..=44 => "Fair",
            _ => "Poor",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/100", self.0)
    }
}

/// Sub-scores behind a rating
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingBreakdown {
    pub blocking_penalty: f64,
    pub color_potential: f64,
    pub clear_path: f64,
    /// Weighted score before clamping and rounding
    pub score: f64,
}

impl RatingBreakdown {
    #[must_use]
    pub fn calculate(snapshot: &WeatherSnapshot) -> Self {
        let blocking_penalty = blocking_penalty(snapshot);
        let color_potential = color_potential(snapshot);
        let clear_path = clear_path(snapshot);

        let base = 100.0 - blocking_penalty;
        let score = if base > 0.0 {
            base * BASE_WEIGHT + color_potential * COLOR_WEIGHT + clear_path * CLEAR_PATH_WEIGHT
        } else {
            0.0
        };

        Self {
            blocking_penalty,
            color_potential,
            clear_path,
            score,
        }
    }

    #[must_use]
    pub fn rating(&self) -> Rating {
        Rating::from_score(self.score)
    }
}

/// Rate a complete snapshot.
#[must_use]
pub fn rate(snapshot: &WeatherSnapshot) -> Rating {
    RatingBreakdown::calculate(snapshot).rating()
}

/// 100 at the ideal coverage, falling 2 points per percent away from it
#[must_use]
pub fn proximity_score(coverage: f64, ideal: f64) -> f64 {
    100.0 - ((coverage - ideal).abs() * 2.0).min(100.0)
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 { 0.0 } else { sum / count as f64 }
}

fn blocking_penalty(snapshot: &WeatherSnapshot) -> f64 {
    let blocking = mean(Zone::with_reach(Reach::Near).map(|zone| {
        let point = &snapshot[zone];
        point.cloud_cover_low * LOW_BLOCKING_WEIGHT + point.cloud_cover_mid * MID_BLOCKING_WEIGHT
    }));
    blocking.min(100.0)
}

fn color_potential(snapshot: &WeatherSnapshot) -> f64 {
    mean(Zone::with_reach(Reach::Far).map(|zone| {
        let point = &snapshot[zone];
        proximity_score(point.cloud_cover_high, IDEAL_HIGH_CLOUD) * HIGH_COLOR_WEIGHT
            + proximity_score(point.cloud_cover_mid, IDEAL_MID_CLOUD) * MID_COLOR_WEIGHT
    }))
}

fn clear_path(snapshot: &WeatherSnapshot) -> f64 {
    let clear = mean(
        snapshot
            .iter()
            .filter(|(zone, _)| zone.reach() != Reach::Reference)
            .map(|(_, point)| 1.0 - (point.cloud_cover * 0.5 + point.cloud_cover_low * 0.5) / 100.0),
    );
    clear * 100.0
}
