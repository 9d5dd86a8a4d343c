//! Per-cell impact map used to explain a rating visually
//!
//! Each cloud layer in each zone gets a signed impact estimate and a colour
//! band. The map is a heuristic explanation and does not have to agree with
//! the rating.

use serde::{Deserialize, Serialize};

use super::rating::{IDEAL_HIGH_CLOUD, IDEAL_MID_CLOUD, proximity_score};
use super::round_half_up;
use crate::models::{WeatherPoint, WeatherSnapshot, Zone};

/// Cloud layer shown as one row of the impact grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloudLayer {
    High,
    Mid,
    Low,
}

impl CloudLayer {
    /// Rows top to bottom
    pub const ALL: [CloudLayer; 3] = [CloudLayer::High, CloudLayer::Mid, CloudLayer::Low];

    #[must_use]
    pub fn coverage(self, point: &WeatherPoint) -> f64 {
        match self {
            CloudLayer::High => point.cloud_cover_high,
            CloudLayer::Mid => point.cloud_cover_mid,
            CloudLayer::Low => point.cloud_cover_low,
        }
    }

    /// Signed contribution of `coverage` percent of this layer in `zone`
    #[must_use]
    pub fn impact(self, zone: Zone, coverage: f64) -> i32 {
        let raw = match self {
            CloudLayer::High if zone.is_far() => proximity_score(coverage, IDEAL_HIGH_CLOUD) * 0.7,
            CloudLayer::High => 0.0,
            CloudLayer::Mid if zone.is_far() => proximity_score(coverage, IDEAL_MID_CLOUD) * 0.3,
            CloudLayer::Mid => -coverage * 0.4,
            CloudLayer::Low if zone.is_near() => -coverage * 0.8,
            CloudLayer::Low => -coverage * 0.2,
        };
        round_half_up(raw) as i32
    }
}

/// Impact bucket, ten points wide, from strongly negative to strongly positive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorBand {
    /// impact <= -50
    NegativeSevere,
    /// impact <= -40
    NegativeStrong,
    /// impact <= -30
    NegativeModerate,
    /// impact <= -20
    NegativeMild,
    /// impact <= -10
    NegativeSlight,
    /// -10 < impact < 0
    NegativeMinor,
    Neutral,
    /// 0 < impact < 10
    PositiveMinor,
    /// impact < 20
    PositiveSlight,
    /// impact < 30
    PositiveMild,
    /// impact < 40
    PositiveModerate,
    /// impact < 50
    PositiveStrong,
    /// impact >= 50
    PositiveSevere,
}

impl ColorBand {
    #[must_use]
    pub fn classify(impact: i32) -> Self {
        match impact {
            i32::MIN..=-50 => ColorBand::NegativeSevere,
            -49..=-40 => ColorBand::NegativeStrong,
            -39..=-30 => ColorBand::NegativeModerate,
            -29..=-20 => ColorBand::NegativeMild,
            -19..=-10 => ColorBand::NegativeSlight,
            -9..=-1 => ColorBand::NegativeMinor,
            0 => ColorBand::Neutral,
            1..=9 => ColorBand::PositiveMinor,
            10..=19 => ColorBand::PositiveSlight,
            20..=29 => ColorBand::PositiveMild,
            30..=39 => ColorBand::PositiveModerate,
            40..=49 => ColorBand::PositiveStrong,
            50..=i32::MAX => ColorBand::PositiveSevere,
        }
    }

    /// Tailwind background class used by the grid renderer
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            ColorBand::NegativeSevere => "bg-red-600",
            ColorBand::NegativeStrong => "bg-red-500",
            ColorBand::NegativeModerate => "bg-red-400",
            ColorBand::NegativeMild => "bg-red-300",
            ColorBand::NegativeSlight => "bg-red-200",
            // Same shade as NegativeStrong in the published palette; probably
            // meant to be bg-red-100.
            ColorBand::NegativeMinor => "bg-red-500",
            ColorBand::Neutral => "bg-gray-200",
            ColorBand::PositiveMinor => "bg-green-200",
            ColorBand::PositiveSlight => "bg-green-300",
            ColorBand::PositiveMild => "bg-green-400",
            ColorBand::PositiveModerate => "bg-green-500",
            ColorBand::PositiveStrong | ColorBand::PositiveSevere => "bg-green-600",
        }
    }
}

/// One cell of the layer x zone impact grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactCell {
    pub layer: CloudLayer,
    pub zone: Zone,
    /// Layer coverage percentage in this zone
    pub coverage: f64,
    pub impact: i32,
    pub band: ColorBand,
}

/// Impact cells for every layer and zone, layer-major.
#[must_use]
pub fn impacts(snapshot: &WeatherSnapshot) -> Vec<ImpactCell> {
    CloudLayer::ALL
        .into_iter()
        .flat_map(|layer| {
            snapshot.iter().map(move |(zone, point)| {
                let coverage = layer.coverage(point);
                let impact = layer.impact(zone, coverage);
                ImpactCell {
                    layer,
                    zone,
                    coverage,
                    impact,
                    band: ColorBand::classify(impact),
                }
            })
        })
        .collect()
}
