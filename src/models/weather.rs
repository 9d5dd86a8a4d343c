//! Hourly forecast series, interpolated points and the six-zone snapshot

use std::ops::Index;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use super::{DailyEvents, Zone};
use crate::error::AfterglowError;

/// Hourly forecast arrays for one coordinate
///
/// All arrays are parallel to `time`, which holds unix timestamps (seconds)
/// at a fixed step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherSeries {
    pub time: Vec<i64>,
    /// Air temperature at 2 m, in the provider's configured unit
    pub temperature: Vec<f64>,
    /// Total cloud cover percentage (0-100)
    pub cloud_cover: Vec<f64>,
    /// Low cloud cover percentage (0-100)
    pub cloud_cover_low: Vec<f64>,
    /// Mid cloud cover percentage (0-100)
    pub cloud_cover_mid: Vec<f64>,
    /// High cloud cover percentage (0-100)
    pub cloud_cover_high: Vec<f64>,
    /// Visibility in metres
    pub visibility: Vec<f64>,
}

impl WeatherSeries {
    #[must_use]
    pub fn len(&self) -> usize {
        self.time.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Value arrays with their provider names, in a fixed order
    fn variables(&self) -> [(&'static str, &[f64]); 6] {
        [
            ("temperature", &self.temperature),
            ("cloud_cover", &self.cloud_cover),
            ("cloud_cover_low", &self.cloud_cover_low),
            ("cloud_cover_mid", &self.cloud_cover_mid),
            ("cloud_cover_high", &self.cloud_cover_high),
            ("visibility", &self.visibility),
        ]
    }

    /// Check the series is interpolatable: parallel arrays, at least two
    /// samples, strictly increasing time at a constant step.
    pub fn validate(&self) -> crate::Result<()> {
        let len = self.time.len();
        for (name, values) in self.variables() {
            if values.len() != len {
                return Err(AfterglowError::malformed(format!(
                    "{name} has {} values for {len} timestamps",
                    values.len()
                )));
            }
        }

        if len < 2 {
            return Err(AfterglowError::malformed(format!(
                "need at least two samples, got {len}"
            )));
        }

        let step = self.time[1] - self.time[0];
        if step <= 0 {
            return Err(AfterglowError::malformed(
                "timestamps are not strictly increasing",
            ));
        }

        if let Some(pair) = self.time.windows(2).find(|pair| pair[1] - pair[0] != step) {
            return Err(AfterglowError::malformed(format!(
                "irregular step between {} and {} (expected {step}s)",
                pair[0], pair[1]
            )));
        }

        Ok(())
    }
}

/// Interpolated weather at one coordinate and one instant
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherPoint {
    pub temperature: f64,
    pub cloud_cover: f64,
    pub cloud_cover_low: f64,
    pub cloud_cover_mid: f64,
    pub cloud_cover_high: f64,
    pub visibility: f64,
}

impl WeatherPoint {
    /// False when the provider reported a gap (null) next to the instant
    #[must_use]
    pub fn is_finite(&self) -> bool {
        [
            self.temperature,
            self.cloud_cover,
            self.cloud_cover_low,
            self.cloud_cover_mid,
            self.cloud_cover_high,
            self.visibility,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

/// Raw provider output for one coordinate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawForecast {
    pub hourly: WeatherSeries,
    /// Sunrise/sunset arrays, when the provider reports them
    pub daily: Option<DailyEvents>,
}

/// Weather at every zone along the sun line, at the event instant
///
/// Always holds exactly one point per [`Zone`]; there is no partial state.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    points: [WeatherPoint; Zone::COUNT],
}

impl WeatherSnapshot {
    #[must_use]
    pub fn new(points: [WeatherPoint; Zone::COUNT]) -> Self {
        Self { points }
    }

    /// Same reading in every zone
    #[must_use]
    pub fn uniform(point: WeatherPoint) -> Self {
        Self::new([point; Zone::COUNT])
    }

    #[must_use]
    pub fn point(&self, zone: Zone) -> &WeatherPoint {
        &self.points[zone.index()]
    }

    /// Zones paired with their readings, in distance order
    pub fn iter(&self) -> impl Iterator<Item = (Zone, &WeatherPoint)> {
        Zone::ALL.into_iter().zip(self.points.iter())
    }

    /// Copy of this snapshot with one zone replaced
    #[must_use]
    pub fn with_point(mut self, zone: Zone, point: WeatherPoint) -> Self {
        self.points[zone.index()] = point;
        self
    }
}

impl Index<Zone> for WeatherSnapshot {
    type Output = WeatherPoint;

    fn index(&self, zone: Zone) -> &Self::Output {
        self.point(zone)
    }
}

impl TryFrom<Vec<WeatherPoint>> for WeatherSnapshot {
    type Error = AfterglowError;

    fn try_from(points: Vec<WeatherPoint>) -> Result<Self, Self::Error> {
        let found = points.len();
        let points: [WeatherPoint; Zone::COUNT] =
            points
                .try_into()
                .map_err(|_| AfterglowError::IncompleteSnapshot {
                    expected: Zone::COUNT,
                    found,
                })?;
        Ok(Self::new(points))
    }
}

impl Serialize for WeatherSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Zone::COUNT))?;
        for (zone, point) in self.iter() {
            map.serialize_entry(&zone, point)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(time: Vec<i64>) -> WeatherSeries {
        let n = time.len();
        WeatherSeries {
            time,
            temperature: vec![50.0; n],
            cloud_cover: vec![10.0; n],
            cloud_cover_low: vec![0.0; n],
            cloud_cover_mid: vec![0.0; n],
            cloud_cover_high: vec![10.0; n],
            visibility: vec![24_000.0; n],
        }
    }

    #[test]
    fn test_validate_accepts_hourly_series() {
        assert!(series(vec![0, 3600, 7200]).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_gaps_and_disorder() {
        let gapped = series(vec![0, 3600, 10_800]);
        assert!(matches!(
            gapped.validate(),
            Err(AfterglowError::MalformedSeries { .. })
        ));

        let unsorted = series(vec![3600, 0, 7200]);
        assert!(unsorted.validate().is_err());

        let single = series(vec![0]);
        assert!(single.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_ragged_arrays() {
        let mut ragged = series(vec![0, 3600, 7200]);
        ragged.visibility.pop();
        let err = ragged.validate().unwrap_err();
        assert!(err.to_string().contains("visibility"));
    }

    #[test]
    fn test_snapshot_requires_all_zones() {
        let five = vec![WeatherPoint::default(); 5];
        let err = WeatherSnapshot::try_from(five).unwrap_err();
        assert!(matches!(
            err,
            AfterglowError::IncompleteSnapshot {
                expected: 6,
                found: 5
            }
        ));

        let six = vec![WeatherPoint::default(); 6];
        assert!(WeatherSnapshot::try_from(six).is_ok());
    }

    #[test]
    fn test_snapshot_serializes_keyed_by_zone() {
        let far = WeatherPoint {
            cloud_cover_high: 55.0,
            ..WeatherPoint::default()
        };
        let snapshot = WeatherSnapshot::uniform(WeatherPoint::default()).with_point(Zone::Miles60, far);
        let value = serde_json::to_value(&snapshot).unwrap();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 6);
        assert_eq!(value["60miles"]["cloud_cover_high"], 55.0);
        assert_eq!(value["0miles"]["cloud_cover_high"], 0.0);
    }
}
