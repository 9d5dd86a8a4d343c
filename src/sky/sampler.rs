//! Multi-zone weather sampling at the next sun event
//!
//! Resolves the next sunrise or sunset, projects the six sample points toward
//! it, fetches every point concurrently and interpolates each series to the
//! event instant. Any failure aborts the whole sample.

use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use super::{events, interpolation, projection};
use crate::error::AfterglowError;
use crate::models::{
    Coordinate, DailyEvents, SunEvent, SunEventKind, WeatherPoint, WeatherSnapshot, Zone,
};
use crate::weather::{ForecastProvider, solar};

/// Where sunrise/sunset times come from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventSource {
    /// Daily arrays from the base forecast, astronomical if absent
    #[default]
    Forecast,
    /// Always computed locally
    Astronomical,
}

/// Snapshot of all zones tagged with the event it was taken for
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkyForecast {
    #[serde(rename = "event-type")]
    pub event_type: SunEventKind,
    /// Unix timestamp (seconds)
    #[serde(rename = "event-time")]
    pub event_time: i64,
    #[serde(rename = "data")]
    pub snapshot: WeatherSnapshot,
}

impl SkyForecast {
    #[must_use]
    pub fn new(event: SunEvent, snapshot: WeatherSnapshot) -> Self {
        Self {
            event_type: event.kind,
            event_time: event.time,
            snapshot,
        }
    }

    #[must_use]
    pub fn event(&self) -> SunEvent {
        SunEvent::new(self.event_type, self.event_time)
    }
}

/// Samples a forecast provider along the sun-approach line
pub struct WeatherSampler<'a> {
    provider: &'a dyn ForecastProvider,
    event_source: EventSource,
}

impl<'a> WeatherSampler<'a> {
    #[must_use]
    pub fn new(provider: &'a dyn ForecastProvider, event_source: EventSource) -> Self {
        Self {
            provider,
            event_source,
        }
    }

    /// Weather at every zone for the next sun event after `current_time`.
    #[instrument(name = "sample_sky", skip(self), fields(source = ?self.event_source))]
    pub async fn sample(&self, base: Coordinate, current_time: i64) -> crate::Result<SkyForecast> {
        let event = self.resolve_event(base, current_time).await?;
        let direction = event.kind.direction();
        info!(
            "Next event: {} at {} (light from {:?})",
            event.kind, event.time, direction
        );

        // Projected points may run past the antimeridian
        let line = projection::sampling_line(base, direction).map(|at| at.wrapped());
        let samples = Zone::ALL
            .into_iter()
            .zip(line)
            .map(|(zone, at)| self.sample_zone(zone, at, event.time));
        let points = try_join_all(samples).await?;

        let snapshot = WeatherSnapshot::try_from(points)?;
        Ok(SkyForecast::new(event, snapshot))
    }

    async fn resolve_event(&self, base: Coordinate, current_time: i64) -> crate::Result<SunEvent> {
        let daily = match self.event_source {
            EventSource::Astronomical => solar::daily_events(base, current_time),
            EventSource::Forecast => {
                // The 0miles zone repeats this fetch; a cached client serves it locally
                let forecast = self
                    .provider
                    .forecast(base)
                    .await
                    .map_err(|e| AfterglowError::fetch(Zone::Miles0, format!("{e:#}")))?;
                match forecast.daily {
                    Some(daily) if !daily.is_empty() => daily,
                    _ => {
                        warn!("Forecast has no sunrise/sunset data, using astronomical times");
                        solar::daily_events(base, current_time)
                    }
                }
            }
        };

        let DailyEvents { sunrise, sunset } = daily;
        events::next_event(current_time, &sunrise, &sunset)
    }

    async fn sample_zone(&self, zone: Zone, at: Coordinate, event_time: i64) -> crate::Result<WeatherPoint> {
        let forecast = self
            .provider
            .forecast(at)
            .await
            .map_err(|e| AfterglowError::fetch(zone, format!("{e:#}")))?;

        let point = interpolation::interpolate(event_time, &forecast.hourly)?;
        if !point.is_finite() {
            return Err(AfterglowError::malformed(format!(
                "missing values around the event time at {zone}"
            )));
        }

        debug!(
            zone = %zone,
            at = %at,
            low = point.cloud_cover_low,
            mid = point.cloud_cover_mid,
            high = point.cloud_cover_high,
            "Sampled zone"
        );
        Ok(point)
    }
}
