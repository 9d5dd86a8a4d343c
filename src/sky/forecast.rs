//! Sky Quality Forecast Module
//!
//! Combines multi-zone sampling, the rating engine and the impact map into a
//! single prediction for the next sunrise or sunset.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, instrument};

use super::impact::{self, CloudLayer, ImpactCell};
use super::rating::{Rating, RatingBreakdown};
use super::sampler::{EventSource, SkyForecast, WeatherSampler};
use crate::models::{Coordinate, Zone};
use crate::weather::ForecastProvider;

/// Complete prediction for one location and one sun event
#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    #[serde(flatten)]
    pub forecast: SkyForecast,
    pub rating: Rating,
    pub breakdown: RatingBreakdown,
    /// Layer-major impact grid (high, mid, low rows)
    pub impacts: Vec<ImpactCell>,
    /// When this prediction was generated
    pub generated_at: DateTime<Utc>,
}

impl Prediction {
    /// Score an already sampled forecast
    #[must_use]
    pub fn from_forecast(forecast: SkyForecast) -> Self {
        let breakdown = RatingBreakdown::calculate(&forecast.snapshot);
        let impacts = impact::impacts(&forecast.snapshot);
        Self {
            rating: breakdown.rating(),
            breakdown,
            impacts,
            forecast,
            generated_at: Utc::now(),
        }
    }

    /// Impact cells of one layer, in zone order
    pub fn layer(&self, layer: CloudLayer) -> impl Iterator<Item = &ImpactCell> {
        self.impacts.iter().filter(move |cell| cell.layer == layer)
    }
}

/// Sky forecast service
pub struct SkyForecastService;

impl SkyForecastService {
    /// Predict the quality of the next sunrise or sunset at `base`
    #[instrument(skip(provider))]
    pub async fn predict(
        provider: &dyn ForecastProvider,
        base: Coordinate,
        current_time: i64,
        event_source: EventSource,
    ) -> crate::Result<Prediction> {
        let forecast = WeatherSampler::new(provider, event_source)
            .sample(base, current_time)
            .await?;
        let prediction = Prediction::from_forecast(forecast);

        info!(
            rating = prediction.rating.value(),
            blocking = prediction.breakdown.blocking_penalty,
            color = prediction.breakdown.color_potential,
            clear_path = prediction.breakdown.clear_path,
            "{} rating for {}",
            prediction.forecast.event_type,
            base
        );
        Ok(prediction)
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let event = self.forecast.event();
        match event.datetime() {
            Some(time) => writeln!(f, "{} at {}", event.kind, time.format("%Y-%m-%d %H:%M UTC"))?,
            None => writeln!(f, "{} at {}", event.kind, event.time)?,
        }
        writeln!(f, "Rating: {} ({})", self.rating, self.rating.label())?;
        writeln!(
            f,
            "   blocking {:.0}, color {:.0}, clear path {:.0}",
            self.breakdown.blocking_penalty, self.breakdown.color_potential, self.breakdown.clear_path
        )?;

        write!(f, "{:>6}", "")?;
        for zone in Zone::ALL {
            write!(f, "{:>10}", zone.to_string())?;
        }
        writeln!(f)?;

        for layer in CloudLayer::ALL {
            write!(f, "{:>6}", format!("{layer:?}"))?;
            for cell in self.layer(layer) {
                write!(f, "{:>10}", format!("{:.0}% {:+}", cell.coverage, cell.impact))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SunEvent, SunEventKind, WeatherPoint, WeatherSnapshot};

    fn sunset_forecast() -> SkyForecast {
        let far = WeatherPoint {
            cloud_cover_high: 55.0,
            cloud_cover_mid: 30.0,
            ..WeatherPoint::default()
        };
        let snapshot = WeatherSnapshot::uniform(WeatherPoint::default())
            .with_point(Zone::Miles60, far)
            .with_point(Zone::Miles80, far);
        SkyForecast::new(SunEvent::new(SunEventKind::Sunset, 1_718_999_000), snapshot)
    }

    #[test]
    fn test_prediction_from_forecast() {
        let prediction = Prediction::from_forecast(sunset_forecast());
        assert_eq!(prediction.rating.value(), 100);
        assert_eq!(prediction.impacts.len(), 18);
        assert_eq!(prediction.layer(CloudLayer::Mid).count(), 6);
    }

    #[test]
    fn test_prediction_wire_format() {
        let prediction = Prediction::from_forecast(sunset_forecast());
        let value = serde_json::to_value(&prediction).unwrap();
        assert_eq!(value["event-type"], "sunset");
        assert_eq!(value["event-time"], 1_718_999_000);
        assert_eq!(value["rating"], 100);
        assert_eq!(value["data"]["80miles"]["cloud_cover_high"], 55.0);
        assert_eq!(value["impacts"][3]["zone"], "60miles");
        assert_eq!(value["impacts"][3]["band"], "positive_severe");
    }

    #[test]
    fn test_prediction_display() {
        let text = Prediction::from_forecast(sunset_forecast()).to_string();
        assert!(text.starts_with("Sunset at 2024-06-21"));
        assert!(text.contains("Rating: 100/100 (Spectacular)"));
        assert!(text.contains("100miles"));
        assert!(text.contains("55% +70"));
    }
}
