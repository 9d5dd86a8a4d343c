//! Weather data sources
//!
//! The prediction pipeline only sees [`ForecastProvider`]; transport,
//! retries and caching live in the implementations.

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{Coordinate, RawForecast};

pub mod open_meteo;
pub mod solar;

pub use open_meteo::OpenMeteoClient;

/// Source of hourly point forecasts
#[async_trait]
pub trait ForecastProvider: Send + Sync {
    /// Hourly series (and sunrise/sunset arrays, when available) for one coordinate
    async fn forecast(&self, at: Coordinate) -> Result<RawForecast>;
}
