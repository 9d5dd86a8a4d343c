//! `Afterglow` - Sunrise and sunset quality forecasts
//!
//! This library samples cloud cover along the line toward the next sunrise
//! or sunset, rates how colourful the sky is likely to be, and maps the
//! contribution of every cloud layer and distance zone.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod sky;
pub mod telemetry;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use config::AfterglowConfig;
pub use error::{AfterglowError, ErrorCode};
pub use models::{Coordinate, SunEvent, SunEventKind, WeatherPoint, WeatherSeries, WeatherSnapshot, Zone};
pub use sky::{EventSource, Prediction, Rating, SkyForecast, SkyForecastService, WeatherSampler};
pub use weather::{ForecastProvider, OpenMeteoClient};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, AfterglowError>;
