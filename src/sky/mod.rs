//! Sky quality prediction
//!
//! This module turns forecast data into a sunrise/sunset quality prediction:
//! - Projection of sample points toward the sun event
//! - Next sun event selection
//! - Interpolation of hourly data to the event instant
//! - Multi-zone sampling against a forecast provider
//! - Rating and per-cell impact mapping

pub mod events;
pub mod forecast;
pub mod impact;
pub mod interpolation;
pub mod projection;
pub mod rating;
pub mod sampler;

pub use events::next_event;
pub use forecast::{Prediction, SkyForecastService};
pub use impact::{CloudLayer, ColorBand, ImpactCell, impacts};
pub use interpolation::interpolate;
pub use projection::{project, sampling_line};
pub use rating::{Rating, RatingBreakdown, rate};
pub use sampler::{EventSource, SkyForecast, WeatherSampler};

/// Round to the nearest integer, with halves going toward positive infinity
pub(crate) fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}
