//! Data models for the Afterglow prediction pipeline
//!
//! This module contains the core domain models organized by concern:
//! - Location: Geographic coordinates
//! - Zone: The fixed sampling distances and their near/far classification
//! - Event: Sunrise/sunset events and light direction
//! - Weather: Hourly series, interpolated points and zone snapshots

pub mod event;
pub mod location;
pub mod weather;
pub mod zone;

// Re-export all public types for convenient access
pub use event::{DailyEvents, Direction, SunEvent, SunEventKind};
pub use location::Coordinate;
pub use weather::{RawForecast, WeatherPoint, WeatherSeries, WeatherSnapshot};
pub use zone::{Reach, Zone};
