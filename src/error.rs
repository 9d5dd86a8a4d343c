//! Error types and handling for the `Afterglow` prediction pipeline

use serde::Serialize;
use thiserror::Error;

use crate::models::Zone;

/// Main error type for the prediction pipeline
#[derive(Error, Debug)]
pub enum AfterglowError {
    /// No sunrise or sunset strictly after the reference time
    #[error("No upcoming sun event after {after}")]
    NoUpcomingEvent { after: i64 },

    /// Target instant is not bracketed by the hourly series
    #[error("Event time {target} is outside the forecast range [{first}, {last})")]
    OutOfRange { target: i64, first: i64, last: i64 },

    /// Fewer (or more) zone samples than the fixed zone set
    #[error("Incomplete snapshot: expected {expected} zones, got {found}")]
    IncompleteSnapshot { expected: usize, found: usize },

    /// Hourly series with mismatched lengths, gaps or unsorted timestamps
    #[error("Malformed forecast series: {message}")]
    MalformedSeries { message: String },

    /// Forecast provider failure for one sample point
    #[error("Forecast fetch failed for {zone}: {message}")]
    Fetch { zone: Zone, message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Stable machine-readable error codes for API consumers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    NoUpcomingEvent,
    OutOfRange,
    IncompleteSnapshot,
    MalformedSeries,
    Fetch,
    Validation,
    Config,
}

impl AfterglowError {
    /// Create a new malformed series error
    pub fn malformed<S: Into<String>>(message: S) -> Self {
        Self::MalformedSeries {
            message: message.into(),
        }
    }

    /// Create a new fetch error for a zone
    pub fn fetch<S: Into<String>>(zone: Zone, message: S) -> Self {
        Self::Fetch {
            zone,
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            AfterglowError::NoUpcomingEvent { .. } => ErrorCode::NoUpcomingEvent,
            AfterglowError::OutOfRange { .. } => ErrorCode::OutOfRange,
            AfterglowError::IncompleteSnapshot { .. } => ErrorCode::IncompleteSnapshot,
            AfterglowError::MalformedSeries { .. } => ErrorCode::MalformedSeries,
            AfterglowError::Fetch { .. } => ErrorCode::Fetch,
            AfterglowError::Validation { .. } => ErrorCode::Validation,
            AfterglowError::Config { .. } => ErrorCode::Config,
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            AfterglowError::NoUpcomingEvent { .. } => {
                "No upcoming sunrise or sunset found in the forecast window.".to_string()
            }
            AfterglowError::OutOfRange { .. } | AfterglowError::MalformedSeries { .. } => {
                "The weather forecast does not cover the next sun event. Please try again later."
                    .to_string()
            }
            AfterglowError::IncompleteSnapshot { .. } => {
                "Weather data was incomplete along the sun path.".to_string()
            }
            AfterglowError::Fetch { .. } => {
                "Unable to reach the weather service. Please check your internet connection."
                    .to_string()
            }
            AfterglowError::Validation { message } => format!("Invalid input: {message}"),
            AfterglowError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
        }
    }
}
