//! Linear interpolation of hourly forecast data to an exact instant

use crate::error::AfterglowError;
use crate::models::{WeatherPoint, WeatherSeries};

/// Interpolate every tracked variable of `series` at `target_time`.
///
/// The target must satisfy `time[i] <= target < time[i + 1]` for some `i`;
/// anything before the first sample or at/after the last one is an
/// [`AfterglowError::OutOfRange`]. Values are not clamped.
pub fn interpolate(target_time: i64, series: &WeatherSeries) -> crate::Result<WeatherPoint> {
    series.validate()?;

    let i = bracket_index(target_time, &series.time).ok_or_else(|| AfterglowError::OutOfRange {
        target: target_time,
        first: series.time[0],
        last: series.time[series.len() - 1],
    })?;

    let (t1, t2) = (series.time[i], series.time[i + 1]);
    let ratio = (target_time - t1) as f64 / (t2 - t1) as f64;
    let lerp = |values: &[f64]| values[i] + (values[i + 1] - values[i]) * ratio;

    Ok(WeatherPoint {
        temperature: lerp(&series.temperature),
        cloud_cover: lerp(&series.cloud_cover),
        cloud_cover_low: lerp(&series.cloud_cover_low),
        cloud_cover_mid: lerp(&series.cloud_cover_mid),
        cloud_cover_high: lerp(&series.cloud_cover_high),
        visibility: lerp(&series.visibility),
    })
}

/// Last index whose timestamp is <= target, provided a later sample exists
fn bracket_index(target_time: i64, time: &[i64]) -> Option<usize> {
    let after = time.partition_point(|&t| t <= target_time);
    (after > 0 && after < time.len()).then(|| after - 1)
}
