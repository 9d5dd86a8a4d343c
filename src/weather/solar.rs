//! Astronomical sunrise/sunset times, used when the forecast carries none

use chrono::{DateTime, Days, NaiveDate, Utc};
use sunrise::{Coordinates, SolarDay, SolarEvent};
use tracing::debug;

use crate::models::{Coordinate, DailyEvents};

/// Sunrise and sunset for the day before `current_time` through two days after.
///
/// Days without an event (polar day or night) contribute nothing.
#[must_use]
pub fn daily_events(at: Coordinate, current_time: i64) -> DailyEvents {
    let mut events = DailyEvents::default();

    let Some(coordinates) = Coordinates::new(at.latitude, at.longitude) else {
        debug!("Invalid coordinates for solar calculation: {}", at);
        return events;
    };
    let Some(today) = DateTime::<Utc>::from_timestamp(current_time, 0).map(|t| t.date_naive()) else {
        return events;
    };

    for date in days_around(today) {
        let solar_day = SolarDay::new(coordinates, date);
        if let Some(sunrise) = solar_day.event_time(SolarEvent::Sunrise) {
            events.sunrise.push(sunrise.timestamp());
        }
        if let Some(sunset) = solar_day.event_time(SolarEvent::Sunset) {
            events.sunset.push(sunset.timestamp());
        }
    }

    events
}

fn days_around(today: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    let first = today.checked_sub_days(Days::new(1)).unwrap_or(today);
    (0..4).filter_map(move |offset| first.checked_add_days(Days::new(offset)))
}
