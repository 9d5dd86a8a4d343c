//! Selection of the next sunrise or sunset

use crate::error::AfterglowError;
use crate::models::{SunEvent, SunEventKind};

/// First sunrise or sunset strictly after `current_time`.
///
/// Sunrises are merged ahead of sunsets before a stable sort, so identical
/// timestamps resolve to the earlier input.
pub fn next_event(current_time: i64, sunrises: &[i64], sunsets: &[i64]) -> crate::Result<SunEvent> {
    let mut events: Vec<SunEvent> = sunrises
        .iter()
        .map(|&time| SunEvent::new(SunEventKind::Sunrise, time))
        .chain(
            sunsets
                .iter()
                .map(|&time| SunEvent::new(SunEventKind::Sunset, time)),
        )
        .collect();
    events.sort_by_key(|event| event.time);

    events
        .into_iter()
        .find(|event| event.time > current_time)
        .ok_or(AfterglowError::NoUpcomingEvent {
            after: current_time,
        })
}
