//! Event discovery: time-window and text filtering plus proximity ranking.
//!
//! This is pure, synchronous computation over an already-loaded event list.
//! It performs no I/O and holds no state; identical inputs always produce
//! the identical output order.

pub mod geo;

use std::cmp::Ordering;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::Event;

pub use geo::{display_km, distance_km, Coordinates, EARTH_RADIUS_KM};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeWindow {
    #[default]
    All,
    Today,
    ThisWeek,
    ThisMonth,
}

#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    pub time_window: TimeWindow,
    pub search_text: String,
}

/// How events without coordinates rank when a geo-sort happens.
///
/// `OriginFallback` reproduces the historical behavior: the missing pair is
/// treated as `(0, 0)`, so such events land wherever the equator/prime
/// meridian distance puts them. `SortToEnd` keeps them after all located
/// events, in their original relative order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissingCoordsPolicy {
    OriginFallback,
    #[default]
    SortToEnd,
}

/// An event surviving the filters, with the distance shown to the user.
///
/// `distance_km` is rounded to one decimal and only present when both the
/// observer and the event carry coordinates; fallback distances used for
/// ordering are never surfaced.
#[derive(Debug, Clone, Serialize)]
pub struct RankedEvent {
    #[serde(flatten)]
    pub event: Event,
    pub distance_km: Option<f64>,
}

/// Filter `events` by `criteria`, then rank by proximity to `observer`.
///
/// `today` is the caller's current calendar day; window boundaries compare
/// the event's UTC calendar day against it. Events without a start instant
/// are excluded by every window other than `All`. Without an observer, or
/// when no surviving event has coordinates, the input order is preserved
/// exactly.
pub fn filter_and_rank(
    events: Vec<Event>,
    criteria: &FilterCriteria,
    observer: Option<Coordinates>,
    today: NaiveDate,
    policy: MissingCoordsPolicy,
) -> Vec<RankedEvent> {
    let needle = criteria.search_text.trim().to_lowercase();

    let surviving: Vec<Event> = events
        .into_iter()
        .filter(|e| matches_window(e, criteria.time_window, today))
        .filter(|e| needle.is_empty() || matches_search(e, &needle))
        .collect();

    rank_by_proximity(surviving, event_coords, observer, policy)
        .into_iter()
        .map(|(event, distance_km)| RankedEvent { event, distance_km })
        .collect()
}

/// Order `items` ascending by Haversine distance from `observer`, yielding
/// each item with its rounded display distance.
///
/// The ordering uses unrounded distances. If `observer` is `None`, or no
/// item has coordinates, the input order is untouched and every display
/// distance is `None`. Items without coordinates rank per `policy`; their
/// display distance is always `None` (the `(0, 0)` fallback is never shown).
pub fn rank_by_proximity<T>(
    items: Vec<T>,
    coords: impl Fn(&T) -> Option<Coordinates>,
    observer: Option<Coordinates>,
    policy: MissingCoordsPolicy,
) -> Vec<(T, Option<f64>)> {
    let observer = match observer {
        Some(obs) if items.iter().any(|item| coords(item).is_some()) => obs,
        _ => return items.into_iter().map(|item| (item, None)).collect(),
    };

    let mut ranked: Vec<(Option<f64>, T, Option<f64>)> = items
        .into_iter()
        .map(|item| {
            let exact = coords(&item).map(|c| distance_km(observer, c));
            let sort_distance = match policy {
                MissingCoordsPolicy::OriginFallback => {
                    Some(exact.unwrap_or_else(|| distance_km(observer, Coordinates::new(0.0, 0.0))))
                }
                MissingCoordsPolicy::SortToEnd => exact,
            };
            (sort_distance, item, exact.map(display_km))
        })
        .collect();

    // Vec::sort_by is stable: ties and the unlocated tail keep input order.
    ranked.sort_by(|(a, _, _), (b, _, _)| match (a, b) {
        (Some(a), Some(b)) => cmp_distance(*a, *b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    ranked.into_iter().map(|(_, item, shown)| (item, shown)).collect()
}

fn matches_window(event: &Event, window: TimeWindow, today: NaiveDate) -> bool {
    if window == TimeWindow::All {
        return true;
    }
    let Some(starts_at) = event.starts_at else {
        // Undated events must not match a concrete day/week/month.
        return false;
    };
    let day = starts_at.date_naive();
    match window {
        TimeWindow::All => true,
        TimeWindow::Today => day == today,
        TimeWindow::ThisWeek => {
            day >= today && today.checked_add_days(Days::new(7)).is_some_and(|end| day <= end)
        }
        TimeWindow::ThisMonth => day.month() == today.month() && day.year() == today.year(),
    }
}

fn matches_search(event: &Event, needle: &str) -> bool {
    event.title.to_lowercase().contains(needle) || event.location.to_lowercase().contains(needle)
}

fn event_coords(event: &Event) -> Option<Coordinates> {
    match (event.latitude, event.longitude) {
        (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
        _ => None,
    }
}

// NaN distances (malformed coordinates) sort after every real distance,
// equal among themselves so the stable sort keeps their input order.
fn cmp_distance(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.total_cmp(&b),
    }
}
