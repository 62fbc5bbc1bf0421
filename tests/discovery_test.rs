use chrono::{NaiveDate, TimeZone, Utc};
use uuid::Uuid;

use milonga::discovery::{
    distance_km, filter_and_rank, Coordinates, FilterCriteria, MissingCoordsPolicy, TimeWindow,
};
use milonga::domain::{DanceStyle, Event};

const TODAY: (i32, u32, u32) = (2024, 6, 15);

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(TODAY.0, TODAY.1, TODAY.2).unwrap()
}

fn event_on_day(id: u128, title: &str, location: &str, day_offset: i64) -> Event {
    let base = Utc
        .with_ymd_and_hms(TODAY.0, TODAY.1, TODAY.2, 10, 0, 0)
        .unwrap();
    Event {
        id: Uuid::from_u128(id),
        title: title.to_string(),
        description: String::new(),
        dance_style: DanceStyle::Salsa,
        starts_at: Some(base + chrono::Duration::days(day_offset)),
        location: location.to_string(),
        latitude: None,
        longitude: None,
        price: None,
        image_url: None,
        created_by: Uuid::from_u128(1000),
        created_at: base,
        updated_at: base,
    }
}

fn with_coords(mut event: Event, lat: f64, lon: f64) -> Event {
    event.latitude = Some(lat);
    event.longitude = Some(lon);
    event
}

fn criteria(window: TimeWindow, search: &str) -> FilterCriteria {
    FilterCriteria {
        time_window: window,
        search_text: search.to_string(),
    }
}

fn ids(ranked: &[milonga::discovery::RankedEvent]) -> Vec<Uuid> {
    ranked.iter().map(|r| r.event.id).collect()
}

#[test]
fn identical_inputs_give_identical_output() {
    let events = || {
        vec![
            with_coords(event_on_day(1, "Salsa Night", "Club Havana", 0), 41.01, 29.0),
            with_coords(event_on_day(2, "Tango Gala", "Pera Palace", 2), 41.2, 29.1),
            event_on_day(3, "Bachata Social", "Studio 34", 4),
        ]
    };
    let c = criteria(TimeWindow::ThisWeek, "");
    let observer = Some(Coordinates::new(41.0, 29.0));

    let first = ids(&filter_and_rank(events(), &c, observer, today(), MissingCoordsPolicy::SortToEnd));
    let second = ids(&filter_and_rank(events(), &c, observer, today(), MissingCoordsPolicy::SortToEnd));
    assert_eq!(first, second);
}

#[test]
fn today_window_matches_calendar_day_only() {
    let events = vec![
        event_on_day(1, "Tonight", "Club", 0),
        event_on_day(2, "Tomorrow", "Club", 1),
    ];

    let ranked = filter_and_rank(
        events.clone(),
        &criteria(TimeWindow::Today, ""),
        None,
        today(),
        MissingCoordsPolicy::SortToEnd,
    );
    assert_eq!(ids(&ranked), vec![Uuid::from_u128(1)]);

    // The same tomorrow event is in range for the week window.
    let ranked = filter_and_rank(
        events,
        &criteria(TimeWindow::ThisWeek, ""),
        None,
        today(),
        MissingCoordsPolicy::SortToEnd,
    );
    assert_eq!(ids(&ranked), vec![Uuid::from_u128(1), Uuid::from_u128(2)]);
}

#[test]
fn search_is_case_insensitive_and_empty_means_all() {
    let events = vec![
        event_on_day(1, "Salsa Night", "Club Havana", 0),
        event_on_day(2, "Tango Gala", "Pera Palace", 0),
    ];

    let ranked = filter_and_rank(
        events.clone(),
        &criteria(TimeWindow::All, "SALSA"),
        None,
        today(),
        MissingCoordsPolicy::SortToEnd,
    );
    assert_eq!(ids(&ranked), vec![Uuid::from_u128(1)]);

    let ranked = filter_and_rank(
        events,
        &criteria(TimeWindow::All, ""),
        None,
        today(),
        MissingCoordsPolicy::SortToEnd,
    );
    assert_eq!(ranked.len(), 2);
}

#[test]
fn nearer_event_ranks_first() {
    let events = vec![
        with_coords(event_on_day(1, "Far", "Hall", 0), 41.5, 29.0),
        with_coords(event_on_day(2, "Near", "Club", 0), 41.01, 29.0),
    ];

    let ranked = filter_and_rank(
        events,
        &criteria(TimeWindow::All, ""),
        Some(Coordinates::new(41.0, 29.0)),
        today(),
        MissingCoordsPolicy::SortToEnd,
    );
    assert_eq!(ids(&ranked), vec![Uuid::from_u128(2), Uuid::from_u128(1)]);
    // Display distances are rounded to one decimal and ascend.
    let d: Vec<f64> = ranked.iter().map(|r| r.distance_km.unwrap()).collect();
    assert!(d[0] < d[1]);
    assert_eq!(d[0], (d[0] * 10.0).round() / 10.0);
}

#[test]
fn no_observer_preserves_input_order_exactly() {
    let events = vec![
        with_coords(event_on_day(1, "C", "Z", 0), 41.5, 29.0),
        with_coords(event_on_day(2, "A", "X", 0), 41.01, 29.0),
        event_on_day(3, "B", "Y", 0),
    ];

    let ranked = filter_and_rank(
        events,
        &criteria(TimeWindow::All, ""),
        None,
        today(),
        MissingCoordsPolicy::SortToEnd,
    );
    assert_eq!(
        ids(&ranked),
        vec![Uuid::from_u128(1), Uuid::from_u128(2), Uuid::from_u128(3)]
    );
}

#[test]
fn undated_events_only_match_the_all_window() {
    let mut undated = event_on_day(1, "Date TBA", "Club", 0);
    undated.starts_at = None;

    for window in [TimeWindow::Today, TimeWindow::ThisWeek, TimeWindow::ThisMonth] {
        let ranked = filter_and_rank(
            vec![undated.clone()],
            &criteria(window, ""),
            None,
            today(),
            MissingCoordsPolicy::SortToEnd,
        );
        assert!(ranked.is_empty(), "{:?} should exclude undated events", window);
    }

    let ranked = filter_and_rank(
        vec![undated],
        &criteria(TimeWindow::All, ""),
        None,
        today(),
        MissingCoordsPolicy::SortToEnd,
    );
    assert_eq!(ranked.len(), 1);
}

// Two events inside the 7-day window, observer in the city center: both
// retained, nearer one first.
#[test]
fn week_window_with_observer_orders_by_distance() {
    let events = vec![
        with_coords(event_on_day(1, "Salsa Sensations Night", "Club Havana", 0), 41.008, 28.978),
        with_coords(event_on_day(2, "Urban Kizomba Workshop", "Studio 34", 5), 41.042, 29.008),
    ];

    let ranked = filter_and_rank(
        events,
        &criteria(TimeWindow::ThisWeek, ""),
        Some(Coordinates::new(41.0, 29.0)),
        today(),
        MissingCoordsPolicy::SortToEnd,
    );
    assert_eq!(ids(&ranked), vec![Uuid::from_u128(1), Uuid::from_u128(2)]);
}

#[test]
fn haversine_is_exact_at_zero_and_close_at_one_degree() {
    let p = Coordinates::new(41.0082, 28.9784);
    assert_eq!(distance_km(p, p), 0.0);

    let one_degree = distance_km(Coordinates::new(41.0, 29.0), Coordinates::new(42.0, 29.0));
    assert!((one_degree - 111.2).abs() < 0.5, "got {one_degree}");
}
