use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    api::state::AppState,
    discovery::{Coordinates, FilterCriteria, RankedEvent, TimeWindow},
    domain::{CreateEventRequest, DanceStyle, Event},
    error::{AppError, Result},
};

#[derive(Debug, Deserialize)]
pub struct DiscoverParams {
    pub window: Option<String>,
    pub q: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct EventDto {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub dance_style: DanceStyle,
    pub starts_at: Option<String>,
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub price: Option<String>,
    pub image_url: Option<String>,
    pub attendees: i64,
    pub distance_km: Option<f64>,
}

impl EventDto {
    fn new(event: Event, attendees: i64, distance_km: Option<f64>) -> Self {
        Self {
            id: event.id,
            title: event.title,
            description: event.description,
            dance_style: event.dance_style,
            starts_at: event.starts_at.map(|dt| dt.to_rfc3339()),
            location: event.location,
            latitude: event.latitude,
            longitude: event.longitude,
            price: event.price,
            image_url: event.image_url,
            attendees,
            distance_km,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub events: Vec<EventDto>,
    pub total: usize,
}

fn parse_window(window: Option<&str>) -> Result<TimeWindow> {
    match window {
        None | Some("all") => Ok(TimeWindow::All),
        Some("today") => Ok(TimeWindow::Today),
        Some("week") => Ok(TimeWindow::ThisWeek),
        Some("month") => Ok(TimeWindow::ThisMonth),
        Some(other) => Err(AppError::BadRequest(format!(
            "Unknown time window '{}', expected all|today|week|month",
            other
        ))),
    }
}

pub(super) fn parse_observer(lat: Option<f64>, lon: Option<f64>) -> Result<Option<Coordinates>> {
    match (lat, lon) {
        (None, None) => Ok(None),
        (Some(lat), Some(lon)) => Ok(Some(Coordinates::new(lat, lon))),
        _ => Err(AppError::BadRequest(
            "lat and lon must be supplied together".to_string(),
        )),
    }
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<DiscoverParams>,
) -> Result<Json<ListResponse>> {
    let criteria = FilterCriteria {
        time_window: parse_window(params.window.as_deref())?,
        search_text: params.q.unwrap_or_default(),
    };
    let observer = parse_observer(params.lat, params.lon)?;
    let limit = params
        .limit
        .unwrap_or(state.settings.discovery.default_limit);

    let ranked = state
        .service_context
        .discovery_service
        .discover(criteria, observer, limit)
        .await?;

    let mut events = Vec::with_capacity(ranked.len());
    for RankedEvent { event, distance_km } in ranked {
        let attendees = state
            .service_context
            .discovery_service
            .attendee_count(event.id)
            .await?;
        events.push(EventDto::new(event, attendees, distance_km));
    }

    let total = events.len();
    Ok(Json(ListResponse { events, total }))
}

pub async fn get(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<EventDto>> {
    let event = state
        .service_context
        .discovery_service
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

    let attendees = state
        .service_context
        .discovery_service
        .attendee_count(id)
        .await?;

    Ok(Json(EventDto::new(event, attendees, None)))
}

pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<EventDto>)> {
    let event = state
        .service_context
        .discovery_service
        .create(request)
        .await?;

    Ok((StatusCode::CREATED, Json(EventDto::new(event, 0, None))))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CreateEventRequest>,
) -> Result<Json<EventDto>> {
    let event = state
        .service_context
        .discovery_service
        .update(id, request)
        .await?;

    let attendees = state
        .service_context
        .discovery_service
        .attendee_count(id)
        .await?;

    Ok(Json(EventDto::new(event, attendees, None)))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<StatusCode> {
    state.service_context.discovery_service.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct AttendRequest {
    pub member_id: Uuid,
}

pub async fn attend(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AttendRequest>,
) -> Result<StatusCode> {
    state
        .service_context
        .discovery_service
        .attend(id, request.member_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn cancel(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AttendRequest>,
) -> Result<StatusCode> {
    state
        .service_context
        .discovery_service
        .cancel_attendance(id, request.member_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn favorite(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AttendRequest>,
) -> Result<StatusCode> {
    state
        .service_context
        .member_service
        .favorite_event(request.member_id, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn unfavorite(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AttendRequest>,
) -> Result<StatusCode> {
    state
        .service_context
        .member_service
        .unfavorite_event(request.member_id, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct PublicEventsQuery {
    pub limit: Option<i64>,
    pub format: Option<String>, // "json" or "ical"
}

pub async fn list_public(
    State(state): State<AppState>,
    Query(params): Query<PublicEventsQuery>,
) -> Result<Response> {
    let limit = params
        .limit
        .unwrap_or(state.settings.discovery.default_limit);
    let events = state.service_context.event_repo.list_upcoming(limit).await?;

    // Check if iCal format is requested
    if params.format.as_deref() == Some("ical") {
        let ical = generate_ical_feed(&events);
        Ok((
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/calendar; charset=utf-8")],
            ical,
        )
            .into_response())
    } else {
        Ok(Json(events).into_response())
    }
}

// Helper function to generate iCal feed
fn generate_ical_feed(events: &[Event]) -> String {
    let mut ical = String::from("BEGIN:VCALENDAR\r\n");
    ical.push_str("VERSION:2.0\r\n");
    ical.push_str("PRODID:-//Milonga//Events//EN\r\n");
    ical.push_str("CALSCALE:GREGORIAN\r\n");
    ical.push_str("METHOD:PUBLISH\r\n");
    ical.push_str("X-WR-CALNAME:Milonga Events\r\n");

    for event in events {
        // Undated events have no place on a calendar.
        let Some(starts_at) = event.starts_at else {
            continue;
        };

        ical.push_str("BEGIN:VEVENT\r\n");
        ical.push_str(&format!("UID:{}\r\n", event.id));
        ical.push_str(&format!("DTSTART:{}\r\n", starts_at.format("%Y%m%dT%H%M%SZ")));
        ical.push_str(&format!("SUMMARY:{}\r\n", event.title));
        ical.push_str(&format!(
            "DESCRIPTION:{}\r\n",
            event.description.replace('\n', "\\n")
        ));
        ical.push_str(&format!("LOCATION:{}\r\n", event.location));

        if let (Some(lat), Some(lon)) = (event.latitude, event.longitude) {
            ical.push_str(&format!("GEO:{};{}\r\n", lat, lon));
        }

        ical.push_str(&format!(
            "CREATED:{}\r\n",
            event.created_at.format("%Y%m%dT%H%M%SZ")
        ));
        ical.push_str(&format!(
            "LAST-MODIFIED:{}\r\n",
            event.updated_at.format("%Y%m%dT%H%M%SZ")
        ));
        ical.push_str("STATUS:CONFIRMED\r\n");
        ical.push_str("END:VEVENT\r\n");
    }

    ical.push_str("END:VCALENDAR\r\n");
    ical
}
