use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    api::{handlers::events::parse_observer, state::AppState},
    domain::{ClassLevel, CreateSchoolRequest, DanceClass, DanceStyle, School, Weekday},
    error::{AppError, Result},
    service::{RankedSchool, SchoolQuery},
};

#[derive(Debug, Deserialize)]
pub struct DirectoryParams {
    pub q: Option<String>,
    pub tag: Option<String>,
    #[serde(default)]
    pub open: bool,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<DirectoryParams>,
) -> Result<Json<Vec<RankedSchool>>> {
    let tag = params
        .tag
        .as_deref()
        .map(|s| {
            DanceStyle::parse(s)
                .ok_or_else(|| AppError::BadRequest(format!("Unknown dance style '{}'", s)))
        })
        .transpose()?;

    let query = SchoolQuery {
        search_text: params.q.unwrap_or_default(),
        tag,
        open_only: params.open,
    };
    let observer = parse_observer(params.lat, params.lon)?;

    let schools = state
        .service_context
        .school_service
        .directory(query, observer)
        .await?;

    Ok(Json(schools))
}

pub async fn get(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<School>> {
    let school = state
        .service_context
        .school_service
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("School not found".to_string()))?;

    Ok(Json(school))
}

pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateSchoolRequest>,
) -> Result<(StatusCode, Json<School>)> {
    let school = state.service_context.school_service.create(request).await?;

    Ok((StatusCode::CREATED, Json(school)))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<StatusCode> {
    state.service_context.school_service.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn classes(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<DanceClass>>> {
    let classes = state.service_context.school_service.classes(id).await?;

    Ok(Json(classes))
}

#[derive(Debug, Deserialize)]
pub struct AddClassRequest {
    pub title: String,
    pub instructor: String,
    pub weekday: Weekday,
    pub time: String,
    pub level: ClassLevel,
}

pub async fn add_class(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AddClassRequest>,
) -> Result<(StatusCode, Json<DanceClass>)> {
    let class = DanceClass {
        id: Uuid::new_v4(),
        school_id: id,
        title: request.title,
        instructor: request.instructor,
        weekday: request.weekday,
        time: request.time,
        level: request.level,
    };

    let class = state.service_context.school_service.add_class(class).await?;

    Ok((StatusCode::CREATED, Json(class)))
}
