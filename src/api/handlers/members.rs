use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    api::state::AppState,
    domain::{CreateMemberRequest, DanceStyle, Member, MemberStatus, UpdateMemberRequest},
    error::{AppError, Result},
};

#[derive(Debug, Serialize)]
pub struct MemberDto {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub full_name: String,
    pub status: MemberStatus,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub dance_styles: Vec<DanceStyle>,
    pub joined_at: String,
}

impl From<Member> for MemberDto {
    fn from(member: Member) -> Self {
        Self {
            id: member.id,
            email: member.email,
            username: member.username,
            full_name: member.full_name,
            status: member.status,
            bio: member.bio,
            avatar_url: member.avatar_url,
            dance_styles: member.dance_styles,
            joined_at: member.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub username: String,
    pub full_name: String,
    #[serde(default)]
    pub dance_styles: Vec<DanceStyle>,
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub member_id: Uuid,
    pub status: MemberStatus,
    pub message: String,
}

pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>)> {
    let create_request = CreateMemberRequest {
        email: request.email,
        username: request.username,
        full_name: request.full_name,
        dance_styles: request.dance_styles,
    };

    let member = state
        .service_context
        .member_service
        .signup(create_request)
        .await?;

    let response = SignupResponse {
        member_id: member.id,
        status: member.status,
        message: "Registration successful. Your account is pending approval.".to_string(),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn get(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<MemberDto>> {
    let member = state
        .service_context
        .member_service
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Member not found".to_string()))?;

    Ok(Json(member.into()))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<UpdateMemberRequest>,
) -> Result<Json<MemberDto>> {
    let member = state
        .service_context
        .member_service
        .update_profile(id, update)
        .await?;

    Ok(Json(member.into()))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<StatusCode> {
    state.service_context.member_service.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn favorites(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<crate::domain::Event>>> {
    let events = state.service_context.member_service.favorites(id).await?;

    Ok(Json(events))
}
