use std::sync::Arc;

use uuid::Uuid;

use crate::{
    domain::{CreateMemberRequest, Event, Member, UpdateMemberRequest},
    error::{AppError, Result},
    repository::{EventRepository, MemberRepository},
};

pub struct MemberService {
    repo: Arc<dyn MemberRepository>,
    event_repo: Arc<dyn EventRepository>,
}

impl MemberService {
    pub fn new(repo: Arc<dyn MemberRepository>, event_repo: Arc<dyn EventRepository>) -> Self {
        Self { repo, event_repo }
    }

    /// Sign up a new member. Accounts start in Pending status.
    pub async fn signup(&self, request: CreateMemberRequest) -> Result<Member> {
        Self::validate_signup(&request)?;

        if self.repo.find_by_email(&request.email).await?.is_some() {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }
        if self.repo.find_by_username(&request.username).await?.is_some() {
            return Err(AppError::Conflict("Username already taken".to_string()));
        }

        self.repo.create(request).await
    }

    /// Get a member by ID.
    pub async fn get(&self, id: Uuid) -> Result<Option<Member>> {
        self.repo.find_by_id(id).await
    }

    /// Update profile fields.
    pub async fn update_profile(&self, id: Uuid, update: UpdateMemberRequest) -> Result<Member> {
        if let Some(ref full_name) = update.full_name {
            if full_name.trim().is_empty() {
                return Err(AppError::Validation("Name must not be empty".to_string()));
            }
        }

        self.repo.update(id, update).await
    }

    /// Delete an account.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Member not found".to_string()))?;

        self.repo.delete(id).await
    }

    pub async fn favorite_event(&self, member_id: Uuid, event_id: Uuid) -> Result<()> {
        self.repo
            .find_by_id(member_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Member not found".to_string()))?;
        self.event_repo
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

        self.event_repo.add_favorite(event_id, member_id).await
    }

    pub async fn unfavorite_event(&self, member_id: Uuid, event_id: Uuid) -> Result<()> {
        self.event_repo.remove_favorite(event_id, member_id).await
    }

    /// Events the member has favorited, most recently saved first.
    pub async fn favorites(&self, member_id: Uuid) -> Result<Vec<Event>> {
        self.repo
            .find_by_id(member_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Member not found".to_string()))?;

        self.event_repo.list_favorites(member_id).await
    }

    fn validate_signup(request: &CreateMemberRequest) -> Result<()> {
        if !request.email.contains('@') {
            return Err(AppError::Validation("Invalid email format".to_string()));
        }
        if request.username.len() < 3 {
            return Err(AppError::Validation(
                "Username must be at least 3 characters".to_string(),
            ));
        }
        if !request
            .username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(AppError::Validation(
                "Username may only contain letters, digits and underscores".to_string(),
            ));
        }
        if request.full_name.trim().is_empty() {
            return Err(AppError::Validation("Name must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DanceStyle;

    fn request(email: &str, username: &str, full_name: &str) -> CreateMemberRequest {
        CreateMemberRequest {
            email: email.to_string(),
            username: username.to_string(),
            full_name: full_name.to_string(),
            dance_styles: vec![DanceStyle::Salsa],
        }
    }

    #[test]
    fn rejects_bad_email() {
        let err = MemberService::validate_signup(&request("not-an-email", "maria", "Maria"));
        assert!(err.is_err());
    }

    #[test]
    fn rejects_short_or_odd_usernames() {
        assert!(MemberService::validate_signup(&request("a@b.co", "ab", "Maria")).is_err());
        assert!(MemberService::validate_signup(&request("a@b.co", "maria!", "Maria")).is_err());
        assert!(MemberService::validate_signup(&request("a@b.co", "maria_k", "Maria")).is_ok());
    }
}
