use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::{CreateMemberRequest, DanceStyle, Member, MemberStatus, UpdateMemberRequest},
    error::{AppError, Result},
    repository::MemberRepository,
};

#[derive(FromRow)]
struct MemberRow {
    id: String,
    email: String,
    username: String,
    full_name: String,
    status: String,
    bio: Option<String>,
    avatar_url: Option<String>,
    dance_styles: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

pub struct SqliteMemberRepository {
    pool: SqlitePool,
}

impl SqliteMemberRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn styles_to_str(styles: &[DanceStyle]) -> String {
        styles.iter().map(|s| s.as_str()).collect::<Vec<_>>().join(",")
    }

    fn parse_styles(s: &str) -> Result<Vec<DanceStyle>> {
        s.split(',')
            .filter(|part| !part.is_empty())
            .map(|part| {
                DanceStyle::parse(part)
                    .ok_or_else(|| AppError::Database(format!("Invalid dance style: {}", part)))
            })
            .collect()
    }

    fn row_to_member(row: MemberRow) -> Result<Member> {
        Ok(Member {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            email: row.email,
            username: row.username,
            full_name: row.full_name,
            status: MemberStatus::parse(&row.status)
                .ok_or_else(|| AppError::Database(format!("Invalid member status: {}", row.status)))?,
            bio: row.bio,
            avatar_url: row.avatar_url,
            dance_styles: Self::parse_styles(&row.dance_styles)?,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(row.updated_at, Utc),
        })
    }
}

#[async_trait]
impl MemberRepository for SqliteMemberRepository {
    async fn create(&self, request: CreateMemberRequest) -> Result<Member> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let styles_str = Self::styles_to_str(&request.dance_styles);
        let now = Utc::now().naive_utc();

        sqlx::query(
            r#"
            INSERT INTO members (
                id, email, username, full_name, status, bio, avatar_url,
                dance_styles, created_at, updated_at
            ) VALUES (?, ?, ?, ?, 'Pending', NULL, NULL, ?, ?, ?)
            "#,
        )
        .bind(&id_str)
        .bind(&request.email)
        .bind(&request.username)
        .bind(&request.full_name)
        .bind(&styles_str)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Database("Failed to retrieve created member".to_string()))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Member>> {
        let id_str = id.to_string();
        let row = sqlx::query_as::<_, MemberRow>(
            r#"
            SELECT id, email, username, full_name, status, bio, avatar_url,
                   dance_styles, created_at, updated_at
            FROM members
            WHERE id = ?
            "#,
        )
        .bind(id_str)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Self::row_to_member(r)?)),
            None => Ok(None),
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Member>> {
        let row = sqlx::query_as::<_, MemberRow>(
            r#"
            SELECT id, email, username, full_name, status, bio, avatar_url,
                   dance_styles, created_at, updated_at
            FROM members
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Self::row_to_member(r)?)),
            None => Ok(None),
        }
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Member>> {
        let row = sqlx::query_as::<_, MemberRow>(
            r#"
            SELECT id, email, username, full_name, status, bio, avatar_url,
                   dance_styles, created_at, updated_at
            FROM members
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Self::row_to_member(r)?)),
            None => Ok(None),
        }
    }

    async fn update(&self, id: Uuid, update: UpdateMemberRequest) -> Result<Member> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Member not found".to_string()))?;

        let full_name = update.full_name.unwrap_or(existing.full_name);
        let status = update.status.unwrap_or(existing.status);
        let bio = update.bio.or(existing.bio);
        let avatar_url = update.avatar_url.or(existing.avatar_url);
        let dance_styles = update.dance_styles.unwrap_or(existing.dance_styles);

        let id_str = id.to_string();
        let styles_str = Self::styles_to_str(&dance_styles);
        let now = Utc::now().naive_utc();

        sqlx::query(
            r#"
            UPDATE members
            SET full_name = ?, status = ?, bio = ?, avatar_url = ?,
                dance_styles = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&full_name)
        .bind(status.as_str())
        .bind(&bio)
        .bind(&avatar_url)
        .bind(&styles_str)
        .bind(now)
        .bind(&id_str)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Database("Failed to retrieve updated member".to_string()))
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let id_str = id.to_string();
        sqlx::query("DELETE FROM members WHERE id = ?")
            .bind(&id_str)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }
}
