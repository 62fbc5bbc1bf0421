use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::{DanceStyle, Event},
    error::{AppError, Result},
    repository::EventRepository,
};

#[derive(FromRow)]
struct EventRow {
    id: String,
    title: String,
    description: String,
    dance_style: String,
    starts_at: Option<NaiveDateTime>,
    location: String,
    latitude: Option<f64>,
    longitude: Option<f64>,
    price: Option<String>,
    image_url: Option<String>,
    created_by: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

pub struct SqliteEventRepository {
    pool: SqlitePool,
}

impl SqliteEventRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_event(row: EventRow) -> Result<Event> {
        Ok(Event {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            title: row.title,
            description: row.description,
            dance_style: DanceStyle::parse(&row.dance_style)
                .ok_or_else(|| AppError::Database(format!("Invalid dance style: {}", row.dance_style)))?,
            starts_at: row.starts_at.map(|dt| DateTime::from_naive_utc_and_offset(dt, Utc)),
            location: row.location,
            latitude: row.latitude,
            longitude: row.longitude,
            price: row.price,
            image_url: row.image_url,
            created_by: Uuid::parse_str(&row.created_by)
                .map_err(|e| AppError::Database(e.to_string()))?,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(row.updated_at, Utc),
        })
    }
}

#[async_trait]
impl EventRepository for SqliteEventRepository {
    async fn create(&self, event: Event) -> Result<Event> {
        let id_str = event.id.to_string();
        let starts_at_naive = event.starts_at.map(|dt| dt.naive_utc());
        let created_by_str = event.created_by.to_string();
        let now = Utc::now().naive_utc();

        sqlx::query(
            r#"
            INSERT INTO events (
                id, title, description, dance_style, starts_at, location,
                latitude, longitude, price, image_url, created_by,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id_str)
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.dance_style.as_str())
        .bind(starts_at_naive)
        .bind(&event.location)
        .bind(event.latitude)
        .bind(event.longitude)
        .bind(&event.price)
        .bind(&event.image_url)
        .bind(&created_by_str)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(event.id)
            .await?
            .ok_or_else(|| AppError::Database("Failed to retrieve created event".to_string()))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>> {
        let id_str = id.to_string();
        let row = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, title, description, dance_style, starts_at, location,
                   latitude, longitude, price, image_url, created_by,
                   created_at, updated_at
            FROM events
            WHERE id = ?
            "#,
        )
        .bind(id_str)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Self::row_to_event(r)?)),
            None => Ok(None),
        }
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Event>> {
        let rows = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, title, description, dance_style, starts_at, location,
                   latitude, longitude, price, image_url, created_by,
                   created_at, updated_at
            FROM events
            ORDER BY starts_at IS NULL, starts_at ASC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_event).collect()
    }

    async fn list_upcoming(&self, limit: i64) -> Result<Vec<Event>> {
        let now = Utc::now().naive_utc();

        let rows = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, title, description, dance_style, starts_at, location,
                   latitude, longitude, price, image_url, created_by,
                   created_at, updated_at
            FROM events
            WHERE starts_at > ?
            ORDER BY starts_at ASC
            LIMIT ?
            "#,
        )
        .bind(now)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_event).collect()
    }

    async fn update(&self, id: Uuid, event: Event) -> Result<Event> {
        let id_str = id.to_string();
        let starts_at_naive = event.starts_at.map(|dt| dt.naive_utc());
        let now = Utc::now().naive_utc();

        sqlx::query(
            r#"
            UPDATE events
            SET title = ?, description = ?, dance_style = ?, starts_at = ?,
                location = ?, latitude = ?, longitude = ?, price = ?,
                image_url = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.dance_style.as_str())
        .bind(starts_at_naive)
        .bind(&event.location)
        .bind(event.latitude)
        .bind(event.longitude)
        .bind(&event.price)
        .bind(&event.image_url)
        .bind(now)
        .bind(&id_str)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Database("Failed to retrieve updated event".to_string()))
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let id_str = id.to_string();
        sqlx::query("DELETE FROM events WHERE id = ?")
            .bind(&id_str)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }

    async fn register_attendance(&self, event_id: Uuid, member_id: Uuid) -> Result<()> {
        let event_id_str = event_id.to_string();
        let member_id_str = member_id.to_string();

        sqlx::query(
            r#"
            INSERT INTO event_attendance (event_id, member_id, status, registered_at)
            VALUES (?, ?, 'Registered', CURRENT_TIMESTAMP)
            ON CONFLICT (event_id, member_id)
            DO UPDATE SET status = 'Registered', registered_at = CURRENT_TIMESTAMP
            "#,
        )
        .bind(&event_id_str)
        .bind(&member_id_str)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }

    async fn cancel_attendance(&self, event_id: Uuid, member_id: Uuid) -> Result<()> {
        let event_id_str = event_id.to_string();
        let member_id_str = member_id.to_string();

        sqlx::query(
            r#"
            UPDATE event_attendance
            SET status = 'Cancelled'
            WHERE event_id = ? AND member_id = ?
            "#,
        )
        .bind(&event_id_str)
        .bind(&member_id_str)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }

    async fn get_attendee_count(&self, event_id: Uuid) -> Result<i64> {
        let event_id_str = event_id.to_string();

        let row: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) as count
            FROM event_attendance
            WHERE event_id = ? AND status = 'Registered'
            "#,
        )
        .bind(&event_id_str)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(row.0)
    }

    async fn add_favorite(&self, event_id: Uuid, member_id: Uuid) -> Result<()> {
        let event_id_str = event_id.to_string();
        let member_id_str = member_id.to_string();

        sqlx::query(
            r#"
            INSERT INTO event_favorites (event_id, member_id, created_at)
            VALUES (?, ?, CURRENT_TIMESTAMP)
            ON CONFLICT (event_id, member_id) DO NOTHING
            "#,
        )
        .bind(&event_id_str)
        .bind(&member_id_str)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }

    async fn remove_favorite(&self, event_id: Uuid, member_id: Uuid) -> Result<()> {
        let event_id_str = event_id.to_string();
        let member_id_str = member_id.to_string();

        sqlx::query("DELETE FROM event_favorites WHERE event_id = ? AND member_id = ?")
            .bind(&event_id_str)
            .bind(&member_id_str)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }

    async fn list_favorites(&self, member_id: Uuid) -> Result<Vec<Event>> {
        let member_id_str = member_id.to_string();

        let rows = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT e.id, e.title, e.description, e.dance_style, e.starts_at,
                   e.location, e.latitude, e.longitude, e.price, e.image_url,
                   e.created_by, e.created_at, e.updated_at
            FROM events e
            INNER JOIN event_favorites f ON e.id = f.event_id
            WHERE f.member_id = ?
            ORDER BY f.created_at DESC
            "#,
        )
        .bind(&member_id_str)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_event).collect()
    }
}
