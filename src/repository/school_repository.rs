use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::{ClassLevel, CreateSchoolRequest, DanceClass, DanceStyle, School, Weekday},
    error::{AppError, Result},
    repository::SchoolRepository,
};

#[derive(FromRow)]
struct SchoolRow {
    id: String,
    name: String,
    location: String,
    latitude: Option<f64>,
    longitude: Option<f64>,
    rating: f64,
    rating_count: i64,
    is_open: i32,
    tags: String,
    phone: Option<String>,
    image_url: Option<String>,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

#[derive(FromRow)]
struct ClassRow {
    id: String,
    school_id: String,
    title: String,
    instructor: String,
    weekday: String,
    time: String,
    level: String,
}

pub struct SqliteSchoolRepository {
    pool: SqlitePool,
}

impl SqliteSchoolRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // Tags are stored as a comma-separated list of dance style names.
    fn tags_to_str(tags: &[DanceStyle]) -> String {
        tags.iter().map(|t| t.as_str()).collect::<Vec<_>>().join(",")
    }

    fn parse_tags(s: &str) -> Result<Vec<DanceStyle>> {
        s.split(',')
            .filter(|part| !part.is_empty())
            .map(|part| {
                DanceStyle::parse(part)
                    .ok_or_else(|| AppError::Database(format!("Invalid dance style tag: {}", part)))
            })
            .collect()
    }

    fn row_to_school(row: SchoolRow) -> Result<School> {
        Ok(School {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            name: row.name,
            location: row.location,
            latitude: row.latitude,
            longitude: row.longitude,
            rating: row.rating,
            rating_count: row.rating_count,
            is_open: row.is_open != 0,
            tags: Self::parse_tags(&row.tags)?,
            phone: row.phone,
            image_url: row.image_url,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(row.updated_at, Utc),
        })
    }

    fn row_to_class(row: ClassRow) -> Result<DanceClass> {
        Ok(DanceClass {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            school_id: Uuid::parse_str(&row.school_id)
                .map_err(|e| AppError::Database(e.to_string()))?,
            title: row.title,
            instructor: row.instructor,
            weekday: Weekday::parse(&row.weekday)
                .ok_or_else(|| AppError::Database(format!("Invalid weekday: {}", row.weekday)))?,
            time: row.time,
            level: ClassLevel::parse(&row.level)
                .ok_or_else(|| AppError::Database(format!("Invalid class level: {}", row.level)))?,
        })
    }
}

#[async_trait]
impl SchoolRepository for SqliteSchoolRepository {
    async fn create(&self, request: CreateSchoolRequest) -> Result<School> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let is_open_int = if request.is_open { 1i32 } else { 0i32 };
        let tags_str = Self::tags_to_str(&request.tags);
        let now = Utc::now().naive_utc();

        sqlx::query(
            r#"
            INSERT INTO schools (
                id, name, location, latitude, longitude, rating, rating_count,
                is_open, tags, phone, image_url, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, 0, 0, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id_str)
        .bind(&request.name)
        .bind(&request.location)
        .bind(request.latitude)
        .bind(request.longitude)
        .bind(is_open_int)
        .bind(&tags_str)
        .bind(&request.phone)
        .bind(&request.image_url)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Database("Failed to retrieve created school".to_string()))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<School>> {
        let id_str = id.to_string();
        let row = sqlx::query_as::<_, SchoolRow>(
            r#"
            SELECT id, name, location, latitude, longitude, rating, rating_count,
                   is_open, tags, phone, image_url, created_at, updated_at
            FROM schools
            WHERE id = ?
            "#,
        )
        .bind(id_str)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Self::row_to_school(r)?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<School>> {
        let rows = sqlx::query_as::<_, SchoolRow>(
            r#"
            SELECT id, name, location, latitude, longitude, rating, rating_count,
                   is_open, tags, phone, image_url, created_at, updated_at
            FROM schools
            ORDER BY rating DESC, rating_count DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_school).collect()
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let id_str = id.to_string();
        sqlx::query("DELETE FROM schools WHERE id = ?")
            .bind(&id_str)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }

    async fn add_class(&self, class: DanceClass) -> Result<DanceClass> {
        let id_str = class.id.to_string();
        let school_id_str = class.school_id.to_string();

        sqlx::query(
            r#"
            INSERT INTO dance_classes (id, school_id, title, instructor, weekday, time, level)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id_str)
        .bind(&school_id_str)
        .bind(&class.title)
        .bind(&class.instructor)
        .bind(class.weekday.as_str())
        .bind(&class.time)
        .bind(class.level.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(class)
    }

    async fn list_classes(&self, school_id: Uuid) -> Result<Vec<DanceClass>> {
        let school_id_str = school_id.to_string();

        let rows = sqlx::query_as::<_, ClassRow>(
            r#"
            SELECT id, school_id, title, instructor, weekday, time, level
            FROM dance_classes
            WHERE school_id = ?
            ORDER BY weekday, time
            "#,
        )
        .bind(&school_id_str)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_class).collect()
    }
}
