use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::DanceStyle;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct School {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub rating: f64,
    pub rating_count: i64,
    pub is_open: bool,
    /// Dance styles taught at this school.
    pub tags: Vec<DanceStyle>,
    pub phone: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DanceClass {
    pub id: Uuid,
    pub school_id: Uuid,
    pub title: String,
    pub instructor: String,
    pub weekday: Weekday,
    pub time: String,
    pub level: ClassLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Monday" => Some(Weekday::Monday),
            "Tuesday" => Some(Weekday::Tuesday),
            "Wednesday" => Some(Weekday::Wednesday),
            "Thursday" => Some(Weekday::Thursday),
            "Friday" => Some(Weekday::Friday),
            "Saturday" => Some(Weekday::Saturday),
            "Sunday" => Some(Weekday::Sunday),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT")]
pub enum ClassLevel {
    Beginner,
    Intermediate,
    Advanced,
    AllLevels,
}

impl ClassLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassLevel::Beginner => "Beginner",
            ClassLevel::Intermediate => "Intermediate",
            ClassLevel::Advanced => "Advanced",
            ClassLevel::AllLevels => "AllLevels",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Beginner" => Some(ClassLevel::Beginner),
            "Intermediate" => Some(ClassLevel::Intermediate),
            "Advanced" => Some(ClassLevel::Advanced),
            "AllLevels" => Some(ClassLevel::AllLevels),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSchoolRequest {
    pub name: String,
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub is_open: bool,
    pub tags: Vec<DanceStyle>,
    pub phone: Option<String>,
    pub image_url: Option<String>,
}
