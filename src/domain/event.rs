use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub dance_style: DanceStyle,
    /// Authoritative start instant. Events may be published before a date is
    /// fixed; time-window filtering excludes undated events (see discovery).
    pub starts_at: Option<DateTime<Utc>>,
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub price: Option<String>,
    pub image_url: Option<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT")]
pub enum DanceStyle {
    Salsa,
    Bachata,
    Kizomba,
    Tango,
    Swing,
    Other,
}

impl DanceStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            DanceStyle::Salsa => "Salsa",
            DanceStyle::Bachata => "Bachata",
            DanceStyle::Kizomba => "Kizomba",
            DanceStyle::Tango => "Tango",
            DanceStyle::Swing => "Swing",
            DanceStyle::Other => "Other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Salsa" => Some(DanceStyle::Salsa),
            "Bachata" => Some(DanceStyle::Bachata),
            "Kizomba" => Some(DanceStyle::Kizomba),
            "Tango" => Some(DanceStyle::Tango),
            "Swing" => Some(DanceStyle::Swing),
            "Other" => Some(DanceStyle::Other),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub description: String,
    pub dance_style: DanceStyle,
    pub starts_at: Option<DateTime<Utc>>,
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub price: Option<String>,
    pub image_url: Option<String>,
    pub created_by: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventAttendance {
    pub event_id: Uuid,
    pub member_id: Uuid,
    pub status: AttendanceStatus,
    pub registered_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT")]
pub enum AttendanceStatus {
    Registered,
    Cancelled,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Registered => "Registered",
            AttendanceStatus::Cancelled => "Cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Registered" => Some(AttendanceStatus::Registered),
            "Cancelled" => Some(AttendanceStatus::Cancelled),
            _ => None,
        }
    }
}
