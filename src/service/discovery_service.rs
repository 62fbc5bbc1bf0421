use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    discovery::{filter_and_rank, Coordinates, FilterCriteria, MissingCoordsPolicy, RankedEvent},
    domain::{CreateEventRequest, Event},
    error::{AppError, Result},
    repository::EventRepository,
};

// Ranking happens in memory; cap how many rows one discovery pass loads.
const MAX_SCAN: i64 = 1000;

pub struct DiscoveryService {
    repo: Arc<dyn EventRepository>,
    policy: MissingCoordsPolicy,
}

impl DiscoveryService {
    pub fn new(repo: Arc<dyn EventRepository>, policy: MissingCoordsPolicy) -> Self {
        Self { repo, policy }
    }

    /// Run the discovery pipeline: load events, filter by the criteria and
    /// rank by proximity to the observer, then truncate to `limit`.
    pub async fn discover(
        &self,
        criteria: FilterCriteria,
        observer: Option<Coordinates>,
        limit: i64,
    ) -> Result<Vec<RankedEvent>> {
        if let Some(obs) = observer {
            if !obs.in_range() {
                return Err(AppError::BadRequest(format!(
                    "Observer coordinates out of range: ({}, {})",
                    obs.latitude, obs.longitude
                )));
            }
        }

        let events = self.repo.list(MAX_SCAN, 0).await?;
        let today = Utc::now().date_naive();

        let mut ranked = filter_and_rank(events, &criteria, observer, today, self.policy);
        ranked.truncate(limit.max(0) as usize);
        Ok(ranked)
    }

    /// Get an event by ID.
    pub async fn get(&self, id: Uuid) -> Result<Option<Event>> {
        self.repo.find_by_id(id).await
    }

    /// Create a new event.
    pub async fn create(&self, request: CreateEventRequest) -> Result<Event> {
        Self::validate(&request)?;

        let now = Utc::now();
        let event = Event {
            id: Uuid::new_v4(),
            title: request.title,
            description: request.description,
            dance_style: request.dance_style,
            starts_at: request.starts_at,
            location: request.location,
            latitude: request.latitude,
            longitude: request.longitude,
            price: request.price,
            image_url: request.image_url,
            created_by: request.created_by,
            created_at: now,
            updated_at: now,
        };

        self.repo.create(event).await
    }

    /// Replace an existing event's fields.
    pub async fn update(&self, id: Uuid, request: CreateEventRequest) -> Result<Event> {
        Self::validate(&request)?;

        let existing = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

        let event = Event {
            id: existing.id,
            title: request.title,
            description: request.description,
            dance_style: request.dance_style,
            starts_at: request.starts_at,
            location: request.location,
            latitude: request.latitude,
            longitude: request.longitude,
            price: request.price,
            image_url: request.image_url,
            created_by: existing.created_by,
            created_at: existing.created_at,
            updated_at: Utc::now(),
        };

        self.repo.update(id, event).await
    }

    /// Delete an event.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

        self.repo.delete(id).await
    }

    pub async fn attend(&self, event_id: Uuid, member_id: Uuid) -> Result<()> {
        self.repo
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

        self.repo.register_attendance(event_id, member_id).await
    }

    pub async fn cancel_attendance(&self, event_id: Uuid, member_id: Uuid) -> Result<()> {
        self.repo.cancel_attendance(event_id, member_id).await
    }

    pub async fn attendee_count(&self, event_id: Uuid) -> Result<i64> {
        self.repo.get_attendee_count(event_id).await
    }

    // Coordinate validation belongs here at the data-source boundary, so the
    // pure filter stays total over whatever is already stored.
    fn validate(request: &CreateEventRequest) -> Result<()> {
        if request.title.trim().is_empty() {
            return Err(AppError::Validation("Event title must not be empty".to_string()));
        }
        if request.location.trim().is_empty() {
            return Err(AppError::Validation("Event location must not be empty".to_string()));
        }
        match (request.latitude, request.longitude) {
            (None, None) => {}
            (Some(lat), Some(lon)) => {
                // NaN fails the range check as well.
                if !Coordinates::new(lat, lon).in_range() {
                    return Err(AppError::Validation(format!(
                        "Event coordinates out of range: ({}, {})",
                        lat, lon
                    )));
                }
            }
            _ => {
                return Err(AppError::Validation(
                    "Latitude and longitude must be supplied together".to_string(),
                ));
            }
        }
        Ok(())
    }
}
