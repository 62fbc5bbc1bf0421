use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::{
    discovery::{rank_by_proximity, Coordinates, MissingCoordsPolicy},
    domain::{CreateSchoolRequest, DanceClass, DanceStyle, School},
    error::{AppError, Result},
    repository::SchoolRepository,
};

#[derive(Debug, Clone, Default)]
pub struct SchoolQuery {
    /// Substring match against name and location, case-insensitive.
    pub search_text: String,
    pub tag: Option<DanceStyle>,
    pub open_only: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankedSchool {
    #[serde(flatten)]
    pub school: School,
    pub distance_km: Option<f64>,
}

pub struct SchoolService {
    repo: Arc<dyn SchoolRepository>,
    policy: MissingCoordsPolicy,
}

impl SchoolService {
    pub fn new(repo: Arc<dyn SchoolRepository>, policy: MissingCoordsPolicy) -> Self {
        Self { repo, policy }
    }

    /// School directory: filter by search text, taught style, and open state,
    /// then order by proximity to the observer when one is known.
    pub async fn directory(
        &self,
        query: SchoolQuery,
        observer: Option<Coordinates>,
    ) -> Result<Vec<RankedSchool>> {
        if let Some(obs) = observer {
            if !obs.in_range() {
                return Err(AppError::BadRequest(format!(
                    "Observer coordinates out of range: ({}, {})",
                    obs.latitude, obs.longitude
                )));
            }
        }

        let needle = query.search_text.trim().to_lowercase();

        let schools: Vec<School> = self
            .repo
            .list()
            .await?
            .into_iter()
            .filter(|s| {
                needle.is_empty()
                    || s.name.to_lowercase().contains(&needle)
                    || s.location.to_lowercase().contains(&needle)
            })
            .filter(|s| query.tag.map_or(true, |tag| s.tags.contains(&tag)))
            .filter(|s| !query.open_only || s.is_open)
            .collect();

        let ranked = rank_by_proximity(
            schools,
            |s| match (s.latitude, s.longitude) {
                (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
                _ => None,
            },
            observer,
            self.policy,
        );

        Ok(ranked
            .into_iter()
            .map(|(school, distance_km)| RankedSchool { school, distance_km })
            .collect())
    }

    /// Get a school by ID.
    pub async fn get(&self, id: Uuid) -> Result<Option<School>> {
        self.repo.find_by_id(id).await
    }

    /// Create a new school.
    pub async fn create(&self, request: CreateSchoolRequest) -> Result<School> {
        if request.name.trim().is_empty() {
            return Err(AppError::Validation("School name must not be empty".to_string()));
        }
        match (request.latitude, request.longitude) {
            (None, None) => {}
            (Some(lat), Some(lon)) => {
                if !Coordinates::new(lat, lon).in_range() {
                    return Err(AppError::Validation(format!(
                        "School coordinates out of range: ({}, {})",
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

        self.repo.create(request).await
    }

    /// Remove a school and its classes.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("School not found".to_string()))?;

        self.repo.delete(id).await
    }

    /// Weekly class schedule for a school.
    pub async fn classes(&self, school_id: Uuid) -> Result<Vec<DanceClass>> {
        self.repo
            .find_by_id(school_id)
            .await?
            .ok_or_else(|| AppError::NotFound("School not found".to_string()))?;

        self.repo.list_classes(school_id).await
    }

    pub async fn add_class(&self, class: DanceClass) -> Result<DanceClass> {
        self.repo
            .find_by_id(class.school_id)
            .await?
            .ok_or_else(|| AppError::NotFound("School not found".to_string()))?;

        self.repo.add_class(class).await
    }
}
