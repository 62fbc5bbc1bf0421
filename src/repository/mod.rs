use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::*;
use crate::error::Result;

pub mod event_repository;
pub mod member_repository;
pub mod product_repository;
pub mod school_repository;

pub use event_repository::SqliteEventRepository;
pub use member_repository::SqliteMemberRepository;
pub use product_repository::SqliteProductRepository;
pub use school_repository::SqliteSchoolRepository;

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, event: Event) -> Result<Event>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>>;
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Event>>;
    async fn list_upcoming(&self, limit: i64) -> Result<Vec<Event>>;
    async fn update(&self, id: Uuid, event: Event) -> Result<Event>;
    async fn delete(&self, id: Uuid) -> Result<()>;
    async fn register_attendance(&self, event_id: Uuid, member_id: Uuid) -> Result<()>;
    async fn cancel_attendance(&self, event_id: Uuid, member_id: Uuid) -> Result<()>;
    async fn get_attendee_count(&self, event_id: Uuid) -> Result<i64>;
    async fn add_favorite(&self, event_id: Uuid, member_id: Uuid) -> Result<()>;
    async fn remove_favorite(&self, event_id: Uuid, member_id: Uuid) -> Result<()>;
    async fn list_favorites(&self, member_id: Uuid) -> Result<Vec<Event>>;
}

#[async_trait]
pub trait SchoolRepository: Send + Sync {
    async fn create(&self, request: CreateSchoolRequest) -> Result<School>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<School>>;
    async fn list(&self) -> Result<Vec<School>>;
    async fn delete(&self, id: Uuid) -> Result<()>;
    async fn add_class(&self, class: DanceClass) -> Result<DanceClass>;
    async fn list_classes(&self, school_id: Uuid) -> Result<Vec<DanceClass>>;
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create(&self, request: CreateProductRequest) -> Result<Product>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>>;
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Product>>;
    async fn delete(&self, id: Uuid) -> Result<()>;
}

#[async_trait]
pub trait MemberRepository: Send + Sync {
    async fn create(&self, request: CreateMemberRequest) -> Result<Member>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Member>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Member>>;
    async fn find_by_username(&self, username: &str) -> Result<Option<Member>>;
    async fn update(&self, id: Uuid, update: UpdateMemberRequest) -> Result<Member>;
    async fn delete(&self, id: Uuid) -> Result<()>;
}
