use chrono::{Duration, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use milonga::{
    domain::{CreateMemberRequest, DanceStyle, Event},
    repository::{
        EventRepository, MemberRepository, SqliteEventRepository, SqliteMemberRepository,
    },
};

async fn setup() -> anyhow::Result<SqlitePool> {
    // Create an in-memory SQLite database
    let pool = SqlitePool::connect(":memory:").await?;

    // Run migrations
    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

fn sample_event(title: &str, created_by: Uuid) -> Event {
    let now = Utc::now();
    Event {
        id: Uuid::new_v4(),
        title: title.to_string(),
        description: "Live orchestra, open floor.".to_string(),
        dance_style: DanceStyle::Salsa,
        starts_at: Some(now + Duration::days(2)),
        location: "Club Havana".to_string(),
        latitude: Some(41.008),
        longitude: Some(28.978),
        price: Some("₺150".to_string()),
        image_url: None,
        created_by,
        created_at: now,
        updated_at: now,
    }
}

#[tokio::test]
async fn test_event_crud() -> anyhow::Result<()> {
    let pool = setup().await?;
    let repo = SqliteEventRepository::new(pool.clone());
    let organizer = Uuid::new_v4();

    // Test Create
    let event = repo.create(sample_event("Salsa Sensations Night", organizer)).await?;
    assert_eq!(event.title, "Salsa Sensations Night");
    assert_eq!(event.dance_style, DanceStyle::Salsa);
    assert_eq!(event.latitude, Some(41.008));

    // Test Find by ID
    let found = repo.find_by_id(event.id).await?;
    assert!(found.is_some());
    assert_eq!(found.unwrap().id, event.id);

    // Test List
    let events = repo.list(10, 0).await?;
    assert_eq!(events.len(), 1);

    // Test Update
    let mut updated = event.clone();
    updated.title = "Salsa Night (rescheduled)".to_string();
    updated.starts_at = Some(Utc::now() + Duration::days(9));
    let updated = repo.update(event.id, updated).await?;
    assert_eq!(updated.title, "Salsa Night (rescheduled)");

    // Test Delete
    repo.delete(event.id).await?;
    let deleted = repo.find_by_id(event.id).await?;
    assert!(deleted.is_none());

    Ok(())
}

#[tokio::test]
async fn test_undated_event_round_trips() -> anyhow::Result<()> {
    let pool = setup().await?;
    let repo = SqliteEventRepository::new(pool.clone());

    let mut event = sample_event("Date TBA Social", Uuid::new_v4());
    event.starts_at = None;
    event.latitude = None;
    event.longitude = None;

    let created = repo.create(event).await?;
    assert!(created.starts_at.is_none());
    assert!(created.latitude.is_none());

    // Undated events never appear in the upcoming listing.
    let upcoming = repo.list_upcoming(10).await?;
    assert!(upcoming.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_attendance_and_favorites() -> anyhow::Result<()> {
    let pool = setup().await?;
    let event_repo = SqliteEventRepository::new(pool.clone());
    let member_repo = SqliteMemberRepository::new(pool.clone());

    let member = member_repo
        .create(CreateMemberRequest {
            email: "maria@example.com".to_string(),
            username: "maria".to_string(),
            full_name: "Maria K".to_string(),
            dance_styles: vec![DanceStyle::Bachata],
        })
        .await?;

    let event = event_repo
        .create(sample_event("Bachata Bliss Party", member.id))
        .await?;

    // Register, count, cancel
    event_repo.register_attendance(event.id, member.id).await?;
    assert_eq!(event_repo.get_attendee_count(event.id).await?, 1);

    // Re-registering is idempotent
    event_repo.register_attendance(event.id, member.id).await?;
    assert_eq!(event_repo.get_attendee_count(event.id).await?, 1);

    event_repo.cancel_attendance(event.id, member.id).await?;
    assert_eq!(event_repo.get_attendee_count(event.id).await?, 0);

    // Favorites
    event_repo.add_favorite(event.id, member.id).await?;
    event_repo.add_favorite(event.id, member.id).await?; // no-op on conflict
    let favorites = event_repo.list_favorites(member.id).await?;
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].id, event.id);

    event_repo.remove_favorite(event.id, member.id).await?;
    assert!(event_repo.list_favorites(member.id).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_member_unique_constraints() -> anyhow::Result<()> {
    let pool = setup().await?;
    let repo = SqliteMemberRepository::new(pool.clone());

    repo.create(CreateMemberRequest {
        email: "maria@example.com".to_string(),
        username: "maria".to_string(),
        full_name: "Maria K".to_string(),
        dance_styles: vec![],
    })
    .await?;

    let duplicate = repo
        .create(CreateMemberRequest {
            email: "maria@example.com".to_string(),
            username: "maria2".to_string(),
            full_name: "Other Maria".to_string(),
            dance_styles: vec![],
        })
        .await;
    assert!(duplicate.is_err());

    Ok(())
}
