use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tower::ServiceExt;
use uuid::Uuid;

use milonga::{
    api,
    config::Settings,
    repository::{
        SqliteEventRepository, SqliteMemberRepository, SqliteProductRepository,
        SqliteSchoolRepository,
    },
    service::ServiceContext,
};

async fn build_app() -> anyhow::Result<Router> {
    let pool = SqlitePool::connect(":memory:").await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let settings = Settings::default();
    let service_context = Arc::new(ServiceContext::new(
        Arc::new(SqliteEventRepository::new(pool.clone())),
        Arc::new(SqliteSchoolRepository::new(pool.clone())),
        Arc::new(SqliteProductRepository::new(pool.clone())),
        Arc::new(SqliteMemberRepository::new(pool.clone())),
        settings.discovery.clone(),
    ));

    Ok(api::create_app(service_context, Arc::new(settings)))
}

async fn body_json(response: axum::response::Response) -> anyhow::Result<Value> {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn health_check_responds() -> anyhow::Result<()> {
    let app = build_app().await?;

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty())?)
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    Ok(())
}

#[tokio::test]
async fn signup_validates_and_creates_pending_member() -> anyhow::Result<()> {
    let app = build_app().await?;

    let response = app
        .clone()
        .oneshot(post_json(
            "/public/signup",
            json!({
                "email": "maria@example.com",
                "username": "maria_k",
                "full_name": "Maria K",
                "dance_styles": ["Bachata"]
            }),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await?;
    assert_eq!(body["status"], "Pending");

    // Bad email is rejected before anything is stored.
    let response = app
        .oneshot(post_json(
            "/public/signup",
            json!({
                "email": "not-an-email",
                "username": "someone",
                "full_name": "Someone"
            }),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    Ok(())
}

#[tokio::test]
async fn event_creation_rejects_out_of_range_coordinates() -> anyhow::Result<()> {
    let app = build_app().await?;

    let response = app
        .oneshot(post_json(
            "/api/events",
            json!({
                "title": "Broken",
                "description": "",
                "dance_style": "Salsa",
                "starts_at": null,
                "location": "Nowhere",
                "latitude": 123.0,
                "longitude": 29.0,
                "price": null,
                "image_url": null,
                "created_by": Uuid::new_v4()
            }),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    Ok(())
}

#[tokio::test]
async fn discovery_endpoint_filters_and_ranks() -> anyhow::Result<()> {
    let app = build_app().await?;
    let organizer = Uuid::new_v4();

    let near = json!({
        "title": "Salsa Sensations Night",
        "description": "Social night",
        "dance_style": "Salsa",
        "starts_at": (Utc::now() + Duration::days(1)).to_rfc3339(),
        "location": "Club Havana",
        "latitude": 41.008,
        "longitude": 28.978,
        "price": null,
        "image_url": null,
        "created_by": organizer
    });
    let far = json!({
        "title": "Bachata Bliss Party",
        "description": "Workshop and party",
        "dance_style": "Bachata",
        "starts_at": (Utc::now() + Duration::days(3)).to_rfc3339(),
        "location": "The Dance Floor",
        "latitude": 41.042,
        "longitude": 29.008,
        "price": null,
        "image_url": null,
        "created_by": organizer
    });
    let next_month = json!({
        "title": "Tango Milonga Night",
        "description": "Traditional milonga",
        "dance_style": "Tango",
        "starts_at": (Utc::now() + Duration::days(25)).to_rfc3339(),
        "location": "Pera Palace",
        "latitude": 41.032,
        "longitude": 28.975,
        "price": null,
        "image_url": null,
        "created_by": organizer
    });

    for event in [&far, &near, &next_month] {
        let response = app
            .clone()
            .oneshot(post_json("/api/events", event.clone()))
            .await?;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    // The week window drops the distant event; the observer orders the rest.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/events?window=week&lat=41.0&lon=29.0")
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await?;
    let events = body["events"].as_array().unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["title"], "Salsa Sensations Night");
    assert_eq!(events[1]["title"], "Bachata Bliss Party");
    assert!(events[0]["distance_km"].as_f64().unwrap() < events[1]["distance_km"].as_f64().unwrap());

    // Text search narrows further.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/events?q=havana")
                .body(Body::empty())?,
        )
        .await?;
    let body = body_json(response).await?;
    assert_eq!(body["total"], 1);

    // An unknown window is a client error.
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/events?window=fortnight")
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn school_directory_filters_by_tag() -> anyhow::Result<()> {
    let app = build_app().await?;

    let salsa_school = json!({
        "name": "Salsa Academy Istanbul",
        "location": "Kadıköy, İstanbul",
        "latitude": 40.990,
        "longitude": 29.027,
        "is_open": true,
        "tags": ["Salsa", "Bachata"],
        "phone": "02161234567",
        "image_url": null
    });
    let tango_school = json!({
        "name": "Tango Studio",
        "location": "Beşiktaş, İstanbul",
        "latitude": 41.043,
        "longitude": 29.005,
        "is_open": false,
        "tags": ["Tango"],
        "phone": null,
        "image_url": null
    });

    for school in [&salsa_school, &tango_school] {
        let response = app
            .clone()
            .oneshot(post_json("/api/schools", school.clone()))
            .await?;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/schools?tag=Tango")
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await?;
    let schools = body.as_array().unwrap();
    assert_eq!(schools.len(), 1);
    assert_eq!(schools[0]["name"], "Tango Studio");

    // open=true keeps only open schools.
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/schools?open=true")
                .body(Body::empty())?,
        )
        .await?;
    let body = body_json(response).await?;
    assert_eq!(body.as_array().unwrap().len(), 1);

    Ok(())
}
