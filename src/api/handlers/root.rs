use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

pub async fn root() -> impl IntoResponse {
    Json(json!({
        "name": "Milonga API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Event discovery backend for dance communities",
        "status": "operational",
        "endpoints": {
            "health": "/health",
            "events": "/api/events",
            "schools": "/api/schools",
            "products": "/api/products",
            "public": "/public"
        }
    }))
}

pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "timestamp": chrono::Utc::now().to_rfc3339()
        })),
    )
}
