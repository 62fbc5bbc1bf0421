pub mod handlers;
pub mod state;

use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::{config::Settings, service::ServiceContext};
use state::AppState;

pub fn create_app(service_context: Arc<ServiceContext>, settings: Arc<Settings>) -> Router {
    let app_state = AppState::new(service_context, settings);

    Router::new()
        // Root and health endpoints
        .route("/", get(handlers::root::root))
        .route("/health", get(handlers::root::health_check))
        // API routes
        .nest("/api", api_routes())
        // Public routes (for website integration)
        .nest("/public", public_routes())
        // Add state to the router
        .with_state(app_state)
        // Middleware
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive()) // Configure properly for production
        .layer(TraceLayer::new_for_http())
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/events", event_routes())
        .nest("/schools", school_routes())
        .nest("/products", product_routes())
        .nest("/members", member_routes())
}

fn event_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::events::list))
        .route("/", post(handlers::events::create))
        .route("/:id", get(handlers::events::get))
        .route("/:id", put(handlers::events::update))
        .route("/:id", delete(handlers::events::delete))
        .route("/:id/attend", post(handlers::events::attend))
        .route("/:id/cancel", post(handlers::events::cancel))
        .route("/:id/favorite", post(handlers::events::favorite))
        .route("/:id/favorite", delete(handlers::events::unfavorite))
}

fn school_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::schools::list))
        .route("/", post(handlers::schools::create))
        .route("/:id", get(handlers::schools::get))
        .route("/:id", delete(handlers::schools::delete))
        .route("/:id/classes", get(handlers::schools::classes))
        .route("/:id/classes", post(handlers::schools::add_class))
}

fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::products::list))
        .route("/", post(handlers::products::create))
        .route("/:id", get(handlers::products::get))
        .route("/:id", delete(handlers::products::delete))
}

fn member_routes() -> Router<AppState> {
    Router::new()
        .route("/:id", get(handlers::members::get))
        .route("/:id", put(handlers::members::update))
        .route("/:id", delete(handlers::members::delete))
        .route("/:id/favorites", get(handlers::members::favorites))
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(handlers::members::signup))
        .route("/events", get(handlers::events::list_public))
}
