use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    api::state::AppState,
    domain::{CreateProductRequest, Product, ProductCategory},
    error::{AppError, Result},
    service::ProductQuery,
};

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub category: Option<String>,
    pub q: Option<String>,
    pub limit: Option<i64>,
    #[serde(default)]
    pub offset: i64,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Product>>> {
    let category = params
        .category
        .as_deref()
        .map(|s| {
            ProductCategory::parse(s)
                .ok_or_else(|| AppError::BadRequest(format!("Unknown category '{}'", s)))
        })
        .transpose()?;

    let query = ProductQuery {
        category,
        search_text: params.q.unwrap_or_default(),
        limit: params
            .limit
            .unwrap_or(state.settings.discovery.default_limit),
        offset: params.offset,
    };

    let products = state.service_context.catalog_service.list(query).await?;

    Ok(Json(products))
}

pub async fn get(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<Product>> {
    let product = state
        .service_context
        .catalog_service
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    Ok(Json(product))
}

pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<Product>)> {
    let product = state
        .service_context
        .catalog_service
        .create(request)
        .await?;

    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<StatusCode> {
    state.service_context.catalog_service.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
