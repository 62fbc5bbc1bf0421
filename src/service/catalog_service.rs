use std::sync::Arc;

use uuid::Uuid;

use crate::{
    domain::{CreateProductRequest, Product, ProductCategory},
    error::{AppError, Result},
    repository::ProductRepository,
};

// Catalog filtering happens in memory over a bounded scan.
const MAX_SCAN: i64 = 1000;

#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    pub category: Option<ProductCategory>,
    pub search_text: String,
    pub limit: i64,
    pub offset: i64,
}

pub struct CatalogService {
    repo: Arc<dyn ProductRepository>,
}

impl CatalogService {
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self {
        Self { repo }
    }

    /// Marketplace listing: newest first, filtered by category and
    /// case-insensitive text search over title and description.
    pub async fn list(&self, query: ProductQuery) -> Result<Vec<Product>> {
        let needle = query.search_text.trim().to_lowercase();

        let products = self
            .repo
            .list(MAX_SCAN, 0)
            .await?
            .into_iter()
            .filter(|p| query.category.map_or(true, |c| p.category == c))
            .filter(|p| {
                needle.is_empty()
                    || p.title.to_lowercase().contains(&needle)
                    || p.description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(&needle))
            })
            .skip(query.offset.max(0) as usize)
            .take(query.limit.max(0) as usize)
            .collect();

        Ok(products)
    }

    /// Get a product by ID.
    pub async fn get(&self, id: Uuid) -> Result<Option<Product>> {
        self.repo.find_by_id(id).await
    }

    /// List a new product.
    pub async fn create(&self, request: CreateProductRequest) -> Result<Product> {
        if request.title.trim().is_empty() {
            return Err(AppError::Validation("Product title must not be empty".to_string()));
        }
        if request.price_cents < 0 {
            return Err(AppError::Validation("Product price must not be negative".to_string()));
        }

        self.repo.create(request).await
    }

    /// Remove a listing.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

        self.repo.delete(id).await
    }
}
