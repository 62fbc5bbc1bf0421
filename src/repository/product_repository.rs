use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::{CreateProductRequest, Product, ProductCategory, ProductCondition},
    error::{AppError, Result},
    repository::ProductRepository,
};

#[derive(FromRow)]
struct ProductRow {
    id: String,
    title: String,
    price_cents: i64,
    category: String,
    condition: String,
    description: Option<String>,
    image_url: Option<String>,
    seller_id: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

pub struct SqliteProductRepository {
    pool: SqlitePool,
}

impl SqliteProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_product(row: ProductRow) -> Result<Product> {
        Ok(Product {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            title: row.title,
            price_cents: row.price_cents,
            category: ProductCategory::parse(&row.category)
                .ok_or_else(|| AppError::Database(format!("Invalid category: {}", row.category)))?,
            condition: ProductCondition::parse(&row.condition)
                .ok_or_else(|| AppError::Database(format!("Invalid condition: {}", row.condition)))?,
            description: row.description,
            image_url: row.image_url,
            seller_id: Uuid::parse_str(&row.seller_id)
                .map_err(|e| AppError::Database(e.to_string()))?,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(row.updated_at, Utc),
        })
    }
}

#[async_trait]
impl ProductRepository for SqliteProductRepository {
    async fn create(&self, request: CreateProductRequest) -> Result<Product> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let seller_id_str = request.seller_id.to_string();
        let now = Utc::now().naive_utc();

        sqlx::query(
            r#"
            INSERT INTO products (
                id, title, price_cents, category, condition, description,
                image_url, seller_id, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id_str)
        .bind(&request.title)
        .bind(request.price_cents)
        .bind(request.category.as_str())
        .bind(request.condition.as_str())
        .bind(&request.description)
        .bind(&request.image_url)
        .bind(&seller_id_str)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Database("Failed to retrieve created product".to_string()))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>> {
        let id_str = id.to_string();
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, title, price_cents, category, condition, description,
                   image_url, seller_id, created_at, updated_at
            FROM products
            WHERE id = ?
            "#,
        )
        .bind(id_str)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Self::row_to_product(r)?)),
            None => Ok(None),
        }
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, title, price_cents, category, condition, description,
                   image_url, seller_id, created_at, updated_at
            FROM products
            ORDER BY created_at DESC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_product).collect()
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let id_str = id.to_string();
        sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(&id_str)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }
}
