use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: Uuid,
    pub title: String,
    pub price_cents: i64,
    pub category: ProductCategory,
    pub condition: ProductCondition,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub seller_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT")]
pub enum ProductCategory {
    Shoes,
    Clothing,
    Accessories,
    Music,
    Other,
}

impl ProductCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::Shoes => "Shoes",
            ProductCategory::Clothing => "Clothing",
            ProductCategory::Accessories => "Accessories",
            ProductCategory::Music => "Music",
            ProductCategory::Other => "Other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Shoes" => Some(ProductCategory::Shoes),
            "Clothing" => Some(ProductCategory::Clothing),
            "Accessories" => Some(ProductCategory::Accessories),
            "Music" => Some(ProductCategory::Music),
            "Other" => Some(ProductCategory::Other),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT")]
pub enum ProductCondition {
    New,
    LikeNew,
    Used,
}

impl ProductCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCondition::New => "New",
            ProductCondition::LikeNew => "LikeNew",
            ProductCondition::Used => "Used",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "New" => Some(ProductCondition::New),
            "LikeNew" => Some(ProductCondition::LikeNew),
            "Used" => Some(ProductCondition::Used),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProductRequest {
    pub title: String,
    pub price_cents: i64,
    pub category: ProductCategory,
    pub condition: ProductCondition,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub seller_id: Uuid,
}
