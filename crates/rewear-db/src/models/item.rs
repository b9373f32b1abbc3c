//! Item database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for items table
#[derive(Debug, Clone, FromRow)]
pub struct ItemModel {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub images: Vec<String>,
    pub category: String,
    pub size: Option<String>,
    pub condition: String,
    pub tags: Vec<String>,
    pub uploader_id: i64,
    pub status: String,
    pub points_value: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Item row joined with its uploader's name
#[derive(Debug, Clone, FromRow)]
pub struct ItemListingModel {
    #[sqlx(flatten)]
    pub item: ItemModel,
    pub uploader_name: String,
}
