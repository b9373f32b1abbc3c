//! Admin log database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for admin_logs table
#[derive(Debug, Clone, FromRow)]
pub struct AdminLogModel {
    pub id: i64,
    pub action: String,
    pub item_id: Option<i64>,
    pub admin_id: Option<i64>,
    pub details: Option<String>,
    pub created_at: DateTime<Utc>,
}
