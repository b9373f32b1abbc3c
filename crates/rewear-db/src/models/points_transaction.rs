//! Points transaction database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for points_transactions table
#[derive(Debug, Clone, FromRow)]
pub struct PointsTransactionModel {
    pub id: i64,
    pub user_id: i64,
    pub amount: i32,
    pub reason: String,
    pub item_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Transaction row with the title of its item, if the item still exists
#[derive(Debug, Clone, FromRow)]
pub struct TransactionWithItemModel {
    #[sqlx(flatten)]
    pub transaction: PointsTransactionModel,
    pub item_title: Option<String>,
}
