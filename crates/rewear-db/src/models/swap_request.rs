//! Swap request database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::ItemModel;

/// Database model for swap_requests table
#[derive(Debug, Clone, FromRow)]
pub struct SwapRequestModel {
    pub id: i64,
    pub item_id: i64,
    pub requester_id: i64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Swap request joined with its item and the other party's name
///
/// Request columns are aliased with a `request_` prefix so they do not clash
/// with the item columns. `party_*` is the uploader when listing a requester's
/// requests and the requester when listing an owner's incoming requests.
#[derive(Debug, Clone, FromRow)]
pub struct SwapRequestJoinModel {
    pub request_id: i64,
    pub requester_id: i64,
    pub request_status: String,
    pub request_created_at: DateTime<Utc>,
    pub request_updated_at: DateTime<Utc>,
    #[sqlx(flatten)]
    pub item: ItemModel,
    pub party_id: i64,
    pub party_name: String,
}
