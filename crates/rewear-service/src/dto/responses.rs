//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Ids are plain JSON numbers.

use chrono::{DateTime, Utc};
use rewear_core::{
    AdminLogId, ItemCategory, ItemCondition, ItemId, ItemStatus, SwapRequestId, SwapStatus,
    TransactionId, UserId, UserSummary,
};
use serde::Serialize;

// ============================================================================
// Common Response Types
// ============================================================================

/// Page of results with page-number pagination
#[derive(Debug, Serialize)]
pub struct ItemPage {
    pub items: Vec<ItemResponse>,
    pub total: i64,
    pub current_page: u32,
    pub total_pages: i64,
}

/// Plain acknowledgement body
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ============================================================================
// Auth Responses
// ============================================================================

/// Authentication response with tokens
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: CurrentUserResponse,
}

impl AuthResponse {
    pub fn new(
        access_token: String,
        refresh_token: String,
        expires_in: i64,
        user: CurrentUserResponse,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in,
            user,
        }
    }
}

// ============================================================================
// User Responses
// ============================================================================

/// Current authenticated user (includes email and balance)
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserResponse {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub points: i32,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

/// Leaderboard row, also used for admin point adjustments
#[derive(Debug, Clone, Serialize)]
pub struct UserPointsResponse {
    pub id: UserId,
    pub name: String,
    pub points: i32,
}

// ============================================================================
// Item Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ItemResponse {
    pub id: ItemId,
    pub title: String,
    pub description: Option<String>,
    pub images: Vec<String>,
    pub category: ItemCategory,
    pub size: Option<String>,
    pub condition: ItemCondition,
    pub tags: Vec<String>,
    pub uploader_id: UserId,
    pub status: ItemStatus,
    pub points_value: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Present when the item was loaded with its uploader
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploader: Option<UserSummary>,
}

/// Landing page selection
#[derive(Debug, Serialize)]
pub struct FeaturedItemsResponse {
    pub newest: Vec<ItemResponse>,
    pub popular: Vec<ItemResponse>,
}

// ============================================================================
// Points Responses
// ============================================================================

#[derive(Debug, Serialize)]
pub struct RedemptionResponse {
    pub message: String,
    pub item_id: ItemId,
    pub points_spent: i32,
    pub remaining_points: i32,
}

#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    pub points: i32,
    pub user: BalanceUser,
}

#[derive(Debug, Serialize)]
pub struct BalanceUser {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionResponse {
    pub id: TransactionId,
    pub user_id: UserId,
    pub amount: i32,
    pub reason: String,
    pub item_id: Option<ItemId>,
    /// Title lookup for `item_id`; absent once the item is deleted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<TransactionItem>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionItem {
    pub id: ItemId,
    pub title: String,
}

/// Result of an admin balance adjustment
#[derive(Debug, Serialize)]
pub struct AddPointsResponse {
    pub message: String,
    pub user: UserPointsResponse,
    pub transaction: TransactionResponse,
}

// ============================================================================
// Swap Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct SwapRequestResponse {
    pub id: SwapRequestId,
    pub item_id: ItemId,
    pub requester_id: UserId,
    pub status: SwapStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A request made by the caller, with the item and its uploader
#[derive(Debug, Serialize)]
pub struct OutgoingSwapRequestResponse {
    #[serde(flatten)]
    pub request: SwapRequestResponse,
    pub item: ItemResponse,
}

/// A pending request on one of the caller's items, with the requester
#[derive(Debug, Serialize)]
pub struct IncomingSwapRequestResponse {
    #[serde(flatten)]
    pub request: SwapRequestResponse,
    pub item: ItemResponse,
    pub requester: UserSummary,
}

// ============================================================================
// Admin Responses
// ============================================================================

#[derive(Debug, Serialize)]
pub struct AdminLogResponse {
    pub id: AdminLogId,
    pub action: String,
    pub item_id: Option<ItemId>,
    pub admin_id: Option<UserId>,
    pub details: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub environment: String,
}

impl HealthResponse {
    pub fn healthy(environment: impl Into<String>) -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
            environment: environment.into(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }
}
