//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use rewear_core::entities::{
    AdminLog, Item, ItemListing, PointsTransaction, RequestWithItem, RequestWithRequester,
    SwapRequest, TransactionWithItem, User,
};

use super::responses::{
    AdminLogResponse, CurrentUserResponse, IncomingSwapRequestResponse, ItemResponse,
    OutgoingSwapRequestResponse, SwapRequestResponse, TransactionItem, TransactionResponse,
    UserPointsResponse,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for CurrentUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            points: user.points,
            is_admin: user.is_admin,
            created_at: user.created_at,
        }
    }
}

impl From<User> for CurrentUserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

impl From<&User> for UserPointsResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            points: user.points,
        }
    }
}

// ============================================================================
// Item Mappers
// ============================================================================

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            title: item.title,
            description: item.description,
            images: item.images,
            category: item.category,
            size: item.size,
            condition: item.condition,
            tags: item.tags,
            uploader_id: item.uploader_id,
            status: item.status,
            points_value: item.points_value,
            created_at: item.created_at,
            updated_at: item.updated_at,
            uploader: None,
        }
    }
}

impl From<ItemListing> for ItemResponse {
    fn from(listing: ItemListing) -> Self {
        Self {
            uploader: Some(listing.uploader),
            ..Self::from(listing.item)
        }
    }
}

// ============================================================================
// Points Mappers
// ============================================================================

impl From<PointsTransaction> for TransactionResponse {
    fn from(tx: PointsTransaction) -> Self {
        Self {
            id: tx.id,
            user_id: tx.user_id,
            amount: tx.amount,
            reason: tx.reason,
            item_id: tx.item_id,
            item: None,
            created_at: tx.created_at,
        }
    }
}

impl From<TransactionWithItem> for TransactionResponse {
    fn from(row: TransactionWithItem) -> Self {
        let item = match (row.transaction.item_id, row.item_title) {
            (Some(id), Some(title)) => Some(TransactionItem { id, title }),
            _ => None,
        };
        Self {
            item,
            ..Self::from(row.transaction)
        }
    }
}

// ============================================================================
// Swap Mappers
// ============================================================================

impl From<SwapRequest> for SwapRequestResponse {
    fn from(request: SwapRequest) -> Self {
        Self {
            id: request.id,
            item_id: request.item_id,
            requester_id: request.requester_id,
            status: request.status,
            created_at: request.created_at,
            updated_at: request.updated_at,
        }
    }
}

impl From<RequestWithItem> for OutgoingSwapRequestResponse {
    fn from(row: RequestWithItem) -> Self {
        Self {
            request: row.request.into(),
            item: ItemListing {
                item: row.item,
                uploader: row.uploader,
            }
            .into(),
        }
    }
}

impl From<RequestWithRequester> for IncomingSwapRequestResponse {
    fn from(row: RequestWithRequester) -> Self {
        Self {
            request: row.request.into(),
            item: row.item.into(),
            requester: row.requester,
        }
    }
}

// ============================================================================
// Admin Mappers
// ============================================================================

impl From<AdminLog> for AdminLogResponse {
    fn from(log: AdminLog) -> Self {
        Self {
            id: log.id,
            action: log.action,
            item_id: log.item_id,
            admin_id: log.admin_id,
            details: log.details,
            created_at: log.created_at,
        }
    }
}
