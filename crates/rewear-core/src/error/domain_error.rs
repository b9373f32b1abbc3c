//! Domain errors - error types for the domain layer

use serde_json::json;
use thiserror::Error;

use crate::value_objects::{ItemId, SwapRequestId, SwapStatus, UserId};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),

    #[error("Swap request not found: {0}")]
    SwapRequestNotFound(SwapRequestId),

    #[error("Session not found")]
    SessionNotFound,

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Invalid category: {0}")]
    InvalidCategory(String),

    #[error("Invalid condition: {0}")]
    InvalidCondition(String),

    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    #[error("Points value must be between {min} and {max}")]
    PointsOutOfRange { min: i32, max: i32 },

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Access denied: not the item owner")]
    NotItemOwner,

    #[error("Access denied: not a party to this swap")]
    NotSwapParty,

    #[error("Admin access required")]
    AdminRequired,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already registered")]
    EmailAlreadyExists,

    #[error("You already have a pending request for this item")]
    DuplicateSwapRequest,

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("Item is not available for swap")]
    ItemNotAvailable,

    #[error("Insufficient points")]
    InsufficientPoints { required: i32, available: i32 },

    #[error("Cannot redeem your own item")]
    CannotRedeemOwnItem,

    #[error("Cannot swap your own item")]
    CannotSwapOwnItem,

    #[error("Swap request must be approved first")]
    SwapNotApproved,

    #[error("Cannot move swap request from {from} to {to}")]
    InvalidSwapTransition { from: SwapStatus, to: SwapStatus },

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::ItemNotFound(_) => "UNKNOWN_ITEM",
            Self::SwapRequestNotFound(_) => "UNKNOWN_SWAP_REQUEST",
            Self::SessionNotFound => "UNKNOWN_SESSION",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidCategory(_) => "INVALID_CATEGORY",
            Self::InvalidCondition(_) => "INVALID_CONDITION",
            Self::InvalidStatus(_) => "INVALID_STATUS",
            Self::PointsOutOfRange { .. } => "POINTS_OUT_OF_RANGE",

            // Authorization
            Self::NotItemOwner => "NOT_ITEM_OWNER",
            Self::NotSwapParty => "NOT_SWAP_PARTY",
            Self::AdminRequired => "ADMIN_REQUIRED",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::DuplicateSwapRequest => "DUPLICATE_SWAP_REQUEST",

            // Business Rules
            Self::ItemNotAvailable => "ITEM_NOT_AVAILABLE",
            Self::InsufficientPoints { .. } => "INSUFFICIENT_POINTS",
            Self::CannotRedeemOwnItem => "CANNOT_REDEEM_OWN_ITEM",
            Self::CannotSwapOwnItem => "CANNOT_SWAP_OWN_ITEM",
            Self::SwapNotApproved => "SWAP_NOT_APPROVED",
            Self::InvalidSwapTransition { .. } => "INVALID_SWAP_TRANSITION",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Structured context for API error bodies
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Self::InsufficientPoints {
                required,
                available,
            } => Some(json!({ "required": required, "available": available })),
            Self::InvalidSwapTransition { from, to } => {
                Some(json!({ "from": from.as_str(), "to": to.as_str() }))
            }
            Self::PointsOutOfRange { min, max } => Some(json!({ "min": min, "max": max })),
            _ => None,
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::ItemNotFound(_)
                | Self::SwapRequestNotFound(_)
                | Self::SessionNotFound
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidEmail
                | Self::InvalidCategory(_)
                | Self::InvalidCondition(_)
                | Self::InvalidStatus(_)
                | Self::PointsOutOfRange { .. }
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::NotItemOwner | Self::NotSwapParty | Self::AdminRequired
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::EmailAlreadyExists | Self::DuplicateSwapRequest)
    }

    /// Check if this is a business rule violation (wrong state, self-action, balance)
    pub fn is_business_rule(&self) -> bool {
        matches!(
            self,
            Self::ItemNotAvailable
                | Self::InsufficientPoints { .. }
                | Self::CannotRedeemOwnItem
                | Self::CannotSwapOwnItem
                | Self::SwapNotApproved
                | Self::InvalidSwapTransition { .. }
        )
    }

    /// HTTP status for this error
    ///
    /// Conflicts and rule violations are reported as 400, which is what
    /// existing clients of the marketplace API expect.
    pub fn http_status(&self) -> u16 {
        if self.is_not_found() {
            404
        } else if self.is_authorization() {
            403
        } else if self.is_validation() || self.is_conflict() || self.is_business_rule() {
            400
        } else {
            500
        }
    }
}
