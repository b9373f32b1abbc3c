//! Error handling utilities for repositories

use rewear_core::error::DomainError;
use rewear_core::value_objects::{ItemId, SwapRequestId, UserId};
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Create a "user not found" error
pub fn user_not_found(id: UserId) -> DomainError {
    DomainError::UserNotFound(id)
}

/// Create an "item not found" error
pub fn item_not_found(id: ItemId) -> DomainError {
    DomainError::ItemNotFound(id)
}

/// Create a "swap request not found" error
pub fn swap_request_not_found(id: SwapRequestId) -> DomainError {
    DomainError::SwapRequestNotFound(id)
}
