//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

// Re-export commonly used request types
pub use requests::{
    AddPointsRequest, CreateItemRequest, ListItemsQuery, LoginRequest, LogoutRequest,
    RefreshTokenRequest, RegisterRequest, UpdateItemRequest,
};

// Re-export commonly used response types
pub use responses::{
    AddPointsResponse, AdminLogResponse, AuthResponse, BalanceResponse, BalanceUser,
    CurrentUserResponse, FeaturedItemsResponse, HealthChecks, HealthResponse,
    IncomingSwapRequestResponse, ItemPage, ItemResponse, MessageResponse,
    OutgoingSwapRequestResponse, ReadinessResponse, RedemptionResponse, SwapRequestResponse,
    TransactionItem, TransactionResponse, UserPointsResponse,
};
