//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod admin;
pub mod auth;
pub mod context;
pub mod error;
pub mod item;
pub mod points;
pub mod swap;

// Re-export all services for convenience
pub use admin::AdminService;
pub use auth::{AuthService, ExternalProfile, Identity};
pub use context::{ServiceContext, ServiceContextBuilder, SwapPolicy};
pub use error::{ServiceError, ServiceResult};
pub use item::ItemService;
pub use points::PointsService;
pub use swap::SwapService;
