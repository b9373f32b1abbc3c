//! # rewear-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

#[cfg(test)]
mod test_support;

pub use services::{
    AdminService, AuthService, ExternalProfile, Identity, ItemService, PointsService,
    ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult, SwapPolicy, SwapService,
};
