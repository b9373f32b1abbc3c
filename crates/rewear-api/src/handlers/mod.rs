//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod admin;
pub mod auth;
pub mod health;
pub mod items;
pub mod points;
pub mod swaps;
