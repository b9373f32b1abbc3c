//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation, paths and query strings.

mod auth;
mod path;
mod query;
mod validated;

pub use auth::{AdminUser, AuthUser};
pub use path::IdPath;
pub use query::{LimitParams, QueryParams};
pub use validated::ValidatedJson;
