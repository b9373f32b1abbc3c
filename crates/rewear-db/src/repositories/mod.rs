//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in rewear-core.
//! Each repository handles database operations for a specific domain entity.

mod admin_log;
mod error;
mod item;
mod ledger;
mod session;
mod swap_request;
mod user;

pub use admin_log::PgAdminLogRepository;
pub use item::PgItemRepository;
pub use ledger::PgLedgerRepository;
pub use session::PgSessionRepository;
pub use swap_request::PgSwapRequestRepository;
pub use user::PgUserRepository;
