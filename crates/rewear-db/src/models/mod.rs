//! Database models - SQLx-compatible structs for PostgreSQL tables

mod admin_log;
mod item;
mod points_transaction;
mod session;
mod swap_request;
mod user;

pub use admin_log::AdminLogModel;
pub use item::{ItemListingModel, ItemModel};
pub use points_transaction::{PointsTransactionModel, TransactionWithItemModel};
pub use session::SessionModel;
pub use swap_request::{SwapRequestJoinModel, SwapRequestModel};
pub use user::UserModel;
