//! Domain entities - core business objects

mod admin_log;
mod item;
mod points_transaction;
mod session;
mod swap_request;
mod user;

pub use admin_log::{AdminAction, AdminLog, NewAdminLog};
pub use item::{Item, ItemChanges, ItemListing, ItemQuery, NewItem};
pub use points_transaction::{LedgerEntry, LedgerReceipt, PointsTransaction, TransactionWithItem};
pub use session::Session;
pub use swap_request::{RequestWithItem, RequestWithRequester, SwapApproval, SwapRequest};
pub use user::{NewUser, User, UserSummary, ADMIN_BOOTSTRAP_POINTS, DEFAULT_POINTS};

/// Outcome of a points redemption
#[derive(Debug, Clone)]
pub struct Redemption {
    /// The item after the redemption, now swapped
    pub item: Item,
    pub points_spent: i32,
    /// Buyer balance after the debit
    pub remaining_points: i32,
}
