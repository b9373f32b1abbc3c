//! # rewear-core
//!
//! Domain layer containing entities, value objects, repository traits, and the
//! rules of the points ledger and the swap workflow.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    AdminAction, AdminLog, Item, ItemChanges, ItemListing, ItemQuery, LedgerEntry, LedgerReceipt,
    NewAdminLog, NewItem, NewUser, PointsTransaction, Redemption, RequestWithItem,
    RequestWithRequester, Session, SwapApproval, SwapRequest, TransactionWithItem, User,
    UserSummary, ADMIN_BOOTSTRAP_POINTS, DEFAULT_POINTS,
};
pub use error::DomainError;
pub use traits::{
    AdminLogRepository, ItemRepository, LedgerRepository, RepoResult, SessionRepository,
    SwapRequestRepository, UserRepository,
};
pub use value_objects::{
    AdminLogId, IdParseError, ItemCategory, ItemCondition, ItemId, ItemStatus, SwapRequestId,
    SwapStatus, TransactionId, UserId,
};
