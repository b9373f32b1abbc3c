//! Value objects - immutable types that represent domain concepts

mod ids;
mod item_attributes;
mod swap_status;

pub use ids::{AdminLogId, IdParseError, ItemId, SwapRequestId, TransactionId, UserId};
pub use item_attributes::{ItemCategory, ItemCondition, ItemStatus};
pub use swap_status::SwapStatus;
