//! Repository traits

mod repositories;

pub use repositories::{
    AdminLogRepository, ItemRepository, LedgerRepository, RepoResult, SessionRepository,
    SwapRequestRepository, UserRepository,
};
