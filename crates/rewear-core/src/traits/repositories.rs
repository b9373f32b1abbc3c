//! Repository traits (ports) - define the interface for data access
//!
//! These traits follow the Repository pattern from Domain-Driven Design.
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.
//!
//! Operations that touch more than one row (`add_points`,
//! `add_points_logged`, `update_logged`, `delete_logged`, `redeem`, `approve`)
//! are all-or-nothing: an implementation either applies every write or none
//! of them.

use async_trait::async_trait;

use crate::entities::{
    AdminLog, Item, ItemListing, ItemQuery, LedgerEntry, LedgerReceipt, NewAdminLog, NewItem,
    NewUser, Redemption, RequestWithItem, RequestWithRequester, Session, SwapApproval,
    SwapRequest, TransactionWithItem, User,
};
use crate::error::DomainError;
use crate::value_objects::{ItemId, SwapRequestId, UserId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>>;

    /// Find user by email (stored lowercase)
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Find user by federated identity
    async fn find_by_external_id(&self, external_id: &str) -> RepoResult<Option<User>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Create a new user; `EmailAlreadyExists` on a duplicate email
    async fn create(&self, user: &NewUser) -> RepoResult<User>;

    /// Attach a federated identity to an existing account
    async fn link_external_id(&self, id: UserId, external_id: &str) -> RepoResult<User>;

    /// Get password hash for authentication; None for federated-only accounts
    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>>;

    /// Grant or remove admin rights
    async fn set_admin(&self, id: UserId, is_admin: bool) -> RepoResult<User>;

    /// Users with the highest balances, highest first
    async fn leaderboard(&self, limit: i64) -> RepoResult<Vec<User>>;
}

// ============================================================================
// Item Repository
// ============================================================================

#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Find item by ID
    async fn find_by_id(&self, id: ItemId) -> RepoResult<Option<Item>>;

    /// Find item together with its uploader
    async fn find_listing(&self, id: ItemId) -> RepoResult<Option<ItemListing>>;

    /// Browse items, newest first; returns the page and the total match count
    async fn list(&self, query: &ItemQuery) -> RepoResult<(Vec<ItemListing>, i64)>;

    /// Most recently listed available items
    async fn newest_available(&self, limit: i64) -> RepoResult<Vec<ItemListing>>;

    /// All items listed by a user, newest first
    async fn find_by_uploader(&self, uploader_id: UserId) -> RepoResult<Vec<Item>>;

    /// Create a new item
    async fn create(&self, item: &NewItem) -> RepoResult<Item>;

    /// Persist the editable fields of an existing item
    async fn update(&self, item: &Item) -> RepoResult<()>;

    /// Delete an item and its swap requests
    async fn delete(&self, id: ItemId) -> RepoResult<()>;

    /// Persist an edit together with the admin log row describing it
    async fn update_logged(&self, item: &Item, log: &NewAdminLog) -> RepoResult<AdminLog>;

    /// Delete an item together with the admin log row describing it
    ///
    /// The log row outlives the item; its `item_id` is cleared by the delete.
    async fn delete_logged(&self, id: ItemId, log: &NewAdminLog) -> RepoResult<AdminLog>;
}

// ============================================================================
// Swap Request Repository
// ============================================================================

#[async_trait]
pub trait SwapRequestRepository: Send + Sync {
    /// Find swap request by ID
    async fn find_by_id(&self, id: SwapRequestId) -> RepoResult<Option<SwapRequest>>;

    /// Find the pending request a user holds on an item, if any
    async fn find_pending(
        &self,
        item_id: ItemId,
        requester_id: UserId,
    ) -> RepoResult<Option<SwapRequest>>;

    /// Create a pending request; `DuplicateSwapRequest` if one already exists
    async fn create(&self, item_id: ItemId, requester_id: UserId) -> RepoResult<SwapRequest>;

    /// Approve a request: flips the item to swapped and credits both parties
    async fn approve(&self, id: SwapRequestId, actor: UserId) -> RepoResult<SwapApproval>;

    /// Reject a pending request
    async fn reject(&self, id: SwapRequestId, actor: UserId) -> RepoResult<SwapRequest>;

    /// Complete an approved request
    ///
    /// When `party` is set, that user must be the requester or the item owner.
    async fn complete(&self, id: SwapRequestId, party: Option<UserId>)
        -> RepoResult<SwapRequest>;

    /// Requests made by a user, newest first
    async fn find_by_requester(&self, requester_id: UserId) -> RepoResult<Vec<RequestWithItem>>;

    /// Pending requests on items a user owns, newest first
    async fn find_pending_for_owner(
        &self,
        owner_id: UserId,
    ) -> RepoResult<Vec<RequestWithRequester>>;
}

// ============================================================================
// Ledger Repository
// ============================================================================

#[async_trait]
pub trait LedgerRepository: Send + Sync {
    /// Adjust a balance and append the matching transaction row
    async fn add_points(&self, entry: &LedgerEntry) -> RepoResult<LedgerReceipt>;

    /// `add_points` plus an admin log row, committed together
    async fn add_points_logged(
        &self,
        entry: &LedgerEntry,
        log: &NewAdminLog,
    ) -> RepoResult<(LedgerReceipt, AdminLog)>;

    /// Redeem an item with points: debit buyer, credit owner, mark item swapped
    async fn redeem(&self, item_id: ItemId, buyer_id: UserId) -> RepoResult<Redemption>;

    /// A user's transactions, newest first
    async fn find_by_user(&self, user_id: UserId, limit: i64)
        -> RepoResult<Vec<TransactionWithItem>>;
}

// ============================================================================
// Admin Log Repository
// ============================================================================

#[async_trait]
pub trait AdminLogRepository: Send + Sync {
    /// Append a log row
    async fn record(&self, log: &NewAdminLog) -> RepoResult<AdminLog>;

    /// Latest rows, newest first
    async fn recent(&self, limit: i64) -> RepoResult<Vec<AdminLog>>;
}

// ============================================================================
// Session Repository
// ============================================================================

#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Store a new session
    async fn create(&self, session: &Session) -> RepoResult<()>;

    /// Find a session that is neither revoked nor expired
    async fn find_active(&self, id: &str) -> RepoResult<Option<Session>>;

    /// Revoke one session; false if it was unknown or already revoked
    async fn revoke(&self, id: &str) -> RepoResult<bool>;

    /// Revoke every active session of a user; returns how many were revoked
    async fn revoke_all_for_user(&self, user_id: UserId) -> RepoResult<u64>;
}
