//! Shared in-memory repository doubles for service tests.
//!
//! One `MemoryStore` implements every repository port over a single mutex,
//! so multi-row operations are all-or-nothing just like the Postgres ones.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use rewear_common::auth::JwtService;
use rewear_core::entities::{
    AdminLog, Item, ItemListing, ItemQuery, LedgerEntry, LedgerReceipt, NewAdminLog, NewItem,
    NewUser, PointsTransaction, Redemption, RequestWithItem, RequestWithRequester, Session,
    SwapApproval, SwapRequest, TransactionWithItem, User,
};
use rewear_core::traits::{
    AdminLogRepository, ItemRepository, LedgerRepository, RepoResult, SessionRepository,
    SwapRequestRepository, UserRepository,
};
use rewear_core::{
    AdminLogId, DomainError, ItemCategory, ItemCondition, ItemId, ItemStatus, SwapRequestId,
    TransactionId, UserId,
};

use crate::services::{ServiceContext, ServiceContextBuilder, SwapPolicy};

pub const TEST_JWT_SECRET: &str = "test-secret-key-that-is-long-enough";

#[derive(Default)]
struct State {
    next_id: i64,
    users: BTreeMap<UserId, User>,
    password_hashes: HashMap<UserId, String>,
    items: BTreeMap<ItemId, Item>,
    requests: BTreeMap<SwapRequestId, SwapRequest>,
    transactions: Vec<PointsTransaction>,
    logs: Vec<AdminLog>,
    sessions: HashMap<String, Session>,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn user(&self, id: UserId) -> RepoResult<&User> {
        self.users.get(&id).ok_or(DomainError::UserNotFound(id))
    }

    fn item(&self, id: ItemId) -> RepoResult<&Item> {
        self.items.get(&id).ok_or(DomainError::ItemNotFound(id))
    }

    fn request(&self, id: SwapRequestId) -> RepoResult<&SwapRequest> {
        self.requests
            .get(&id)
            .ok_or(DomainError::SwapRequestNotFound(id))
    }

    /// Drop an item; requests go with it, ledger and log rows lose the link
    fn remove_item(&mut self, id: ItemId) -> RepoResult<()> {
        self.items.remove(&id).ok_or(DomainError::ItemNotFound(id))?;
        self.requests.retain(|_, r| r.item_id != id);
        for tx in &mut self.transactions {
            if tx.item_id == Some(id) {
                tx.item_id = None;
            }
        }
        for log in &mut self.logs {
            if log.item_id == Some(id) {
                log.item_id = None;
            }
        }
        Ok(())
    }

    fn listing(&self, item: &Item) -> RepoResult<ItemListing> {
        Ok(ItemListing {
            item: item.clone(),
            uploader: self.user(item.uploader_id)?.summary(),
        })
    }

    /// Apply ledger entries once every target user is known to exist
    /// Admin ids must exist, as the foreign key demands
    fn push_log(&mut self, log: &NewAdminLog) -> RepoResult<AdminLog> {
        self.user(log.admin_id)?;
        let row = AdminLog {
            id: AdminLogId::new(self.next_id()),
            action: log.action.as_str().to_string(),
            item_id: log.item_id,
            admin_id: Some(log.admin_id),
            details: log.details.clone(),
            created_at: Utc::now(),
        };
        self.logs.push(row.clone());
        Ok(row)
    }

    fn apply_entries(&mut self, entries: &[LedgerEntry]) -> RepoResult<Vec<LedgerReceipt>> {
        for entry in entries {
            self.user(entry.user_id)?;
        }

        let mut receipts = Vec::with_capacity(entries.len());
        for entry in entries {
            let id = TransactionId::new(self.next_id());
            let user = self
                .users
                .get_mut(&entry.user_id)
                .ok_or(DomainError::UserNotFound(entry.user_id))?;
            user.points += entry.amount;
            let balance = user.points;

            let transaction = PointsTransaction {
                id,
                user_id: entry.user_id,
                amount: entry.amount,
                reason: entry.reason.clone(),
                item_id: entry.item_id,
                created_at: Utc::now(),
            };
            self.transactions.push(transaction.clone());
            receipts.push(LedgerReceipt {
                balance,
                transaction,
            });
        }
        Ok(receipts)
    }
}

/// In-memory stand-in for the Postgres repositories
#[derive(Default)]
pub struct MemoryStore(Mutex<State>);

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn state(&self) -> MutexGuard<'_, State> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("memory store mutex"),
        }
    }

    /// Build a service context whose every repository is this store
    pub fn context(self: &Arc<Self>) -> ServiceContext {
        self.context_with_policy(SwapPolicy::default())
    }

    pub fn context_with_policy(self: &Arc<Self>, policy: SwapPolicy) -> ServiceContext {
        match ServiceContextBuilder::new()
            .user_repo(self.clone())
            .item_repo(self.clone())
            .swap_repo(self.clone())
            .ledger_repo(self.clone())
            .admin_log_repo(self.clone())
            .session_repo(self.clone())
            .jwt_service(Arc::new(JwtService::new(TEST_JWT_SECRET, 900, 604_800)))
            .swap_policy(policy)
            .build()
        {
            Ok(ctx) => ctx,
            Err(e) => panic!("test context: {e}"),
        }
    }

    pub fn seed_user(&self, name: &str, points: i32) -> User {
        self.insert_user(name, points, false)
    }

    pub fn seed_admin(&self, name: &str) -> User {
        self.insert_user(name, 1000, true)
    }

    fn insert_user(&self, name: &str, points: i32, is_admin: bool) -> User {
        let mut state = self.state();
        let id = UserId::new(state.next_id());
        let mut user = User::new(
            id,
            name.to_string(),
            format!("{}@example.com", name.to_lowercase()),
        );
        user.points = points;
        user.is_admin = is_admin;
        state.users.insert(id, user.clone());
        user
    }

    pub fn seed_item(&self, owner: UserId, title: &str, points_value: i32) -> Item {
        let mut state = self.state();
        let id = ItemId::new(state.next_id());
        let now = Utc::now();
        let item = Item {
            id,
            title: title.to_string(),
            description: Some(format!("{title} in good shape")),
            images: vec![],
            category: ItemCategory::Tops,
            size: Some("M".to_string()),
            condition: ItemCondition::Good,
            tags: vec!["cotton".to_string()],
            uploader_id: owner,
            status: ItemStatus::Available,
            points_value,
            created_at: now + Duration::milliseconds(id.into_inner()),
            updated_at: now,
        };
        state.items.insert(id, item.clone());
        item
    }

    pub fn balance(&self, id: UserId) -> i32 {
        self.state().users.get(&id).map_or(0, |u| u.points)
    }

    pub fn item_status(&self, id: ItemId) -> Option<ItemStatus> {
        self.state().items.get(&id).map(|i| i.status)
    }

    pub fn transactions_of(&self, id: UserId) -> Vec<PointsTransaction> {
        self.state()
            .transactions
            .iter()
            .filter(|t| t.user_id == id)
            .cloned()
            .collect()
    }

    pub fn admin_logs(&self) -> Vec<AdminLog> {
        self.state().logs.clone()
    }
}

// ============================================================================
// Users
// ============================================================================

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        Ok(self.state().users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        Ok(self
            .state()
            .users
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_external_id(&self, external_id: &str) -> RepoResult<Option<User>> {
        Ok(self
            .state()
            .users
            .values()
            .find(|u| u.external_id.as_deref() == Some(external_id))
            .cloned())
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        Ok(self.state().users.values().any(|u| u.email == email))
    }

    async fn create(&self, new_user: &NewUser) -> RepoResult<User> {
        let mut state = self.state();
        if state.users.values().any(|u| u.email == new_user.email) {
            return Err(DomainError::EmailAlreadyExists);
        }

        let id = UserId::new(state.next_id());
        let mut user = User::new(id, new_user.name.clone(), new_user.email.clone());
        user.points = new_user.points;
        user.is_admin = new_user.is_admin;
        user.external_id.clone_from(&new_user.external_id);

        if let Some(hash) = &new_user.password_hash {
            state.password_hashes.insert(id, hash.clone());
        }
        state.users.insert(id, user.clone());
        Ok(user)
    }

    async fn link_external_id(&self, id: UserId, external_id: &str) -> RepoResult<User> {
        let mut state = self.state();
        let user = state
            .users
            .get_mut(&id)
            .ok_or(DomainError::UserNotFound(id))?;
        user.external_id = Some(external_id.to_string());
        Ok(user.clone())
    }

    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>> {
        Ok(self.state().password_hashes.get(&id).cloned())
    }

    async fn set_admin(&self, id: UserId, is_admin: bool) -> RepoResult<User> {
        let mut state = self.state();
        let user = state
            .users
            .get_mut(&id)
            .ok_or(DomainError::UserNotFound(id))?;
        user.is_admin = is_admin;
        Ok(user.clone())
    }

    async fn leaderboard(&self, limit: i64) -> RepoResult<Vec<User>> {
        let mut users: Vec<User> = self.state().users.values().cloned().collect();
        users.sort_by(|a, b| b.points.cmp(&a.points).then(a.id.cmp(&b.id)));
        users.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(users)
    }
}

// ============================================================================
// Items
// ============================================================================

fn matches_search(item: &Item, search: &str) -> bool {
    let needle = search.to_lowercase();
    item.title.to_lowercase().contains(&needle)
        || item
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(&needle))
        || item.tags.iter().any(|t| t == search)
}

fn newest_first(items: &mut [Item]) {
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
}

#[async_trait]
impl ItemRepository for MemoryStore {
    async fn find_by_id(&self, id: ItemId) -> RepoResult<Option<Item>> {
        Ok(self.state().items.get(&id).cloned())
    }

    async fn find_listing(&self, id: ItemId) -> RepoResult<Option<ItemListing>> {
        let state = self.state();
        state.items.get(&id).map(|i| state.listing(i)).transpose()
    }

    async fn list(&self, query: &ItemQuery) -> RepoResult<(Vec<ItemListing>, i64)> {
        let state = self.state();
        let mut matched: Vec<Item> = state
            .items
            .values()
            .filter(|i| i.status == query.status)
            .filter(|i| query.category.is_none_or(|c| i.category == c))
            .filter(|i| query.search.as_deref().is_none_or(|s| matches_search(i, s)))
            .cloned()
            .collect();
        newest_first(&mut matched);

        let total = matched.len() as i64;
        let page = matched
            .iter()
            .skip(query.offset() as usize)
            .take(query.limit as usize)
            .map(|i| state.listing(i))
            .collect::<RepoResult<Vec<_>>>()?;
        Ok((page, total))
    }

    async fn newest_available(&self, limit: i64) -> RepoResult<Vec<ItemListing>> {
        let state = self.state();
        let mut available: Vec<Item> = state
            .items
            .values()
            .filter(|i| i.is_available())
            .cloned()
            .collect();
        newest_first(&mut available);
        available
            .iter()
            .take(limit as usize)
            .map(|i| state.listing(i))
            .collect()
    }

    async fn find_by_uploader(&self, uploader_id: UserId) -> RepoResult<Vec<Item>> {
        let mut items: Vec<Item> = self
            .state()
            .items
            .values()
            .filter(|i| i.uploader_id == uploader_id)
            .cloned()
            .collect();
        newest_first(&mut items);
        Ok(items)
    }

    async fn create(&self, new_item: &NewItem) -> RepoResult<Item> {
        let mut state = self.state();
        state.user(new_item.uploader_id)?;
        let id = ItemId::new(state.next_id());
        let now = Utc::now();
        let item = Item {
            id,
            title: new_item.title.clone(),
            description: new_item.description.clone(),
            images: new_item.images.clone(),
            category: new_item.category,
            size: new_item.size.clone(),
            condition: new_item.condition,
            tags: new_item.tags.clone(),
            uploader_id: new_item.uploader_id,
            status: ItemStatus::Available,
            points_value: new_item.points_value,
            created_at: now + Duration::milliseconds(id.into_inner()),
            updated_at: now,
        };
        state.items.insert(id, item.clone());
        Ok(item)
    }

    async fn update(&self, item: &Item) -> RepoResult<()> {
        let mut state = self.state();
        let stored = state
            .items
            .get_mut(&item.id)
            .ok_or(DomainError::ItemNotFound(item.id))?;
        *stored = item.clone();
        Ok(())
    }

    async fn delete(&self, id: ItemId) -> RepoResult<()> {
        self.state().remove_item(id)
    }

    async fn update_logged(&self, item: &Item, log: &NewAdminLog) -> RepoResult<AdminLog> {
        let mut state = self.state();
        state.item(item.id)?;
        state.user(log.admin_id)?;

        let log = state.push_log(log)?;
        state.items.insert(item.id, item.clone());
        Ok(log)
    }

    async fn delete_logged(&self, id: ItemId, log: &NewAdminLog) -> RepoResult<AdminLog> {
        let mut state = self.state();
        state.item(id)?;

        let log = state.push_log(log)?;
        state.remove_item(id)?;
        Ok(AdminLog { item_id: None, ..log })
    }
}

// ============================================================================
// Swap requests
// ============================================================================

#[async_trait]
impl SwapRequestRepository for MemoryStore {
    async fn find_by_id(&self, id: SwapRequestId) -> RepoResult<Option<SwapRequest>> {
        Ok(self.state().requests.get(&id).cloned())
    }

    async fn find_pending(
        &self,
        item_id: ItemId,
        requester_id: UserId,
    ) -> RepoResult<Option<SwapRequest>> {
        Ok(self
            .state()
            .requests
            .values()
            .find(|r| r.item_id == item_id && r.requester_id == requester_id && r.is_pending())
            .cloned())
    }

    async fn create(&self, item_id: ItemId, requester_id: UserId) -> RepoResult<SwapRequest> {
        let mut state = self.state();
        state.item(item_id)?;
        state.user(requester_id)?;
        if state
            .requests
            .values()
            .any(|r| r.item_id == item_id && r.requester_id == requester_id && r.is_pending())
        {
            return Err(DomainError::DuplicateSwapRequest);
        }

        let request = SwapRequest::new(SwapRequestId::new(state.next_id()), item_id, requester_id);
        state.requests.insert(request.id, request.clone());
        Ok(request)
    }

    async fn approve(&self, id: SwapRequestId, actor: UserId) -> RepoResult<SwapApproval> {
        let mut state = self.state();
        let mut request = state.request(id)?.clone();
        let mut item = state.item(request.item_id)?.clone();

        let entries = request.approve(actor, &item)?;
        let receipts = state.apply_entries(&entries)?;
        item.mark_swapped();
        state.items.insert(item.id, item);
        state.requests.insert(id, request.clone());

        Ok(SwapApproval {
            request,
            requester_balance: receipts[0].balance,
            owner_balance: receipts[1].balance,
        })
    }

    async fn reject(&self, id: SwapRequestId, actor: UserId) -> RepoResult<SwapRequest> {
        let mut state = self.state();
        let mut request = state.request(id)?.clone();
        let item = state.item(request.item_id)?;

        request.reject(actor, item)?;
        state.requests.insert(id, request.clone());
        Ok(request)
    }

    async fn complete(
        &self,
        id: SwapRequestId,
        party: Option<UserId>,
    ) -> RepoResult<SwapRequest> {
        let mut state = self.state();
        let mut request = state.request(id)?.clone();
        if let Some(actor) = party {
            request.ensure_party(actor, state.item(request.item_id)?)?;
        }

        request.complete()?;
        state.requests.insert(id, request.clone());
        Ok(request)
    }

    async fn find_by_requester(&self, requester_id: UserId) -> RepoResult<Vec<RequestWithItem>> {
        let state = self.state();
        state
            .requests
            .values()
            .rev()
            .filter(|r| r.requester_id == requester_id)
            .map(|r| -> RepoResult<RequestWithItem> {
                let listing = state.listing(state.item(r.item_id)?)?;
                Ok(RequestWithItem {
                    request: r.clone(),
                    item: listing.item,
                    uploader: listing.uploader,
                })
            })
            .collect()
    }

    async fn find_pending_for_owner(
        &self,
        owner_id: UserId,
    ) -> RepoResult<Vec<RequestWithRequester>> {
        let state = self.state();
        state
            .requests
            .values()
            .rev()
            .filter(|r| r.is_pending())
            .filter_map(|r| {
                let item = state.items.get(&r.item_id)?;
                item.is_owned_by(owner_id).then_some((r, item))
            })
            .map(|(r, item)| -> RepoResult<RequestWithRequester> {
                Ok(RequestWithRequester {
                    request: r.clone(),
                    item: item.clone(),
                    requester: state.user(r.requester_id)?.summary(),
                })
            })
            .collect()
    }
}

// ============================================================================
// Ledger
// ============================================================================

#[async_trait]
impl LedgerRepository for MemoryStore {
    async fn add_points(&self, entry: &LedgerEntry) -> RepoResult<LedgerReceipt> {
        let mut receipts = self.state().apply_entries(std::slice::from_ref(entry))?;
        receipts
            .pop()
            .ok_or_else(|| DomainError::InternalError("no receipt".to_string()))
    }

    async fn add_points_logged(
        &self,
        entry: &LedgerEntry,
        log: &NewAdminLog,
    ) -> RepoResult<(LedgerReceipt, AdminLog)> {
        let mut state = self.state();
        state.user(entry.user_id)?;
        state.user(log.admin_id)?;

        let receipt = state
            .apply_entries(std::slice::from_ref(entry))?
            .pop()
            .ok_or_else(|| DomainError::InternalError("no receipt".to_string()))?;
        let log = state.push_log(log)?;
        Ok((receipt, log))
    }

    async fn redeem(&self, item_id: ItemId, buyer_id: UserId) -> RepoResult<Redemption> {
        let mut state = self.state();
        let mut item = state.item(item_id)?.clone();
        let buyer = state.user(buyer_id)?;

        let entries = item.plan_redemption(buyer)?;
        let receipts = state.apply_entries(&entries)?;
        item.mark_swapped();
        state.items.insert(item_id, item.clone());

        Ok(Redemption {
            points_spent: item.points_value,
            item,
            remaining_points: receipts[0].balance,
        })
    }

    async fn find_by_user(
        &self,
        user_id: UserId,
        limit: i64,
    ) -> RepoResult<Vec<TransactionWithItem>> {
        let state = self.state();
        Ok(state
            .transactions
            .iter()
            .rev()
            .filter(|t| t.user_id == user_id)
            .take(limit as usize)
            .map(|t| TransactionWithItem {
                transaction: t.clone(),
                item_title: t
                    .item_id
                    .and_then(|id| state.items.get(&id))
                    .map(|i| i.title.clone()),
            })
            .collect())
    }
}

// ============================================================================
// Admin logs
// ============================================================================

#[async_trait]
impl AdminLogRepository for MemoryStore {
    async fn record(&self, log: &NewAdminLog) -> RepoResult<AdminLog> {
        self.state().push_log(log)
    }

    async fn recent(&self, limit: i64) -> RepoResult<Vec<AdminLog>> {
        Ok(self
            .state()
            .logs
            .iter()
            .rev()
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

// ============================================================================
// Sessions
// ============================================================================

#[async_trait]
impl SessionRepository for MemoryStore {
    async fn create(&self, session: &Session) -> RepoResult<()> {
        self.state()
            .sessions
            .insert(session.id.clone(), session.clone());
        Ok(())
    }

    async fn find_active(&self, id: &str) -> RepoResult<Option<Session>> {
        Ok(self
            .state()
            .sessions
            .get(id)
            .filter(|s| s.is_active())
            .cloned())
    }

    async fn revoke(&self, id: &str) -> RepoResult<bool> {
        let mut state = self.state();
        match state.sessions.get_mut(id) {
            Some(session) if session.revoked_at.is_none() => {
                session.revoked_at = Some(Utc::now());
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn revoke_all_for_user(&self, user_id: UserId) -> RepoResult<u64> {
        let mut state = self.state();
        let now = Utc::now();
        let mut revoked = 0;
        for session in state.sessions.values_mut() {
            if session.user_id == user_id && session.is_active_at(now) {
                session.revoked_at = Some(now);
                revoked += 1;
            }
        }
        Ok(revoked)
    }
}
