//! Service context - dependency container for services
//!
//! Holds all repositories and other dependencies needed by services.

use std::sync::Arc;

use rewear_common::auth::JwtService;
use rewear_core::traits::{
    AdminLogRepository, ItemRepository, LedgerRepository, SessionRepository,
    SwapRequestRepository, UserRepository,
};

use super::error::{ServiceError, ServiceResult};

/// Rules for the swap workflow that are chosen at deployment time
#[derive(Debug, Clone, Copy, Default)]
pub struct SwapPolicy {
    /// Only the requester or the item owner may complete an approved swap
    pub completion_parties_only: bool,
}

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Repositories (the persistence ports of `rewear-core`)
/// - JWT service for authentication
/// - Swap workflow policy
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    user_repo: Arc<dyn UserRepository>,
    item_repo: Arc<dyn ItemRepository>,
    swap_repo: Arc<dyn SwapRequestRepository>,
    ledger_repo: Arc<dyn LedgerRepository>,
    admin_log_repo: Arc<dyn AdminLogRepository>,
    session_repo: Arc<dyn SessionRepository>,

    // Services
    jwt_service: Arc<JwtService>,
    swap_policy: SwapPolicy,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        item_repo: Arc<dyn ItemRepository>,
        swap_repo: Arc<dyn SwapRequestRepository>,
        ledger_repo: Arc<dyn LedgerRepository>,
        admin_log_repo: Arc<dyn AdminLogRepository>,
        session_repo: Arc<dyn SessionRepository>,
        jwt_service: Arc<JwtService>,
        swap_policy: SwapPolicy,
    ) -> Self {
        Self {
            user_repo,
            item_repo,
            swap_repo,
            ledger_repo,
            admin_log_repo,
            session_repo,
            jwt_service,
            swap_policy,
        }
    }

    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the item repository
    pub fn item_repo(&self) -> &dyn ItemRepository {
        self.item_repo.as_ref()
    }

    /// Get the swap request repository
    pub fn swap_repo(&self) -> &dyn SwapRequestRepository {
        self.swap_repo.as_ref()
    }

    /// Get the points ledger repository
    pub fn ledger_repo(&self) -> &dyn LedgerRepository {
        self.ledger_repo.as_ref()
    }

    /// Get the admin log repository
    pub fn admin_log_repo(&self) -> &dyn AdminLogRepository {
        self.admin_log_repo.as_ref()
    }

    /// Get the session repository
    pub fn session_repo(&self) -> &dyn SessionRepository {
        self.session_repo.as_ref()
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    pub fn swap_policy(&self) -> SwapPolicy {
        self.swap_policy
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("jwt_service", &self.jwt_service)
            .field("swap_policy", &self.swap_policy)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    item_repo: Option<Arc<dyn ItemRepository>>,
    swap_repo: Option<Arc<dyn SwapRequestRepository>>,
    ledger_repo: Option<Arc<dyn LedgerRepository>>,
    admin_log_repo: Option<Arc<dyn AdminLogRepository>>,
    session_repo: Option<Arc<dyn SessionRepository>>,
    jwt_service: Option<Arc<JwtService>>,
    swap_policy: SwapPolicy,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn item_repo(mut self, repo: Arc<dyn ItemRepository>) -> Self {
        self.item_repo = Some(repo);
        self
    }

    pub fn swap_repo(mut self, repo: Arc<dyn SwapRequestRepository>) -> Self {
        self.swap_repo = Some(repo);
        self
    }

    pub fn ledger_repo(mut self, repo: Arc<dyn LedgerRepository>) -> Self {
        self.ledger_repo = Some(repo);
        self
    }

    pub fn admin_log_repo(mut self, repo: Arc<dyn AdminLogRepository>) -> Self {
        self.admin_log_repo = Some(repo);
        self
    }

    pub fn session_repo(mut self, repo: Arc<dyn SessionRepository>) -> Self {
        self.session_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn swap_policy(mut self, policy: SwapPolicy) -> Self {
        self.swap_policy = policy;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            self.item_repo
                .ok_or_else(|| ServiceError::validation("item_repo is required"))?,
            self.swap_repo
                .ok_or_else(|| ServiceError::validation("swap_repo is required"))?,
            self.ledger_repo
                .ok_or_else(|| ServiceError::validation("ledger_repo is required"))?,
            self.admin_log_repo
                .ok_or_else(|| ServiceError::validation("admin_log_repo is required"))?,
            self.session_repo
                .ok_or_else(|| ServiceError::validation("session_repo is required"))?,
            self.jwt_service
                .ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
            self.swap_policy,
        ))
    }
}
