//! Swap service
//!
//! Request, approve, reject and complete item swaps.

use rewear_core::{DomainError, ItemId, SwapRequestId, UserId};
use tracing::{info, instrument};

use crate::dto::{IncomingSwapRequestResponse, OutgoingSwapRequestResponse, SwapRequestResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Swap service
pub struct SwapService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SwapService<'a> {
    /// Create a new SwapService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Open a pending request on someone else's available item
    #[instrument(skip(self))]
    pub async fn create_request(
        &self,
        requester_id: UserId,
        item_id: ItemId,
    ) -> ServiceResult<SwapRequestResponse> {
        let item = self
            .ctx
            .item_repo()
            .find_by_id(item_id)
            .await?
            .ok_or(DomainError::ItemNotFound(item_id))?;

        item.ensure_swappable_by(requester_id)?;

        if self
            .ctx
            .swap_repo()
            .find_pending(item_id, requester_id)
            .await?
            .is_some()
        {
            return Err(DomainError::DuplicateSwapRequest.into());
        }

        let request = self.ctx.swap_repo().create(item_id, requester_id).await?;

        info!(request_id = %request.id, item_id = %item_id, requester_id = %requester_id, "Swap requested");
        Ok(request.into())
    }

    /// Approve a pending request; only the item owner may do this
    #[instrument(skip(self))]
    pub async fn approve(
        &self,
        actor_id: UserId,
        request_id: SwapRequestId,
    ) -> ServiceResult<SwapRequestResponse> {
        let approval = self.ctx.swap_repo().approve(request_id, actor_id).await?;

        info!(
            request_id = %request_id,
            item_id = %approval.request.item_id,
            owner_id = %actor_id,
            requester_balance = approval.requester_balance,
            owner_balance = approval.owner_balance,
            "Swap approved"
        );
        Ok(approval.request.into())
    }

    /// Reject a pending request; only the item owner may do this
    #[instrument(skip(self))]
    pub async fn reject(
        &self,
        actor_id: UserId,
        request_id: SwapRequestId,
    ) -> ServiceResult<SwapRequestResponse> {
        let request = self.ctx.swap_repo().reject(request_id, actor_id).await?;

        info!(request_id = %request_id, "Swap rejected");
        Ok(request.into())
    }

    /// Mark an approved request as completed
    #[instrument(skip(self))]
    pub async fn complete(
        &self,
        actor_id: UserId,
        request_id: SwapRequestId,
    ) -> ServiceResult<SwapRequestResponse> {
        let party = self
            .ctx
            .swap_policy()
            .completion_parties_only
            .then_some(actor_id);

        let request = self.ctx.swap_repo().complete(request_id, party).await?;

        info!(request_id = %request_id, actor_id = %actor_id, "Swap completed");
        Ok(request.into())
    }

    /// Requests the user has made, newest first
    #[instrument(skip(self))]
    pub async fn list_for_requester(
        &self,
        requester_id: UserId,
    ) -> ServiceResult<Vec<OutgoingSwapRequestResponse>> {
        let rows = self.ctx.swap_repo().find_by_requester(requester_id).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Pending requests on the user's items, newest first
    #[instrument(skip(self))]
    pub async fn list_pending_for_owner(
        &self,
        owner_id: UserId,
    ) -> ServiceResult<Vec<IncomingSwapRequestResponse>> {
        let rows = self.ctx.swap_repo().find_pending_for_owner(owner_id).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
