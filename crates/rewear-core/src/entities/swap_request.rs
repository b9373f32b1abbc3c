//! Swap request entity - the request/approve/reject/complete workflow

use chrono::{DateTime, Utc};

use crate::entities::{Item, LedgerEntry, UserSummary};
use crate::error::DomainError;
use crate::value_objects::{ItemId, SwapRequestId, SwapStatus, UserId};

/// A user's proposal to take another user's item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapRequest {
    pub id: SwapRequestId,
    pub item_id: ItemId,
    pub requester_id: UserId,
    pub status: SwapStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SwapRequest {
    /// Create a new pending request
    pub fn new(id: SwapRequestId, item_id: ItemId, requester_id: UserId) -> Self {
        let now = Utc::now();
        Self {
            id,
            item_id,
            requester_id,
            status: SwapStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.status == SwapStatus::Pending
    }

    /// Approve the request on behalf of the item owner
    ///
    /// Both parties are credited with the item's points value. The item is
    /// expected to be marked swapped by the caller in the same unit of work.
    pub fn approve(&mut self, actor: UserId, item: &Item) -> Result<[LedgerEntry; 2], DomainError> {
        self.ensure_owner(actor, item)?;
        self.ensure_transition(SwapStatus::Approved)?;
        if !item.is_available() {
            return Err(DomainError::ItemNotAvailable);
        }

        self.set_status(SwapStatus::Approved);

        Ok([
            LedgerEntry::new(
                self.requester_id,
                item.points_value,
                format!("Received item: {}", item.title),
            )
            .for_item(item.id),
            LedgerEntry::new(
                item.uploader_id,
                item.points_value,
                format!("Item swapped: {}", item.title),
            )
            .for_item(item.id),
        ])
    }

    /// Reject the request on behalf of the item owner
    pub fn reject(&mut self, actor: UserId, item: &Item) -> Result<(), DomainError> {
        self.ensure_owner(actor, item)?;
        self.ensure_transition(SwapStatus::Rejected)?;
        self.set_status(SwapStatus::Rejected);
        Ok(())
    }

    /// Mark an approved request as completed
    pub fn complete(&mut self) -> Result<(), DomainError> {
        if !self.status.can_transition_to(SwapStatus::Completed) {
            return Err(DomainError::SwapNotApproved);
        }
        self.set_status(SwapStatus::Completed);
        Ok(())
    }

    /// Check that `actor` is the requester or the item owner
    pub fn ensure_party(&self, actor: UserId, item: &Item) -> Result<(), DomainError> {
        if actor == self.requester_id || item.is_owned_by(actor) {
            Ok(())
        } else {
            Err(DomainError::NotSwapParty)
        }
    }

    fn ensure_owner(&self, actor: UserId, item: &Item) -> Result<(), DomainError> {
        if item.is_owned_by(actor) {
            Ok(())
        } else {
            Err(DomainError::NotItemOwner)
        }
    }

    fn ensure_transition(&self, to: SwapStatus) -> Result<(), DomainError> {
        if self.status.can_transition_to(to) {
            Ok(())
        } else {
            Err(DomainError::InvalidSwapTransition {
                from: self.status,
                to,
            })
        }
    }

    fn set_status(&mut self, status: SwapStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }
}

/// Outcome of an approval: the updated request plus the balances it produced
#[derive(Debug, Clone)]
pub struct SwapApproval {
    pub request: SwapRequest,
    pub requester_balance: i32,
    pub owner_balance: i32,
}

/// A request as seen by its requester: the item and who listed it
#[derive(Debug, Clone)]
pub struct RequestWithItem {
    pub request: SwapRequest,
    pub item: Item,
    pub uploader: UserSummary,
}

/// A pending request as seen by the item owner: the item and who asked
#[derive(Debug, Clone)]
pub struct RequestWithRequester {
    pub request: SwapRequest,
    pub item: Item,
    pub requester: UserSummary,
}
