//! Points ledger - balance adjustments and their audit rows

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::value_objects::{ItemId, TransactionId, UserId};

/// One balance adjustment to apply: the input of `add_points`
///
/// Applying an entry changes the user's balance by exactly `amount` and
/// appends exactly one [`PointsTransaction`] with the same amount and reason.
/// Entries never check the resulting balance; callers that must not go
/// negative check before planning the entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    pub user_id: UserId,
    pub amount: i32,
    pub reason: String,
    pub item_id: Option<ItemId>,
}

impl LedgerEntry {
    pub fn new(user_id: UserId, amount: i32, reason: impl Into<String>) -> Self {
        Self {
            user_id,
            amount,
            reason: reason.into(),
            item_id: None,
        }
    }

    /// Attach the item this adjustment concerns
    #[must_use]
    pub fn for_item(mut self, item_id: ItemId) -> Self {
        self.item_id = Some(item_id);
        self
    }

    #[inline]
    pub fn is_debit(&self) -> bool {
        self.amount < 0
    }
}

/// Append-only audit row of a balance change
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PointsTransaction {
    pub id: TransactionId,
    pub user_id: UserId,
    pub amount: i32,
    pub reason: String,
    pub item_id: Option<ItemId>,
    pub created_at: DateTime<Utc>,
}

/// Result of applying a ledger entry
#[derive(Debug, Clone)]
pub struct LedgerReceipt {
    /// Balance after the adjustment
    pub balance: i32,
    pub transaction: PointsTransaction,
}

/// A transaction row joined with the title of the item it concerns
#[derive(Debug, Clone)]
pub struct TransactionWithItem {
    pub transaction: PointsTransaction,
    pub item_title: Option<String>,
}
