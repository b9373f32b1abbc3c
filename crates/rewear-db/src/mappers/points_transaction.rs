//! Points transaction model -> entity mappers

use rewear_core::entities::{PointsTransaction, TransactionWithItem};
use rewear_core::value_objects::{ItemId, TransactionId, UserId};

use crate::models::{PointsTransactionModel, TransactionWithItemModel};

impl From<PointsTransactionModel> for PointsTransaction {
    fn from(model: PointsTransactionModel) -> Self {
        PointsTransaction {
            id: TransactionId::new(model.id),
            user_id: UserId::new(model.user_id),
            amount: model.amount,
            reason: model.reason,
            item_id: model.item_id.map(ItemId::new),
            created_at: model.created_at,
        }
    }
}

impl From<TransactionWithItemModel> for TransactionWithItem {
    fn from(model: TransactionWithItemModel) -> Self {
        TransactionWithItem {
            transaction: model.transaction.into(),
            item_title: model.item_title,
        }
    }
}
