//! Admin log model -> entity mapper

use rewear_core::entities::AdminLog;
use rewear_core::value_objects::{AdminLogId, ItemId, UserId};

use crate::models::AdminLogModel;

impl From<AdminLogModel> for AdminLog {
    fn from(model: AdminLogModel) -> Self {
        AdminLog {
            id: AdminLogId::new(model.id),
            action: model.action,
            item_id: model.item_id.map(ItemId::new),
            admin_id: model.admin_id.map(UserId::new),
            details: model.details,
            created_at: model.created_at,
        }
    }
}
