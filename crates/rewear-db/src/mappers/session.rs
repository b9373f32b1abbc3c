//! Session model -> entity mapper

use rewear_core::entities::Session;
use rewear_core::value_objects::UserId;

use crate::models::SessionModel;

impl From<SessionModel> for Session {
    fn from(model: SessionModel) -> Self {
        Session {
            id: model.id,
            user_id: UserId::new(model.user_id),
            expires_at: model.expires_at,
            created_at: model.created_at,
            revoked_at: model.revoked_at,
        }
    }
}
