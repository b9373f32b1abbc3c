//! User model -> entity mapper

use rewear_core::entities::User;
use rewear_core::value_objects::UserId;

use crate::models::UserModel;

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: UserId::new(model.id),
            name: model.name,
            email: model.email,
            points: model.points,
            is_admin: model.is_admin,
            external_id: model.external_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
