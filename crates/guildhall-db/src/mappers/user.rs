//! User entity <-> model mapper

use guildhall_core::entities::User;

use crate::models::UserModel;

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: model.id,
            name: model.name,
            email: model.email,
            avatar_url: model.avatar_url,
            placeholder: model.placeholder,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
