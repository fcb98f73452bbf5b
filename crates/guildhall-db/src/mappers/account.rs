//! LinkedAccount entity <-> model mapper

use guildhall_core::entities::LinkedAccount;

use crate::models::AccountModel;

impl From<AccountModel> for LinkedAccount {
    fn from(model: AccountModel) -> Self {
        LinkedAccount {
            id: model.id,
            user_id: model.user_id,
            provider: model.provider,
            provider_account_id: model.provider_account_id,
            created_at: model.created_at,
        }
    }
}
