//! Account-link reconciliation
//!
//! Invoked when the auth layer links an OAuth account to a real user. Any
//! placeholder user that previously stood in for the same Discord identity
//! is merged into the real user: every row referencing the placeholder is
//! repointed inside one transaction, then the placeholder is deleted.

use std::collections::HashSet;

use tracing::{info, instrument};
use uuid::Uuid;

use guildhall_core::entities::LinkedAccount;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Account linking service
pub struct AccountLinkService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AccountLinkService<'a> {
    /// Create a new AccountLinkService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Record an OAuth account link and absorb any placeholder users that
    /// stood in for the same identity.
    #[instrument(skip(self))]
    pub async fn link_account(
        &self,
        user_id: Uuid,
        provider: &str,
        provider_account_id: &str,
    ) -> ServiceResult<LinkedAccount> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        let account = LinkedAccount::new(
            user_id,
            provider.to_string(),
            provider_account_id.to_string(),
        );
        self.ctx.account_repo().create(&account).await?;

        info!(
            user_id = %user_id,
            provider = %provider,
            "Linked OAuth account"
        );

        if account.is_discord() {
            self.absorb_placeholders(user_id, provider_account_id)
                .await?;
        }

        Ok(account)
    }

    /// Merge every placeholder previously linked to this Discord identity
    /// into the real user, and repoint any remaining mirror rows.
    async fn absorb_placeholders(&self, user_id: Uuid, discord_id: &str) -> ServiceResult<()> {
        let mirrors = self.ctx.member_repo().find_by_discord_id(discord_id).await?;
        let mut merged: HashSet<Uuid> = HashSet::new();

        for mirror in mirrors {
            let Some(prior_id) = mirror.linked_user_id else {
                self.ctx
                    .member_repo()
                    .set_linked_user(&mirror.guild_id, &mirror.discord_id, Some(user_id))
                    .await?;
                continue;
            };

            if prior_id == user_id || merged.contains(&prior_id) {
                continue;
            }

            match self.ctx.user_repo().find_by_id(prior_id).await? {
                Some(prior) if prior.is_placeholder() => {
                    // Repoints every referencing table, then deletes the
                    // placeholder.
                    self.ctx
                        .user_repo()
                        .merge_placeholder(prior_id, user_id)
                        .await?;
                    merged.insert(prior_id);

                    info!(
                        placeholder_id = %prior_id,
                        user_id = %user_id,
                        discord_id = %discord_id,
                        "Absorbed placeholder user after account link"
                    );
                }
                // A real user or a dangling reference: repoint only this
                // mirror row, the OAuth link wins.
                _ => {
                    self.ctx
                        .member_repo()
                        .set_linked_user(&mirror.guild_id, &mirror.discord_id, Some(user_id))
                        .await?;
                }
            }
        }

        Ok(())
    }
}
