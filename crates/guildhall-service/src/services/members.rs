//! Member directory administration
//!
//! Listing/search over mirrored guild members plus the manual link and
//! unlink overrides that bypass the sync resolver. Permission checks are the
//! caller's responsibility.

use tracing::{info, instrument};
use uuid::Uuid;

use guildhall_core::traits::MemberPage;

use crate::dto::{DiscordMemberResponse, PaginatedResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Member directory service
pub struct MemberDirectoryService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MemberDirectoryService<'a> {
    /// Create a new MemberDirectoryService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// List mirrored members for a guild with optional substring search over
    /// username/display name and skip/take pagination
    #[instrument(skip(self))]
    pub async fn list_members(
        &self,
        guild_id: &str,
        page: MemberPage,
    ) -> ServiceResult<PaginatedResponse<DiscordMemberResponse>> {
        let skip = page.skip;
        let take = page.take;

        let members = self.ctx.member_repo().find_by_guild(guild_id, &page).await?;
        let total = self.ctx.member_repo().count_by_guild(guild_id).await?;

        let data = members.into_iter().map(DiscordMemberResponse::from).collect();

        Ok(PaginatedResponse::new(data, total, skip, take))
    }

    /// Attach a local user to a mirrored member (administrative override)
    #[instrument(skip(self))]
    pub async fn link_member(
        &self,
        guild_id: &str,
        discord_id: &str,
        user_id: Uuid,
    ) -> ServiceResult<DiscordMemberResponse> {
        // The target user must exist; the mirror row check happens in the
        // update itself.
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        self.ctx
            .member_repo()
            .set_linked_user(guild_id, discord_id, Some(user_id))
            .await?;

        info!(
            guild_id = %guild_id,
            discord_id = %discord_id,
            user_id = %user_id,
            "Manually linked member to user"
        );

        self.member_response(guild_id, discord_id).await
    }

    /// Detach the local user from a mirrored member
    #[instrument(skip(self))]
    pub async fn unlink_member(
        &self,
        guild_id: &str,
        discord_id: &str,
    ) -> ServiceResult<DiscordMemberResponse> {
        self.ctx
            .member_repo()
            .set_linked_user(guild_id, discord_id, None)
            .await?;

        info!(guild_id = %guild_id, discord_id = %discord_id, "Unlinked member");

        self.member_response(guild_id, discord_id).await
    }

    async fn member_response(
        &self,
        guild_id: &str,
        discord_id: &str,
    ) -> ServiceResult<DiscordMemberResponse> {
        let member = self
            .ctx
            .member_repo()
            .find(guild_id, discord_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Member", discord_id.to_string()))?;

        Ok(DiscordMemberResponse::from(member))
    }
}
