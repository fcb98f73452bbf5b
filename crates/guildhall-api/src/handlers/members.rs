//! Mirrored member handlers
//!
//! Admin endpoints over the local mirror of a guild's member roster.

use axum::{
    extract::{Path, State},
    Json,
};
use guildhall_service::{
    DiscordMemberResponse, LinkMemberRequest, MemberDirectoryService, PaginatedResponse,
};

use crate::extractors::{MemberListQuery, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// List mirrored members for a guild
///
/// GET /admin/guilds/{guild_id}/members?search=&skip=&take=
pub async fn list_guild_members(
    State(state): State<AppState>,
    Path(guild_id): Path<String>,
    query: MemberListQuery,
) -> ApiResult<Json<PaginatedResponse<DiscordMemberResponse>>> {
    let service = MemberDirectoryService::new(state.service_context());
    let members = service.list_members(&guild_id, query.into_page()).await?;
    Ok(Json(members))
}

/// Manually link a mirrored member to a local user
///
/// PUT /admin/guilds/{guild_id}/members/{discord_id}/link
pub async fn link_guild_member(
    State(state): State<AppState>,
    Path((guild_id, discord_id)): Path<(String, String)>,
    ValidatedJson(request): ValidatedJson<LinkMemberRequest>,
) -> ApiResult<Json<DiscordMemberResponse>> {
    let service = MemberDirectoryService::new(state.service_context());
    let member = service
        .link_member(&guild_id, &discord_id, request.user_id)
        .await?;
    Ok(Json(member))
}

/// Remove the local user link from a mirrored member
///
/// DELETE /admin/guilds/{guild_id}/members/{discord_id}/link
pub async fn unlink_guild_member(
    State(state): State<AppState>,
    Path((guild_id, discord_id)): Path<(String, String)>,
) -> ApiResult<Json<DiscordMemberResponse>> {
    let service = MemberDirectoryService::new(state.service_context());
    let member = service.unlink_member(&guild_id, &discord_id).await?;
    Ok(Json(member))
}
