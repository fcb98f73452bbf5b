//! Guild sync handlers
//!
//! Admin endpoints for triggering a guild sync and reading its status.
//! These routes sit behind the deployment's admin gateway; authorization is
//! enforced there, not here.

use axum::{
    extract::{Path, State},
    Json,
};
use guildhall_service::{GuildSyncService, SyncReport, SyncStatusResponse, SyncStatusService};

use crate::response::ApiResult;
use crate::state::AppState;

/// Trigger a full sync for one guild
///
/// POST /admin/guilds/{guild_id}/sync
///
/// Always answers 200 with a report; sync failures are described inside it
/// rather than surfaced as an HTTP error.
pub async fn trigger_guild_sync(
    State(state): State<AppState>,
    Path(guild_id): Path<String>,
) -> ApiResult<Json<SyncReport>> {
    let service = GuildSyncService::new(state.service_context());
    let report = service.sync_guild(&guild_id).await?;
    Ok(Json(report))
}

/// Read the current sync status for one guild
///
/// GET /admin/guilds/{guild_id}/sync
pub async fn get_guild_sync_status(
    State(state): State<AppState>,
    Path(guild_id): Path<String>,
) -> ApiResult<Json<SyncStatusResponse>> {
    let service = SyncStatusService::new(state.service_context());
    let status = service.get_status(&guild_id).await?;
    Ok(Json(status))
}
