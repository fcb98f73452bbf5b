//! GuildSyncState entity <-> model mapper

use guildhall_core::entities::{GuildSyncState, SyncStatus};

use crate::models::GuildSyncStateModel;

impl From<GuildSyncStateModel> for GuildSyncState {
    fn from(model: GuildSyncStateModel) -> Self {
        GuildSyncState {
            guild_id: model.guild_id,
            guild_name: model.guild_name,
            // Unknown status strings read as pending so a schema drift never
            // panics the read path
            status: SyncStatus::parse(&model.status).unwrap_or_default(),
            last_synced_at: model.last_synced_at,
            total_members: model.total_members,
            synced_members: model.synced_members,
            last_error: model.last_error,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
