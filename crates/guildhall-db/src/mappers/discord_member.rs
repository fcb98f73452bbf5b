//! DiscordMember entity <-> model mapper

use guildhall_core::entities::DiscordMember;

use crate::models::DiscordMemberModel;

impl From<DiscordMemberModel> for DiscordMember {
    fn from(model: DiscordMemberModel) -> Self {
        DiscordMember {
            discord_id: model.discord_id,
            guild_id: model.guild_id,
            username: model.username,
            discriminator: model.discriminator,
            display_name: model.display_name,
            avatar_hash: model.avatar_hash,
            joined_at: model.joined_at,
            linked_user_id: model.linked_user_id,
            synced_at: model.synced_at,
            sync_status: model.sync_status,
        }
    }
}
