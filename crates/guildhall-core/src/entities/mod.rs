//! Domain entities

mod account;
mod discord_member;
mod sync_state;
mod user;

pub use account::{LinkedAccount, DISCORD_PROVIDER};
pub use discord_member::{DiscordMember, SYNC_STATUS_ACTIVE};
pub use sync_state::{GuildSyncState, SyncStatus};
pub use user::User;
