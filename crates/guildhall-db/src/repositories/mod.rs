//! PostgreSQL repository implementations

mod account;
mod discord_member;
mod error;
mod sync_state;
mod user;

pub use account::PgAccountRepository;
pub use discord_member::PgDiscordMemberRepository;
pub use sync_state::PgSyncStateRepository;
pub use user::PgUserRepository;
