//! Database models
//!
//! Row types matching the tables this layer assumes (schema is owned by the
//! wider application):
//!
//! ```sql
//! CREATE TABLE users (
//!     id          UUID PRIMARY KEY,
//!     name        TEXT NOT NULL,
//!     email       TEXT,
//!     avatar_url  TEXT,
//!     placeholder BOOLEAN NOT NULL DEFAULT FALSE,
//!     created_at  TIMESTAMPTZ NOT NULL,
//!     updated_at  TIMESTAMPTZ NOT NULL
//! );
//!
//! CREATE TABLE accounts (
//!     id                  UUID PRIMARY KEY,
//!     user_id             UUID NOT NULL REFERENCES users (id),
//!     provider            TEXT NOT NULL,
//!     provider_account_id TEXT NOT NULL,
//!     created_at          TIMESTAMPTZ NOT NULL,
//!     UNIQUE (provider, provider_account_id)
//! );
//!
//! CREATE TABLE discord_members (
//!     discord_id     TEXT NOT NULL,
//!     guild_id       TEXT NOT NULL,
//!     username       TEXT NOT NULL,
//!     discriminator  TEXT,
//!     display_name   TEXT,
//!     avatar_hash    TEXT,
//!     joined_at      TIMESTAMPTZ,
//!     linked_user_id UUID,
//!     synced_at      TIMESTAMPTZ NOT NULL,
//!     sync_status    TEXT NOT NULL,
//!     PRIMARY KEY (discord_id, guild_id)
//! );
//!
//! CREATE TABLE guild_sync_states (
//!     guild_id       TEXT PRIMARY KEY,
//!     guild_name     TEXT,
//!     status         TEXT NOT NULL,
//!     last_synced_at TIMESTAMPTZ,
//!     total_members  INTEGER,
//!     synced_members INTEGER,
//!     last_error     TEXT,
//!     created_at     TIMESTAMPTZ NOT NULL,
//!     updated_at     TIMESTAMPTZ NOT NULL
//! );
//! ```
//!
//! `discord_members.linked_user_id` is deliberately not a foreign key: the
//! reference is weak and survives user deletion until the next sync or an
//! explicit merge repoints it.

mod account;
mod discord_member;
mod sync_state;
mod user;

pub use account::AccountModel;
pub use discord_member::DiscordMemberModel;
pub use sync_state::GuildSyncStateModel;
pub use user::UserModel;
