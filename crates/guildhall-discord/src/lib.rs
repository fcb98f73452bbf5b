//! # guildhall-discord
//!
//! Client for the Discord directory API surface the sync service consumes:
//! guild metadata, paginated guild member listing, and the self-identity
//! lookups used for permission probing.
//!
//! [`DiscordApi`] is the seam the rest of the application depends on; the
//! provided pagination and permission-probe operations are built from the
//! page-level methods so tests can substitute a mock transport.
//! [`DiscordClient`] is the reqwest implementation with bot-token auth and
//! the retry/backoff policy every request goes through.

pub mod api;
pub mod avatar;
pub mod client;
pub mod error;
pub mod types;

pub use api::DiscordApi;
pub use avatar::avatar_url;
pub use client::{DiscordClient, DiscordClientConfig};
pub use error::{DiscordApiError, DiscordApiResult};
pub use types::{DiscordGuild, DiscordGuildMember, DiscordUser, PermissionCheck};
