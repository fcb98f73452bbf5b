//! Wire types for the Discord directory API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A Discord user object as returned inside guild member payloads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscordUser {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub discriminator: Option<String>,
    #[serde(default)]
    pub global_name: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub bot: bool,
}

/// A guild member record from the member listing endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscordGuildMember {
    pub user: DiscordUser,
    #[serde(default)]
    pub nick: Option<String>,
    #[serde(default)]
    pub joined_at: Option<DateTime<Utc>>,
}

impl DiscordGuildMember {
    /// Best available display name: guild nickname, then global display
    /// name, then the account username.
    pub fn display_name(&self) -> &str {
        self.nick
            .as_deref()
            .or(self.user.global_name.as_deref())
            .unwrap_or(&self.user.username)
    }

    /// Check whether this member is an automated account
    #[inline]
    pub fn is_bot(&self) -> bool {
        self.user.bot
    }
}

/// Guild metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscordGuild {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub approximate_member_count: Option<u32>,
}

/// Permissions the sync needs; reported when the probe cannot tell which
/// specific capability is absent.
pub const FALLBACK_MISSING_PERMISSIONS: &[&str] = &["VIEW_CHANNELS", "GUILD_MEMBERS"];

/// Outcome of the bot permission probe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionCheck {
    pub has_permissions: bool,
    pub missing_permissions: Vec<String>,
}

impl PermissionCheck {
    /// Probe succeeded; nothing missing
    #[must_use]
    pub fn granted() -> Self {
        Self {
            has_permissions: true,
            missing_permissions: Vec::new(),
        }
    }

    /// Probe failed; report the static fallback list
    #[must_use]
    pub fn denied() -> Self {
        Self {
            has_permissions: false,
            missing_permissions: FALLBACK_MISSING_PERMISSIONS
                .iter()
                .map(|p| (*p).to_string())
                .collect(),
        }
    }
}
