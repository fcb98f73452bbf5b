//! Directory API seam
//!
//! The page-level operations are required; full-roster pagination and the
//! permission probe are provided on top of them, so every implementation
//! (HTTP client or test double) gets the same traversal behavior.

use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use crate::error::DiscordApiResult;
use crate::types::{DiscordGuild, DiscordGuildMember, DiscordUser, PermissionCheck};

/// Default member page size (the API maximum)
pub const DEFAULT_MEMBER_PAGE_SIZE: u16 = 1000;

/// Default pause between member pages
pub const DEFAULT_PAGE_DELAY: Duration = Duration::from_secs(1);

/// Discord directory API operations used by the sync service
#[async_trait]
pub trait DiscordApi: Send + Sync {
    /// Fetch guild metadata
    async fn get_guild(&self, guild_id: &str) -> DiscordApiResult<DiscordGuild>;

    /// Fetch one page of guild members, at most `limit` records, starting
    /// after the given member id
    async fn list_guild_members(
        &self,
        guild_id: &str,
        limit: u16,
        after: Option<&str>,
    ) -> DiscordApiResult<Vec<DiscordGuildMember>>;

    /// Fetch the bot's own user
    async fn get_current_user(&self) -> DiscordApiResult<DiscordUser>;

    /// Fetch the bot's own membership in the given guild
    async fn get_current_user_guild_member(
        &self,
        guild_id: &str,
    ) -> DiscordApiResult<DiscordGuildMember>;

    /// Page size used by [`DiscordApi::get_all_guild_members`]
    fn member_page_size(&self) -> u16 {
        DEFAULT_MEMBER_PAGE_SIZE
    }

    /// Pause between member pages, to stay inside the API's rate limits
    fn page_delay(&self) -> Duration {
        DEFAULT_PAGE_DELAY
    }

    /// Fetch the full member list for a guild.
    ///
    /// Pages with the last-seen member id as the cursor until a page comes
    /// back short or empty, sleeping [`DiscordApi::page_delay`] between
    /// pages. Strictly sequential.
    async fn get_all_guild_members(
        &self,
        guild_id: &str,
    ) -> DiscordApiResult<Vec<DiscordGuildMember>> {
        let page_size = self.member_page_size();
        let mut members = Vec::new();
        let mut after: Option<String> = None;

        loop {
            let page = self
                .list_guild_members(guild_id, page_size, after.as_deref())
                .await?;

            let page_len = page.len();
            after = page.last().map(|m| m.user.id.clone());
            members.extend(page);

            if page_len < usize::from(page_size) {
                break;
            }

            tokio::time::sleep(self.page_delay()).await;
        }

        Ok(members)
    }

    /// Probe whether the bot can read the guild's member list.
    ///
    /// Conservative: any failure fetching the bot's identity or its
    /// membership in the guild is reported as missing permissions, with a
    /// static fallback list since the API does not say which capability
    /// was absent.
    async fn validate_bot_permissions(&self, guild_id: &str) -> PermissionCheck {
        if let Err(e) = self.get_current_user().await {
            warn!(error = %e, "Permission probe failed fetching bot identity");
            return PermissionCheck::denied();
        }

        match self.get_current_user_guild_member(guild_id).await {
            Ok(_) => PermissionCheck::granted(),
            Err(e) => {
                warn!(guild_id = %guild_id, error = %e, "Permission probe failed fetching bot membership");
                PermissionCheck::denied()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DiscordApiError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn member(id: usize) -> DiscordGuildMember {
        DiscordGuildMember {
            user: DiscordUser {
                id: id.to_string(),
                username: format!("user-{id}"),
                discriminator: None,
                global_name: None,
                avatar: None,
                bot: false,
            },
            nick: None,
            joined_at: None,
        }
    }

    /// Serves pre-cut pages and counts page requests
    struct PagedApi {
        pages: Vec<Vec<DiscordGuildMember>>,
        requests: AtomicUsize,
        deny_membership: bool,
    }

    impl PagedApi {
        fn new(page_sizes: &[usize]) -> Self {
            let mut next_id = 0;
            let pages = page_sizes
                .iter()
                .map(|&size| {
                    (0..size)
                        .map(|_| {
                            next_id += 1;
                            member(next_id)
                        })
                        .collect()
                })
                .collect();
            Self {
                pages,
                requests: AtomicUsize::new(0),
                deny_membership: false,
            }
        }
    }

    #[async_trait]
    impl DiscordApi for PagedApi {
        async fn get_guild(&self, guild_id: &str) -> DiscordApiResult<DiscordGuild> {
            Ok(DiscordGuild {
                id: guild_id.to_string(),
                name: "Test Guild".to_string(),
                icon: None,
                approximate_member_count: None,
            })
        }

        async fn list_guild_members(
            &self,
            _guild_id: &str,
            _limit: u16,
            _after: Option<&str>,
        ) -> DiscordApiResult<Vec<DiscordGuildMember>> {
            let index = self.requests.fetch_add(1, Ordering::SeqCst);
            Ok(self.pages.get(index).cloned().unwrap_or_default())
        }

        async fn get_current_user(&self) -> DiscordApiResult<DiscordUser> {
            Ok(member(0).user)
        }

        async fn get_current_user_guild_member(
            &self,
            guild_id: &str,
        ) -> DiscordApiResult<DiscordGuildMember> {
            if self.deny_membership {
                return Err(DiscordApiError::Api {
                    status: 403,
                    message: "Missing Access".to_string(),
                });
            }
            let _ = guild_id;
            Ok(member(0))
        }

        fn page_delay(&self) -> Duration {
            Duration::ZERO
        }
    }

    #[tokio::test]
    async fn test_pagination_stops_on_short_page() {
        let api = PagedApi::new(&[1000, 1000, 400]);
        let members = api.get_all_guild_members("g").await.unwrap();

        assert_eq!(members.len(), 2400);
        assert_eq!(api.requests.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_pagination_handles_empty_guild() {
        let api = PagedApi::new(&[0]);
        let members = api.get_all_guild_members("g").await.unwrap();

        assert!(members.is_empty());
        assert_eq!(api.requests.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_pagination_stops_on_empty_followup_page() {
        // A full page followed by an empty one: exactly two requests.
        let api = PagedApi::new(&[1000, 0]);
        let members = api.get_all_guild_members("g").await.unwrap();

        assert_eq!(members.len(), 1000);
        assert_eq!(api.requests.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_permission_probe_granted() {
        let api = PagedApi::new(&[0]);
        let check = api.validate_bot_permissions("g").await;
        assert!(check.has_permissions);
        assert!(check.missing_permissions.is_empty());
    }

    #[tokio::test]
    async fn test_permission_probe_denied_on_membership_failure() {
        let mut api = PagedApi::new(&[0]);
        api.deny_membership = true;

        let check = api.validate_bot_permissions("g").await;
        assert!(!check.has_permissions);
        assert!(!check.missing_permissions.is_empty());
    }
}
