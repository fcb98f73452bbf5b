//! Reqwest implementation of the directory API
//!
//! All requests share one retry policy: HTTP 429 honors the Retry-After
//! hint and does not consume an attempt; any other failure is retried up
//! to a fixed number of attempts with linearly increasing delay, then the
//! last error surfaces.

use std::time::Duration;

use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use guildhall_common::DiscordConfig;

use crate::api::{DiscordApi, DEFAULT_MEMBER_PAGE_SIZE, DEFAULT_PAGE_DELAY};
use crate::error::{DiscordApiError, DiscordApiResult};
use crate::types::{DiscordGuild, DiscordGuildMember, DiscordUser};

/// Total attempts per request (429 retries excluded)
const MAX_ATTEMPTS: u32 = 3;

/// Base delay for the linear retry backoff
const RETRY_DELAY: Duration = Duration::from_secs(1);

/// Delay used for a 429 without a usable Retry-After header
const RATE_LIMIT_FALLBACK_DELAY: Duration = Duration::from_secs(1);

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client configuration
#[derive(Debug, Clone)]
pub struct DiscordClientConfig {
    /// API base URL, e.g. `https://discord.com/api/v10`
    pub api_base: String,
    /// Bot token sent as `Authorization: Bot <token>`
    pub bot_token: String,
    pub member_page_size: u16,
    pub page_delay: Duration,
    pub request_timeout: Duration,
}

impl DiscordClientConfig {
    /// Create a config with default paging and timeout settings
    #[must_use]
    pub fn new(api_base: impl Into<String>, bot_token: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            bot_token: bot_token.into(),
            member_page_size: DEFAULT_MEMBER_PAGE_SIZE,
            page_delay: DEFAULT_PAGE_DELAY,
            request_timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl From<&DiscordConfig> for DiscordClientConfig {
    fn from(config: &DiscordConfig) -> Self {
        Self {
            api_base: config.api_base.clone(),
            bot_token: config.bot_token.clone(),
            member_page_size: config.member_page_size,
            page_delay: config.page_delay(),
            request_timeout: config.request_timeout(),
        }
    }
}

/// HTTP client for the Discord directory API
#[derive(Debug, Clone)]
pub struct DiscordClient {
    http: reqwest::Client,
    api_base: String,
    member_page_size: u16,
    page_delay: Duration,
}

impl DiscordClient {
    /// Create a new client.
    ///
    /// # Errors
    /// Returns `DiscordApiError::InvalidToken` when the bot token cannot be
    /// used as a header value.
    pub fn new(config: DiscordClientConfig) -> DiscordApiResult<Self> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bot {}", config.bot_token))
            .map_err(|_| DiscordApiError::InvalidToken)?;
        auth.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| DiscordApiError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            member_page_size: config.member_page_size,
            page_delay: config.page_delay,
        })
    }

    /// GET a JSON payload with the shared retry policy
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> DiscordApiResult<T> {
        let url = format!("{}{}", self.api_base, path);
        let mut attempt: u32 = 1;

        loop {
            let error = match self.http.get(&url).query(query).send().await {
                Ok(response) => {
                    let status = response.status();

                    if status == StatusCode::TOO_MANY_REQUESTS {
                        let delay = retry_after_delay(
                            response
                                .headers()
                                .get(header::RETRY_AFTER)
                                .and_then(|v| v.to_str().ok()),
                        );
                        warn!(
                            path = %path,
                            delay_ms = delay.as_millis() as u64,
                            "Rate limited, backing off"
                        );
                        tokio::time::sleep(delay).await;
                        // 429 retries do not consume an attempt
                        continue;
                    }

                    if status.is_success() {
                        debug!(path = %path, status = status.as_u16(), "Discord API request succeeded");
                        return response
                            .json::<T>()
                            .await
                            .map_err(|e| DiscordApiError::Decode(e.to_string()));
                    }

                    let message = response.text().await.unwrap_or_else(|_| {
                        status
                            .canonical_reason()
                            .unwrap_or("request failed")
                            .to_string()
                    });
                    DiscordApiError::Api {
                        status: status.as_u16(),
                        message,
                    }
                }
                Err(e) => DiscordApiError::Transport(e.to_string()),
            };

            if attempt >= MAX_ATTEMPTS {
                return Err(error);
            }

            let delay = backoff_delay(attempt);
            warn!(
                path = %path,
                attempt = attempt,
                error = %error,
                "Discord API request failed, retrying"
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}

#[async_trait::async_trait]
impl DiscordApi for DiscordClient {
    async fn get_guild(&self, guild_id: &str) -> DiscordApiResult<DiscordGuild> {
        self.get_json(
            &format!("/guilds/{guild_id}"),
            &[("with_counts", "true".to_string())],
        )
        .await
    }

    async fn list_guild_members(
        &self,
        guild_id: &str,
        limit: u16,
        after: Option<&str>,
    ) -> DiscordApiResult<Vec<DiscordGuildMember>> {
        let mut query = vec![("limit", limit.to_string())];
        if let Some(after) = after {
            query.push(("after", after.to_string()));
        }

        self.get_json(&format!("/guilds/{guild_id}/members"), &query)
            .await
    }

    async fn get_current_user(&self) -> DiscordApiResult<DiscordUser> {
        self.get_json("/users/@me", &[]).await
    }

    async fn get_current_user_guild_member(
        &self,
        guild_id: &str,
    ) -> DiscordApiResult<DiscordGuildMember> {
        self.get_json(&format!("/users/@me/guilds/{guild_id}/member"), &[])
            .await
    }

    fn member_page_size(&self) -> u16 {
        self.member_page_size
    }

    fn page_delay(&self) -> Duration {
        self.page_delay
    }
}

/// Delay for a 429: the Retry-After hint in seconds, else the fixed default
fn retry_after_delay(header_value: Option<&str>) -> Duration {
    header_value
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|secs| *secs >= 0.0)
        .map(Duration::from_secs_f64)
        .unwrap_or(RATE_LIMIT_FALLBACK_DELAY)
}

/// Linearly increasing delay between failed attempts
fn backoff_delay(attempt: u32) -> Duration {
    RETRY_DELAY * attempt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_after_parses_seconds() {
        assert_eq!(retry_after_delay(Some("2")), Duration::from_secs(2));
        assert_eq!(retry_after_delay(Some("0.5")), Duration::from_millis(500));
    }

    #[test]
    fn test_retry_after_falls_back_on_garbage() {
        assert_eq!(retry_after_delay(None), RATE_LIMIT_FALLBACK_DELAY);
        assert_eq!(retry_after_delay(Some("soon")), RATE_LIMIT_FALLBACK_DELAY);
        assert_eq!(retry_after_delay(Some("-1")), RATE_LIMIT_FALLBACK_DELAY);
    }

    #[test]
    fn test_backoff_is_linear() {
        assert_eq!(backoff_delay(1), Duration::from_secs(1));
        assert_eq!(backoff_delay(2), Duration::from_secs(2));
    }

    #[test]
    fn test_client_rejects_unusable_token() {
        let config = DiscordClientConfig::new("https://discord.com/api/v10", "bad\ntoken");
        assert!(matches!(
            DiscordClient::new(config),
            Err(DiscordApiError::InvalidToken)
        ));
    }

    #[test]
    fn test_config_trims_trailing_slash() {
        let config = DiscordClientConfig::new("https://discord.com/api/v10/", "token");
        let client = DiscordClient::new(config).unwrap();
        assert_eq!(client.api_base, "https://discord.com/api/v10");
    }
}
