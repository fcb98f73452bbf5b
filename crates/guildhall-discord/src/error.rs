//! Discord API error types

use thiserror::Error;

/// Errors from the Discord directory API
#[derive(Debug, Error)]
pub enum DiscordApiError {
    /// Non-2xx response after the retry policy gave up
    #[error("Discord API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Connection, TLS, or timeout failure after the retry policy gave up
    #[error("Discord API transport error: {0}")]
    Transport(String),

    /// 2xx response whose body did not match the expected shape
    #[error("Discord API decode error: {0}")]
    Decode(String),

    /// The configured bot token cannot be sent as a header value
    #[error("Invalid bot token")]
    InvalidToken,
}

impl DiscordApiError {
    /// HTTP status of the failing response, if one was received
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if the failing response was 404
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Result type for Discord API operations
pub type DiscordApiResult<T> = Result<T, DiscordApiError>;
