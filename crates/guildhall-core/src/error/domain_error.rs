//! Domain errors - error types for the domain layer

use thiserror::Error;
use uuid::Uuid;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    #[error("Discord member not found in guild")]
    MemberNotFound,

    #[error("Sync state not found for guild: {0}")]
    SyncStateNotFound(String),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Account already linked to another user")]
    AccountAlreadyLinked,

    #[error("Member already linked to this user")]
    MemberAlreadyLinked,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::MemberNotFound => "UNKNOWN_MEMBER",
            Self::SyncStateNotFound(_) => "UNKNOWN_SYNC_STATE",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::AccountAlreadyLinked => "ACCOUNT_ALREADY_LINKED",
            Self::MemberAlreadyLinked => "MEMBER_ALREADY_LINKED",
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_) | Self::MemberNotFound | Self::SyncStateNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_))
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::AccountAlreadyLinked | Self::MemberAlreadyLinked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = DomainError::UserNotFound(Uuid::nil());
        assert_eq!(err.code(), "UNKNOWN_USER");

        let err = DomainError::AccountAlreadyLinked;
        assert_eq!(err.code(), "ACCOUNT_ALREADY_LINKED");
    }

    #[test]
    fn test_is_not_found() {
        assert!(DomainError::MemberNotFound.is_not_found());
        assert!(DomainError::SyncStateNotFound("g".to_string()).is_not_found());
        assert!(!DomainError::AccountAlreadyLinked.is_not_found());
    }

    #[test]
    fn test_is_conflict() {
        assert!(DomainError::AccountAlreadyLinked.is_conflict());
        assert!(!DomainError::ValidationError("x".to_string()).is_conflict());
    }
}
