//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// Manually link a mirrored guild member to a local user
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LinkMemberRequest {
    pub user_id: Uuid,
}
