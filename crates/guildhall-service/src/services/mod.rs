//! Business logic services
//!
//! This module contains the service layer implementations that handle
//! sync orchestration, status tracking, and directory administration.

pub mod context;
pub mod error;
pub mod members;
pub mod reconcile;
pub mod status;
pub mod sync;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export all services for convenience
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use members::MemberDirectoryService;
pub use reconcile::AccountLinkService;
pub use status::{SyncStatusData, SyncStatusService};
pub use sync::GuildSyncService;
