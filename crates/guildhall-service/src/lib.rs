//! # guildhall-service
//!
//! Application layer containing the guild sync orchestration, the admin
//! member directory operations, and their DTOs.

pub mod dto;
pub mod services;

// Re-export commonly used types at crate root
pub use dto::{
    DiscordMemberResponse, HealthResponse, LinkMemberRequest, PaginatedResponse, PaginationMeta,
    ReadinessResponse, SyncReport, SyncStatusResponse,
};
pub use services::{
    AccountLinkService, GuildSyncService, MemberDirectoryService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, SyncStatusData, SyncStatusService,
};
