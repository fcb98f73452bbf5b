//! Data transfer objects for API requests and responses

pub mod requests;
pub mod responses;

pub use requests::LinkMemberRequest;
pub use responses::{
    DiscordMemberResponse, HealthResponse, PaginatedResponse, PaginationMeta, ReadinessResponse,
    SyncReport, SyncStatusResponse,
};
