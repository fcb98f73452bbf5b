//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::{health, members, sync};
use crate::state::AppState;

/// Create the main API router with all routes (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new()
        // API v1 endpoints
        .nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately so probes bypass heavier middleware)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new().merge(admin_guild_routes())
}

/// Admin guild routes (authorization is the gateway's concern)
fn admin_guild_routes() -> Router<AppState> {
    Router::new()
        // Guild sync
        .route("/admin/guilds/:guild_id/sync", post(sync::trigger_guild_sync))
        .route("/admin/guilds/:guild_id/sync", get(sync::get_guild_sync_status))
        // Mirrored members
        .route(
            "/admin/guilds/:guild_id/members",
            get(members::list_guild_members),
        )
        .route(
            "/admin/guilds/:guild_id/members/:discord_id/link",
            put(members::link_guild_member),
        )
        .route(
            "/admin/guilds/:guild_id/members/:discord_id/link",
            delete(members::unlink_guild_member),
        )
}
