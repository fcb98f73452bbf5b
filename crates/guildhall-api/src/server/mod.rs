//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use guildhall_cache::{spawn_sweeper, MemoryCache};
use guildhall_common::{AppConfig, AppError};
use guildhall_db::{
    create_pool, PgAccountRepository, PgDiscordMemberRepository, PgSyncStateRepository,
    PgUserRepository,
};
use guildhall_discord::{DiscordClient, DiscordClientConfig};
use guildhall_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::apply_middleware;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let config = state.config().clone();
    let router = create_router().merge(health_routes());
    let router = apply_middleware(router, &config.cors, config.app.env.is_production());
    router.with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    // Create database pool
    info!("Connecting to PostgreSQL...");
    let db_config = guildhall_db::DatabaseConfig::from(&config.database);
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    // Create the process-wide cache and its sweep task. The task is
    // detached; it exits on its own when the cache is dropped.
    let cache = Arc::new(MemoryCache::new(config.cache.default_ttl()));
    let _ = spawn_sweeper(&cache, config.cache.sweep_interval());

    // Create the Discord directory client
    let discord_config = DiscordClientConfig::from(&config.discord);
    let discord = Arc::new(
        DiscordClient::new(discord_config).map_err(|e| AppError::Config(e.to_string()))?,
    );

    // Create repositories
    let user_repo = Arc::new(PgUserRepository::new(pool.clone()));
    let account_repo = Arc::new(PgAccountRepository::new(pool.clone()));
    let member_repo = Arc::new(PgDiscordMemberRepository::new(pool.clone()));
    let sync_state_repo = Arc::new(PgSyncStateRepository::new(pool.clone()));

    // Build service context
    let service_context = ServiceContextBuilder::new()
        .pool(pool)
        .user_repo(user_repo)
        .account_repo(account_repo)
        .member_repo(member_repo)
        .sync_state_repo(sync_state_repo)
        .discord(discord)
        .cache(cache)
        .sync_batch_size(config.discord.sync_batch_size)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {}: {}", addr, e)))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {}", e)))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.api.port));

    // Create app state
    let state = create_app_state(config).await?;

    // Build application
    let app = create_app(state);

    // Run server
    run_server(app, addr).await
}
