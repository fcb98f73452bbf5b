//! # guildhall-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for the repository traits
//! defined in `guildhall-core`. It handles:
//!
//! - Connection pool management
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations, including the idempotent member upsert and
//!   the transactional placeholder merge
//!
//! ## Usage
//!
//! ```rust,ignore
//! use guildhall_db::pool::{create_pool, DatabaseConfig};
//! use guildhall_db::repositories::PgDiscordMemberRepository;
//! use guildhall_core::traits::DiscordMemberRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env();
//!     let pool = create_pool(&config).await?;
//!     let member_repo = PgDiscordMemberRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, DatabaseConfig, PgPool};
pub use repositories::{
    PgAccountRepository, PgDiscordMemberRepository, PgSyncStateRepository, PgUserRepository,
};
