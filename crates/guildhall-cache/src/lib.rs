//! # guildhall-cache
//!
//! In-process TTL cache used for short-lived read-path caching (sync status
//! projections, directory listings).
//!
//! The cache is an explicit service instance: construct one [`MemoryCache`]
//! at process start, wrap it in an `Arc`, and thread it through the service
//! context. A background sweep task started with [`spawn_sweeper`] evicts
//! expired entries on a timer; reads also drop expired entries lazily.
//!
//! ## Example
//!
//! ```ignore
//! use guildhall_cache::{spawn_sweeper, MemoryCache};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let cache = Arc::new(MemoryCache::new(Duration::from_secs(60)));
//! let _sweeper = spawn_sweeper(&cache, Duration::from_secs(30));
//!
//! cache.set("sync:status:g1", &status, None)?;
//! let cached: Option<SyncStatusView> = cache.get("sync:status:g1");
//! cache.invalidate_by_prefix("sync:status:");
//! ```

mod memory;

pub use memory::{spawn_sweeper, CacheError, CacheResult, MemoryCache};
