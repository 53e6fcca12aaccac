//! # memocache
//!
//! Bounded in-process memoization cache.
//!
//! ## Architecture
//! - **Cache**: façade that selects an eviction policy by name and forwards to it
//! - **SharedCache**: one mutex around a `Cache` for use across threads
//! - **Stats**: hit/miss/eviction counters
//!
//! ```
//! use memocache::Cache;
//!
//! let mut cache = Cache::new(3, "LRU").unwrap();
//! cache.set("answer", 42);
//! assert_eq!(cache.get("answer"), Ok(&42));
//! assert!(cache.get("question").is_err());
//! ```

#![warn(missing_docs)]

mod cache;
mod config;
mod shared;
mod stats;

pub use cache::Cache;
pub use config::{CacheConfig, DEFAULT_CAPACITY};
pub use shared::SharedCache;
pub use stats::{CacheStats, StatsSnapshot};

pub use memocore::{Error, PolicyKind, Result};
