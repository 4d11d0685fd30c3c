//! taskdelta Core - change detection for task file properties
//!
//! This crate answers two questions an incremental build asks about each
//! file property of a task (its input files, its output files):
//!
//! - Which files were added, modified or removed since the previous build?
//! - What does the property contribute to the task's cache key?
//!
//! Both treat the property as an unordered map from path to content
//! fingerprint, so the order in which a filesystem enumerates files never
//! changes the answer.
//!
//! ```
//! use std::collections::HashMap;
//! use taskdelta_core::cache_key::CacheKeyBuilder;
//! use taskdelta_core::model::{ChangeType, ContentHash};
//! use taskdelta_core::strategy::OrderInsensitiveCompareStrategy;
//! use taskdelta_core::PropertyTag;
//!
//! let previous = HashMap::from([("a.txt".to_string(), ContentHash::from_bytes(vec![1]))]);
//! let current = HashMap::from([("a.txt".to_string(), ContentHash::from_bytes(vec![2]))]);
//!
//! let strategy = OrderInsensitiveCompareStrategy::UNORDERED;
//! let mut changes =
//!     strategy.iterate_content_changes_since(&current, &previous, &PropertyTag::new("Input"));
//! assert_eq!(changes.next().map(|c| c.change), Some(ChangeType::Modified));
//!
//! let mut key = CacheKeyBuilder::new();
//! strategy.append_to_cache_key(&mut key, &current);
//! assert_eq!(key.build().as_str().len(), 64);
//! ```

pub mod cache_key;
pub mod config;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod strategy;

pub use taskdelta_core_types as core_types;

// Re-export commonly used types
pub use cache_key::{CacheKey, CacheKeyBuilder, CacheKeySink};
pub use config::{CompareConfig, CompareStrategyKind};
pub use errors::{ExError, ExErrorKind, Result, TaskDeltaError};
pub use model::{ChangeType, ContentHash, FileChange, FileFingerprint, FileSnapshots};
pub use strategy::{ChangeIterator, FilePropertyCompareStrategy, OrderInsensitiveCompareStrategy};
pub use taskdelta_core_types::PropertyTag;
