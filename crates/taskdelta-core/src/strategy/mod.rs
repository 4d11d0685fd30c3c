//! Compare strategies for task file properties.
//!
//! A compare strategy answers two questions about a file property:
//!
//! - which entries changed since the previous build
//!   ([`FilePropertyCompareStrategy::iterate_content_changes_since`])
//! - what the property contributes to the task's cache key
//!   ([`FilePropertyCompareStrategy::append_to_cache_key`])
//!
//! Strategies are picked per property by configuration (see
//! [`crate::config`]); the snapshot type itself carries no strategy.

pub mod order_insensitive;

pub use order_insensitive::{ChangeIterator, OrderInsensitiveCompareStrategy};

use crate::cache_key::CacheKeySink;
use crate::model::{FileChange, FileFingerprint, FileSnapshots};
use taskdelta_core_types::PropertyTag;

/// Comparison policy for one category of file property.
pub trait FilePropertyCompareStrategy<F: FileFingerprint>: Send + Sync {
    /// Stable name of the strategy, as used in configuration.
    fn name(&self) -> &'static str;

    /// Lazily yield the changes between `previous` and `current`.
    ///
    /// The returned iterator is single pass; iterate again by calling this
    /// method again. Each change is tagged with `property`.
    fn iterate_content_changes_since<'a>(
        &self,
        current: &'a FileSnapshots<F>,
        previous: &'a FileSnapshots<F>,
        property: &PropertyTag,
    ) -> Box<dyn Iterator<Item = FileChange> + 'a>;

    /// Append this property's canonical contribution to `sink`.
    fn append_to_cache_key(&self, sink: &mut dyn CacheKeySink, snapshots: &FileSnapshots<F>);
}
