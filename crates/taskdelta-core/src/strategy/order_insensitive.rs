//! Order-insensitive comparison of file properties.
//!
//! The property is treated as an unordered map from path to fingerprint:
//! only membership and content matter, never enumeration order. This is the
//! strategy for regular input properties (additions reported) and for output
//! properties (additions ignored, since a task may legitimately leave extra
//! files behind in its output directories).

use std::cmp::Ordering;
use std::collections::hash_map;
use std::collections::HashMap;
use std::iter::FusedIterator;
use std::time::Instant;

use taskdelta_core_types::PropertyTag;

use crate::cache_key::CacheKeySink;
use crate::model::{ChangeType, FileChange, FileFingerprint, FileSnapshots};
use crate::strategy::FilePropertyCompareStrategy;
use crate::{log_op_end, log_op_start};

/// Compares file properties as unordered path → fingerprint maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderInsensitiveCompareStrategy {
    include_added: bool,
}

impl OrderInsensitiveCompareStrategy {
    /// Strategy for input properties: added files are reported.
    pub const UNORDERED: Self = Self::new(true);

    /// Strategy for output properties: added files are ignored.
    pub const OUTPUT: Self = Self::new(false);

    pub const fn new(include_added: bool) -> Self {
        Self { include_added }
    }

    pub fn include_added(&self) -> bool {
        self.include_added
    }

    /// Lazily yield the changes between `previous` and `current`.
    ///
    /// Paths only in `current` are reported as added (when enabled), paths in
    /// both with differing content as modified, and paths only in `previous`
    /// as removed. Added and modified changes come first, in `current`'s
    /// iteration order; removed changes follow in unspecified order.
    pub fn iterate_content_changes_since<'a, F: FileFingerprint>(
        &self,
        current: &'a FileSnapshots<F>,
        previous: &'a FileSnapshots<F>,
        property: &PropertyTag,
    ) -> ChangeIterator<'a, F> {
        log_op_start!(
            "detect_changes",
            property = property.as_str(),
            include_added = self.include_added,
            current_len = current.len(),
            previous_len = previous.len()
        );

        ChangeIterator {
            include_added: self.include_added,
            property: property.clone(),
            remaining_previous: previous.iter().map(|(k, v)| (k.as_str(), v)).collect(),
            phase: Phase::ScanningCurrent(current.iter()),
            counts: ChangeCounts::default(),
            started: Instant::now(),
        }
    }

    /// Append the canonical form of `snapshots` to `sink`.
    ///
    /// Entries are sorted by path, then by fingerprint length and bytes, and
    /// each contributes its path followed by its fingerprint bytes. Two maps
    /// holding the same pairs always produce the same byte stream.
    pub fn append_to_cache_key<F: FileFingerprint>(
        &self,
        sink: &mut dyn CacheKeySink,
        snapshots: &FileSnapshots<F>,
    ) {
        log_op_start!("append_to_cache_key", entries = snapshots.len());
        let start = Instant::now();

        let mut entries: Vec<KeyEntry<'_>> = snapshots
            .iter()
            .map(|(path, fingerprint)| KeyEntry {
                path,
                hash: fingerprint.hash_bytes(),
            })
            .collect();
        entries.sort_unstable_by(KeyEntry::canonical_cmp);

        for entry in &entries {
            sink.put_string(entry.path);
            sink.put_bytes(entry.hash);
        }

        log_op_end!(
            "append_to_cache_key",
            duration_ms = start.elapsed().as_millis() as u64,
            entries = entries.len()
        );
    }
}

impl<F: FileFingerprint> FilePropertyCompareStrategy<F> for OrderInsensitiveCompareStrategy {
    fn name(&self) -> &'static str {
        if self.include_added {
            "unordered"
        } else {
            "output"
        }
    }

    fn iterate_content_changes_since<'a>(
        &self,
        current: &'a FileSnapshots<F>,
        previous: &'a FileSnapshots<F>,
        property: &PropertyTag,
    ) -> Box<dyn Iterator<Item = FileChange> + 'a> {
        Box::new(OrderInsensitiveCompareStrategy::iterate_content_changes_since(
            self, current, previous, property,
        ))
    }

    fn append_to_cache_key(&self, sink: &mut dyn CacheKeySink, snapshots: &FileSnapshots<F>) {
        OrderInsensitiveCompareStrategy::append_to_cache_key(self, sink, snapshots);
    }
}

/// Path and fingerprint bytes of one entry, borrowed for sorting.
struct KeyEntry<'s> {
    path: &'s str,
    hash: &'s [u8],
}

impl KeyEntry<'_> {
    fn canonical_cmp(&self, other: &Self) -> Ordering {
        self.path
            .as_bytes()
            .cmp(other.path.as_bytes())
            .then_with(|| self.hash.len().cmp(&other.hash.len()))
            .then_with(|| self.hash.cmp(other.hash))
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct ChangeCounts {
    added: u64,
    modified: u64,
    removed: u64,
}

enum Phase<'a, F> {
    ScanningCurrent(hash_map::Iter<'a, String, F>),
    ScanningRemainder(hash_map::IntoKeys<&'a str, &'a F>),
    Exhausted,
}

/// Lazy, single-pass iterator over the changes of one file property.
///
/// Walks the current snapshot first, consuming matching entries from a
/// private map of the previous snapshot; whatever is left in that map once
/// the current snapshot is exhausted has been removed.
pub struct ChangeIterator<'a, F> {
    include_added: bool,
    property: PropertyTag,
    remaining_previous: HashMap<&'a str, &'a F>,
    phase: Phase<'a, F>,
    counts: ChangeCounts,
    started: Instant,
}

enum Step<'a, F> {
    Current(Option<(&'a String, &'a F)>),
    Remainder(Option<&'a str>),
}

impl<'a, F: FileFingerprint> ChangeIterator<'a, F> {
    pub fn property(&self) -> &PropertyTag {
        &self.property
    }

    fn emit(&mut self, path: &str, change: ChangeType) -> FileChange {
        match change {
            ChangeType::Added => self.counts.added += 1,
            ChangeType::Modified => self.counts.modified += 1,
            ChangeType::Removed => self.counts.removed += 1,
        }
        FileChange::new(path, change, self.property.clone())
    }

    fn finish(&mut self) {
        self.phase = Phase::Exhausted;
        log_op_end!(
            "detect_changes",
            duration_ms = self.started.elapsed().as_millis() as u64,
            property = self.property.as_str(),
            added = self.counts.added,
            modified = self.counts.modified,
            removed = self.counts.removed
        );
    }
}

impl<'a, F: FileFingerprint> Iterator for ChangeIterator<'a, F> {
    type Item = FileChange;

    fn next(&mut self) -> Option<FileChange> {
        loop {
            let step = match &mut self.phase {
                Phase::ScanningCurrent(current) => Step::Current(current.next()),
                Phase::ScanningRemainder(removed) => Step::Remainder(removed.next()),
                Phase::Exhausted => return None,
            };

            match step {
                Step::Current(Some((path, fingerprint))) => {
                    match self.remaining_previous.remove(path.as_str()) {
                        None if self.include_added => {
                            return Some(self.emit(path, ChangeType::Added));
                        }
                        None => {}
                        Some(previous) if !fingerprint.is_content_up_to_date(previous) => {
                            return Some(self.emit(path, ChangeType::Modified));
                        }
                        Some(_) => {}
                    }
                }
                Step::Current(None) => {
                    let remaining = std::mem::take(&mut self.remaining_previous);
                    self.phase = Phase::ScanningRemainder(remaining.into_keys());
                }
                Step::Remainder(Some(path)) => {
                    return Some(self.emit(path, ChangeType::Removed));
                }
                Step::Remainder(None) => self.finish(),
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.phase {
            Phase::ScanningCurrent(current) => (
                0,
                Some(current.len() + self.remaining_previous.len()),
            ),
            Phase::ScanningRemainder(removed) => (removed.len(), Some(removed.len())),
            Phase::Exhausted => (0, Some(0)),
        }
    }
}

impl<F: FileFingerprint> FusedIterator for ChangeIterator<'_, F> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ContentHash;
    use std::collections::HashSet;

    fn hash(byte: u8) -> ContentHash {
        ContentHash::from_bytes(vec![byte; 4])
    }

    fn snapshot(entries: &[(&str, u8)]) -> FileSnapshots<ContentHash> {
        entries
            .iter()
            .map(|(path, byte)| (path.to_string(), hash(*byte)))
            .collect()
    }

    #[test]
    fn test_phase_progression_ends_exhausted() {
        let previous = snapshot(&[("gone", 1)]);
        let current = snapshot(&[("new", 2)]);
        let tag = PropertyTag::new("Input");

        let mut changes = OrderInsensitiveCompareStrategy::UNORDERED
            .iterate_content_changes_since(&current, &previous, &tag);
        assert_eq!(changes.size_hint(), (0, Some(2)));

        let first = changes.next().unwrap();
        assert_eq!(first.change, ChangeType::Added);
        let second = changes.next().unwrap();
        assert_eq!(second.change, ChangeType::Removed);
        assert!(changes.next().is_none());
        assert!(matches!(changes.phase, Phase::Exhausted));
        assert!(changes.next().is_none());
    }

    #[test]
    fn test_previous_snapshot_left_untouched() {
        let previous = snapshot(&[("a", 1), ("b", 2)]);
        let current = snapshot(&[("a", 1)]);
        let before = previous.clone();

        let changes: Vec<_> = OrderInsensitiveCompareStrategy::UNORDERED
            .iterate_content_changes_since(&current, &previous, &PropertyTag::new("Input"))
            .collect();

        assert_eq!(changes.len(), 1);
        assert_eq!(previous, before);
    }

    #[test]
    fn test_removed_entries_follow_current_scan() {
        let previous = snapshot(&[("r1", 1), ("r2", 2), ("m", 3)]);
        let current = snapshot(&[("m", 4), ("a", 5)]);

        let changes: Vec<_> = OrderInsensitiveCompareStrategy::UNORDERED
            .iterate_content_changes_since(&current, &previous, &PropertyTag::new("Input"))
            .collect();

        let first_removed = changes
            .iter()
            .position(|c| c.change == ChangeType::Removed)
            .unwrap();
        assert!(changes[first_removed..]
            .iter()
            .all(|c| c.change == ChangeType::Removed));

        let removed: HashSet<_> = changes[first_removed..]
            .iter()
            .map(|c| c.path.as_str())
            .collect();
        assert_eq!(removed, HashSet::from(["r1", "r2"]));
    }

    #[test]
    fn test_canonical_order_breaks_path_ties_on_hash() {
        let short = [9u8];
        let long_low = [0u8, 1];
        let long_high = [0u8, 2];
        let mut entries = vec![
            KeyEntry { path: "b", hash: &long_high },
            KeyEntry { path: "a", hash: &long_low },
            KeyEntry { path: "b", hash: &short },
            KeyEntry { path: "b", hash: &long_low },
        ];
        entries.sort_unstable_by(KeyEntry::canonical_cmp);

        let order: Vec<(&str, &[u8])> = entries.iter().map(|e| (e.path, e.hash)).collect();
        assert_eq!(
            order,
            vec![
                ("a", &long_low[..]),
                ("b", &short[..]),
                ("b", &long_low[..]),
                ("b", &long_high[..]),
            ]
        );
    }

    #[test]
    fn test_strategy_names() {
        let unordered: &dyn FilePropertyCompareStrategy<ContentHash> =
            &OrderInsensitiveCompareStrategy::UNORDERED;
        let output: &dyn FilePropertyCompareStrategy<ContentHash> =
            &OrderInsensitiveCompareStrategy::OUTPUT;
        assert_eq!(unordered.name(), "unordered");
        assert_eq!(output.name(), "output");
    }
}
