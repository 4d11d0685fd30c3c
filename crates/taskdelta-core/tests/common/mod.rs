use std::collections::HashSet;
use taskdelta_core::{ChangeType, ContentHash, FileChange, FileSnapshots};

/// Fingerprint whose bytes are `byte` repeated, long enough to look like a digest
#[allow(dead_code)]
pub fn hash(byte: u8) -> ContentHash {
    ContentHash::from_bytes(vec![byte; 16])
}

/// Build a snapshot by inserting entries in the given order
#[allow(dead_code)]
pub fn snapshot(entries: &[(&str, u8)]) -> FileSnapshots<ContentHash> {
    let mut map = FileSnapshots::new();
    for (path, byte) in entries {
        map.insert(path.to_string(), hash(*byte));
    }
    map
}

/// Reduce a change list to an order-free set of (path, kind)
#[allow(dead_code)]
pub fn change_set(changes: &[FileChange]) -> HashSet<(String, ChangeType)> {
    changes
        .iter()
        .map(|c| (c.path.clone(), c.change))
        .collect()
}

#[allow(dead_code)]
pub fn expected(entries: &[(&str, ChangeType)]) -> HashSet<(String, ChangeType)> {
    entries
        .iter()
        .map(|(path, kind)| (path.to_string(), *kind))
        .collect()
}
