//! Data model shared by change detection and cache key canonicalization.

pub mod change;
pub mod fingerprint;

use std::collections::HashMap;

pub use change::{ChangeType, FileChange};
pub use fingerprint::{ContentHash, FileFingerprint};

/// Fingerprints of one task file property at a point in time, keyed by path.
///
/// Iteration order is whatever the map yields and carries no meaning.
pub type FileSnapshots<F> = HashMap<String, F>;
