use serde::{Deserialize, Serialize};
use taskdelta_core_types::PropertyTag;

/// How a file entry differs between two snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeType {
    /// Present now, absent before
    Added,
    /// Present in both with different content
    Modified,
    /// Present before, absent now
    Removed,
}

impl ChangeType {
    /// Human-readable verb phrase used in change messages.
    pub fn describe(&self) -> &'static str {
        match self {
            ChangeType::Added => "has been added",
            ChangeType::Modified => "has changed",
            ChangeType::Removed => "has been removed",
        }
    }
}

/// A single change to one entry of a task file property.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileChange {
    pub path: String,
    pub change: ChangeType,
    pub property: PropertyTag,
}

impl FileChange {
    pub fn new(path: impl Into<String>, change: ChangeType, property: PropertyTag) -> Self {
        Self {
            path: path.into(),
            change,
            property,
        }
    }
}

impl std::fmt::Display for FileChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} file {} {}.",
            self.property,
            self.path,
            self.change.describe()
        )
    }
}
