//! Property tags for change reporting
//!
//! A property tag names the task file property (or its role) that a change
//! event belongs to, e.g. `Input` or `Output`. It is carried unchanged onto
//! every emitted change and is never parsed or validated.

use serde::{Deserialize, Serialize};

/// Opaque label identifying a task file property
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyTag(String);

impl PropertyTag {
    /// Create a tag from any string-like value
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PropertyTag {
    fn from(tag: &str) -> Self {
        Self(tag.to_string())
    }
}

impl From<String> for PropertyTag {
    fn from(tag: String) -> Self {
        Self(tag)
    }
}

impl std::fmt::Display for PropertyTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
