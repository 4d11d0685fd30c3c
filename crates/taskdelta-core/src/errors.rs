use taskdelta_core_types::PropertyTag;
use thiserror::Error;

/// Result type alias using TaskDeltaError
pub type Result<T> = std::result::Result<T, TaskDeltaError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and diagnostics emitted by the build tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Configuration
    /// A strategy name or configuration document could not be understood
    InvalidConfig,
    /// A recognized strategy that this build does not provide
    NotImplemented,

    // Data
    /// A fingerprint could not be decoded
    InvalidFingerprint,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::NotImplemented => "ERR_NOT_IMPLEMENTED",
            ExErrorKind::InvalidFingerprint => "ERR_INVALID_FINGERPRINT",
        }
    }
}

/// Canonical structured error type
///
/// Carries classification fields for programmatic handling plus the
/// operation and property context needed to explain a failure.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    property: Option<PropertyTag>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            property: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add property context
    pub fn with_property(mut self, property: PropertyTag) -> Self {
        self.property = Some(property);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the property context, if any
    pub fn property(&self) -> Option<&PropertyTag> {
        self.property.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(property) = &self.property {
            write!(f, " (property: {})", property)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for taskdelta operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TaskDeltaError {
    /// Strategy name is not one of the known compare strategies
    #[error("Unknown compare strategy: {name}")]
    UnknownStrategy { name: String },

    /// Strategy is known but not available in this build
    #[error("Compare strategy '{name}' is not supported by this build")]
    UnsupportedStrategy { name: String },

    /// Configuration document could not be parsed
    #[error("Invalid compare configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Fingerprint text could not be decoded
    #[error("Invalid fingerprint: {reason}")]
    InvalidFingerprint { reason: String },
}

impl From<TaskDeltaError> for ExError {
    fn from(err: TaskDeltaError) -> Self {
        let message = err.to_string();
        let kind = match &err {
            TaskDeltaError::UnknownStrategy { .. } | TaskDeltaError::InvalidConfig { .. } => {
                ExErrorKind::InvalidConfig
            }
            TaskDeltaError::UnsupportedStrategy { .. } => ExErrorKind::NotImplemented,
            TaskDeltaError::InvalidFingerprint { .. } => ExErrorKind::InvalidFingerprint,
        };
        ExError::new(kind).with_message(message)
    }
}

impl From<toml::de::Error> for TaskDeltaError {
    fn from(err: toml::de::Error) -> Self {
        TaskDeltaError::InvalidConfig {
            reason: err.message().to_string(),
        }
    }
}

impl From<hex::FromHexError> for TaskDeltaError {
    fn from(err: hex::FromHexError) -> Self {
        TaskDeltaError::InvalidFingerprint {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_strategy_maps_to_not_implemented() {
        let err = TaskDeltaError::UnsupportedStrategy {
            name: "ordered".to_string(),
        };
        let ex: ExError = err.into();
        assert_eq!(ex.kind(), ExErrorKind::NotImplemented);
        assert_eq!(ex.code(), "ERR_NOT_IMPLEMENTED");
        assert!(ex.message().contains("ordered"));
    }

    #[test]
    fn test_display_includes_op_and_property() {
        let ex = ExError::new(ExErrorKind::InvalidConfig)
            .with_op("load_compare_config")
            .with_property(PropertyTag::new("outputs"))
            .with_message("bad strategy");
        let rendered = ex.to_string();
        assert!(rendered.starts_with("[ERR_INVALID_CONFIG]"));
        assert!(rendered.contains("load_compare_config"));
        assert!(rendered.contains("bad strategy"));
        assert!(rendered.contains("(property: outputs)"));
    }
}
