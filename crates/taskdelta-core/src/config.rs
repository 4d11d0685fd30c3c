//! Compare strategy selection.
//!
//! Each task file property is compared by a strategy chosen by name. Names
//! can be given individually ([`CompareStrategyKind`] implements `FromStr`)
//! or through a TOML document mapping property tags to strategies:
//!
//! ```toml
//! default_strategy = "unordered"
//!
//! [properties.outputs]
//! strategy = "output"
//! ```

use std::collections::BTreeMap;
use std::str::FromStr;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use taskdelta_core_types::PropertyTag;

use crate::errors::{Result, TaskDeltaError};
use crate::model::FileFingerprint;
use crate::strategy::{FilePropertyCompareStrategy, OrderInsensitiveCompareStrategy};
use crate::{log_op_end, log_op_error, log_op_start};

/// Named compare strategies.
///
/// Deserialization goes through `FromStr`, so names in a configuration
/// document are matched exactly as they are when parsed directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", try_from = "String")]
pub enum CompareStrategyKind {
    /// Unordered comparison reporting added, modified and removed files
    #[default]
    Unordered,
    /// Unordered comparison that ignores added files
    Output,
    /// Order-sensitive comparison; recognized but not provided by this crate
    Ordered,
}

impl CompareStrategyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompareStrategyKind::Unordered => "unordered",
            CompareStrategyKind::Output => "output",
            CompareStrategyKind::Ordered => "ordered",
        }
    }

    /// Instantiate the strategy behind this name.
    ///
    /// # Errors
    ///
    /// Returns `TaskDeltaError::UnsupportedStrategy` for `ordered`.
    pub fn build<F: FileFingerprint>(&self) -> Result<Box<dyn FilePropertyCompareStrategy<F>>> {
        match self {
            CompareStrategyKind::Unordered => {
                Ok(Box::new(OrderInsensitiveCompareStrategy::UNORDERED))
            }
            CompareStrategyKind::Output => Ok(Box::new(OrderInsensitiveCompareStrategy::OUTPUT)),
            CompareStrategyKind::Ordered => Err(TaskDeltaError::UnsupportedStrategy {
                name: self.as_str().to_string(),
            }),
        }
    }
}

impl FromStr for CompareStrategyKind {
    type Err = TaskDeltaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "unordered" => Ok(CompareStrategyKind::Unordered),
            "output" => Ok(CompareStrategyKind::Output),
            "ordered" => Ok(CompareStrategyKind::Ordered),
            _ => Err(TaskDeltaError::UnknownStrategy {
                name: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for CompareStrategyKind {
    type Error = TaskDeltaError;

    fn try_from(name: String) -> Result<Self> {
        name.parse()
    }
}

impl std::fmt::Display for CompareStrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-property settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PropertyCompareSettings {
    pub strategy: CompareStrategyKind,
}

/// Strategy assignment for a task's file properties.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompareConfig {
    #[serde(default)]
    pub default_strategy: CompareStrategyKind,
    #[serde(default)]
    pub properties: BTreeMap<String, PropertyCompareSettings>,
}

impl CompareConfig {
    /// Parse a configuration document.
    ///
    /// # Errors
    ///
    /// Returns `TaskDeltaError::InvalidConfig` if the document is not valid
    /// TOML, names an unknown strategy, or contains unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        log_op_start!("load_compare_config");
        let start = Instant::now();

        let config: CompareConfig = toml::from_str(text).map_err(|e| {
            let err = TaskDeltaError::from(e);
            log_op_error!(
                "load_compare_config",
                err.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            err
        })?;

        log_op_end!(
            "load_compare_config",
            duration_ms = start.elapsed().as_millis() as u64,
            properties = config.properties.len()
        );
        Ok(config)
    }

    /// Strategy name configured for `property`, or the default.
    pub fn strategy_kind_for(&self, property: &PropertyTag) -> CompareStrategyKind {
        self.properties
            .get(property.as_str())
            .map(|settings| settings.strategy)
            .unwrap_or(self.default_strategy)
    }

    /// Instantiate the strategy configured for `property`.
    ///
    /// # Errors
    ///
    /// Returns `TaskDeltaError::UnsupportedStrategy` if the configured
    /// strategy is not provided by this crate.
    pub fn strategy_for<F: FileFingerprint>(
        &self,
        property: &PropertyTag,
    ) -> Result<Box<dyn FilePropertyCompareStrategy<F>>> {
        self.strategy_kind_for(property).build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ContentHash;

    #[test]
    fn test_parse_strategy_names() {
        assert_eq!(
            "unordered".parse::<CompareStrategyKind>().unwrap(),
            CompareStrategyKind::Unordered
        );
        assert_eq!(
            " Output ".parse::<CompareStrategyKind>().unwrap(),
            CompareStrategyKind::Output
        );
        assert_eq!(
            "ordered".parse::<CompareStrategyKind>().unwrap(),
            CompareStrategyKind::Ordered
        );
    }

    #[test]
    fn test_document_accepts_names_like_from_str() {
        let config = CompareConfig::from_toml_str(
            r#"
            default_strategy = "Output"

            [properties.inputs]
            strategy = " UNORDERED "
            "#,
        )
        .unwrap();

        assert_eq!(config.default_strategy, CompareStrategyKind::Output);
        assert_eq!(
            config.strategy_kind_for(&PropertyTag::new("inputs")),
            CompareStrategyKind::Unordered
        );
    }

    #[test]
    fn test_unknown_strategy_name_rejected() {
        let err = "sorted".parse::<CompareStrategyKind>().unwrap_err();
        assert_eq!(
            err,
            TaskDeltaError::UnknownStrategy {
                name: "sorted".to_string()
            }
        );
    }

    #[test]
    fn test_ordered_strategy_not_provided() {
        let err = CompareStrategyKind::Ordered.build::<ContentHash>().err().unwrap();
        assert!(matches!(err, TaskDeltaError::UnsupportedStrategy { .. }));
    }

    #[test]
    fn test_display_matches_parse() {
        for kind in [
            CompareStrategyKind::Unordered,
            CompareStrategyKind::Output,
            CompareStrategyKind::Ordered,
        ] {
            assert_eq!(kind.to_string().parse::<CompareStrategyKind>().unwrap(), kind);
        }
    }
}
