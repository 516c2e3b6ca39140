use serde::{Deserialize, Serialize};

use crate::error::BuilderError;
use crate::query::{ComparisonOp, LogicalOp};

/// Immutable settings injected into a builder at construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Limit a fresh builder starts with; 0 disables it
    pub default_limit: u64,
    /// Operator of a newly added predicate row
    pub default_operator: ComparisonOp,
    /// Connector of a newly added predicate row
    pub default_connector: LogicalOp,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        BuilderConfig {
            default_limit: 100,
            default_operator: ComparisonOp::Eq,
            default_connector: LogicalOp::And,
        }
    }
}

impl BuilderConfig {
    /// Parse a JSON config; missing keys keep their defaults
    pub fn from_json(input: &str) -> Result<Self, BuilderError> {
        serde_json::from_str(input).map_err(|e| BuilderError::Config(e.to_string()))
    }
}
