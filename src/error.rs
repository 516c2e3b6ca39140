use thiserror::Error;

/// Errors surfaced by the query builder.
/// None of them leave the builder unusable; the spec is never rolled back.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BuilderError {
    #[error("Predicate index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("{0}")]
    ExecutionError(String),

    #[error("Schema unavailable for '{source_name}': {reason}")]
    SchemaUnavailable { source_name: String, reason: String },

    #[error("Source list unavailable: {0}")]
    SourcesUnavailable(String),

    #[error("Unknown operator: {0}")]
    InvalidOperator(String),

    #[error("Unknown connector: {0}")]
    InvalidConnector(String),

    #[error("Config error: {0}")]
    Config(String),
}

/// Error reported by a schema provider or query executor
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct ProviderError {
    pub message: String,
}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        ProviderError {
            message: message.into(),
        }
    }
}
