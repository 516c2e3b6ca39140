pub mod builder;
pub mod config;
pub mod error;
pub mod ffi;
pub mod provider;
pub mod query;
pub mod schema;
pub mod sql;

pub use builder::{ChangeListener, ExecutionReport, QueryBuilder};
pub use config::BuilderConfig;
pub use error::{BuilderError, ProviderError};
pub use provider::{MemoryCatalog, QueryExecutor, SchemaProvider};
pub use query::*;
pub use schema::{ColumnInfo, TableSchema};
pub use sql::render;

// Re-export FFI functions for external use
pub use ffi::{
    qb_render_spec,
    qb_validate_spec,
    qb_free_string,
    qb_version,
    QbResult,
};
