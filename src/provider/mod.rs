//! Collaborators the builder talks to: a schema provider for table and
//! column names, and an executor that runs rendered SQL.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeMap;

use crate::error::ProviderError;
use crate::schema::{ColumnInfo, TableSchema};

/// Lists sources and their columns
pub trait SchemaProvider {
    /// Names of the queryable sources
    fn sources(&self) -> Result<Vec<String>, ProviderError>;

    /// Columns of `source`, in declaration order
    fn columns(&self, source: &str) -> Result<Vec<ColumnInfo>, ProviderError>;
}

/// Runs rendered SQL against the data source.
/// Returns the number of rows produced, or the engine's message.
pub trait QueryExecutor {
    fn execute(&self, sql: &str) -> Result<u64, ProviderError>;
}

lazy_static! {
    static ref FROM_LINE: Regex = Regex::new(r"(?m)^FROM[ \t]+(\S*)").unwrap();
    static ref LIMIT_LINE: Regex = Regex::new(r"(?m)^LIMIT[ \t]+([0-9]+)\s*$").unwrap();
}

/// In-memory catalog of tables with a fixed row count each.
/// Row counts ignore WHERE; only LIMIT caps them.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    tables: BTreeMap<String, (TableSchema, u64)>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        MemoryCatalog::default()
    }

    pub fn add_table(&mut self, table: TableSchema, rows: u64) {
        self.tables.insert(table.name.clone(), (table, rows));
    }

    pub fn with_table(mut self, table: TableSchema, rows: u64) -> Self {
        self.add_table(table, rows);
        self
    }
}

impl SchemaProvider for MemoryCatalog {
    fn sources(&self) -> Result<Vec<String>, ProviderError> {
        Ok(self.tables.keys().cloned().collect())
    }

    fn columns(&self, source: &str) -> Result<Vec<ColumnInfo>, ProviderError> {
        self.tables
            .get(source)
            .map(|(table, _)| table.columns.clone())
            .ok_or_else(|| ProviderError::new(format!("no such table: {}", source)))
    }
}

impl QueryExecutor for MemoryCatalog {
    fn execute(&self, sql: &str) -> Result<u64, ProviderError> {
        let source = FROM_LINE
            .captures(sql)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
            .ok_or_else(|| ProviderError::new("syntax error: missing FROM clause"))?;

        if source.is_empty() {
            return Err(ProviderError::new("syntax error: incomplete input"));
        }

        let (_, rows) = self
            .tables
            .get(source)
            .ok_or_else(|| ProviderError::new(format!("no such table: {}", source)))?;

        let limit = LIMIT_LINE
            .captures(sql)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse::<u64>().ok());

        Ok(match limit {
            Some(n) => (*rows).min(n),
            None => *rows,
        })
    }
}
