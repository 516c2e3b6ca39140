use serde::{Deserialize, Serialize};

/// Column metadata as reported by a schema provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    /// Declared type, as the engine reports it (e.g. "INTEGER", "TEXT")
    pub column_type: String,
    pub primary_key: bool,
}

impl ColumnInfo {
    pub fn new(name: &str, column_type: &str) -> Self {
        ColumnInfo {
            name: name.to_string(),
            column_type: column_type.to_string(),
            primary_key: false,
        }
    }

    pub fn primary(mut self) -> Self {
        self.primary_key = true;
        self
    }
}

/// A table and its columns, in declaration order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSchema {
    pub name: String,
    pub columns: Vec<ColumnInfo>,
}

impl TableSchema {
    pub fn new(name: &str) -> Self {
        TableSchema {
            name: name.to_string(),
            columns: Vec::new(),
        }
    }

    pub fn column(mut self, column: ColumnInfo) -> Self {
        self.columns.push(column);
        self
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn primary_key(&self) -> Option<&ColumnInfo> {
        self.columns.iter().find(|c| c.primary_key)
    }
}
