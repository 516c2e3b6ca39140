//! The query builder: a mutable [`QuerySpec`] plus the column metadata a
//! presentation layer needs to offer choices. Every mutation re-renders the
//! SQL and hands it to the registered change listeners.

use std::fmt;
use tracing::{debug, warn};

use crate::config::BuilderConfig;
use crate::error::BuilderError;
use crate::provider::{QueryExecutor, SchemaProvider};
use crate::query::{
    ComparisonOp, Predicate, PredicatePatch, QuerySpec, SortDirection, SortKey, WILDCARD,
};
use crate::schema::ColumnInfo;
use crate::sql;

/// Callback receiving the rendered SQL after each change
pub type ChangeListener = Box<dyn FnMut(&str)>;

/// Outcome of running the rendered query
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionReport {
    pub sql: String,
    pub row_count: u64,
}

pub struct QueryBuilder {
    config: BuilderConfig,
    spec: QuerySpec,
    sources: Vec<String>,
    /// Columns of `spec.source`; `None` until loaded
    columns: Option<Vec<ColumnInfo>>,
    listeners: Vec<ChangeListener>,
}

impl fmt::Debug for QueryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryBuilder")
            .field("config", &self.config)
            .field("spec", &self.spec)
            .field("sources", &self.sources)
            .field("columns", &self.columns)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for QueryBuilder {
    fn default() -> Self {
        QueryBuilder::new(BuilderConfig::default())
    }
}

impl QueryBuilder {
    pub fn new(config: BuilderConfig) -> Self {
        let spec = QuerySpec {
            limit: config.default_limit,
            ..QuerySpec::default()
        };
        QueryBuilder {
            config,
            spec,
            sources: Vec::new(),
            columns: None,
            listeners: Vec::new(),
        }
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    pub fn spec(&self) -> &QuerySpec {
        &self.spec
    }

    /// Register a callback fired with the rendered SQL after every mutation
    pub fn on_change<F>(&mut self, listener: F)
    where
        F: FnMut(&str) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub fn render(&self) -> String {
        sql::render(&self.spec)
    }

    /// Final text handed to the editor
    pub fn into_sql(self) -> String {
        self.render()
    }

    fn changed(&mut self) {
        if self.listeners.is_empty() {
            return;
        }
        let text = self.render();
        debug!(listeners = self.listeners.len(), "notifying preview listeners");
        for listener in self.listeners.iter_mut() {
            listener(&text);
        }
    }

    fn check_index(&self, index: usize) -> Result<(), BuilderError> {
        let len = self.spec.predicates.len();
        if index >= len {
            return Err(BuilderError::IndexOutOfRange { index, len });
        }
        Ok(())
    }

    // ─── SOURCE / PROJECTION ───

    /// Switch the queried source. Clears the projection and the cached
    /// columns; unknown names are accepted.
    pub fn set_source(&mut self, name: &str) {
        debug!(source = name, "set_source");
        self.spec.source = name.to_string();
        self.spec.projection.clear();
        self.columns = None;
        self.changed();
    }

    pub fn set_projection<I, S>(&mut self, fields: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.spec.set_projection(fields);
        debug!(fields = ?self.spec.projection, "set_projection");
        self.changed();
    }

    /// Add `field` to the projection, or remove it if already selected
    pub fn toggle_field(&mut self, field: &str) {
        if let Some(pos) = self.spec.projection.iter().position(|f| f == field) {
            self.spec.projection.remove(pos);
        } else if !field.is_empty() {
            self.spec.projection.push(field.to_string());
        }
        debug!(field, fields = ?self.spec.projection, "toggle_field");
        self.changed();
    }

    // ─── PREDICATES ───

    /// Append an empty predicate row and return its index
    pub fn add_predicate(&mut self) -> usize {
        self.spec.predicates.push(Predicate::empty(
            self.config.default_operator,
            self.config.default_connector,
        ));
        let index = self.spec.predicates.len() - 1;
        debug!(index, "add_predicate");
        self.changed();
        index
    }

    pub fn update_predicate(
        &mut self,
        index: usize,
        patch: PredicatePatch,
    ) -> Result<(), BuilderError> {
        self.check_index(index)?;
        debug!(index, ?patch, "update_predicate");
        self.spec.predicates[index].apply(patch);
        self.changed();
        Ok(())
    }

    pub fn remove_predicate(&mut self, index: usize) -> Result<Predicate, BuilderError> {
        self.check_index(index)?;
        let removed = self.spec.predicates.remove(index);
        debug!(index, "remove_predicate");
        self.changed();
        Ok(removed)
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.spec.predicates
    }

    // ─── SORT / LIMIT ───

    pub fn set_sort(&mut self, field: &str, direction: SortDirection) {
        debug!(field, %direction, "set_sort");
        self.spec.sort = Some(SortKey {
            field: field.to_string(),
            direction,
        });
        self.changed();
    }

    pub fn clear_sort(&mut self) {
        debug!("clear_sort");
        self.spec.sort = None;
        self.changed();
    }

    pub fn set_limit(&mut self, n: u64) {
        debug!(limit = n, "set_limit");
        self.spec.limit = n;
        self.changed();
    }

    // ─── SCHEMA ───

    /// Fetch and cache the list of sources
    pub fn load_sources(&mut self, provider: &dyn SchemaProvider) -> Result<&[String], BuilderError> {
        match provider.sources() {
            Ok(sources) => {
                debug!(count = sources.len(), "loaded sources");
                self.sources = sources;
                Ok(&self.sources)
            }
            Err(e) => {
                warn!(error = %e, "failed to list sources");
                Err(BuilderError::SourcesUnavailable(e.message))
            }
        }
    }

    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// Fetch and cache the columns of the current source
    pub fn load_columns(
        &mut self,
        provider: &dyn SchemaProvider,
    ) -> Result<&[ColumnInfo], BuilderError> {
        let source = self.spec.source.clone();
        match provider.columns(&source) {
            Ok(columns) => {
                debug!(source = %source, count = columns.len(), "loaded columns");
                Ok(self.columns.insert(columns).as_slice())
            }
            Err(e) => {
                warn!(source = %source, error = %e, "schema unavailable");
                Err(BuilderError::SchemaUnavailable {
                    source_name: source,
                    reason: e.message,
                })
            }
        }
    }

    /// Cached columns, or `None` if not loaded for the current source
    pub fn columns(&self) -> Option<&[ColumnInfo]> {
        self.columns.as_deref()
    }

    /// Field names for predicate rows
    pub fn field_choices(&self) -> Vec<String> {
        self.columns()
            .unwrap_or_default()
            .iter()
            .map(|c| c.name.clone())
            .collect()
    }

    /// Projection list: the wildcard, then every column
    pub fn projection_choices(&self) -> Vec<String> {
        std::iter::once(WILDCARD.to_string())
            .chain(self.field_choices())
            .collect()
    }

    /// Sort picker: an empty entry meaning "no sort", then every column
    pub fn sort_choices(&self) -> Vec<String> {
        std::iter::once(String::new())
            .chain(self.field_choices())
            .collect()
    }

    pub fn operator_choices(&self) -> &'static [ComparisonOp] {
        &ComparisonOp::ALL
    }

    // ─── EXECUTION ───

    /// Run the rendered query. Engine errors come back verbatim; the spec
    /// is left as is either way.
    pub fn execute(&self, executor: &dyn QueryExecutor) -> Result<ExecutionReport, BuilderError> {
        let sql = self.render();
        match executor.execute(&sql) {
            Ok(row_count) => {
                debug!(row_count, "query executed");
                Ok(ExecutionReport { sql, row_count })
            }
            Err(e) => {
                warn!(error = %e, "query failed");
                Err(BuilderError::ExecutionError(e.message))
            }
        }
    }
}
