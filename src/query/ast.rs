use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::filter::Predicate;

/// Marker meaning "all fields" in a projection
pub const WILDCARD: &str = "*";

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "&'static str", try_from = "String")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc  => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl From<SortDirection> for &'static str {
    fn from(direction: SortDirection) -> Self {
        direction.as_sql()
    }
}

impl TryFrom<String> for SortDirection {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ASC"  => Ok(SortDirection::Asc),
            "DESC" => Ok(SortDirection::Desc),
            other  => Err(format!("Unknown sort direction: {}", other)),
        }
    }
}

/// The single ORDER BY key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortKey {
    pub field: String,
    pub direction: SortDirection,
}

/// A partially filled read query.
/// Every state is renderable, possibly to an invalid query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuerySpec {
    /// Queried collection; empty means unset
    pub source: String,

    /// Ordered set of returned fields; empty means all
    pub projection: Vec<String>,

    /// Filter rows in entry order
    pub predicates: Vec<Predicate>,

    pub sort: Option<SortKey>,

    /// 0 means no limit
    pub limit: u64,
}

impl QuerySpec {
    pub fn new(source: &str) -> Self {
        QuerySpec {
            source: source.to_string(),
            ..QuerySpec::default()
        }
    }

    /// Replace the projection, dropping duplicates and empty names
    pub fn set_projection<I, S>(&mut self, fields: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.projection.clear();
        for field in fields {
            let field = field.into();
            if !field.is_empty() && !self.projection.contains(&field) {
                self.projection.push(field);
            }
        }
    }

    /// True when the projection selects every field
    pub fn selects_all(&self) -> bool {
        self.projection.is_empty() || self.projection.iter().any(|f| f == WILDCARD)
    }

    pub fn with_projection(mut self, fields: &[&str]) -> Self {
        self.set_projection(fields.iter().copied());
        self
    }

    pub fn predicate(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn order_by(mut self, field: &str, direction: SortDirection) -> Self {
        self.sort = Some(SortKey {
            field: field.to_string(),
            direction,
        });
        self
    }

    pub fn limit(mut self, n: u64) -> Self {
        self.limit = n;
        self
    }
}
