use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BuilderError;

/// Comparison operators offered in a predicate row.
/// Serialized as their SQL token (`">="`, `"NOT IN"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "&'static str", try_from = "String")]
pub enum ComparisonOp {
    Eq,      // =
    Neq,     // !=
    Gt,      // >
    Lt,      // <
    Gte,     // >=
    Lte,     // <=
    Like,    // LIKE
    In,      // IN
    NotIn,   // NOT IN
}

impl ComparisonOp {
    /// Every operator, in the order a picker lists them
    pub const ALL: [ComparisonOp; 9] = [
        ComparisonOp::Eq,
        ComparisonOp::Neq,
        ComparisonOp::Gt,
        ComparisonOp::Lt,
        ComparisonOp::Gte,
        ComparisonOp::Lte,
        ComparisonOp::Like,
        ComparisonOp::In,
        ComparisonOp::NotIn,
    ];

    pub fn as_sql(&self) -> &'static str {
        match self {
            ComparisonOp::Eq    => "=",
            ComparisonOp::Neq   => "!=",
            ComparisonOp::Gt    => ">",
            ComparisonOp::Lt    => "<",
            ComparisonOp::Gte   => ">=",
            ComparisonOp::Lte   => "<=",
            ComparisonOp::Like  => "LIKE",
            ComparisonOp::In    => "IN",
            ComparisonOp::NotIn => "NOT IN",
        }
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl From<ComparisonOp> for &'static str {
    fn from(op: ComparisonOp) -> Self {
        op.as_sql()
    }
}

impl TryFrom<String> for ComparisonOp {
    type Error = BuilderError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl FromStr for ComparisonOp {
    type Err = BuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.split_whitespace().collect::<Vec<_>>().join(" ").to_uppercase();
        ComparisonOp::ALL
            .iter()
            .copied()
            .find(|op| op.as_sql() == normalized)
            .ok_or_else(|| BuilderError::InvalidOperator(s.to_string()))
    }
}

/// Logical connector joining a predicate to the previous kept one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "&'static str", try_from = "String")]
pub enum LogicalOp {
    And,
    Or,
}

impl LogicalOp {
    pub fn as_sql(&self) -> &'static str {
        match self {
            LogicalOp::And => "AND",
            LogicalOp::Or  => "OR",
        }
    }
}

impl fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl From<LogicalOp> for &'static str {
    fn from(op: LogicalOp) -> Self {
        op.as_sql()
    }
}

impl TryFrom<String> for LogicalOp {
    type Error = BuilderError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl FromStr for LogicalOp {
    type Err = BuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "AND" => Ok(LogicalOp::And),
            "OR"  => Ok(LogicalOp::Or),
            _ => Err(BuilderError::InvalidConnector(s.to_string())),
        }
    }
}

/// One filter row: `field operator literal`, plus its connector.
/// The connector of the first rendered predicate is never emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Predicate {
    pub field: String,
    pub operator: ComparisonOp,
    pub literal: String,
    pub connector: LogicalOp,
}

impl Predicate {
    /// An empty row with the given defaults
    pub fn empty(operator: ComparisonOp, connector: LogicalOp) -> Self {
        Predicate {
            field: String::new(),
            operator,
            literal: String::new(),
            connector,
        }
    }

    pub fn new(field: &str, operator: ComparisonOp, literal: &str, connector: LogicalOp) -> Self {
        Predicate {
            field: field.to_string(),
            operator,
            literal: literal.to_string(),
            connector,
        }
    }

    /// Only complete rows are rendered
    pub fn is_complete(&self) -> bool {
        !self.field.is_empty() && !self.literal.is_empty()
    }

    /// Apply a partial update; `None` parts are left untouched
    pub fn apply(&mut self, patch: PredicatePatch) {
        if let Some(field) = patch.field {
            self.field = field;
        }
        if let Some(operator) = patch.operator {
            self.operator = operator;
        }
        if let Some(literal) = patch.literal {
            self.literal = literal;
        }
        if let Some(connector) = patch.connector {
            self.connector = connector;
        }
    }
}

/// Partial update of a predicate row
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredicatePatch {
    pub field: Option<String>,
    pub operator: Option<ComparisonOp>,
    pub literal: Option<String>,
    pub connector: Option<LogicalOp>,
}

impl PredicatePatch {
    pub fn new() -> Self {
        PredicatePatch::default()
    }

    pub fn field(mut self, field: &str) -> Self {
        self.field = Some(field.to_string());
        self
    }

    pub fn operator(mut self, operator: ComparisonOp) -> Self {
        self.operator = Some(operator);
        self
    }

    pub fn literal(mut self, literal: &str) -> Self {
        self.literal = Some(literal.to_string());
        self
    }

    pub fn connector(mut self, connector: LogicalOp) -> Self {
        self.connector = Some(connector);
        self
    }
}
