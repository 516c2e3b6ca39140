use crate::query::{Predicate, QuerySpec, SortKey};
use super::literal::render_literal;

/// Render a query spec to SQL text.
/// Never fails: an incomplete spec still yields best-effort text.
/// Literals are emitted verbatim, so one holding a line break spans
/// several lines of the output.
pub fn render(spec: &QuerySpec) -> String {
    let mut parts: Vec<String> = Vec::new();

    // SELECT
    parts.push(format!("SELECT {}", build_select_columns(spec)));

    // FROM
    parts.push(format!("FROM {}", spec.source));

    // WHERE
    let where_clause = build_where(&spec.predicates);
    if !where_clause.is_empty() {
        parts.push(format!("WHERE {}", where_clause));
    }

    // ORDER BY
    if let Some(order) = build_order_by(spec.sort.as_ref()) {
        parts.push(order);
    }

    // LIMIT
    if spec.limit > 0 {
        parts.push(format!("LIMIT {}", spec.limit));
    }

    parts.join("\n")
}

/// Build SELECT column list
fn build_select_columns(spec: &QuerySpec) -> String {
    if spec.selects_all() {
        "*".to_string()
    } else {
        spec.projection.join(", ")
    }
}

/// Build the WHERE body from complete predicates.
/// Connectors are assigned after filtering, so a skipped row never
/// leaves a dangling AND/OR behind.
fn build_where(predicates: &[Predicate]) -> String {
    let conditions: Vec<String> = predicates.iter()
        .filter(|p| p.is_complete())
        .enumerate()
        .map(|(i, p)| {
            let condition = predicate_to_sql(p);
            if i == 0 {
                condition
            } else {
                format!("{} {}", p.connector, condition)
            }
        })
        .collect();

    conditions.join(" ")
}

/// Convert a single predicate to SQL
fn predicate_to_sql(predicate: &Predicate) -> String {
    format!(
        "{} {} {}",
        predicate.field,
        predicate.operator,
        render_literal(&predicate.literal)
    )
}

/// Build ORDER BY clause; a key with an empty field counts as unset
fn build_order_by(sort: Option<&SortKey>) -> Option<String> {
    let key = sort.filter(|k| !k.field.is_empty())?;
    Some(format!("ORDER BY {} {}", key.field, key.direction))
}
