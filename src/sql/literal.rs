//! Literal formatting for predicate values
//!
//! Values made only of ASCII digits are emitted bare:
//!   "42"   → 42
//! Everything else is wrapped in single quotes, as is:
//!   "abc"  → 'abc'
//!   "l'an" → 'l'an'

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DIGITS: Regex = Regex::new(r"^[0-9]+$").unwrap();
}

/// True if the literal consists entirely of decimal digits
pub fn is_numeric_literal(literal: &str) -> bool {
    DIGITS.is_match(literal)
}

/// Render a literal as it appears in a WHERE clause
pub fn render_literal(literal: &str) -> String {
    if is_numeric_literal(literal) {
        literal.to_string()
    } else {
        format!("'{}'", literal)
    }
}
