pub mod ast;
pub mod filter;

pub use ast::{QuerySpec, SortDirection, SortKey, WILDCARD};
pub use filter::{ComparisonOp, LogicalOp, Predicate, PredicatePatch};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BuilderError;

    // ─── OPERATORS ───

    #[test]
    fn test_operator_tokens() {
        assert_eq!(ComparisonOp::Eq.to_string(), "=");
        assert_eq!(ComparisonOp::Neq.to_string(), "!=");
        assert_eq!(ComparisonOp::Like.to_string(), "LIKE");
        assert_eq!(ComparisonOp::NotIn.to_string(), "NOT IN");
    }

    #[test]
    fn test_operator_parse() {
        assert_eq!(">=".parse::<ComparisonOp>().unwrap(), ComparisonOp::Gte);
        assert_eq!("like".parse::<ComparisonOp>().unwrap(), ComparisonOp::Like);
        assert_eq!("not   in".parse::<ComparisonOp>().unwrap(), ComparisonOp::NotIn);
    }

    #[test]
    fn test_operator_parse_unknown() {
        let err = "<>".parse::<ComparisonOp>().unwrap_err();
        assert_eq!(err, BuilderError::InvalidOperator("<>".to_string()));
    }

    #[test]
    fn test_connector_parse() {
        assert_eq!("and".parse::<LogicalOp>().unwrap(), LogicalOp::And);
        assert_eq!(" OR ".parse::<LogicalOp>().unwrap(), LogicalOp::Or);
        assert!(matches!(
            "XOR".parse::<LogicalOp>(),
            Err(BuilderError::InvalidConnector(_))
        ));
    }

    // ─── PREDICATES ───

    #[test]
    fn test_empty_predicate_is_incomplete() {
        let p = Predicate::empty(ComparisonOp::Eq, LogicalOp::And);
        assert!(!p.is_complete());
    }

    #[test]
    fn test_predicate_needs_field_and_literal() {
        let no_literal = Predicate::new("id", ComparisonOp::Gt, "", LogicalOp::And);
        let no_field = Predicate::new("", ComparisonOp::Gt, "10", LogicalOp::And);
        let full = Predicate::new("id", ComparisonOp::Gt, "10", LogicalOp::And);

        assert!(!no_literal.is_complete());
        assert!(!no_field.is_complete());
        assert!(full.is_complete());
    }

    #[test]
    fn test_patch_leaves_omitted_parts() {
        let mut p = Predicate::new("id", ComparisonOp::Gt, "10", LogicalOp::And);
        p.apply(PredicatePatch::new().literal("20").connector(LogicalOp::Or));

        assert_eq!(p.field, "id");
        assert_eq!(p.operator, ComparisonOp::Gt);
        assert_eq!(p.literal, "20");
        assert_eq!(p.connector, LogicalOp::Or);
    }

    // ─── QUERY SPEC ───

    #[test]
    fn test_empty_spec() {
        let spec = QuerySpec::default();
        assert!(spec.source.is_empty());
        assert!(spec.selects_all());
        assert!(spec.predicates.is_empty());
        assert!(spec.sort.is_none());
        assert_eq!(spec.limit, 0);
    }

    #[test]
    fn test_projection_is_ordered_set() {
        let spec = QuerySpec::new("clients").with_projection(&["nom", "email", "nom", ""]);
        assert_eq!(spec.projection, vec!["nom", "email"]);
        assert!(!spec.selects_all());
    }

    #[test]
    fn test_wildcard_selects_all() {
        let spec = QuerySpec::new("clients").with_projection(&["nom", "*"]);
        assert!(spec.selects_all());
    }

    #[test]
    fn test_sort_direction_parse() {
        assert_eq!("desc".parse::<SortDirection>().unwrap(), SortDirection::Desc);
        assert!("up".parse::<SortDirection>().is_err());
    }

    // ─── SERIALIZATION ───

    #[test]
    fn test_spec_serialization() {
        let spec = QuerySpec::new("clients")
            .with_projection(&["nom"])
            .predicate(Predicate::new("id", ComparisonOp::Gt, "10", LogicalOp::And))
            .order_by("nom", SortDirection::Asc)
            .limit(5);

        let json = serde_json::to_string(&spec).unwrap();
        assert!(json.contains("clients"));
        assert!(json.contains(r#""operator":">""#));
        assert!(json.contains(r#""connector":"AND""#));
        assert!(json.contains(r#""direction":"ASC""#));

        let restored: QuerySpec = serde_json::from_str(&json).unwrap();
        assert_eq!(spec, restored);
    }

    #[test]
    fn test_json_tokens_match_display() {
        for op in ComparisonOp::ALL {
            let json = serde_json::to_string(&op).unwrap();
            assert_eq!(json, format!("\"{}\"", op));
            assert_eq!(serde_json::from_str::<ComparisonOp>(&json).unwrap(), op);
        }
        assert_eq!(serde_json::to_string(&LogicalOp::Or).unwrap(), r#""OR""#);
        assert_eq!(serde_json::to_string(&SortDirection::Desc).unwrap(), r#""DESC""#);
    }

    #[test]
    fn test_json_rejects_variant_names() {
        let result = serde_json::from_str::<Predicate>(
            r#"{"field":"id","operator":"Gt","literal":"1","connector":"AND"}"#,
        );
        assert!(result.unwrap_err().to_string().contains("Unknown operator: Gt"));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let spec: QuerySpec = serde_json::from_str(r#"{"source":"clients"}"#).unwrap();
        assert_eq!(spec, QuerySpec::new("clients"));
    }
}
