use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::rc::Rc;

use query_builder_core::{
    BuilderConfig, BuilderError, ColumnInfo, ComparisonOp, LogicalOp, MemoryCatalog,
    PredicatePatch, QueryBuilder, SortDirection, TableSchema,
};

fn catalog() -> MemoryCatalog {
    MemoryCatalog::new()
        .with_table(
            TableSchema::new("clients")
                .column(ColumnInfo::new("id", "INTEGER").primary())
                .column(ColumnInfo::new("nom", "TEXT"))
                .column(ColumnInfo::new("email", "TEXT")),
            1200,
        )
        .with_table(
            TableSchema::new("commandes")
                .column(ColumnInfo::new("id", "INTEGER").primary())
                .column(ColumnInfo::new("client_id", "INTEGER"))
                .column(ColumnInfo::new("total", "REAL")),
            30,
        )
}

#[test]
fn test_dialog_session() {
    let db = catalog();
    let preview = Rc::new(RefCell::new(String::new()));
    let sink = Rc::clone(&preview);

    let mut builder = QueryBuilder::default();
    builder.on_change(move |sql| *sink.borrow_mut() = sql.to_string());

    builder.load_sources(&db).unwrap();
    builder.set_source("clients");
    builder.load_columns(&db).unwrap();
    assert_eq!(*preview.borrow(), "SELECT *\nFROM clients\nLIMIT 100");

    builder.toggle_field("nom");
    builder.toggle_field("email");

    let row = builder.add_predicate();
    builder
        .update_predicate(row, PredicatePatch::new().field("id").operator(ComparisonOp::Gt))
        .unwrap();
    // half-filled row stays out of the preview
    assert_eq!(*preview.borrow(), "SELECT nom, email\nFROM clients\nLIMIT 100");

    builder.update_predicate(row, PredicatePatch::new().literal("10")).unwrap();
    builder.set_sort("nom", SortDirection::Asc);
    builder.set_limit(0);

    let expected = "SELECT nom, email\nFROM clients\nWHERE id > 10\nORDER BY nom ASC";
    assert_eq!(*preview.borrow(), expected);

    let report = builder.execute(&db).unwrap();
    assert_eq!(report.row_count, 1200);

    assert_eq!(builder.into_sql(), expected);
}

#[test]
fn test_skipped_row_gives_up_connector() {
    let mut builder = QueryBuilder::new(BuilderConfig { default_limit: 0, ..Default::default() });
    builder.set_source("clients");

    let first = builder.add_predicate();
    let second = builder.add_predicate();
    builder.update_predicate(first, PredicatePatch::new().field("id")).unwrap();
    builder
        .update_predicate(
            second,
            PredicatePatch::new()
                .field("email")
                .operator(ComparisonOp::Like)
                .literal("%a%")
                .connector(LogicalOp::Or),
        )
        .unwrap();

    assert_eq!(builder.render(), "SELECT *\nFROM clients\nWHERE email LIKE '%a%'");
}

#[test]
fn test_switching_source_resets_choices() {
    let db = catalog();
    let mut builder = QueryBuilder::default();
    builder.set_source("clients");
    builder.load_columns(&db).unwrap();
    builder.set_projection(["nom"]);

    builder.set_source("commandes");
    assert_eq!(builder.render(), "SELECT *\nFROM commandes\nLIMIT 100");
    assert!(builder.field_choices().is_empty());

    builder.load_columns(&db).unwrap();
    assert_eq!(builder.field_choices(), vec!["id", "client_id", "total"]);
}

#[test]
fn test_errors_leave_builder_usable() {
    let db = catalog();
    let mut builder = QueryBuilder::default();
    builder.set_source("fournisseurs");

    assert!(matches!(
        builder.load_columns(&db),
        Err(BuilderError::SchemaUnavailable { .. })
    ));
    assert_eq!(
        builder.execute(&db),
        Err(BuilderError::ExecutionError("no such table: fournisseurs".to_string()))
    );
    assert!(builder.remove_predicate(0).is_err());

    builder.set_source("commandes");
    assert_eq!(builder.execute(&db).unwrap().row_count, 30);
}
