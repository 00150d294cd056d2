//! Integration tests for SQL synthesis.
//!
//! States are built through the public reducer, then rendered with
//! `synthesize` and `SqlBuilder`.

use metaquery::catalog::{Catalog, DatabaseMetadata, TableMetadata};
use metaquery::dialect::PostgresDialect;
use metaquery::models::{Column, ComparisonOp, Table};
use metaquery::query_builder::{is_executable, synthesize, SqlBuilder, PLACEHOLDER_SQL};
use metaquery::selection::{apply, Event, SelectionState};

// ============================================================================
// Test fixtures
// ============================================================================

mod fixtures {
    use super::*;

    pub fn catalog() -> Catalog {
        Catalog::new(vec![
            DatabaseMetadata::new(
                "app1",
                vec![TableMetadata::new("users", ["id", "email", "name", "age"])],
            ),
            DatabaseMetadata::new(
                "sales",
                vec![TableMetadata::new("Order Items", ["sku", "unit\"price"])],
            ),
        ])
    }

    pub fn users(name: &str) -> Column {
        Column::new("app1", "users", name)
    }

    pub fn build(events: Vec<Event>) -> SelectionState {
        let catalog = catalog();
        events
            .iter()
            .fold(SelectionState::initial(&catalog), |state, event| {
                apply(&state, event, &catalog)
            })
    }

    pub fn with_condition(op: ComparisonOp, value: &str) -> SelectionState {
        build(vec![
            Event::add_column(users("id")),
            Event::set_condition_column(Some(users("name"))),
            Event::set_condition_operator(op),
            Event::set_condition_value(value),
        ])
    }
}

use fixtures::*;

// ============================================================================
// Layout
// ============================================================================

#[test]
fn placeholder_without_table() {
    let state = SelectionState::initial(&fixtures::catalog());
    assert_eq!(synthesize(&state), PLACEHOLDER_SQL);
    assert!(!is_executable(&state));
}

#[test]
fn placeholder_ignores_pending_condition_fields() {
    let state = build(vec![
        Event::set_condition_operator(ComparisonOp::Gt),
        Event::set_condition_value("10"),
    ]);
    assert_eq!(synthesize(&state), PLACEHOLDER_SQL);
}

#[test]
fn star_when_table_has_no_selected_columns() {
    let state = build(vec![Event::select_table(Some(Table::new("app1", "users")))]);
    assert_eq!(synthesize(&state), "SELECT *\nFROM users;");
    assert!(is_executable(&state));
}

#[test]
fn columns_render_in_selection_order() {
    let state = build(vec![
        Event::add_column(users("name")),
        Event::add_column(users("id")),
        Event::add_column(users("age")),
    ]);
    assert_eq!(synthesize(&state), "SELECT name, id, age\nFROM users;");
}

#[test]
fn replaced_column_renders_in_place() {
    let state = build(vec![
        Event::add_column(users("id")),
        Event::add_column(users("email")),
        Event::replace_column(users("id"), users("age")),
    ]);
    assert_eq!(synthesize(&state), "SELECT age, email\nFROM users;");
}

#[test]
fn empty_value_renders_empty_string_literal() {
    let state = build(vec![
        Event::add_column(users("id")),
        Event::set_condition_column(Some(users("email"))),
        Event::set_condition_operator(ComparisonOp::Neq),
    ]);
    assert_eq!(synthesize(&state), "SELECT id\nFROM users\nWHERE email != '';");
}

#[test]
fn condition_without_column_is_omitted() {
    let state = build(vec![
        Event::add_column(users("id")),
        Event::set_condition_operator(ComparisonOp::Lt),
        Event::set_condition_value("5"),
    ]);
    assert_eq!(synthesize(&state), "SELECT id\nFROM users;");
}

// ============================================================================
// Literals
// ============================================================================

#[test]
fn text_values_are_quoted_and_escaped() {
    let state = with_condition(ComparisonOp::Eq, "O'Brien");
    assert_eq!(
        synthesize(&state),
        "SELECT id\nFROM users\nWHERE name = 'O''Brien';"
    );
}

#[test]
fn injection_attempt_stays_inside_literal() {
    let state = with_condition(ComparisonOp::Eq, "x'; DROP TABLE users; --");
    assert_eq!(
        synthesize(&state),
        "SELECT id\nFROM users\nWHERE name = 'x''; DROP TABLE users; --';"
    );
}

#[test]
fn numeric_values_render_bare() {
    let cases = [
        (ComparisonOp::Eq, "42", "name = 42"),
        (ComparisonOp::Gt, "-3.5", "name > -3.5"),
        (ComparisonOp::Lte, " 7 ", "name <= 7"),
        (ComparisonOp::Gte, "1e3", "name >= 1e3"),
    ];
    for (op, value, expected) in cases {
        let state = with_condition(op, value);
        assert_eq!(
            synthesize(&state),
            format!("SELECT id\nFROM users\nWHERE {expected};"),
            "value {value:?}"
        );
    }
}

#[test]
fn non_finite_and_mixed_values_are_text() {
    let cases = [
        ("inf", "'inf'"),
        ("NaN", "'NaN'"),
        ("42abc", "'42abc'"),
        ("  ", "'  '"),
    ];
    for (value, expected) in cases {
        let state = with_condition(ComparisonOp::Eq, value);
        assert_eq!(
            synthesize(&state),
            format!("SELECT id\nFROM users\nWHERE name = {expected};"),
            "value {value:?}"
        );
    }
}

#[test]
fn every_operator_renders() {
    for op in ComparisonOp::ALL {
        let state = with_condition(op, "1");
        let sql = synthesize(&state);
        assert!(
            sql.ends_with(&format!("WHERE name {} 1;", op.as_sql())),
            "{sql}"
        );
    }
}

// ============================================================================
// Determinism and dialects
// ============================================================================

#[test]
fn equal_states_render_identically() {
    let events = || {
        vec![
            Event::add_column(users("id")),
            Event::add_column(users("email")),
            Event::set_condition_column(Some(users("age"))),
            Event::set_condition_value("30"),
        ]
    };
    let a = build(events());
    let b = build(events());
    assert_eq!(a, b);
    assert_eq!(synthesize(&a), synthesize(&b));
    assert_eq!(synthesize(&a), SqlBuilder.build(&a));
}

#[test]
fn postgres_dialect_quotes_identifiers() {
    let state = build(vec![
        Event::add_column(Column::new("sales", "Order Items", "sku")),
        Event::add_column(Column::new("sales", "Order Items", "unit\"price")),
        Event::set_condition_column(Some(Column::new("sales", "Order Items", "sku"))),
        Event::set_condition_value("A-1"),
    ]);
    let sql = SqlBuilder.build_with_dialect(&state, &PostgresDialect);
    assert_eq!(
        sql,
        "SELECT \"sku\", \"unit\"\"price\"\nFROM \"Order Items\"\nWHERE \"sku\" = 'A-1';"
    );
}

#[test]
fn database_name_is_not_rendered() {
    let state = build(vec![Event::add_column(users("id"))]);
    let sql = synthesize(&state);
    assert!(!sql.contains("app1"), "{sql}");
    assert_eq!(state.database_name(), Some("app1"));
}
