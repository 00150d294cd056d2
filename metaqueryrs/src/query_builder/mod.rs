//! SQL synthesis: turns a [`SelectionState`] into SQL text.
//!
//! Pure and total. Only what is embedded in the state is consulted; the catalog
//! is never touched here.

use crate::dialect::{Dialect, GenericDialect};
use crate::selection::SelectionState;
use crate::sql_ast::SqlRenderer;

mod filters;
mod plan;

/// Shown instead of SQL while no table is chosen. Not executable.
pub const PLACEHOLDER_SQL: &str = "-- Select a table (or a column) to start building your query.";

#[derive(Default)]
pub struct SqlBuilder;

impl SqlBuilder {
    /// Synthesize SQL with a provided dialect.
    pub fn build_with_dialect(&self, state: &SelectionState, dialect: &dyn Dialect) -> String {
        match plan::build_query(state) {
            Some(query) => SqlRenderer::new(dialect).render_select(&query),
            None => PLACEHOLDER_SQL.to_string(),
        }
    }

    /// Synthesize SQL with bare identifiers, as shown to the user.
    pub fn build(&self, state: &SelectionState) -> String {
        self.build_with_dialect(state, &GenericDialect)
    }
}

/// `SELECT <columns | *> FROM <table> [WHERE <condition>];`, or
/// [`PLACEHOLDER_SQL`] when no table is chosen.
pub fn synthesize(state: &SelectionState) -> String {
    SqlBuilder.build(state)
}

/// Whether `synthesize` would produce an executable statement.
pub fn is_executable(state: &SelectionState) -> bool {
    state.selected_table().is_some()
}
