use crate::catalog::Catalog;
use crate::models::{Column, FilterCondition, Table};

use super::availability::Availability;

/// How the current table scope came about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeOrigin {
    /// Chosen with `SelectTable`; survives removal of the last column.
    Explicit,
    /// Implied by the first selected column; cleared with the last one.
    Implied,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Scope {
    pub table: Table,
    pub origin: ScopeOrigin,
}

/// The user's choices at one point in time plus the choice sets derived from
/// them. Replaced wholesale by [`super::apply`]; never edited in place by callers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub(crate) scope: Option<Scope>,
    pub(crate) selected_columns: Vec<Column>,
    pub(crate) condition: FilterCondition,
    pub(crate) availability: Availability,
}

impl SelectionState {
    /// Empty selection with everything in `catalog` available.
    pub fn initial(catalog: &Catalog) -> Self {
        let mut state = Self::default();
        state.refresh_availability(catalog);
        state
    }

    /// Implied database name; `None` until a table or column is chosen.
    pub fn database_name(&self) -> Option<&str> {
        self.scope.as_ref().map(|s| s.table.database_name.as_str())
    }

    pub fn selected_table(&self) -> Option<&Table> {
        self.scope.as_ref().map(|s| &s.table)
    }

    pub fn scope_origin(&self) -> Option<ScopeOrigin> {
        self.scope.as_ref().map(|s| s.origin)
    }

    pub fn selected_columns(&self) -> &[Column] {
        &self.selected_columns
    }

    pub fn filter_condition(&self) -> &FilterCondition {
        &self.condition
    }

    pub fn available_tables(&self) -> &[Table] {
        &self.availability.tables
    }

    /// Columns the "add column" picker offers. Never contains a selected column.
    pub fn available_columns(&self) -> &[Column] {
        &self.availability.columns
    }

    pub fn is_selected(&self, column: &Column) -> bool {
        self.position_of(column).is_some()
    }

    /// Choices for swapping out `current`: the column itself followed by the
    /// available ones. Empty when `current` is not selected.
    pub fn replacement_choices(&self, current: &Column) -> Vec<Column> {
        if !self.is_selected(current) {
            return Vec::new();
        }
        std::iter::once(current.clone())
            .chain(self.availability.columns.iter().cloned())
            .collect()
    }

    /// Choices for the condition column, listed fresh from the current table.
    pub fn condition_column_choices(&self, catalog: &Catalog) -> Vec<Column> {
        match self.selected_table() {
            Some(table) => catalog.columns_of(table),
            None => Vec::new(),
        }
    }

    pub(crate) fn position_of(&self, column: &Column) -> Option<usize> {
        self.selected_columns
            .iter()
            .position(|c| c.identity() == column.identity() && c.table_name == column.table_name)
    }

    pub(crate) fn refresh_availability(&mut self, catalog: &Catalog) {
        self.availability =
            Availability::compute(catalog, self.selected_table(), &self.selected_columns);
    }
}
