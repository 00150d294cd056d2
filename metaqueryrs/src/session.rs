//! A mounted builder: one catalog, one selection, and the SQL last shown to the
//! caller.

use crate::catalog::Catalog;
use crate::error::{MetaqueryError, Result};
use crate::query_builder::{is_executable, synthesize};
use crate::selection::{apply, Event, SelectionState};

/// What the caller needs after a change: the SQL to display and the database
/// it would run against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlUpdate {
    pub sql: String,
    pub database_name: Option<String>,
}

/// A statement ready to hand to the execution sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionRequest {
    pub database_name: String,
    pub sql: String,
}

#[derive(Debug, Clone)]
pub struct BuilderSession {
    catalog: Catalog,
    state: SelectionState,
    current: SqlUpdate,
}

impl BuilderSession {
    pub fn new(catalog: Catalog) -> Self {
        let state = SelectionState::initial(&catalog);
        let current = snapshot(&state);
        Self {
            catalog,
            state,
            current,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// The SQL and database name as of the last event.
    pub fn current(&self) -> &SqlUpdate {
        &self.current
    }

    pub fn sql(&self) -> &str {
        &self.current.sql
    }

    pub fn database_name(&self) -> Option<&str> {
        self.current.database_name.as_deref()
    }

    /// Apply one event. Returns the new SQL/database pair only when either
    /// differs from what was last reported.
    pub fn dispatch(&mut self, event: Event) -> Option<SqlUpdate> {
        self.state = apply(&self.state, &event, &self.catalog);
        if let Event::CatalogChanged { catalog } = event {
            self.catalog = catalog;
        }

        let next = snapshot(&self.state);
        if next == self.current {
            return None;
        }
        tracing::debug!(
            database = ?next.database_name,
            sql = %next.sql,
            "builder SQL changed"
        );
        self.current = next.clone();
        Some(next)
    }

    /// Swap in a freshly fetched catalog.
    pub fn replace_catalog(&mut self, catalog: Catalog) -> Option<SqlUpdate> {
        self.dispatch(Event::CatalogChanged { catalog })
    }

    /// The current statement, or `NoTableSelected` while the placeholder is shown.
    pub fn execution_request(&self) -> Result<ExecutionRequest> {
        if !is_executable(&self.state) {
            return Err(MetaqueryError::NoTableSelected);
        }
        let database_name = self
            .current
            .database_name
            .clone()
            .ok_or(MetaqueryError::NoTableSelected)?;
        Ok(ExecutionRequest {
            database_name,
            sql: self.current.sql.clone(),
        })
    }
}

fn snapshot(state: &SelectionState) -> SqlUpdate {
    SqlUpdate {
        sql: synthesize(state),
        database_name: state.database_name().map(str::to_string),
    }
}
