use crate::catalog::Catalog;
use crate::models::{Column, Table};

/// Choice sets derived from `(catalog, scope)`; recomputed from scratch after
/// every event, never patched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Availability {
    pub tables: Vec<Table>,
    pub columns: Vec<Column>,
}

impl Availability {
    /// With no scope everything in the catalog is offered. With a scope only that
    /// table is offered, and its columns minus the ones already selected.
    pub fn compute(catalog: &Catalog, scope: Option<&Table>, selected: &[Column]) -> Self {
        match scope {
            None => Self {
                tables: catalog.tables(),
                columns: catalog.columns(),
            },
            Some(table) => {
                let tables = if catalog.contains_table(table) {
                    vec![table.clone()]
                } else {
                    Vec::new()
                };
                let columns = catalog
                    .columns_of(table)
                    .into_iter()
                    .filter(|c| !selected.iter().any(|s| s.identity() == c.identity()))
                    .collect();
                Self { tables, columns }
            }
        }
    }
}
