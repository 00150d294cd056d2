use crate::selection::SelectionState;
use crate::sql_ast::{SelectQuery, SqlExpr, TableRef};

use super::filters::render_condition;

/// Lay out the statement for `state`; `None` without a table.
pub(crate) fn build_query(state: &SelectionState) -> Option<SelectQuery> {
    let table = state.selected_table()?;

    let select = state
        .selected_columns()
        .iter()
        .map(|c| SqlExpr::Column {
            table: None,
            name: c.column_name.clone(),
        })
        .collect();

    let filters = render_condition(state.filter_condition())
        .into_iter()
        .collect();

    Some(SelectQuery {
        select,
        from: TableRef {
            name: table.table_name.clone(),
        },
        filters,
    })
}
