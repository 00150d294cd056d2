use crate::catalog::Catalog;
use crate::models::{Column, ComparisonOp, FilterCondition, Table};

use super::availability::Availability;
use super::events::Event;
use super::state::{Scope, ScopeOrigin, SelectionState};

/// Apply one event and return the next state.
///
/// Total: an event whose precondition does not hold yields an unchanged copy of
/// `state`. Availability of the result is always recomputed against the catalog
/// in effect after the event (`CatalogChanged` carries its own).
pub fn apply(state: &SelectionState, event: &Event, catalog: &Catalog) -> SelectionState {
    let catalog = match event {
        Event::CatalogChanged { catalog } => catalog,
        _ => catalog,
    };

    let next = match event {
        Event::AddColumn { column } => add_column(state, column, catalog),
        Event::ReplaceColumn { old, new } => replace_column(state, old, new, catalog),
        Event::RemoveColumn { column } => remove_column(state, column),
        Event::SelectTable { table } => select_table(state, table.as_ref(), catalog),
        Event::SetConditionColumn { column } => {
            set_condition_column(state, column.as_ref(), catalog)
        }
        Event::SetConditionOperator { operator } => Some(set_condition_operator(state, *operator)),
        Event::SetConditionValue { value } => Some(set_condition_value(state, value)),
        Event::CatalogChanged { catalog } => Some(catalog_changed(state, catalog)),
    };

    let Some(mut next) = next else {
        tracing::debug!(event = event.kind(), "precondition not met, ignoring event");
        return state.clone();
    };

    if next.selected_table() != state.selected_table() {
        next.condition = FilterCondition::default();
    }
    next.refresh_availability(catalog);
    tracing::trace!(
        event = event.kind(),
        table = ?next.selected_table(),
        columns = next.selected_columns.len(),
        available_columns = next.availability.columns.len(),
        "selection updated"
    );
    next
}

fn offered_columns(state: &SelectionState, catalog: &Catalog) -> Vec<Column> {
    Availability::compute(catalog, state.selected_table(), &state.selected_columns).columns
}

fn add_column(state: &SelectionState, column: &Column, catalog: &Catalog) -> Option<SelectionState> {
    if state.is_selected(column) || !offered_columns(state, catalog).contains(column) {
        return None;
    }
    let mut next = state.clone();
    if next.scope.is_none() {
        next.scope = Some(Scope {
            table: column.table(),
            origin: ScopeOrigin::Implied,
        });
    }
    next.selected_columns.push(column.clone());
    Some(next)
}

fn replace_column(
    state: &SelectionState,
    old: &Column,
    new: &Column,
    catalog: &Catalog,
) -> Option<SelectionState> {
    let position = state.position_of(old)?;
    // Selected columns are never offered, so this also rejects `new == old`.
    if !offered_columns(state, catalog).contains(new) {
        return None;
    }
    let mut next = state.clone();
    next.selected_columns[position] = new.clone();
    Some(next)
}

fn remove_column(state: &SelectionState, column: &Column) -> Option<SelectionState> {
    let position = state.position_of(column)?;
    let mut next = state.clone();
    next.selected_columns.remove(position);
    if next.selected_columns.is_empty() && next.scope_origin() == Some(ScopeOrigin::Implied) {
        next.scope = None;
    }
    Some(next)
}

fn select_table(
    state: &SelectionState,
    table: Option<&Table>,
    catalog: &Catalog,
) -> Option<SelectionState> {
    let mut next = state.clone();
    next.selected_columns.clear();
    next.scope = match table {
        Some(table) if catalog.contains_table(table) => Some(Scope {
            table: table.clone(),
            origin: ScopeOrigin::Explicit,
        }),
        Some(_) => return None,
        None => None,
    };
    Some(next)
}

fn set_condition_column(
    state: &SelectionState,
    column: Option<&Column>,
    catalog: &Catalog,
) -> Option<SelectionState> {
    let mut next = state.clone();
    match column {
        None => next.condition = FilterCondition::default(),
        Some(column) => {
            let table = state.selected_table()?;
            if !column.belongs_to(table) || !catalog.contains_column(column) {
                return None;
            }
            next.condition.column = Some(column.clone());
        }
    }
    Some(next)
}

fn set_condition_operator(state: &SelectionState, operator: ComparisonOp) -> SelectionState {
    let mut next = state.clone();
    next.condition.operator = operator;
    next
}

fn set_condition_value(state: &SelectionState, value: &str) -> SelectionState {
    let mut next = state.clone();
    next.condition.value = value.to_string();
    next
}

fn catalog_changed(state: &SelectionState, catalog: &Catalog) -> SelectionState {
    let scope_survives = match state.selected_table() {
        None => true,
        Some(table) => {
            catalog.contains_table(table)
                && state
                    .selected_columns
                    .iter()
                    .all(|c| catalog.contains_column(c))
        }
    };
    if !scope_survives {
        tracing::warn!(
            table = ?state.selected_table(),
            "selection no longer exists in refreshed catalog, resetting"
        );
        return SelectionState::default();
    }

    let mut next = state.clone();
    if let Some(column) = &next.condition.column {
        if !catalog.contains_column(column) {
            next.condition = FilterCondition::default();
        }
    }
    next
}
