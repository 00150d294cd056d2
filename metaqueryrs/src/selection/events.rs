use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::models::{Column, ComparisonOp, Table};

/// A single user edit or catalog refresh fed to [`super::apply`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    AddColumn {
        column: Column,
    },
    ReplaceColumn {
        old: Column,
        new: Column,
    },
    RemoveColumn {
        column: Column,
    },
    /// `None` clears the table and every column choice.
    SelectTable {
        table: Option<Table>,
    },
    /// `None` resets the whole condition.
    SetConditionColumn {
        column: Option<Column>,
    },
    SetConditionOperator {
        operator: ComparisonOp,
    },
    SetConditionValue {
        value: String,
    },
    CatalogChanged {
        catalog: Catalog,
    },
}

impl Event {
    pub fn add_column(column: Column) -> Self {
        Event::AddColumn { column }
    }

    pub fn replace_column(old: Column, new: Column) -> Self {
        Event::ReplaceColumn { old, new }
    }

    pub fn remove_column(column: Column) -> Self {
        Event::RemoveColumn { column }
    }

    pub fn select_table(table: Option<Table>) -> Self {
        Event::SelectTable { table }
    }

    pub fn set_condition_column(column: Option<Column>) -> Self {
        Event::SetConditionColumn { column }
    }

    pub fn set_condition_operator(operator: ComparisonOp) -> Self {
        Event::SetConditionOperator { operator }
    }

    pub fn set_condition_value(value: impl Into<String>) -> Self {
        Event::SetConditionValue {
            value: value.into(),
        }
    }

    pub fn catalog_changed(catalog: Catalog) -> Self {
        Event::CatalogChanged { catalog }
    }

    /// Short name for log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::AddColumn { .. } => "add_column",
            Event::ReplaceColumn { .. } => "replace_column",
            Event::RemoveColumn { .. } => "remove_column",
            Event::SelectTable { .. } => "select_table",
            Event::SetConditionColumn { .. } => "set_condition_column",
            Event::SetConditionOperator { .. } => "set_condition_operator",
            Event::SetConditionValue { .. } => "set_condition_value",
            Event::CatalogChanged { .. } => "catalog_changed",
        }
    }
}
