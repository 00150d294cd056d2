//! Value types shared by the catalog, the selection reducer and the synthesizer.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A column of one table in one database.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Column {
    #[serde(alias = "databaseName")]
    pub database_name: String,
    #[serde(alias = "tableName")]
    pub table_name: String,
    #[serde(alias = "columnName")]
    pub column_name: String,
}

/// Identity of a selected column. Only meaningful inside a single table scope,
/// where it distinguishes columns the same way the full triple does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColumnIdentity<'a> {
    pub database_name: &'a str,
    pub column_name: &'a str,
}

impl Column {
    pub fn new(
        database_name: impl Into<String>,
        table_name: impl Into<String>,
        column_name: impl Into<String>,
    ) -> Self {
        Self {
            database_name: database_name.into(),
            table_name: table_name.into(),
            column_name: column_name.into(),
        }
    }

    pub fn identity(&self) -> ColumnIdentity<'_> {
        ColumnIdentity {
            database_name: &self.database_name,
            column_name: &self.column_name,
        }
    }

    /// The table this column belongs to.
    pub fn table(&self) -> Table {
        Table::new(self.database_name.clone(), self.table_name.clone())
    }

    pub fn belongs_to(&self, table: &Table) -> bool {
        self.database_name == table.database_name && self.table_name == table.table_name
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}",
            self.database_name, self.table_name, self.column_name
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Table {
    #[serde(alias = "databaseName")]
    pub database_name: String,
    #[serde(alias = "tableName")]
    pub table_name: String,
}

impl Table {
    pub fn new(database_name: impl Into<String>, table_name: impl Into<String>) -> Self {
        Self {
            database_name: database_name.into(),
            table_name: table_name.into(),
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.database_name, self.table_name)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonOp {
    #[default]
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "!=")]
    Neq,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = ">=")]
    Gte,
    #[serde(rename = "<=")]
    Lte,
}

impl ComparisonOp {
    pub const ALL: [ComparisonOp; 6] = [
        ComparisonOp::Eq,
        ComparisonOp::Neq,
        ComparisonOp::Gt,
        ComparisonOp::Lt,
        ComparisonOp::Gte,
        ComparisonOp::Lte,
    ];

    pub fn as_sql(&self) -> &'static str {
        match self {
            ComparisonOp::Eq => "=",
            ComparisonOp::Neq => "!=",
            ComparisonOp::Gt => ">",
            ComparisonOp::Lt => "<",
            ComparisonOp::Gte => ">=",
            ComparisonOp::Lte => "<=",
        }
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// The single WHERE condition. Unset while `column` is `None`; an unset
/// condition is never rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCondition {
    pub column: Option<Column>,
    pub operator: ComparisonOp,
    pub value: String,
}

impl FilterCondition {
    pub fn is_set(&self) -> bool {
        self.column.is_some()
    }
}
