use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMeta {
    pub name: String,
}

/// Rows returned by the execution sink, in result order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub columns: Vec<ColumnMeta>,
    pub rows: Vec<Map<String, Value>>,
}

impl QueryResult {
    /// Build a result from rows alone, taking column order from the first row's
    /// key insertion order.
    pub fn from_rows(rows: Vec<Map<String, Value>>) -> Self {
        let columns = rows
            .first()
            .map(|row| {
                row.keys()
                    .map(|name| ColumnMeta { name: name.clone() })
                    .collect()
            })
            .unwrap_or_default();
        Self { columns, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// An executed statement remembered by the history sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedQuery {
    pub database_name: String,
    pub sql_query: String,
    pub created_at: SystemTime,
}

/// A registered database as listed by the registration collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseInfo {
    pub name: String,
    /// `host:port`
    pub address: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_rows_keeps_result_column_order() {
        let rows = vec![json!({"name": "Ada", "id": 1, "age": 36})]
            .into_iter()
            .map(|v| v.as_object().cloned().unwrap())
            .collect();
        let result = QueryResult::from_rows(rows);
        let names: Vec<&str> = result.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["name", "id", "age"]);
    }

    #[test]
    fn empty_rows_have_no_columns() {
        let result = QueryResult::from_rows(Vec::new());
        assert!(result.is_empty());
        assert!(result.columns.is_empty());
    }
}
