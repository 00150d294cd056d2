//! The read-only schema tree the builder picks from: databases, their tables,
//! and each table's columns, all in source order.

use std::fs;
use std::path::Path;

use glob::{glob, Pattern};
use serde::{Deserialize, Serialize};

use crate::error::{MetaqueryError, Result};
use crate::models::{Column, Table};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(rename = "metadata", alias = "databases", default)]
    pub databases: Vec<DatabaseMetadata>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseMetadata {
    #[serde(alias = "databaseName")]
    pub database_name: String,
    #[serde(default)]
    pub tables: Vec<TableMetadata>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableMetadata {
    #[serde(alias = "tableName")]
    pub table_name: String,
    #[serde(default)]
    pub columns: Vec<String>,
}

impl DatabaseMetadata {
    pub fn new(database_name: impl Into<String>, tables: Vec<TableMetadata>) -> Self {
        Self {
            database_name: database_name.into(),
            tables,
        }
    }
}

impl TableMetadata {
    pub fn new<I, S>(table_name: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            table_name: table_name.into(),
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Fold `(table, column)` rows into tables, keeping row order. Rows of one
    /// table must be adjacent.
    pub fn group_rows<I>(rows: I) -> Vec<TableMetadata>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut tables: Vec<TableMetadata> = Vec::new();
        for (table_name, column_name) in rows {
            match tables.last_mut() {
                Some(table) if table.table_name == table_name => table.columns.push(column_name),
                _ => tables.push(TableMetadata::new(table_name, [column_name])),
            }
        }
        tables
    }
}

impl Catalog {
    pub fn new(databases: Vec<DatabaseMetadata>) -> Self {
        Self { databases }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.databases.is_empty()
    }

    /// Parse the catalog-source wire shape (`{"metadata": [...]}`).
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load one database per `*.json` / `*.yml` / `*.yaml` file in `root`.
    pub fn load_from_dir<P: AsRef<Path>>(root: P) -> Result<Self> {
        let dir = root.as_ref();
        if !dir.exists() {
            return Err(MetaqueryError::Catalog(format!(
                "catalog directory not found: {}",
                dir.display()
            )));
        }
        let escaped = Pattern::escape(&dir.display().to_string());
        let mut files = Vec::new();
        for pattern in ["*.json", "*.yml", "*.yaml"] {
            let entries = glob(&format!("{escaped}/{pattern}"))
                .map_err(|e| MetaqueryError::Other(e.into()))?;
            files.extend(entries.flatten());
        }
        files.sort();

        let mut catalog = Catalog::empty();
        for path in files {
            catalog.databases.push(load_database_file(&path)?);
        }
        tracing::debug!(
            dir = %dir.display(),
            databases = catalog.databases.len(),
            "loaded catalog from directory"
        );
        Ok(catalog)
    }

    pub fn database(&self, name: &str) -> Option<&DatabaseMetadata> {
        self.databases.iter().find(|db| db.database_name == name)
    }

    pub fn database_names(&self) -> impl Iterator<Item = &str> {
        self.databases.iter().map(|db| db.database_name.as_str())
    }

    pub fn find_table(&self, table: &Table) -> Option<&TableMetadata> {
        self.database(&table.database_name)?
            .tables
            .iter()
            .find(|t| t.table_name == table.table_name)
    }

    pub fn contains_table(&self, table: &Table) -> bool {
        self.find_table(table).is_some()
    }

    pub fn contains_column(&self, column: &Column) -> bool {
        self.find_table(&column.table())
            .is_some_and(|t| t.columns.iter().any(|c| *c == column.column_name))
    }

    /// Every table of every database, in catalog order.
    pub fn tables(&self) -> Vec<Table> {
        self.databases
            .iter()
            .flat_map(|db| {
                db.tables
                    .iter()
                    .map(move |t| Table::new(db.database_name.clone(), t.table_name.clone()))
            })
            .collect()
    }

    /// Every column of every table of every database, in catalog order.
    pub fn columns(&self) -> Vec<Column> {
        self.databases
            .iter()
            .flat_map(|db| {
                db.tables.iter().flat_map(move |t| {
                    t.columns.iter().map(move |c| {
                        Column::new(db.database_name.clone(), t.table_name.clone(), c.clone())
                    })
                })
            })
            .collect()
    }

    /// Columns of one table; empty when the table is not in the catalog.
    pub fn columns_of(&self, table: &Table) -> Vec<Column> {
        match self.find_table(table) {
            Some(meta) => meta
                .columns
                .iter()
                .map(|c| {
                    Column::new(
                        table.database_name.clone(),
                        table.table_name.clone(),
                        c.clone(),
                    )
                })
                .collect(),
            None => Vec::new(),
        }
    }
}

fn load_database_file(path: &Path) -> Result<DatabaseMetadata> {
    let contents = fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let database = if is_json {
        serde_json::from_str(&contents)?
    } else {
        serde_yaml::from_str(&contents)?
    };
    Ok(database)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_database_catalog() -> Catalog {
        Catalog::new(vec![
            DatabaseMetadata::new(
                "app1",
                vec![
                    TableMetadata::new("users", ["id", "email"]),
                    TableMetadata::new("orders", ["id", "user_id", "amount"]),
                ],
            ),
            DatabaseMetadata::new("app2", vec![TableMetadata::new("markets", ["id", "name"])]),
        ])
    }

    #[test]
    fn projects_tables_and_columns_in_catalog_order() {
        let catalog = two_database_catalog();
        let tables = catalog.tables();
        assert_eq!(
            tables,
            vec![
                Table::new("app1", "users"),
                Table::new("app1", "orders"),
                Table::new("app2", "markets"),
            ]
        );
        let columns = catalog.columns();
        assert_eq!(columns.len(), 7);
        assert_eq!(columns[0], Column::new("app1", "users", "id"));
        assert_eq!(columns[6], Column::new("app2", "markets", "name"));
    }

    #[test]
    fn lookups_respect_database_scope() {
        let catalog = two_database_catalog();
        assert!(catalog.contains_table(&Table::new("app2", "markets")));
        assert!(!catalog.contains_table(&Table::new("app1", "markets")));
        assert!(catalog.contains_column(&Column::new("app1", "orders", "amount")));
        assert!(!catalog.contains_column(&Column::new("app1", "users", "amount")));
        assert!(catalog.columns_of(&Table::new("nope", "users")).is_empty());
    }

    #[test]
    fn groups_adjacent_rows_by_qualified_table_name() {
        let rows = [
            ("orders", "id"),
            ("orders", "total"),
            ("archive.orders", "id"),
            ("archive.orders", "archived_at"),
            ("users", "id"),
        ]
        .map(|(t, c)| (t.to_string(), c.to_string()));

        let tables = TableMetadata::group_rows(rows);
        assert_eq!(
            tables,
            vec![
                TableMetadata::new("orders", ["id", "total"]),
                TableMetadata::new("archive.orders", ["id", "archived_at"]),
                TableMetadata::new("users", ["id"]),
            ]
        );
    }

    #[test]
    fn parses_wire_shape_with_camel_case_aliases() {
        let json = r#"{"metadata": [
            {"databaseName": "app1", "tables": [{"tableName": "users", "columns": ["id"]}]},
            {"database_name": "app2", "tables": []}
        ]}"#;
        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.database_names().collect::<Vec<_>>(), ["app1", "app2"]);
        assert_eq!(catalog.columns(), vec![Column::new("app1", "users", "id")]);
    }

    #[test]
    fn loads_json_and_yaml_files_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("a_app1.json"),
            r#"{"database_name": "app1", "tables": [{"table_name": "users", "columns": ["id", "email"]}]}"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("b_app2.yml"),
            "database_name: app2\ntables:\n  - table_name: markets\n    columns: [id, name]\n",
        )
        .unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let catalog = Catalog::load_from_dir(dir.path()).unwrap();
        assert_eq!(catalog.database_names().collect::<Vec<_>>(), ["app1", "app2"]);
        assert_eq!(catalog.columns().len(), 4);
    }

    #[test]
    fn directory_name_with_glob_characters_is_literal() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("snapshots [prod]*");
        fs::create_dir(&dir).unwrap();
        fs::write(
            dir.join("app1.json"),
            r#"{"database_name": "app1", "tables": [{"table_name": "users", "columns": ["id"]}]}"#,
        )
        .unwrap();

        let catalog = Catalog::load_from_dir(&dir).unwrap();
        assert_eq!(catalog.database_names().collect::<Vec<_>>(), ["app1"]);
    }

    #[test]
    fn missing_directory_is_a_catalog_error() {
        let err = Catalog::load_from_dir("/definitely/not/here").unwrap_err();
        assert!(matches!(err, MetaqueryError::Catalog(_)));
    }
}
