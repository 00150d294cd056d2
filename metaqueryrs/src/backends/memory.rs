//! In-process backend: a fixed catalog, canned results keyed by
//! `(database, sql)`, and an in-memory history. Used for demos and tests.

use std::collections::HashMap;
use std::time::SystemTime;

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};

use crate::catalog::{Catalog, DatabaseMetadata};
use crate::dsn::ConnectionInfo;
use crate::error::{MetaqueryError, Result};
use crate::executor::{DatabaseInfo, QueryResult, SavedQuery};

use super::{CatalogSource, DatabaseRegistry, HistorySink, QueryExecutor};

#[derive(Default)]
pub struct InMemoryBackend {
    catalog: RwLock<Catalog>,
    databases: RwLock<Vec<DatabaseInfo>>,
    results: RwLock<HashMap<(String, String), QueryResult>>,
    history: Mutex<Vec<SavedQuery>>,
    catalog_failure: RwLock<Option<String>>,
}

impl InMemoryBackend {
    pub fn new(catalog: Catalog) -> Self {
        let databases = catalog
            .database_names()
            .map(|name| DatabaseInfo {
                name: name.to_string(),
                address: "(in-memory)".to_string(),
            })
            .collect();
        Self {
            catalog: RwLock::new(catalog),
            databases: RwLock::new(databases),
            ..Self::default()
        }
    }

    /// Register the rows returned when `sql` runs against `database`.
    pub fn with_result(
        mut self,
        database: impl Into<String>,
        sql: impl Into<String>,
        result: QueryResult,
    ) -> Self {
        self.results
            .get_mut()
            .insert((database.into(), sql.into()), result);
        self
    }

    pub async fn set_catalog(&self, catalog: Catalog) {
        *self.catalog.write().await = catalog;
    }

    /// Make subsequent catalog fetches fail with `message` (`None` to recover).
    pub async fn set_catalog_failure(&self, message: Option<String>) {
        *self.catalog_failure.write().await = message;
    }
}

#[async_trait]
impl CatalogSource for InMemoryBackend {
    async fn fetch_catalog(&self) -> Result<Catalog> {
        if let Some(message) = self.catalog_failure.read().await.as_ref() {
            return Err(MetaqueryError::Catalog(message.clone()));
        }
        Ok(self.catalog.read().await.clone())
    }
}

#[async_trait]
impl QueryExecutor for InMemoryBackend {
    async fn execute_sql(&self, database: &str, sql: &str) -> Result<QueryResult> {
        if self.catalog.read().await.database(database).is_none() {
            return Err(MetaqueryError::UnknownDatabase(database.to_string()));
        }
        let key = (database.to_string(), sql.to_string());
        self.results.read().await.get(&key).cloned().ok_or_else(|| {
            MetaqueryError::Execution(format!("no result registered for query on {database}"))
        })
    }
}

#[async_trait]
impl HistorySink for InMemoryBackend {
    async fn query_executed(&self, database: &str, sql: &str) -> Result<()> {
        self.history.lock().await.push(SavedQuery {
            database_name: database.to_string(),
            sql_query: sql.to_string(),
            created_at: SystemTime::now(),
        });
        Ok(())
    }

    async fn saved_queries(&self) -> Result<Vec<SavedQuery>> {
        Ok(self.history.lock().await.clone())
    }
}

#[async_trait]
impl DatabaseRegistry for InMemoryBackend {
    async fn register_database(&self, dsn: &str) -> Result<DatabaseInfo> {
        let info = ConnectionInfo::parse(dsn)?;
        let entry = DatabaseInfo {
            name: info.database.clone(),
            address: info.address(),
        };

        let mut catalog = self.catalog.write().await;
        if catalog.database(&info.database).is_none() {
            catalog
                .databases
                .push(DatabaseMetadata::new(info.database.clone(), Vec::new()));
        }
        let mut databases = self.databases.write().await;
        databases.retain(|db| db.name != entry.name);
        databases.push(entry.clone());

        tracing::info!(database = %entry.name, address = %entry.address, "registered database");
        Ok(entry)
    }

    async fn list_databases(&self) -> Result<Vec<DatabaseInfo>> {
        Ok(self.databases.read().await.clone())
    }
}
