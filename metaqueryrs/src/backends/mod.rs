//! Collaborators the builder talks to: where the catalog comes from, where SQL
//! is executed, where executed queries are remembered, and where new databases
//! are registered.
//!
//! Each backend is implemented in its own file; PostgreSQL is gated behind the
//! `postgres` feature.

use std::sync::Arc;

use async_trait::async_trait;

use crate::catalog::Catalog;
use crate::error::Result;
use crate::executor::{DatabaseInfo, QueryResult, SavedQuery};

#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// List every registered database with its tables and columns.
    async fn fetch_catalog(&self) -> Result<Catalog>;
}

#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn execute_sql(&self, database: &str, sql: &str) -> Result<QueryResult>;
}

#[async_trait]
pub trait HistorySink: Send + Sync {
    /// Notification that `sql` ran against `database`.
    async fn query_executed(&self, database: &str, sql: &str) -> Result<()>;
    /// Saved queries, oldest first.
    async fn saved_queries(&self) -> Result<Vec<SavedQuery>>;
}

#[async_trait]
pub trait DatabaseRegistry: Send + Sync {
    async fn register_database(&self, dsn: &str) -> Result<DatabaseInfo>;
    async fn list_databases(&self) -> Result<Vec<DatabaseInfo>>;
}

/// The four collaborators, usually all backed by one object.
#[derive(Clone)]
pub struct Backends {
    pub catalog: Arc<dyn CatalogSource>,
    pub executor: Arc<dyn QueryExecutor>,
    pub history: Arc<dyn HistorySink>,
    pub registry: Arc<dyn DatabaseRegistry>,
}

impl Backends {
    pub fn from_shared<B>(backend: Arc<B>) -> Self
    where
        B: CatalogSource + QueryExecutor + HistorySink + DatabaseRegistry + 'static,
    {
        Self {
            catalog: backend.clone(),
            executor: backend.clone(),
            history: backend.clone(),
            registry: backend,
        }
    }
}

mod directory;
pub use directory::DirectoryCatalogSource;

mod memory;
pub use memory::InMemoryBackend;

#[cfg(feature = "postgres")]
mod postgres;
#[cfg(feature = "postgres")]
pub use postgres::PostgresBackend;
