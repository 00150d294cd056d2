//! PostgreSQL backend implementation.
//!
//! One connection pool per registered database. The catalog is read from
//! `information_schema`; history is kept in memory.

use std::collections::BTreeMap;
use std::time::{Instant, SystemTime};

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};

use crate::catalog::{Catalog, DatabaseMetadata, TableMetadata};
use crate::config::{MetaqueryConfig, PoolConfig, QueryConfig};
use crate::dsn::ConnectionInfo;
use crate::error::{MetaqueryError, Result};
use crate::executor::{ColumnMeta, DatabaseInfo, QueryResult, SavedQuery};

use super::{CatalogSource, DatabaseRegistry, HistorySink, QueryExecutor};

// Tables outside the search-path schema are named `schema.table`.
const CATALOG_SQL: &str = r#"
    SELECT
        CASE WHEN table_schema = current_schema()
            THEN table_name::text
            ELSE table_schema::text || '.' || table_name::text
        END AS qualified_name,
        column_name::text
    FROM information_schema.columns
    WHERE table_schema NOT IN ('pg_catalog', 'information_schema')
    ORDER BY table_schema, table_name, ordinal_position
"#;

struct RegisteredDatabase {
    info: ConnectionInfo,
    pool: deadpool_postgres::Pool,
}

pub struct PostgresBackend {
    databases: RwLock<BTreeMap<String, RegisteredDatabase>>,
    history: Mutex<Vec<SavedQuery>>,
    query: QueryConfig,
    pool: PoolConfig,
}

impl PostgresBackend {
    pub fn new(query: QueryConfig, pool: PoolConfig) -> Self {
        Self {
            databases: RwLock::new(BTreeMap::new()),
            history: Mutex::new(Vec::new()),
            query,
            pool,
        }
    }

    /// Create a backend and register every database listed in `config`.
    pub async fn from_config(config: &MetaqueryConfig) -> Result<Self> {
        let backend = Self::new(config.query.clone(), config.pool.clone());
        for (name, db) in &config.databases {
            tracing::debug!(name = %name, "registering configured database");
            backend.register_database(&db.dsn).await?;
        }
        Ok(backend)
    }

    fn create_pool(&self, info: &ConnectionInfo) -> Result<deadpool_postgres::Pool> {
        let mut cfg = deadpool_postgres::Config::new();
        cfg.host = Some(info.host.clone());
        cfg.port = Some(info.port);
        cfg.user = Some(info.username.clone());
        cfg.password = info.password.clone();
        cfg.dbname = Some(info.database.clone());
        cfg.pool = Some(deadpool_postgres::PoolConfig::new(self.pool.size));

        cfg.create_pool(
            Some(deadpool_postgres::Runtime::Tokio1),
            tokio_postgres::NoTls,
        )
        .map_err(|e| {
            tracing::error!(error = %e, database = %info.database, "failed to create PostgreSQL pool");
            MetaqueryError::Execution(format!("create postgres pool: {e}"))
        })
    }

    async fn client(&self, database: &str) -> Result<deadpool_postgres::Object> {
        let pool = {
            let databases = self.databases.read().await;
            let registered = databases
                .get(database)
                .ok_or_else(|| MetaqueryError::UnknownDatabase(database.to_string()))?;
            registered.pool.clone()
        };
        pool.get().await.map_err(|e| {
            tracing::error!(error = %e, database = %database, "failed to get PostgreSQL connection");
            MetaqueryError::Execution(format!("get postgres connection: {e}"))
        })
    }

    async fn fetch_tables(&self, database: &str) -> Result<Vec<TableMetadata>> {
        let client = self.client(database).await?;
        let rows = client.query(CATALOG_SQL, &[]).await?;

        Ok(TableMetadata::group_rows(
            rows.iter()
                .map(|row| (row.get::<_, String>(0), row.get::<_, String>(1))),
        ))
    }
}

#[async_trait]
impl CatalogSource for PostgresBackend {
    async fn fetch_catalog(&self) -> Result<Catalog> {
        let start = Instant::now();
        let names: Vec<String> = self.databases.read().await.keys().cloned().collect();

        let mut catalog = Catalog::empty();
        for name in names {
            let tables = self.fetch_tables(&name).await?;
            catalog.databases.push(DatabaseMetadata::new(name, tables));
        }

        tracing::debug!(
            databases = catalog.databases.len(),
            ms = start.elapsed().as_millis(),
            "postgres fetch_catalog"
        );
        Ok(catalog)
    }
}

#[async_trait]
impl QueryExecutor for PostgresBackend {
    async fn execute_sql(&self, database: &str, sql: &str) -> Result<QueryResult> {
        let start = Instant::now();
        tracing::trace!(sql = %sql, database = %database, "executing PostgreSQL query");

        let client = self.client(database).await?;
        let statement = client.prepare(sql).await.map_err(|e| {
            tracing::error!(error = %e, "PostgreSQL prepare failed");
            MetaqueryError::Execution(format!("prepare query: {e}"))
        })?;
        if statement.columns().is_empty() {
            return Err(MetaqueryError::Execution(
                "statement returns no rows; only SELECT queries can be executed".to_string(),
            ));
        }

        let rows = client.query(&statement, &[]).await.map_err(|e| {
            tracing::error!(error = %e, "PostgreSQL query execution failed");
            MetaqueryError::Execution(format!("execute query: {e}"))
        })?;

        let columns: Vec<ColumnMeta> = statement
            .columns()
            .iter()
            .map(|col| ColumnMeta {
                name: col.name().to_string(),
            })
            .collect();

        let limit = match self.query.max_row_limit {
            0 => rows.len(),
            n => usize::try_from(n).unwrap_or(usize::MAX),
        };
        if rows.len() > limit {
            tracing::warn!(rows = rows.len(), limit, "truncating result to max_row_limit");
        }

        let mut result_rows = Vec::new();
        for row in rows.iter().take(limit) {
            let mut map = serde_json::Map::new();
            for (idx, col) in row.columns().iter().enumerate() {
                map.insert(col.name().to_string(), pg_value_to_json(row, idx, col));
            }
            result_rows.push(map);
        }

        tracing::debug!(
            rows = result_rows.len(),
            columns = columns.len(),
            ms = start.elapsed().as_millis(),
            "postgres execute_sql"
        );
        Ok(QueryResult {
            columns,
            rows: result_rows,
        })
    }
}

#[async_trait]
impl HistorySink for PostgresBackend {
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
impl DatabaseRegistry for PostgresBackend {
    async fn register_database(&self, dsn: &str) -> Result<DatabaseInfo> {
        let info = ConnectionInfo::parse(dsn)?;
        let pool = self.create_pool(&info)?;

        // Fail registration early rather than on the next catalog refresh.
        let client = pool.get().await.map_err(|e| {
            MetaqueryError::Execution(format!("connect to {}: {e}", info.address()))
        })?;
        drop(client);

        let entry = DatabaseInfo {
            name: info.database.clone(),
            address: info.address(),
        };
        tracing::info!(database = %entry.name, address = %entry.address, "registered database");
        self.databases
            .write()
            .await
            .insert(info.database.clone(), RegisteredDatabase { info, pool });
        Ok(entry)
    }

    async fn list_databases(&self) -> Result<Vec<DatabaseInfo>> {
        Ok(self
            .databases
            .read()
            .await
            .iter()
            .map(|(name, db)| DatabaseInfo {
                name: name.clone(),
                address: db.info.address(),
            })
            .collect())
    }
}

/// Convert a PostgreSQL value to JSON.
fn pg_value_to_json(
    row: &tokio_postgres::Row,
    idx: usize,
    col: &tokio_postgres::Column,
) -> serde_json::Value {
    use serde_json::Value;
    use tokio_postgres::types::Type;

    match col.type_() {
        &Type::BOOL => row
            .try_get::<_, Option<bool>>(idx)
            .ok()
            .flatten()
            .map(Value::Bool)
            .unwrap_or(Value::Null),
        &Type::INT2 => row
            .try_get::<_, Option<i16>>(idx)
            .ok()
            .flatten()
            .map(|v| Value::Number(v.into()))
            .unwrap_or(Value::Null),
        &Type::INT4 => row
            .try_get::<_, Option<i32>>(idx)
            .ok()
            .flatten()
            .map(|v| Value::Number(v.into()))
            .unwrap_or(Value::Null),
        &Type::INT8 => row
            .try_get::<_, Option<i64>>(idx)
            .ok()
            .flatten()
            .map(|v| Value::Number(v.into()))
            .unwrap_or(Value::Null),
        &Type::FLOAT4 => row
            .try_get::<_, Option<f32>>(idx)
            .ok()
            .flatten()
            .and_then(|v| serde_json::Number::from_f64(v as f64).map(Value::Number))
            .unwrap_or(Value::Null),
        &Type::FLOAT8 => row
            .try_get::<_, Option<f64>>(idx)
            .ok()
            .flatten()
            .and_then(|v| serde_json::Number::from_f64(v).map(Value::Number))
            .unwrap_or(Value::Null),
        &Type::TEXT | &Type::VARCHAR | &Type::BPCHAR | &Type::NAME => row
            .try_get::<_, Option<String>>(idx)
            .ok()
            .flatten()
            .map(Value::String)
            .unwrap_or(Value::Null),
        _ => {
            // Unknown types: the text representation is the best we can show.
            if let Ok(Some(v)) = row.try_get::<_, Option<String>>(idx) {
                Value::String(v)
            } else if let Ok(Some(v)) = row.try_get::<_, Option<i64>>(idx) {
                Value::Number(v.into())
            } else {
                Value::Null
            }
        }
    }
}
