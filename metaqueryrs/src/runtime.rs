use std::time::Duration;

use crate::backends::{CatalogSource, DatabaseRegistry, HistorySink, QueryExecutor};
use crate::config::QueryConfig;
use crate::error::{MetaqueryError, Result};
use crate::executor::{DatabaseInfo, QueryResult};
use crate::session::{BuilderSession, SqlUpdate};

/// Fetch a fresh catalog into `session`. On failure the session keeps its
/// previous catalog and selection.
pub async fn refresh_catalog(
    session: &mut BuilderSession,
    source: &dyn CatalogSource,
) -> Result<Option<SqlUpdate>> {
    let catalog = source.fetch_catalog().await.map_err(|e| {
        tracing::error!(error = %e, "catalog refresh failed, keeping previous catalog");
        e
    })?;
    tracing::info!(databases = catalog.databases.len(), "catalog refreshed");
    Ok(session.replace_catalog(catalog))
}

/// Execute the session's current statement against its implied database.
///
/// Refuses while no table is chosen. A successful run is reported to `history`;
/// a failing report is logged and otherwise ignored.
pub async fn run_current_query(
    session: &BuilderSession,
    executor: &dyn QueryExecutor,
    history: &dyn HistorySink,
    config: &QueryConfig,
) -> Result<QueryResult> {
    let request = session.execution_request()?;
    tracing::info!(database = %request.database_name, "executing builder query");

    let execution = executor.execute_sql(&request.database_name, &request.sql);
    let result = if config.timeout_ms == 0 {
        execution.await
    } else {
        tokio::time::timeout(Duration::from_millis(config.timeout_ms), execution)
            .await
            .map_err(|_| MetaqueryError::Timeout {
                ms: config.timeout_ms,
            })?
    };
    let result = result.map_err(|e| {
        tracing::error!(error = %e, database = %request.database_name, "query execution failed");
        e
    })?;

    if let Err(e) = history
        .query_executed(&request.database_name, &request.sql)
        .await
    {
        tracing::warn!(error = %e, "failed to record executed query");
    }
    Ok(result)
}

/// Register a database by connection string, then refresh the catalog so its
/// tables become selectable.
pub async fn register_database(
    session: &mut BuilderSession,
    registry: &dyn DatabaseRegistry,
    source: &dyn CatalogSource,
    dsn: &str,
) -> Result<DatabaseInfo> {
    let dsn = dsn.trim();
    if dsn.is_empty() {
        return Err(MetaqueryError::InvalidDsn("empty connection string".to_string()));
    }
    let info = registry.register_database(dsn).await?;
    refresh_catalog(session, source).await?;
    Ok(info)
}
