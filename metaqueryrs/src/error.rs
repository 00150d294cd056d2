use thiserror::Error;

pub type Result<T> = std::result::Result<T, MetaqueryError>;

#[derive(Debug, Error)]
pub enum MetaqueryError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("yaml parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("config error: {0}")]
    Config(String),
    #[error("catalog error: {0}")]
    Catalog(String),
    #[error("invalid connection string: {0}")]
    InvalidDsn(String),
    #[error("no table selected; choose a table before executing")]
    NoTableSelected,
    #[error("unknown database {0}")]
    UnknownDatabase(String),
    #[error("execution error: {0}")]
    Execution(String),
    #[error("query timed out after {ms}ms")]
    Timeout { ms: u64 },
    #[cfg(feature = "postgres")]
    #[error("postgres error: {0}")]
    Postgres(#[from] tokio_postgres::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
