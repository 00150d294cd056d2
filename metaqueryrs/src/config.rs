//! Configuration system for metaquery.
//!
//! TOML-based: query limits, connection pooling, logging, an optional catalog
//! snapshot directory, and databases to register at startup.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{MetaqueryError, Result};

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct MetaqueryConfig {
    pub query: QueryConfig,
    pub pool: PoolConfig,
    pub logging: LoggingConfig,
    pub catalog: CatalogConfig,

    /// Databases registered at startup (keyed by a display name).
    pub databases: BTreeMap<String, DatabaseConfig>,
}

/// Query execution configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Query timeout in milliseconds (default: 30000).
    pub timeout_ms: u64,
    /// Maximum rows to return (0 = unlimited).
    pub max_row_limit: u64,
}

/// Connection pooling configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Maximum pool size per database (default: 16).
    pub size: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Fallback filter when `RUST_LOG` is unset (default: "info").
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Directory of catalog snapshot files, one database per file.
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub dsn: String,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 30_000,
            max_row_limit: 0, // 0 = unlimited
        }
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self { size: 16 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

impl MetaqueryConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| MetaqueryError::Config(format!("failed to read config file: {e}")))?;
        Self::from_toml(&contents)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str)
            .map_err(|e| MetaqueryError::Config(format!("failed to parse config: {e}")))
    }

    /// Load from default locations (env var, cwd, user config dir, or defaults).
    ///
    /// Search order:
    /// 1. `METAQUERY_CONFIG` environment variable
    /// 2. `./metaquery.toml` (current directory)
    /// 3. `~/.config/metaquery/config.toml` (user config dir)
    /// 4. Built-in defaults
    pub fn load_default() -> Self {
        if let Ok(path) = std::env::var("METAQUERY_CONFIG") {
            match Self::from_file(&path) {
                Ok(cfg) => {
                    tracing::info!(path = %path, "loaded config from METAQUERY_CONFIG");
                    return cfg;
                }
                Err(e) => tracing::warn!(path = %path, error = %e, "ignoring METAQUERY_CONFIG"),
            }
        }

        if let Ok(cfg) = Self::from_file("metaquery.toml") {
            tracing::info!("loaded config from ./metaquery.toml");
            return cfg;
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("metaquery").join("config.toml");
            if let Ok(cfg) = Self::from_file(&user_config) {
                tracing::info!(path = %user_config.display(), "loaded config from user config dir");
                return cfg;
            }
        }

        tracing::debug!("no config file found, using defaults");
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = MetaqueryConfig::default();
        assert_eq!(cfg.query.timeout_ms, 30_000);
        assert_eq!(cfg.query.max_row_limit, 0);
        assert_eq!(cfg.pool.size, 16);
        assert_eq!(cfg.logging.level, "info");
        assert!(cfg.catalog.dir.is_none());
        assert!(cfg.databases.is_empty());
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
[query]
timeout_ms = 5000
max_row_limit = 200

[logging]
level = "debug"
format = "compact"

[catalog]
dir = "catalog"

[databases.app1]
dsn = "postgresql://app:pw@localhost:5432/app1"
"#;
        let cfg = MetaqueryConfig::from_toml(toml).unwrap();
        assert_eq!(cfg.query.timeout_ms, 5_000);
        assert_eq!(cfg.query.max_row_limit, 200);
        assert_eq!(cfg.pool.size, 16);
        assert_eq!(cfg.logging.format, LogFormat::Compact);
        assert_eq!(cfg.catalog.dir.as_deref(), Some(Path::new("catalog")));
        assert_eq!(
            cfg.databases["app1"].dsn,
            "postgresql://app:pw@localhost:5432/app1"
        );
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metaquery.toml");
        std::fs::write(&path, "[pool]\nsize = 4\n").unwrap();
        let cfg = MetaqueryConfig::from_file(&path).unwrap();
        assert_eq!(cfg.pool.size, 4);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = MetaqueryConfig::from_toml("[query]\ntimeout_ms = \"soon\"").unwrap_err();
        assert!(matches!(err, MetaqueryError::Config(_)));
    }
}
