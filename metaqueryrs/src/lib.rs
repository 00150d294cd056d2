pub mod backends;
pub mod catalog;
pub mod config;
pub mod dialect;
pub mod dsn;
pub mod error;
pub mod executor;
pub mod logging;
pub mod models;
pub mod query_builder;
pub mod runtime;
pub mod selection;
pub mod session;
pub mod sql_ast;

pub use backends::{
    Backends, CatalogSource, DatabaseRegistry, DirectoryCatalogSource, HistorySink,
    InMemoryBackend, QueryExecutor,
};
pub use catalog::{Catalog, DatabaseMetadata, TableMetadata};
pub use config::MetaqueryConfig;
pub use error::{MetaqueryError, Result};
pub use executor::{DatabaseInfo, QueryResult, SavedQuery};
pub use models::{Column, ComparisonOp, FilterCondition, Table};
pub use query_builder::{synthesize, SqlBuilder, PLACEHOLDER_SQL};
pub use selection::{apply, Event, SelectionState};
pub use session::{BuilderSession, SqlUpdate};
