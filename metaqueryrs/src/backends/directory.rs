//! Catalog snapshots read from disk.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::catalog::Catalog;
use crate::error::{MetaqueryError, Result};

use super::CatalogSource;

/// Re-reads the directory on every fetch so edited snapshots show up on refresh.
#[derive(Debug, Clone)]
pub struct DirectoryCatalogSource {
    dir: PathBuf,
}

impl DirectoryCatalogSource {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl CatalogSource for DirectoryCatalogSource {
    async fn fetch_catalog(&self) -> Result<Catalog> {
        let dir = self.dir.clone();
        tokio::task::spawn_blocking(move || Catalog::load_from_dir(dir))
            .await
            .map_err(|e| MetaqueryError::Other(e.into()))?
    }
}
