use crate::app::ports::CatalogProvider;
use crate::error::{PicksError, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::path::PathBuf;
use tracing::info;

/// Reads a bundled JSON array of items from disk instead of calling the API
#[derive(Debug, Clone)]
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl<T> CatalogProvider<T> for FileCatalog
where
    T: DeserializeOwned + Send + 'static,
{
    async fn fetch_catalog(&self) -> Result<Vec<T>> {
        let content = tokio::fs::read(&self.path).await.map_err(|e| {
            PicksError::Config(format!("Failed to read catalog file '{}': {}", self.path.display(), e))
        })?;
        let items: Vec<T> = serde_json::from_slice(&content)?;
        info!("Loaded {} items from {}", items.len(), self.path.display());
        Ok(items)
    }
}
