//! JSON file backed version catalog
//!
//! Accepts either a bare array (`["4.12.1", "4.12.2"]`) or an object with a
//! `versions` field (`{"versions": ["4.12.1"]}`), the shape of a saved
//! managing-service response.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::catalog::VersionCatalog;
use crate::version::error::CatalogError;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    List(Vec<String>),
    Object { versions: Vec<String> },
}

impl CatalogDocument {
    fn into_versions(self) -> Vec<String> {
        match self {
            CatalogDocument::List(versions) | CatalogDocument::Object { versions } => versions,
        }
    }
}

/// Catalog read from a JSON file on every fetch
pub struct FileCatalog {
    path: PathBuf,
    name: String,
}

impl FileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait::async_trait]
impl VersionCatalog for FileCatalog {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_versions(&self) -> Result<Vec<String>, CatalogError> {
        debug!("Reading version catalog: {:?}", self.path);

        let contents = tokio::fs::read_to_string(&self.path).await?;

        let document: CatalogDocument = serde_json::from_str(&contents).map_err(|e| {
            warn!("Failed to parse version catalog {:?}: {}", self.path, e);
            CatalogError::InvalidResponse(e.to_string())
        })?;

        Ok(document.into_versions())
    }
}
