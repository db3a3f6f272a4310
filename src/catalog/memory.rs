//! In-memory version catalog

use crate::catalog::VersionCatalog;
use crate::version::error::CatalogError;

/// Catalog backed by a fixed list of versions, returned in stored order
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    name: String,
    versions: Vec<String>,
}

impl StaticCatalog {
    pub fn new(name: &str, versions: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            versions,
        }
    }
}

#[async_trait::async_trait]
impl VersionCatalog for StaticCatalog {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_versions(&self) -> Result<Vec<String>, CatalogError> {
        Ok(self.versions.clone())
    }
}
