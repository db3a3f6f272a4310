//! Version catalogs
//!
//! A catalog supplies the raw release versions available for a product. The
//! resolution core never fetches anything itself; callers fetch a catalog and
//! hand the list to [`crate::version`].
//!
//! # Modules
//!
//! - [`file`]: JSON file backed catalog
//! - [`memory`]: In-memory catalog

pub mod file;
pub mod memory;

pub use file::FileCatalog;
pub use memory::StaticCatalog;

#[cfg(test)]
use mockall::automock;
use tracing::info;

use crate::version::error::CatalogError;
use crate::version::minimal::{MinimalVersion, MinimalVersionPolicy};
use crate::version::parser::parse;
use crate::version::range::VersionRange;

/// Source of raw release version strings
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait VersionCatalog: Send + Sync {
    /// Human readable name of the catalog, used in logs
    fn name(&self) -> &str;

    /// Fetches all versions in catalog order
    ///
    /// # Returns
    /// * `Ok(Vec<String>)` - Raw version strings, unparsed
    /// * `Err(CatalogError)` - If the catalog cannot be read
    async fn fetch_versions(&self) -> Result<Vec<String>, CatalogError>;
}

/// Versions selected for a hosted machine pool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachinePoolVersions {
    /// Resolved minimal version for the control plane
    pub minimal: MinimalVersion,
    /// Catalog entries between the minimal version and the control plane, in catalog order
    pub versions: Vec<String>,
}

/// Versions a hosted machine pool may run for the given control plane.
///
/// Fetches `catalog` and keeps the entries between the policy's minimal
/// version and `control_plane_version`, both inclusive, in catalog order.
/// When the minimal version is clamped to the lowest supported version, the
/// nightlies and release candidates of that version are kept too.
pub async fn machine_pool_versions<C: VersionCatalog + ?Sized>(
    catalog: &C,
    control_plane_version: &str,
    policy: &MinimalVersionPolicy,
) -> Result<MachinePoolVersions, CatalogError> {
    let minimal = policy.resolve(control_plane_version)?;
    let range = VersionRange::new(minimal.lower_bound().clone(), parse(control_plane_version)?);
    let versions = catalog.fetch_versions().await?;

    info!(
        "Fetched {} versions from catalog '{}'",
        versions.len(),
        catalog.name()
    );

    let selected = range.filter(&versions)?;

    info!(
        "{} machine pool versions available between {} and {}",
        selected.len(),
        minimal,
        control_plane_version
    );
    Ok(MachinePoolVersions {
        minimal,
        versions: selected,
    })
}
