pub mod catalog;
pub mod config;
pub mod logging;
pub mod version;

pub use version::{
    VersionError, filter_versions, format_major_minor_patch, minimal_machine_pool_version,
};
