use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    #[error("Malformed version: '{0}' (expected <major>.<minor>.<patch>)")]
    Malformed(String),
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid catalog response: {0}")]
    InvalidResponse(String),

    #[error(transparent)]
    Version(#[from] VersionError),
}
