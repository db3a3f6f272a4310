//! Release version resolution
//!
//! Pure, in-memory operations over release version strings. Nothing in this
//! module performs I/O; version lists come from a
//! [`VersionCatalog`](crate::catalog::VersionCatalog) or the caller.
//!
//! # Architecture
//!
//! ```text
//!                    ┌─────────────┐
//!   raw strings ────▶│   Parser    │
//!                    │ (kind tag)  │
//!                    └─────────────┘
//!                           │
//!        ┌──────────────┬───┴──────────┬──────────────┐
//!        ▼              ▼              ▼              ▼
//! ┌─────────────┐ ┌───────────┐ ┌─────────────┐ ┌───────────┐
//! │   Compare   │ │   Range   │ │   Minimal   │ │  Format   │
//! │ (ordering)  │ │ (filter)  │ │  (offset)   │ │ (x.y.z)   │
//! └─────────────┘ └───────────┘ └─────────────┘ └───────────┘
//! ```
//!
//! # Modules
//!
//! - [`parser`]: Parses version strings and classifies their release channel
//! - [`compare`]: Total ordering over parsed versions
//! - [`range`]: Inclusive range filtering that preserves input order
//! - [`minimal`]: Minimal machine pool version for a control plane version
//! - [`format`]: Canonical `major.minor.patch` rendering
//! - [`error`]: Error types for version and catalog operations

pub mod compare;
pub mod error;
pub mod format;
pub mod minimal;
pub mod parser;
pub mod range;

pub use compare::{compare, compare_versions};
pub use error::{CatalogError, VersionError};
pub use format::format_major_minor_patch;
pub use minimal::{MinimalVersion, MinimalVersionPolicy, minimal_machine_pool_version};
pub use parser::{ParsedVersion, ReleaseKind, parse};
pub use range::{VersionRange, filter_versions};
