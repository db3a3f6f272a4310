//! Total ordering over release versions
//!
//! Versions order by `major.minor.patch` first. Ties break on the release
//! channel: a nightly build precedes a release candidate, which precedes the
//! general-availability release of the same version.

use std::cmp::Ordering;

use crate::version::error::VersionError;
use crate::version::parser::{ParsedVersion, parse};

/// Compare two parsed versions.
pub fn compare(a: &ParsedVersion, b: &ParsedVersion) -> Ordering {
    a.key().cmp(&b.key())
}

/// Parse and compare two raw version strings.
pub fn compare_versions(a: &str, b: &str) -> Result<Ordering, VersionError> {
    Ok(compare(&parse(a)?, &parse(b)?))
}

impl PartialOrd for ParsedVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ParsedVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        compare(self, other)
    }
}
