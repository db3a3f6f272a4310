//! Inclusive version range filtering

use tracing::debug;

use crate::version::error::VersionError;
use crate::version::parser::{ParsedVersion, parse};

/// An inclusive `[min, max]` version range.
///
/// A range whose `min` is greater than its `max` is valid and contains nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRange {
    min: ParsedVersion,
    max: ParsedVersion,
}

impl VersionRange {
    pub fn new(min: ParsedVersion, max: ParsedVersion) -> Self {
        Self { min, max }
    }

    /// Parse both bounds of a range.
    pub fn parse(min: &str, max: &str) -> Result<Self, VersionError> {
        Ok(Self::new(parse(min)?, parse(max)?))
    }

    pub fn min(&self) -> &ParsedVersion {
        &self.min
    }

    pub fn max(&self) -> &ParsedVersion {
        &self.max
    }

    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    pub fn contains(&self, version: &ParsedVersion) -> bool {
        &self.min <= version && version <= &self.max
    }

    /// Keep the entries of `versions` inside this range, in input order.
    ///
    /// Every entry must parse; a single malformed entry fails the whole call.
    pub fn filter<S: AsRef<str>>(&self, versions: &[S]) -> Result<Vec<String>, VersionError> {
        let mut matched = Vec::new();
        for raw in versions {
            let raw = raw.as_ref();
            if self.contains(&parse(raw)?) {
                matched.push(raw.to_string());
            }
        }

        debug!(
            "Filtered {} of {} versions into [{}, {}]",
            matched.len(),
            versions.len(),
            self.min,
            self.max
        );
        Ok(matched)
    }
}

/// Filter `versions` to those within the inclusive range `[min_version, max_version]`.
///
/// The result preserves the order of `versions`. An empty result is not an
/// error, including when `min_version` is greater than `max_version`.
pub fn filter_versions<S: AsRef<str>>(
    versions: &[S],
    min_version: &str,
    max_version: &str,
) -> Result<Vec<String>, VersionError> {
    VersionRange::parse(min_version, max_version)?.filter(versions)
}
