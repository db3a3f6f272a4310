//! Minimal machine pool version resolution
//!
//! A hosted machine pool may run up to [`DEFAULT_MINOR_OFFSET`] minor versions
//! behind its control plane, but never below the lowest version that supports
//! hosted control planes.

use std::fmt;

use tracing::debug;

use crate::version::error::VersionError;
use crate::version::parser::{ParsedVersion, parse};

/// How many minor versions a machine pool may lag behind the control plane.
pub const DEFAULT_MINOR_OFFSET: u64 = 2;

/// Lowest version supporting hosted control planes.
pub const LOWEST_HOSTED_CP_SUPPORT: &str = "4.12.0-0.a";

/// Result of a minimal version resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinimalVersion {
    version: String,
    floor_reached: bool,
    lower_bound: ParsedVersion,
}

impl MinimalVersion {
    pub fn as_str(&self) -> &str {
        &self.version
    }

    /// True when the offset fell below the lowest supported version and the
    /// result was clamped to it.
    pub fn floor_reached(&self) -> bool {
        self.floor_reached
    }

    /// Inclusive lower bound for selecting machine pool versions.
    ///
    /// At the floor this is the earliest build of the lowest supported
    /// version, so its nightlies and release candidates are selectable.
    pub fn lower_bound(&self) -> &ParsedVersion {
        &self.lower_bound
    }

    pub fn into_string(self) -> String {
        self.version
    }
}

impl fmt::Display for MinimalVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.version)
    }
}

/// Offset policy used to derive a machine pool's minimal version.
#[derive(Debug, Clone)]
pub struct MinimalVersionPolicy {
    minor_offset: u64,
    lowest_supported: String,
    floor: ParsedVersion,
}

impl MinimalVersionPolicy {
    /// Build a policy. Fails if `lowest_supported` is not a valid version.
    pub fn new(minor_offset: u64, lowest_supported: &str) -> Result<Self, VersionError> {
        let lowest_supported = lowest_supported.trim();
        Ok(Self {
            minor_offset,
            floor: parse(lowest_supported)?,
            lowest_supported: lowest_supported.to_string(),
        })
    }

    pub fn minor_offset(&self) -> u64 {
        self.minor_offset
    }

    pub fn lowest_supported(&self) -> &str {
        &self.lowest_supported
    }

    /// Resolve the minimal machine pool version for `control_plane_version`.
    ///
    /// The release channel of the control plane is ignored: a nightly
    /// `4.14.0` control plane resolves like a `4.14.0` release.
    pub fn resolve(&self, control_plane_version: &str) -> Result<MinimalVersion, VersionError> {
        let control_plane = parse(control_plane_version)?;
        if let Some(built) = control_plane.build_timestamp() {
            debug!("Control plane {} is a nightly built at {}", control_plane, built);
        }

        let minor = control_plane.minor().saturating_sub(self.minor_offset);
        let candidate = ParsedVersion::new(control_plane.major(), minor, 0);

        let result = if candidate < self.floor {
            MinimalVersion {
                version: self.lowest_supported.clone(),
                floor_reached: true,
                lower_bound: self.floor.earliest_build(),
            }
        } else {
            MinimalVersion {
                version: candidate.to_string(),
                floor_reached: false,
                lower_bound: candidate,
            }
        };

        debug!(
            "Minimal machine pool version for control plane {} is {} (floor reached: {})",
            control_plane, result.version, result.floor_reached
        );
        Ok(result)
    }
}

impl Default for MinimalVersionPolicy {
    fn default() -> Self {
        Self {
            minor_offset: DEFAULT_MINOR_OFFSET,
            lowest_supported: LOWEST_HOSTED_CP_SUPPORT.to_string(),
            floor: ParsedVersion::new(4, 12, 0),
        }
    }
}

/// Minimal machine pool version for a control plane, using the default policy.
pub fn minimal_machine_pool_version(control_plane_version: &str) -> Result<String, VersionError> {
    MinimalVersionPolicy::default()
        .resolve(control_plane_version)
        .map(MinimalVersion::into_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("4.15.0", "4.13.0")]
    #[case("4.14.0-0.nightly-2023-02-27-084419", "4.12.0")]
    #[case("4.12.5", "4.12.0-0.a")]
    #[case("4.16.3", "4.14.0")]
    #[case("4.15.0-rc.2", "4.13.0")]
    #[case("4.13.9", "4.12.0-0.a")]
    #[case("4.1.0", "4.12.0-0.a")]
    #[case("4.0.0", "4.12.0-0.a")]
    #[case("5.0.0", "5.0.0")] // minor floors at zero in a later major
    #[case("5.1.7", "5.0.0")]
    #[case("5.3.0", "5.1.0")]
    fn minimal_machine_pool_version_returns_expected(
        #[case] control_plane: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(
            minimal_machine_pool_version(control_plane).unwrap(),
            expected
        );
    }

    #[test]
    fn minimal_machine_pool_version_fails_on_malformed_input() {
        assert_eq!(
            minimal_machine_pool_version("4.15"),
            Err(VersionError::Malformed("4.15".to_string()))
        );
    }

    #[rstest]
    #[case("4.12.5", true)]
    #[case("4.14.0", false)]
    #[case("4.15.0", false)]
    fn resolve_reports_floor(#[case] control_plane: &str, #[case] expected: bool) {
        let resolved = MinimalVersionPolicy::default().resolve(control_plane).unwrap();
        assert_eq!(resolved.floor_reached(), expected);
    }

    #[test]
    fn default_policy_matches_parsed_constants() {
        let parsed = MinimalVersionPolicy::new(DEFAULT_MINOR_OFFSET, LOWEST_HOSTED_CP_SUPPORT)
            .unwrap();
        let default = MinimalVersionPolicy::default();

        assert_eq!(parsed.floor, default.floor);
        assert_eq!(parsed.lowest_supported(), default.lowest_supported());
        assert_eq!(parsed.minor_offset(), default.minor_offset());
    }

    #[rstest]
    #[case(0, "4.15.3", "4.15.0")]
    #[case(1, "4.15.3", "4.14.0")]
    #[case(5, "4.15.3", "4.10.0")]
    fn custom_offset_is_applied(#[case] offset: u64, #[case] cp: &str, #[case] expected: &str) {
        let policy = MinimalVersionPolicy::new(offset, "4.0.0").unwrap();
        assert_eq!(policy.resolve(cp).unwrap().to_string(), expected);
    }

    #[test]
    fn offset_larger_than_minor_never_goes_negative() {
        let policy = MinimalVersionPolicy::new(100, "0.0.0").unwrap();

        let resolved = policy.resolve("4.3.1").unwrap();

        assert_eq!(resolved.as_str(), "4.0.0");
        assert!(!resolved.floor_reached());
    }

    #[rstest]
    #[case("4.14.0", "4.12.3", true)]
    #[case("4.14.9-rc.1", "4.12.3", true)]
    #[case("4.15.0", "4.13.0", false)]
    fn floor_with_patch_is_never_undercut(
        #[case] control_plane: &str,
        #[case] expected: &str,
        #[case] floor_reached: bool,
    ) {
        let policy = MinimalVersionPolicy::new(2, "4.12.3").unwrap();

        let resolved = policy.resolve(control_plane).unwrap();

        assert_eq!(resolved.as_str(), expected);
        assert_eq!(resolved.floor_reached(), floor_reached);
        assert!(parse(resolved.as_str()).unwrap() >= parse("4.12.3").unwrap());
    }

    #[test]
    fn lower_bound_at_floor_admits_prereleases_of_the_floor() {
        let resolved = MinimalVersionPolicy::default().resolve("4.12.5").unwrap();
        let bound = resolved.lower_bound();

        assert!(bound <= &parse("4.12.0-0.nightly-2022-12-01-000000").unwrap());
        assert!(bound <= &parse("4.12.0-rc.8").unwrap());
        assert!(bound > &parse("4.11.9").unwrap());
    }

    #[test]
    fn lower_bound_above_floor_is_the_release() {
        let resolved = MinimalVersionPolicy::default().resolve("4.15.0").unwrap();

        assert_eq!(resolved.lower_bound(), &ParsedVersion::new(4, 13, 0));
        assert!(resolved.lower_bound() > &parse("4.13.0-rc.3").unwrap());
    }

    #[test]
    fn policy_rejects_malformed_floor() {
        assert_eq!(
            MinimalVersionPolicy::new(2, "4.12").unwrap_err(),
            VersionError::Malformed("4.12".to_string())
        );
    }
}
