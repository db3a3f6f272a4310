//! Release version parser
//!
//! Release versions carry a numeric `major.minor.patch` core followed by an
//! optional suffix:
//! - General availability: `4.12.5`
//! - Release candidate: `4.12.0-rc.8`, `4.14.0-rc.4-candidate`
//! - Nightly build: `4.13.0-0.nightly-2023-02-22-192922`
//!
//! The suffix is classified once here into a [`ReleaseKind`]; nothing else in
//! the crate inspects suffix text.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;

use crate::version::error::VersionError;

static CORE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^v?(\d+)\.(\d+)\.(\d+)(.*)$").expect("valid core regex"));

/// Suffix predicates, checked in order. The first match wins.
static SUFFIX_RULES: LazyLock<Vec<(Regex, ReleaseKind)>> = LazyLock::new(|| {
    vec![
        (
            Regex::new(r"^-0\.nightly(?:-[0-9A-Za-z]+)*$").expect("valid nightly regex"),
            ReleaseKind::NightlyBuild,
        ),
        (
            Regex::new(r"^-rc\.\d+(?:-[0-9A-Za-z]+)*$").expect("valid rc regex"),
            ReleaseKind::ReleaseCandidate,
        ),
    ]
});

static BUILD_STAMP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{4}-\d{2}-\d{2}-\d{6})$").expect("valid build stamp regex")
});

/// Release channel a version belongs to.
///
/// Variant order is the tie-break order used when two versions share the same
/// `major.minor.patch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReleaseKind {
    NightlyBuild,
    ReleaseCandidate,
    GeneralAvailability,
}

impl ReleaseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReleaseKind::NightlyBuild => "nightly",
            ReleaseKind::ReleaseCandidate => "candidate",
            ReleaseKind::GeneralAvailability => "ga",
        }
    }

    fn classify(suffix: &str) -> Self {
        if suffix.is_empty() {
            return ReleaseKind::GeneralAvailability;
        }
        SUFFIX_RULES
            .iter()
            .find(|(re, _)| re.is_match(suffix))
            .map(|(_, kind)| *kind)
            .unwrap_or(ReleaseKind::GeneralAvailability)
    }
}

impl fmt::Display for ReleaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed release version.
///
/// Equality and hashing only consider `(major, minor, patch, kind)`; the raw
/// suffix is kept for display.
#[derive(Debug, Clone)]
pub struct ParsedVersion {
    major: u64,
    minor: u64,
    patch: u64,
    kind: ReleaseKind,
    raw_suffix: String,
}

impl ParsedVersion {
    /// Creates a general-availability version with no suffix.
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            kind: ReleaseKind::GeneralAvailability,
            raw_suffix: String::new(),
        }
    }

    pub fn major(&self) -> u64 {
        self.major
    }

    pub fn minor(&self) -> u64 {
        self.minor
    }

    pub fn patch(&self) -> u64 {
        self.patch
    }

    pub fn kind(&self) -> ReleaseKind {
        self.kind
    }

    pub fn raw_suffix(&self) -> &str {
        &self.raw_suffix
    }

    /// Whether this is a nightly build or release candidate.
    pub fn is_prerelease(&self) -> bool {
        self.kind != ReleaseKind::GeneralAvailability
    }

    /// Build time encoded in a nightly suffix, e.g. `-0.nightly-2023-02-22-192922`.
    pub fn build_timestamp(&self) -> Option<NaiveDateTime> {
        if self.kind != ReleaseKind::NightlyBuild {
            return None;
        }
        let stamp = BUILD_STAMP_RE.captures(&self.raw_suffix)?.get(1)?.as_str();
        NaiveDateTime::parse_from_str(stamp, "%Y-%m-%d-%H%M%S").ok()
    }

    /// The earliest build of this `major.minor.patch`: a nightly, which orders
    /// before every candidate and release of the same version.
    pub fn earliest_build(&self) -> Self {
        Self {
            major: self.major,
            minor: self.minor,
            patch: self.patch,
            kind: ReleaseKind::NightlyBuild,
            raw_suffix: "-0.nightly".to_string(),
        }
    }

    /// The `major.minor.patch` core as a [`semver::Version`] without pre-release.
    pub fn release(&self) -> semver::Version {
        semver::Version::new(self.major, self.minor, self.patch)
    }

    pub(crate) fn key(&self) -> (u64, u64, u64, ReleaseKind) {
        (self.major, self.minor, self.patch, self.kind)
    }
}

impl PartialEq for ParsedVersion {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for ParsedVersion {}

impl Hash for ParsedVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for ParsedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}{}",
            self.major, self.minor, self.patch, self.raw_suffix
        )
    }
}

impl FromStr for ParsedVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Parse a release version string.
///
/// Fails with [`VersionError::Malformed`] unless the input starts with three
/// dot-separated non-negative integers (an optional leading `v` is allowed).
/// Text after the patch number becomes the suffix.
pub fn parse(raw: &str) -> Result<ParsedVersion, VersionError> {
    let malformed = || VersionError::Malformed(raw.to_string());

    let captures = CORE_RE.captures(raw.trim()).ok_or_else(malformed)?;
    let number = |idx: usize| -> Result<u64, VersionError> {
        captures
            .get(idx)
            .ok_or_else(malformed)?
            .as_str()
            .parse::<u64>()
            .map_err(|_| malformed())
    };

    let major = number(1)?;
    let minor = number(2)?;
    let patch = number(3)?;
    let raw_suffix = captures.get(4).map_or("", |m| m.as_str()).to_string();
    let kind = ReleaseKind::classify(&raw_suffix);

    Ok(ParsedVersion {
        major,
        minor,
        patch,
        kind,
        raw_suffix,
    })
}
