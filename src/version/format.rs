//! Canonical `major.minor.patch` rendering

use crate::version::error::VersionError;
use crate::version::parser::parse;

/// Reduce a version to `major.minor.patch`, dropping any suffix.
pub fn format_major_minor_patch(version: &str) -> Result<String, VersionError> {
    Ok(parse(version)?.release().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("4.14.0-0.nightly-2023-10-24-225235", "4.14.0")]
    #[case("4.14.1", "4.14.1")]
    #[case("4.14.0-rc.4-candidate", "4.14.0")]
    #[case("v4.14.2", "4.14.2")]
    #[case("4.12.0-0.a", "4.12.0")]
    #[case("4.12.0+build.7", "4.12.0")]
    #[case("4.012.0", "4.12.0")]
    fn format_major_minor_patch_returns_expected(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(format_major_minor_patch(input).unwrap(), expected);
    }

    #[rstest]
    #[case("4.14")]
    #[case("nightly")]
    #[case("")]
    fn format_major_minor_patch_fails_on_malformed_input(#[case] input: &str) {
        assert_eq!(
            format_major_minor_patch(input),
            Err(VersionError::Malformed(input.to_string()))
        );
    }

    proptest! {
        #[test]
        fn format_is_idempotent(
            major in 0u64..1000,
            minor in 0u64..1000,
            patch in 0u64..1000,
            suffix in "(-rc\\.[0-9]{1,2}(-candidate)?|-0\\.nightly-[0-9]{4}-[0-9]{2}-[0-9]{2}-[0-9]{6}|-[a-z0-9.]{1,8})?",
        ) {
            let raw = format!("{major}.{minor}.{patch}{suffix}");
            let once = format_major_minor_patch(&raw).unwrap();
            prop_assert_eq!(format_major_minor_patch(&once).unwrap(), once.clone());
            prop_assert_eq!(once, format!("{major}.{minor}.{patch}"));
        }
    }
}
