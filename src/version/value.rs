//! Parsed image version with release-candidate aware ordering

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::version::error::ParseError;

/// major.minor[.patch][rcN]
static VERSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)\.(\d+)(?:\.(\d+))?(?:rc(\d+))?$").expect("version pattern is valid")
});

/// An image version such as `30.2`, `29.1.1` or `31.0rc2`.
///
/// The value only keeps the numeric fields, so `30.2` and `30.2.0` are the
/// same version and render the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub release_candidate: Option<u64>,
}

impl Version {
    pub fn new(major: u64, minor: u64, patch: u64, release_candidate: Option<u64>) -> Self {
        Self {
            major,
            minor,
            patch,
            release_candidate,
        }
    }

    /// Parse a version string.
    ///
    /// Examples:
    /// - "30.2" -> Version(30, 2, 0, None)
    /// - "29.1.1" -> Version(29, 1, 1, None)
    /// - "31.0rc2" -> Version(31, 0, 0, Some(2))
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let captures = VERSION_PATTERN
            .captures(input)
            .ok_or_else(|| ParseError::InvalidFormat(input.to_string()))?;

        let number = |index: usize| -> Result<Option<u64>, ParseError> {
            captures
                .get(index)
                .map(|m| {
                    m.as_str()
                        .parse::<u64>()
                        .map_err(|_| ParseError::OutOfRange(input.to_string()))
                })
                .transpose()
        };

        Ok(Self {
            major: number(1)?.unwrap_or_default(),
            minor: number(2)?.unwrap_or_default(),
            patch: number(3)?.unwrap_or_default(),
            release_candidate: number(4)?,
        })
    }

    pub fn is_release_candidate(&self) -> bool {
        self.release_candidate.is_some()
    }

    fn triple(&self) -> (u64, u64, u64) {
        (self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.triple()
            .cmp(&other.triple())
            .then_with(|| match (self.release_candidate, other.release_candidate) {
                (None, None) => Ordering::Equal,
                // A stable release sorts above every candidate for it
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => a.cmp(&b),
            })
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Renders from the parsed fields, dropping a zero patch.
impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)?;
        if self.patch != 0 {
            write!(f, ".{}", self.patch)?;
        }
        if let Some(rc) = self.release_candidate {
            write!(f, "rc{}", rc)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("30.2", Version::new(30, 2, 0, None))]
    #[case("30.2.0", Version::new(30, 2, 0, None))]
    #[case("29.1.1", Version::new(29, 1, 1, None))]
    #[case("31.0rc2", Version::new(31, 0, 0, Some(2)))]
    #[case("28.1.3rc1", Version::new(28, 1, 3, Some(1)))]
    #[case("030.02", Version::new(30, 2, 0, None))] // leading zeros are plain digits
    fn parse_accepts_valid_versions(#[case] input: &str, #[case] expected: Version) {
        assert_eq!(Version::parse(input), Ok(expected));
    }

    #[rstest]
    #[case("")]
    #[case("30")]
    #[case(".2")]
    #[case("30.")]
    #[case("v30.2")]
    #[case("30.2rc")]
    #[case("30.2-rc1")]
    #[case("30.2.1.4")]
    #[case("30.2 ")]
    #[case("master")]
    #[case("deprecated")]
    fn parse_rejects_malformed_versions(#[case] input: &str) {
        assert_eq!(
            Version::parse(input),
            Err(ParseError::InvalidFormat(input.to_string()))
        );
    }

    #[test]
    fn parse_rejects_components_that_overflow() {
        let input = "99999999999999999999999.1";
        assert_eq!(
            Version::parse(input),
            Err(ParseError::OutOfRange(input.to_string()))
        );
    }

    #[rstest]
    #[case("30.2", "30.2")]
    #[case("30.2.0", "30.2")]
    #[case("29.1.1", "29.1.1")]
    #[case("31.0rc2", "31.0rc2")]
    #[case("28.1.3rc1", "28.1.3rc1")]
    #[case("030.02", "30.2")]
    fn display_renders_from_fields(#[case] input: &str, #[case] expected: &str) {
        let version = Version::parse(input).unwrap();
        assert_eq!(version.to_string(), expected);
        assert_eq!(Version::parse(&version.to_string()), Ok(version));
    }

    #[rstest]
    #[case("30.0rc1", "30.0")]
    #[case("30.0rc1", "30.0rc2")]
    #[case("29.9rc1", "30.0")]
    #[case("29.9", "30.0rc1")]
    #[case("30.0", "30.0.1rc1")]
    #[case("29.1.1", "29.2")]
    #[case("9.1", "10.0")]
    fn ordering_places_left_below_right(#[case] lower: &str, #[case] higher: &str) {
        let lower = Version::parse(lower).unwrap();
        let higher = Version::parse(higher).unwrap();
        assert!(lower < higher);
        assert!(higher > lower);
        assert_ne!(lower, higher);
    }

    #[test]
    fn short_and_long_forms_are_equal() {
        let short = Version::parse("30.2").unwrap();
        let long = Version::parse("30.2.0").unwrap();
        assert_eq!(short, long);
        assert_eq!(short.cmp(&long), Ordering::Equal);
    }

    #[test]
    fn ordering_is_a_strict_total_order() {
        let versions: Vec<Version> = [
            "28.0", "28.0rc1", "28.0rc2", "28.0.1", "29.1", "29.1.1rc3", "29.1.1", "30.0rc1",
            "30.0", "30.2", "30.2.0",
        ]
        .iter()
        .map(|s| Version::parse(s).unwrap())
        .collect();

        for x in &versions {
            for y in &versions {
                let relations = [x < y, x == y, x > y];
                assert_eq!(relations.iter().filter(|r| **r).count(), 1, "{x} vs {y}");
                for z in &versions {
                    if x < y && y < z {
                        assert!(x < z, "{x} < {y} < {z}");
                    }
                }
            }
        }
    }

    #[test]
    fn is_release_candidate_reports_rc_suffix() {
        assert!(Version::parse("31.0rc2").unwrap().is_release_candidate());
        assert!(!Version::parse("31.0").unwrap().is_release_candidate());
    }
}
