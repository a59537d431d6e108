//! Semver facade providing string-level version operations

use crate::{Range, Version};

/// Main facade for semantic versioning operations
pub struct Semver;

impl Semver {
    /// Check if a version satisfies a range
    pub fn satisfies(version: &str, range: &str) -> bool {
        let version = match Version::parse(version) {
            Ok(v) => v,
            Err(_) => return false,
        };

        match Range::parse(range) {
            Ok(range) => range.test(&version),
            Err(_) => false,
        }
    }

    /// Return all versions that satisfy the given range, in input order
    pub fn satisfied_by(versions: &[&str], range: &str) -> Vec<String> {
        let range = match Range::parse(range) {
            Ok(r) => r,
            Err(_) => return Vec::new(),
        };

        versions
            .iter()
            .filter(|v| Version::parse(v).is_ok_and(|version| range.test(&version)))
            .map(|v| v.to_string())
            .collect()
    }

    /// Highest version satisfying the range
    pub fn max_satisfying(versions: &[&str], range: &str) -> Option<String> {
        Self::matching(versions, range)?
            .into_iter()
            .max_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(_, raw)| raw.to_string())
    }

    /// Lowest version satisfying the range
    pub fn min_satisfying(versions: &[&str], range: &str) -> Option<String> {
        Self::matching(versions, range)?
            .into_iter()
            .min_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(_, raw)| raw.to_string())
    }

    fn matching<'a>(versions: &[&'a str], range: &str) -> Option<Vec<(Version, &'a str)>> {
        let range = Range::parse(range).ok()?;
        Some(
            versions
                .iter()
                .filter_map(|raw| {
                    let version = Version::parse(raw).ok()?;
                    range.test(&version).then_some((version, *raw))
                })
                .collect(),
        )
    }

    /// Whether two ranges have a version in common
    pub fn intersects(a: &str, b: &str) -> bool {
        match (Range::parse(a), Range::parse(b)) {
            (Ok(a), Ok(b)) => a.intersects(&b),
            _ => false,
        }
    }

    /// Canonical form of a version, if it is valid
    pub fn valid(version: &str) -> Option<String> {
        Version::parse(version).ok().map(|v| v.to_string())
    }

    /// Sort versions in ascending order
    pub fn sort(versions: &[&str]) -> Vec<String> {
        Self::usort(versions, true)
    }

    /// Sort versions in descending order (reverse sort)
    pub fn rsort(versions: &[&str]) -> Vec<String> {
        Self::usort(versions, false)
    }

    fn usort(versions: &[&str], ascending: bool) -> Vec<String> {
        // Invalid versions are dropped
        let mut parsed: Vec<(Version, &str)> = versions
            .iter()
            .filter_map(|raw| Some((Version::parse(raw).ok()?, *raw)))
            .collect();

        // Stable, so equal versions keep their input order
        parsed.sort_by(|(a, _), (b, _)| {
            let cmp = a.cmp(b);
            if ascending {
                cmp
            } else {
                cmp.reverse()
            }
        });

        parsed.into_iter().map(|(_, raw)| raw.to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_satisfies_positive() {
        // Hyphen ranges
        assert!(Semver::satisfies("1.2.3", "1.0.0 - 2.0.0"));
        assert!(Semver::satisfies("1.2.3", "1.2.3+asdf - 2.4.3+asdf"));
        assert!(Semver::satisfies("2.0.0", "1.0.0 - 2"));

        // Caret
        assert!(Semver::satisfies("1.3.0", "^1.2.3+build"));
        assert!(Semver::satisfies("0.2.5", "^0.2.3"));
        assert!(Semver::satisfies("0.0.3", "^0.0.3"));

        // Tilde
        assert!(Semver::satisfies("2.4.5", "~2.4"));
        assert!(Semver::satisfies("1.2.9", "~>1.2.3"));

        // X-ranges and stars
        assert!(Semver::satisfies("1.9.9", "1.x"));
        assert!(Semver::satisfies("0.0.1", "*"));
        assert!(Semver::satisfies("1.0.0", ""));

        // Prerelease on the same release line
        assert!(Semver::satisfies("1.2.3-beta.2", ">=1.2.3-beta.1 <1.3.0"));
        assert!(Semver::satisfies("v1.2.3", "=1.2.3"));
    }

    #[test]
    fn test_satisfies_negative() {
        assert!(!Semver::satisfies("2.0.0", "^1.2.3"));
        assert!(!Semver::satisfies("0.3.0", "^0.2.3"));
        assert!(!Semver::satisfies("0.0.4", "^0.0.3"));
        assert!(!Semver::satisfies("1.3.0", "~1.2.3"));
        assert!(!Semver::satisfies("1.0.0", "<1"));
        assert!(!Semver::satisfies("2.0.0-alpha", "^1.2.3"));
        assert!(!Semver::satisfies("1.2.3-beta", "<1.2.3"));
        assert!(!Semver::satisfies("not a version", "*"));
        assert!(!Semver::satisfies("1.2.3", "not a range"));
    }

    #[test]
    fn test_satisfied_by() {
        let versions = vec!["1.0.0", "1.2.0", "1.9.9", "2.0.0", "2.1.0", "0.9.9"];
        assert_eq!(Semver::satisfied_by(&versions, "~1.0"), vec!["1.0.0"]);
        assert_eq!(Semver::satisfied_by(&versions, "^1.0"), vec!["1.0.0", "1.2.0", "1.9.9"]);

        let versions2 = vec!["1.0.0", "1.1.0", "2.9.9", "3.0.0", "3.1.0", "4.0.0", "4.1.0"];
        assert_eq!(
            Semver::satisfied_by(&versions2, ">1.0.0 <3.0.0 || >=4.0.0"),
            vec!["1.1.0", "2.9.9", "4.0.0", "4.1.0"]
        );

        assert!(Semver::satisfied_by(&versions2, "bogus").is_empty());
    }

    #[test]
    fn test_max_and_min_satisfying() {
        let versions = vec!["1.2.3", "1.2.4", "1.3.0-beta", "2.0.0", "garbage"];
        assert_eq!(Semver::max_satisfying(&versions, "^1.2.0"), Some("1.2.4".to_string()));
        assert_eq!(Semver::min_satisfying(&versions, "^1.2.0"), Some("1.2.3".to_string()));
        assert_eq!(Semver::max_satisfying(&versions, ">=3.0.0"), None);
        assert_eq!(Semver::min_satisfying(&versions, "nope"), None);
    }

    #[test]
    fn test_intersects() {
        assert!(Semver::intersects("^1.2.0", "~1.5.0"));
        assert!(!Semver::intersects("^1.0.0", "^2.0.0"));
        assert!(!Semver::intersects("^1.0.0", "bogus"));
    }

    #[test]
    fn test_valid() {
        assert_eq!(Semver::valid("v1.2.3+build.7"), Some("1.2.3".to_string()));
        assert_eq!(Semver::valid(" 1.2.3-rc.1 "), Some("1.2.3-rc.1".to_string()));
        assert_eq!(Semver::valid("1.2"), None);
    }

    #[test]
    fn test_sort() {
        let versions = vec!["1.0.0", "0.1.0", "0.1.0", "3.2.1", "2.4.0-alpha", "2.4.0", "junk"];
        assert_eq!(
            Semver::sort(&versions),
            vec!["0.1.0", "0.1.0", "1.0.0", "2.4.0-alpha", "2.4.0", "3.2.1"]
        );

        // Build metadata does not affect order, so input order is kept
        let versions2 = vec!["1.0.0+b", "1.0.0+a", "0.9.0"];
        assert_eq!(Semver::sort(&versions2), vec!["0.9.0", "1.0.0+b", "1.0.0+a"]);
    }

    #[test]
    fn test_rsort() {
        let versions = vec!["1.0.0", "0.1.0", "0.1.0", "3.2.1", "2.4.0-alpha", "2.4.0"];
        assert_eq!(
            Semver::rsort(&versions),
            vec!["3.2.1", "2.4.0", "2.4.0-alpha", "1.0.0", "0.1.0", "0.1.0"]
        );
    }
}
