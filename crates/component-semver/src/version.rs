//! Semantic version value type

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::error::{InvalidArgument, ParseError};
use crate::grammar::{self, Token};
use crate::identifier::{compare_identifiers, Identifier};

/// Kind of bump applied by [`Version::increment`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReleaseKind {
    Major,
    Minor,
    Patch,
    PreMajor,
    PreMinor,
    PrePatch,
    PreRelease,
    /// Bump only the prerelease identifiers. `1.0.0` becomes `1.0.0-0`,
    /// which sorts lower, so this is rarely what a caller wants.
    Pre,
}

impl ReleaseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReleaseKind::Major => "major",
            ReleaseKind::Minor => "minor",
            ReleaseKind::Patch => "patch",
            ReleaseKind::PreMajor => "premajor",
            ReleaseKind::PreMinor => "preminor",
            ReleaseKind::PrePatch => "prepatch",
            ReleaseKind::PreRelease => "prerelease",
            ReleaseKind::Pre => "pre",
        }
    }
}

impl FromStr for ReleaseKind {
    type Err = InvalidArgument;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "major" => Ok(ReleaseKind::Major),
            "minor" => Ok(ReleaseKind::Minor),
            "patch" => Ok(ReleaseKind::Patch),
            "premajor" => Ok(ReleaseKind::PreMajor),
            "preminor" => Ok(ReleaseKind::PreMinor),
            "prepatch" => Ok(ReleaseKind::PrePatch),
            "prerelease" => Ok(ReleaseKind::PreRelease),
            "pre" => Ok(ReleaseKind::Pre),
            _ => Err(InvalidArgument(s.to_string())),
        }
    }
}

impl fmt::Display for ReleaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed `MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]` version.
///
/// Build metadata is kept for round-tripping through [`Version::value`] but
/// never takes part in ordering, equality or hashing.
#[derive(Debug, Clone)]
pub struct Version {
    major: u64,
    minor: u64,
    patch: u64,
    prerelease: Vec<Identifier>,
    build: Vec<String>,
}

impl Version {
    /// Create a release version without prerelease or build metadata
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
            prerelease: Vec::new(),
            build: Vec::new(),
        }
    }

    pub fn with_prerelease(mut self, prerelease: Vec<Identifier>) -> Self {
        self.prerelease = prerelease;
        self
    }

    pub fn with_build(mut self, build: Vec<String>) -> Self {
        self.build = build;
        self
    }

    /// Parse a version string, ignoring surrounding whitespace and a leading `v`
    pub fn parse(version: &str) -> Result<Self, ParseError> {
        let invalid = || ParseError::InvalidVersion(version.to_string());

        let caps = grammar::get(Token::Full)
            .captures(version.trim())
            .ok_or_else(invalid)?;

        let component = |index: usize| -> Result<u64, ParseError> {
            caps.get(index)
                .ok_or_else(invalid)?
                .as_str()
                .parse()
                .map_err(|_| invalid())
        };

        let major = component(1)?;
        let minor = component(2)?;
        let patch = component(3)?;

        let prerelease = match caps.get(4) {
            Some(m) => m
                .as_str()
                .split('.')
                .map(|id| Identifier::parse(id).ok_or_else(invalid))
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
        };

        let build = caps
            .get(5)
            .map(|m| m.as_str().split('.').map(String::from).collect())
            .unwrap_or_default();

        Ok(Version {
            major,
            minor,
            patch,
            prerelease,
            build,
        })
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

    pub fn prerelease(&self) -> &[Identifier] {
        &self.prerelease
    }

    pub fn build(&self) -> &[String] {
        &self.build
    }

    pub fn is_prerelease(&self) -> bool {
        !self.prerelease.is_empty()
    }

    /// True when both versions share `(major, minor, patch)`
    pub fn same_release(&self, other: &Version) -> bool {
        self.compare_main(other) == Ordering::Equal
    }

    /// Canonical form including build metadata
    pub fn value(&self) -> String {
        if self.build.is_empty() {
            self.to_string()
        } else {
            format!("{}+{}", self, self.build.join("."))
        }
    }

    /// Compare `(major, minor, patch)` only
    pub fn compare_main(&self, other: &Version) -> Ordering {
        (self.major, self.minor, self.patch).cmp(&(other.major, other.minor, other.patch))
    }

    /// Compare prerelease identifiers only. A release sorts above any prerelease.
    pub fn compare_pre(&self, other: &Version) -> Ordering {
        match (self.prerelease.is_empty(), other.prerelease.is_empty()) {
            (true, true) => Ordering::Equal,
            (false, true) => Ordering::Less,
            (true, false) => Ordering::Greater,
            // Element-wise; on a shared prefix the longer list wins.
            (false, false) => self.prerelease.cmp(&other.prerelease),
        }
    }

    /// Compare build metadata. Not used by `Ord`.
    pub fn compare_build(&self, other: &Version) -> Ordering {
        for (a, b) in self.build.iter().zip(&other.build) {
            if a != b {
                return compare_identifiers(a, b);
            }
        }
        self.build.len().cmp(&other.build.len())
    }

    /// Return the next version for the given release kind.
    ///
    /// `identifier` names the prerelease line (`alpha`, `beta`, ...) used by the
    /// `pre*` kinds. Numeric components saturate at `u64::MAX`.
    pub fn increment(&self, kind: ReleaseKind, identifier: Option<&str>) -> Version {
        match kind {
            ReleaseKind::PreMajor => self
                .release(self.major.saturating_add(1), 0, 0)
                .increment(ReleaseKind::Pre, identifier),
            ReleaseKind::PreMinor => self
                .release(self.major, self.minor.saturating_add(1), 0)
                .increment(ReleaseKind::Pre, identifier),
            ReleaseKind::PrePatch => self
                .release(self.major, self.minor, self.patch)
                .increment(ReleaseKind::Patch, identifier)
                .increment(ReleaseKind::Pre, identifier),
            ReleaseKind::PreRelease => {
                if self.prerelease.is_empty() {
                    self.increment(ReleaseKind::Patch, identifier)
                        .increment(ReleaseKind::Pre, identifier)
                } else {
                    self.increment(ReleaseKind::Pre, identifier)
                }
            }
            ReleaseKind::Major => {
                // 1.0.0-5 bumps to 1.0.0, 1.1.0 bumps to 2.0.0
                let major = if self.minor != 0 || self.patch != 0 || self.prerelease.is_empty() {
                    self.major.saturating_add(1)
                } else {
                    self.major
                };
                self.release(major, 0, 0)
            }
            ReleaseKind::Minor => {
                // 1.2.0-5 bumps to 1.2.0, 1.2.1 bumps to 1.3.0
                let minor = if self.patch != 0 || self.prerelease.is_empty() {
                    self.minor.saturating_add(1)
                } else {
                    self.minor
                };
                self.release(self.major, minor, 0)
            }
            ReleaseKind::Patch => {
                // 1.2.0-5 patches to 1.2.0, 1.2.0 patches to 1.2.1
                let patch = if self.prerelease.is_empty() {
                    self.patch.saturating_add(1)
                } else {
                    self.patch
                };
                self.release(self.major, self.minor, patch)
            }
            ReleaseKind::Pre => self.bump_prerelease(identifier),
        }
    }

    fn release(&self, major: u64, minor: u64, patch: u64) -> Version {
        Version {
            major,
            minor,
            patch,
            prerelease: Vec::new(),
            build: self.build.clone(),
        }
    }

    fn bump_prerelease(&self, identifier: Option<&str>) -> Version {
        let mut prerelease = self.prerelease.clone();

        let trailing_numeric = prerelease.iter_mut().rev().find_map(|id| match id {
            Identifier::Numeric(n) => Some(n),
            Identifier::AlphaNumeric(_) => None,
        });
        match trailing_numeric {
            Some(n) => *n = n.saturating_add(1),
            None => prerelease.push(Identifier::Numeric(0)),
        }

        if let Some(identifier) = identifier {
            // 1.2.0-beta.1 bumps to 1.2.0-beta.2,
            // 1.2.0-beta.fooblz or 1.2.0-beta bumps to 1.2.0-beta.0
            let same_line = matches!(prerelease.first(), Some(Identifier::AlphaNumeric(first)) if first == identifier);
            let numbered = prerelease.get(1).map_or(true, Identifier::is_numeric);
            if !(same_line && numbered) {
                prerelease = vec![Identifier::from(identifier), Identifier::Numeric(0)];
            }
        }

        Version {
            major: self.major,
            minor: self.minor,
            patch: self.patch,
            prerelease,
            build: self.build.clone(),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        for (i, id) in self.prerelease.iter().enumerate() {
            f.write_str(if i == 0 { "-" } else { "." })?;
            write!(f, "{}", id)?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare_main(other).then_with(|| self.compare_pre(other))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.major.hash(state);
        self.minor.hash(state);
        self.patch.hash(state);
        self.prerelease.hash(state);
    }
}
