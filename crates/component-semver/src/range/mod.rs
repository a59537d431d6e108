//! Version ranges: `||`-separated alternatives of ANDed comparators

mod desugar;

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::comparator::Comparator;
use crate::error::ParseError;
use crate::grammar::{self, Token};
use crate::version::Version;

/// A parsed range such as `^1.2.3 || >=2.5.0 <3.0.0`.
///
/// Each alternative is a list of comparators that must all hold. Ranges
/// compare equal when their canonical strings are equal, whatever the raw
/// input looked like.
#[derive(Debug, Clone)]
pub struct Range {
    raw: String,
    range: String,
    set: Vec<Vec<Comparator>>,
}

impl Range {
    /// Parse a range expression.
    ///
    /// An invalid comparator anywhere in the input fails the whole range.
    pub fn parse(range: &str) -> Result<Self, ParseError> {
        let mut set = Vec::new();
        for alternative in grammar::OR_SPLIT.split(range) {
            let comparators = parse_alternative(alternative.trim())?;
            if !comparators.is_empty() {
                set.push(comparators);
            }
        }

        if set.is_empty() {
            return Err(ParseError::InvalidRange(range.to_string()));
        }

        if set.len() > 1 {
            let first = set[0].clone();
            let before = set.len();
            set.retain(|comparators| !comparators[0].is_null_set());
            if set.len() < before {
                log::debug!("Dropped {} null set alternative(s) from {:?}", before - set.len(), range);
            }

            if set.is_empty() {
                set.push(first);
            } else if set.len() > 1 {
                if let Some(any) = set.iter().find(|c| c.len() == 1 && c[0].is_any()).cloned() {
                    log::debug!("Range {:?} has an unconstrained alternative, matching any version", range);
                    set = vec![any];
                }
            }
        }

        Ok(Range {
            raw: range.to_string(),
            range: format_set(&set),
            set,
        })
    }

    /// The range matching every version
    pub fn any() -> Self {
        Range {
            raw: "*".to_string(),
            range: String::new(),
            set: vec![vec![Comparator::ANY]],
        }
    }

    /// Whether any alternative accepts `version`
    pub fn test(&self, version: &Version) -> bool {
        self.set.iter().any(|comparators| test_set(comparators, version))
    }

    /// Whether some version could satisfy both ranges
    pub fn intersects(&self, other: &Range) -> bool {
        self.set.iter().any(|these| {
            is_satisfiable(these)
                && other.set.iter().any(|those| {
                    is_satisfiable(those) && these.iter().all(|this| those.iter().all(|that| this.intersects(that)))
                })
        })
    }

    pub fn alternatives(&self) -> &[Vec<Comparator>] {
        &self.set
    }

    /// The input this range was parsed from
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

fn parse_alternative(alternative: &str) -> Result<Vec<Comparator>, ParseError> {
    let normalized = desugar::normalize(alternative)?;
    log::trace!("Normalized {:?} to {:?}", alternative, normalized);

    let gte0 = grammar::get(Token::Gte0);
    let mut comparators: Vec<Comparator> = Vec::new();
    for token in grammar::WHITESPACE.split(&normalized) {
        // >=0.0.0 is equivalent to *
        let comparator = Comparator::parse(&gte0.replace_all(token, ""))?;

        if comparator.is_null_set() {
            log::debug!("Alternative {:?} can never be satisfied", alternative);
            return Ok(vec![comparator]);
        }
        let value = comparator.to_string();
        if !comparators.iter().any(|c| c.to_string() == value) {
            comparators.push(comparator);
        }
    }

    if comparators.len() > 1 {
        comparators.retain(|c| !c.is_any());
    }

    Ok(comparators)
}

fn format_set(set: &[Vec<Comparator>]) -> String {
    set.iter()
        .map(|comparators| {
            comparators
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("||")
        .trim()
        .to_string()
}

/// Whether there is a version satisfying every comparator of the set
fn is_satisfiable(comparators: &[Comparator]) -> bool {
    let mut remaining = comparators;
    while let Some((last, rest)) = remaining.split_last() {
        if !rest.iter().all(|other| last.intersects(other)) {
            return false;
        }
        remaining = rest;
    }
    true
}

/// Test a version against one alternative.
///
/// A prerelease version only passes when some comparator of the set carries a
/// prerelease on the same `major.minor.patch`: `1.2.3-pr.2` satisfies
/// `>=1.2.3-pr.1 <2.0.0-0`, but `1.2.4-alpha` does not.
pub(crate) fn test_set(set: &[Comparator], version: &Version) -> bool {
    if !set.iter().all(|comparator| comparator.test(version)) {
        return false;
    }

    if !version.is_prerelease() {
        return true;
    }

    set.iter()
        .filter_map(Comparator::version)
        .any(|allowed| allowed.is_prerelease() && allowed.same_release(version))
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.range)
    }
}

impl FromStr for Range {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Range::parse(s)
    }
}

impl PartialEq for Range {
    fn eq(&self, other: &Self) -> bool {
        self.range == other.range
    }
}

impl Eq for Range {}

impl Hash for Range {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.range.hash(state);
    }
}
