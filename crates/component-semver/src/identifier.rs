//! Prerelease and build identifiers

use std::cmp::Ordering;
use std::fmt;

/// A single dot-separated prerelease identifier.
///
/// Numeric identifiers always sort below alphanumeric ones; two numeric
/// identifiers compare by value and two alphanumeric ones by plain string
/// ordering. The derived `Ord` relies on the variant order for this.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Identifier {
    Numeric(u64),
    AlphaNumeric(String),
}

impl Identifier {
    /// Parse an identifier, turning all-digit strings into numbers.
    ///
    /// Returns `None` when an all-digit identifier does not fit in a `u64`.
    pub fn parse(id: &str) -> Option<Self> {
        if !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()) {
            id.parse().ok().map(Identifier::Numeric)
        } else {
            Some(Identifier::AlphaNumeric(id.to_string()))
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Identifier::Numeric(_))
    }
}

impl From<&str> for Identifier {
    /// Like [`Identifier::parse`], but keeps oversized numbers as text
    fn from(id: &str) -> Self {
        Identifier::parse(id).unwrap_or_else(|| Identifier::AlphaNumeric(id.to_string()))
    }
}

impl From<u64> for Identifier {
    fn from(n: u64) -> Self {
        Identifier::Numeric(n)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Numeric(n) => write!(f, "{}", n),
            Identifier::AlphaNumeric(s) => f.write_str(s),
        }
    }
}

/// Compare two textual identifiers the way build metadata is ordered.
///
/// Identifiers that parse as integers compare numerically and sort below
/// non-numeric ones; everything else compares as strings.
pub fn compare_identifiers(a: &str, b: &str) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }

    match (a.parse::<i64>().ok(), b.parse::<i64>().ok()) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}
