//! Single version constraint

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;
use crate::grammar::{self, Token};
use crate::identifier::Identifier;
use crate::operator::Operator;
use crate::range::test_set;
use crate::version::Version;

/// One constraint such as `>=1.2.3`, or [`Comparator::ANY`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Comparator {
    operator: Operator,
    /// `None` only for the ANY comparator
    version: Option<Version>,
}

impl Comparator {
    /// Matches every version; prints as the empty string
    pub const ANY: Comparator = Comparator {
        operator: Operator::Eq,
        version: None,
    };

    pub fn new(operator: Operator, version: Version) -> Self {
        Comparator {
            operator,
            version: Some(version),
        }
    }

    /// The comparator that no version satisfies: `<0.0.0-0`
    pub fn null_set() -> Self {
        Comparator::new(
            Operator::Lt,
            Version::new(0, 0, 0).with_prerelease(vec![Identifier::Numeric(0)]),
        )
    }

    /// Parse `[<|>|<=|>=|=][ ]VERSION`, or the empty string for ANY.
    ///
    /// `==`, `===`, `!=` and `!==` are rejected here; build those comparators
    /// with [`Comparator::new`] and a parsed [`Operator`].
    pub fn parse(comp: &str) -> Result<Self, ParseError> {
        let caps = grammar::get(Token::Comparator)
            .captures(comp)
            .ok_or_else(|| ParseError::InvalidComparator(comp.to_string()))?;

        let operator: Operator = caps.get(1).map_or("", |m| m.as_str()).parse()?;

        match caps.get(2) {
            Some(version) => Ok(Comparator::new(operator, Version::parse(version.as_str())?)),
            None => Ok(Comparator::ANY),
        }
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// Bound version, `None` for ANY
    pub fn version(&self) -> Option<&Version> {
        self.version.as_ref()
    }

    pub fn is_any(&self) -> bool {
        self.version.is_none()
    }

    pub fn is_null_set(&self) -> bool {
        self.operator == Operator::Lt
            && self.version.as_ref().is_some_and(|v| {
                v.major() == 0
                    && v.minor() == 0
                    && v.patch() == 0
                    && v.prerelease() == [Identifier::Numeric(0)]
            })
    }

    pub fn test(&self, version: &Version) -> bool {
        match &self.version {
            None => true,
            Some(bound) => self.operator.compare(version, bound),
        }
    }

    /// Whether some version can satisfy both comparators
    pub fn intersects(&self, other: &Comparator) -> bool {
        // An equality comparator intersects when the other side, taken as a
        // one-comparator range, accepts its version.
        if self.operator == Operator::Eq {
            return match &self.version {
                None => true,
                Some(version) => test_set(std::slice::from_ref(other), version),
            };
        }
        if other.operator == Operator::Eq {
            return match &other.version {
                None => true,
                Some(version) => test_set(std::slice::from_ref(self), version),
            };
        }

        let (this, that) = match (&self.version, &other.version) {
            (Some(this), Some(that)) => (this, that),
            _ => return true,
        };

        let same_direction_increasing = self.operator.is_lower_bound() && other.operator.is_lower_bound();
        let same_direction_decreasing = self.operator.is_upper_bound() && other.operator.is_upper_bound();
        let same_version = this.to_string() == that.to_string();
        let different_directions_inclusive =
            self.operator.is_inclusive_bound() && other.operator.is_inclusive_bound();
        let opposite_directions_less_than =
            this < that && self.operator.is_lower_bound() && other.operator.is_upper_bound();
        let opposite_directions_greater_than =
            this > that && self.operator.is_upper_bound() && other.operator.is_lower_bound();

        same_direction_increasing
            || same_direction_decreasing
            || (same_version && different_directions_inclusive)
            || opposite_directions_less_than
            || opposite_directions_greater_than
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            None => Ok(()),
            Some(version) => write!(f, "{}{}", self.operator, version),
        }
    }
}

impl FromStr for Comparator {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Comparator::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(s: &str) -> Comparator {
        Comparator::parse(s).unwrap()
    }

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[test]
    fn test_comparator_testing() {
        let comparator = c(">=1.2.3");
        assert!(comparator.test(&v("1.2.4")));
        assert!(comparator.test(&v("1.2.3")));
        assert!(!comparator.test(&v("1.2.3-0")));
    }

    #[test]
    fn test_to_string() {
        assert_eq!(c(">= v1.2.3").to_string(), ">=1.2.3");
        assert_eq!(c("=1.2.3+build").to_string(), "1.2.3");
        assert_eq!(c("").to_string(), "");
    }

    #[test]
    fn test_eq_is_ignored() {
        assert_eq!(c("=1.2.3"), c("1.2.3"));
        assert_eq!(c("=1.2.3").operator(), Operator::Eq);
    }

    #[test]
    fn test_any_matches_anything() {
        let any = c("");
        assert!(any.is_any());
        assert_eq!(any, Comparator::ANY);
        assert!(any.test(&v("1.2.3")));
        assert!(any.test(&v("0.0.0-0")));
    }

    #[test]
    fn test_invalid_comparator() {
        let err = Comparator::parse("foo bar baz").unwrap_err();
        assert_eq!(err.to_string(), "Invalid comparator foo bar baz");
        assert!(Comparator::parse(">").is_err());
        assert!(Comparator::parse("!=1.2.3").is_err());
        assert!(Comparator::parse("1.2").is_err());
    }

    #[test]
    fn test_null_set() {
        assert!(c("<0.0.0-0").is_null_set());
        assert!(Comparator::null_set().is_null_set());
        assert_eq!(Comparator::null_set().to_string(), "<0.0.0-0");
        assert!(!c("<0.0.0").is_null_set());
        assert!(!c("<=0.0.0-0").is_null_set());
    }

    #[test]
    fn test_programmatic_operators() {
        let exact = Comparator::new(Operator::ExactEq, v("1.2.3"));
        assert_eq!(exact.to_string(), "===1.2.3");
        assert!(exact.test(&v("v1.2.3+build")));
        assert!(!exact.test(&v("1.2.4")));

        let not_eq = Comparator::new(Operator::NotEq, v("1.2.3"));
        assert!(not_eq.test(&v("1.2.4")));
        assert!(!not_eq.test(&v("1.2.3")));

        for op in ["==", "===", "!=", "!=="] {
            let text = format!("{}1.2.3", op);
            assert!(Comparator::parse(&text).is_err(), "{}", text);
            let built = Comparator::new(op.parse().unwrap(), v("1.2.3"));
            assert!(built.test(&v("1.2.3")) == op.starts_with('='), "{}", text);
        }
    }

    #[test]
    fn test_intersects() {
        assert!(c(">1.0.0").intersects(&c("<2.0.0")));
        assert!(!c("<=1.0.0").intersects(&c(">=2.0.0")));
        assert!(c(">=1.3.0").intersects(&c("<=1.3.0")));
        assert!(!c(">1.3.0").intersects(&c("<=1.3.0")));
        assert!(c("1.3.0").intersects(&c(">=1.3.0")));
        assert!(!c("1.3.0").intersects(&c(">1.3.0")));
        assert!(c("").intersects(&c(">1.0.0")));
    }

    #[test]
    fn test_prerelease_equality_against_any() {
        // The equality side is tested as a one-comparator range, so prerelease
        // gating applies against ANY.
        assert!(!c("1.2.3-pre").intersects(&Comparator::ANY));
        assert!(Comparator::ANY.intersects(&c("1.2.3-pre")));
    }
}
