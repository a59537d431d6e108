//! Comparison operators for comparators

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;
use crate::version::Version;

/// Operator of a single comparator.
///
/// `""`, `"="` and `"=="` all parse to [`Operator::Eq`], which prints as the
/// empty string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Eq,
    NotEq,
    Gt,
    Gte,
    Lt,
    Lte,
    /// `===`: identical canonical strings
    ExactEq,
    /// `!==`
    ExactNotEq,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "",
            Operator::NotEq => "!=",
            Operator::Gt => ">",
            Operator::Gte => ">=",
            Operator::Lt => "<",
            Operator::Lte => "<=",
            Operator::ExactEq => "===",
            Operator::ExactNotEq => "!==",
        }
    }

    /// `>` or `>=`
    pub fn is_lower_bound(&self) -> bool {
        matches!(self, Operator::Gt | Operator::Gte)
    }

    /// `<` or `<=`
    pub fn is_upper_bound(&self) -> bool {
        matches!(self, Operator::Lt | Operator::Lte)
    }

    /// `>=` or `<=`
    pub fn is_inclusive_bound(&self) -> bool {
        matches!(self, Operator::Gte | Operator::Lte)
    }

    /// Evaluate `a <op> b`
    pub fn compare(&self, a: &Version, b: &Version) -> bool {
        match self {
            Operator::ExactEq => a.to_string() == b.to_string(),
            Operator::ExactNotEq => a.to_string() != b.to_string(),
            Operator::Eq => a == b,
            Operator::NotEq => a != b,
            Operator::Gt => a > b,
            Operator::Gte => a >= b,
            Operator::Lt => a < b,
            Operator::Lte => a <= b,
        }
    }
}

impl FromStr for Operator {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "=" | "==" => Ok(Operator::Eq),
            "!=" => Ok(Operator::NotEq),
            ">" => Ok(Operator::Gt),
            ">=" => Ok(Operator::Gte),
            "<" => Ok(Operator::Lt),
            "<=" => Ok(Operator::Lte),
            "===" => Ok(Operator::ExactEq),
            "!==" => Ok(Operator::ExactNotEq),
            _ => Err(ParseError::InvalidOperator(s.to_string())),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[test]
    fn test_from_str() {
        assert_eq!("=".parse::<Operator>(), Ok(Operator::Eq));
        assert_eq!("==".parse::<Operator>(), Ok(Operator::Eq));
        assert_eq!("".parse::<Operator>(), Ok(Operator::Eq));
        assert_eq!("!==".parse::<Operator>(), Ok(Operator::ExactNotEq));
        assert_eq!(
            "<>".parse::<Operator>(),
            Err(ParseError::InvalidOperator("<>".to_string()))
        );
    }

    #[test]
    fn test_compare() {
        assert!(Operator::Gt.compare(&v("1.25.0"), &v("1.24.0")));
        assert!(!Operator::Gt.compare(&v("1.25.0"), &v("1.25.0")));
        assert!(Operator::Gte.compare(&v("1.25.0"), &v("1.25.0")));
        assert!(Operator::Lt.compare(&v("1.25.0"), &v("1.26.0")));
        assert!(Operator::Lte.compare(&v("1.25.0"), &v("1.25.0")));
        assert!(Operator::Eq.compare(&v("1.25.0+a"), &v("1.25.0+b")));
        assert!(Operator::NotEq.compare(&v("1.25.0"), &v("1.25.0-0")));
    }

    #[test]
    fn test_exact_ignores_build_but_not_prefix() {
        assert!(Operator::ExactEq.compare(&v("v1.2.3+a"), &v("1.2.3")));
        assert!(Operator::ExactNotEq.compare(&v("1.2.3-0"), &v("1.2.3")));
    }

    #[test]
    fn test_directions() {
        assert!(Operator::Gte.is_lower_bound() && Operator::Gte.is_inclusive_bound());
        assert!(Operator::Lt.is_upper_bound() && !Operator::Lt.is_inclusive_bound());
        assert!(!Operator::Eq.is_lower_bound() && !Operator::Eq.is_upper_bound());
    }
}
