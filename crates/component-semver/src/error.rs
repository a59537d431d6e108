//! Error types for version and range parsing

use thiserror::Error;

/// Error raised when a version, comparator or range string is malformed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Version \"{0}\" is not valid")]
    InvalidVersion(String),
    #[error("Invalid comparator {0}")]
    InvalidComparator(String),
    #[error("Invalid SemVer range {0}")]
    InvalidRange(String),
    #[error("Invalid operator {0}")]
    InvalidOperator(String),
}

impl ParseError {
    /// The offending input
    pub fn input(&self) -> &str {
        match self {
            ParseError::InvalidVersion(s)
            | ParseError::InvalidComparator(s)
            | ParseError::InvalidRange(s)
            | ParseError::InvalidOperator(s) => s,
        }
    }
}

/// Error raised for an unknown increment kind
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid increment argument: {0}")]
pub struct InvalidArgument(pub String);

/// Any error produced by this crate
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SemverError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument),
}
