//! Semantic version and range engine for component dependency resolution
//!
//! This crate parses strict `MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]` versions
//! and node-style ranges (`^1.2.3`, `~1.2`, `1.x`, `1.0.0 - 2.0.0`,
//! `>=1.0.0 <2.0.0 || >=3.0.0`), and answers whether a version satisfies a
//! range or whether two ranges overlap.
//!
//! ```
//! use component_semver::{Range, Version};
//!
//! let range = Range::parse("^1.2.3").unwrap();
//! assert_eq!(range.to_string(), ">=1.2.3 <2.0.0-0");
//! assert!(range.test(&Version::parse("1.4.0").unwrap()));
//! ```

mod comparator;
mod error;
pub mod grammar;
mod identifier;
mod operator;
mod range;
mod semver;
mod serde_impl;
mod version;

pub use comparator::Comparator;
pub use error::{InvalidArgument, ParseError, SemverError};
pub use identifier::{compare_identifiers, Identifier};
pub use operator::Operator;
pub use range::Range;
pub use semver::Semver;
pub use version::{ReleaseKind, Version};
