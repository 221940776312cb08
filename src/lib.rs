//! Classic semantic version numbers.
//!
//! ## Motivation
//!
//! This crate parses version strings of the form `MAJOR.MINOR.PATCH[-PRE][+BUILD]`
//! and orders them by their numbers and a coarse pre-release classification
//! (`alpha` < `beta` < `rc` < no pre-release).
//!
//! Parsing never fails. Every input produces a [`Version`] that remembers the original string,
//! and [`Version::is_valid`] tells whether the input followed the grammar.
//! The differences to a strict semver parser include:
//!
//! - Only the identifier right after `-` is the pre-release, the rest after the first `.` is build metadata
//!   (e.g. "1.0.0-alpha.1" has pre-release "alpha" and build "1")
//! - Missing minor and patch count as 0 (e.g. "1" is valid and has the same numbers as "1.0.0")
//! - Leading zeroes are allowed in numbers (e.g. "01.2.3")
//! - The all-zero version "0.0.0" is reserved and never valid
//! - Equality is equality of the original input, not of the parsed components
//!
//! ## Examples
//!
//! ```rust
//! use semver_classic::{PreReleaseType, Version};
//!
//! let version = Version::new("1.2.3-beta+20130101133700");
//! assert!(version.is_valid());
//! assert!(!version.is_stable());
//! assert_eq!(version.pre_release_type(), PreReleaseType::Beta);
//! assert_eq!(version.to_string(), "1.2.3-beta+20130101133700");
//!
//! assert!(Version::new("1.0.0-alpha") < Version::new("1.0.0-beta"));
//! assert!(Version::new("1.0.0-rc") < Version::new("1.0.0"));
//! assert!(Version::new("2.0.0") > Version::new("1.9.9"));
//!
//! assert!(!Version::new("0.0.0").is_valid());
//! assert!(!Version::new("a.b.c").is_valid());
//! ```
//!
//! ## Feature flags
//!
//! - `serde` - Serialize and deserialize versions as strings
//! - `semver` - Convert valid versions into [`semver::Version`](https://docs.rs/semver)
//! - `logging` - Emit `tracing` events while parsing (consumers provide their own subscriber)

#![deny(
    bad_style,
    dead_code,
    improper_ctypes,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    no_mangle_generic_items,
    non_shorthand_field_patterns,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unconditional_recursion,
    unsafe_code,
    unused_allocation,
    unused_comparisons,
    unused_extern_crates,
    unused_import_braces,
    unused_parens,
    unused_qualifications,
    unused_results,
    unused,
    while_true
)]

mod error;
mod logging;
mod ordering;
mod version;

#[cfg(feature = "semver")]
pub use error::SemverError;
pub use error::Error;
pub use semver_classic_parser::{
    parse as parse_into, PreReleaseType, Segment, VersionBuilder, Violation, ViolationKind,
};
pub use version::Version;
