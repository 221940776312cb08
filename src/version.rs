use std::{
    fmt::{self, Display},
    hash,
    str::FromStr,
};

use semver_classic_parser::{PreReleaseType, VersionBuilder, Violation};

use crate::{
    logging::{debug, trace},
    Error,
};

/// Represents a parsed version number.
///
/// A version is always constructed, even from malformed input.
/// Use [`Version::is_valid`] before relying on any of the parsed components.
///
/// The original input is kept and is what [`Display`] prints,
/// so formatting a version reproduces the input byte for byte.
#[derive(Debug, Clone)]
pub struct Version {
    raw: String,
    major: u64,
    minor: u64,
    patch: u64,
    pre_release_type: PreReleaseType,
    pre_release: String,
    build: String,
    violation: Option<Violation>,
}

impl Version {
    /// Parse a string slice into a Version.
    ///
    /// This never fails, check [`Version::is_valid`] afterwards.
    ///
    /// ## Examples
    ///
    /// ```rust
    /// # use semver_classic::{PreReleaseType, Version};
    /// let version = Version::new("1.2.3-beta+20130101133700");
    /// assert!(version.is_valid());
    /// assert_eq!(version.major(), 1);
    /// assert_eq!(version.minor(), 2);
    /// assert_eq!(version.patch(), 3);
    /// assert_eq!(version.pre_release_type(), PreReleaseType::Beta);
    /// assert_eq!(version.pre_release(), "beta");
    /// assert_eq!(version.build(), "20130101133700");
    ///
    /// let version = Version::new("a.b.c");
    /// assert!(!version.is_valid());
    /// assert_eq!(version.major(), 0);
    /// assert_eq!(version.to_string(), "a.b.c");
    /// ```
    pub fn new(input: &str) -> Self {
        let version = semver_classic_parser::parse::<Builder>(input);
        if version.is_valid() {
            trace!(version = input, pre_release_type = %version.pre_release_type, "parsed version");
        } else {
            debug!(version = input, violation = ?version.violation, "rejected version");
        }
        version
    }

    /// Parse a string slice into a valid Version.
    ///
    /// Runs the same parser as [`Version::new`], but returns an error for invalid versions.
    ///
    /// ## Examples
    ///
    /// ```rust
    /// # use semver_classic::Version;
    /// assert!(Version::parse("1.2.3").is_ok());
    ///
    /// let error = Version::parse("1.2.3-b@d").unwrap_err();
    /// assert_eq!(error.to_string(), "Unexpected `@` in the pre-release segment");
    /// ```
    pub fn parse(input: &str) -> Result<Self, Error> {
        let version = Self::new(input);
        match version.error() {
            Some(error) => Err(error),
            None => Ok(version),
        }
    }

    /// Returns the original input.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The major version, 0 for invalid versions.
    pub fn major(&self) -> u64 {
        self.major
    }

    /// The minor version, 0 for invalid versions.
    pub fn minor(&self) -> u64 {
        self.minor
    }

    /// The patch version, 0 for invalid versions.
    pub fn patch(&self) -> u64 {
        self.patch
    }

    /// The classification of the pre-release segment.
    ///
    /// Pre-releases other than `alpha`, `beta`, or `rc` are classified as [`PreReleaseType::Alpha`].
    /// Versions with a grammar violation are never classified and report [`PreReleaseType::Alpha`].
    /// All-zero versions are invalid but keep their classification, so `"0.0.0"` reports [`PreReleaseType::None`].
    pub fn pre_release_type(&self) -> PreReleaseType {
        self.pre_release_type
    }

    /// The pre-release segment, the identifier between `-` and the first `.` or `+`.
    ///
    /// For invalid versions this is a best-effort echo of the malformed input.
    pub fn pre_release(&self) -> &str {
        &self.pre_release
    }

    /// The build segment.
    ///
    /// For invalid versions this is a best-effort echo of the malformed input.
    pub fn build(&self) -> &str {
        &self.build
    }

    /// Returns true if the whole input conformed to the grammar and is not all zero.
    pub fn is_valid(&self) -> bool {
        self.violation.is_none()
    }

    /// Returns true if this version has no pre-release.
    ///
    /// Build metadata does not matter.
    ///
    /// ## Examples
    ///
    /// ```rust
    /// # use semver_classic::Version;
    /// assert!(Version::new("1.2.3").is_stable());
    /// assert!(Version::new("1.2.3+build").is_stable());
    /// assert!(!Version::new("1.2.3-rc").is_stable());
    /// ```
    pub fn is_stable(&self) -> bool {
        self.pre_release_type.is_stable()
    }

    /// The first rule the input broke, if any.
    pub fn violation(&self) -> Option<Violation> {
        self.violation
    }

    /// An owned error describing why this version is invalid.
    pub fn error(&self) -> Option<Error> {
        self.violation
            .map(|violation| Error::new(self.raw.clone(), violation))
    }
}

/// Collects the parser output into a [`Version`].
#[derive(Debug)]
struct Builder(Version);

impl<'input> VersionBuilder<'input> for Builder {
    type Out = Version;

    fn new(input: &'input str) -> Self {
        Builder(Version {
            raw: input.to_owned(),
            major: 0,
            minor: 0,
            patch: 0,
            pre_release_type: PreReleaseType::default(),
            pre_release: String::new(),
            build: String::new(),
            violation: None,
        })
    }

    fn set_major(&mut self, major: u64) {
        self.0.major = major;
    }

    fn set_minor(&mut self, minor: u64) {
        self.0.minor = minor;
    }

    fn set_patch(&mut self, patch: u64) {
        self.0.patch = patch;
    }

    fn set_pre_release_type(&mut self, pre_release_type: PreReleaseType) {
        self.0.pre_release_type = pre_release_type;
    }

    fn set_pre_release(&mut self, pre_release: &'input str) {
        self.0.pre_release = pre_release.to_owned();
    }

    fn set_build(&mut self, build: &'input str) {
        self.0.build = build.to_owned();
    }

    fn reject(&mut self, violation: Violation) {
        self.0.violation = Some(violation);
    }

    fn build(self) -> Self::Out {
        self.0
    }
}

impl From<&str> for Version {
    fn from(input: &str) -> Self {
        Version::new(input)
    }
}

impl From<String> for Version {
    fn from(input: String) -> Self {
        Version::new(&input)
    }
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s)
    }
}

impl AsRef<str> for Version {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.raw)
    }
}

impl hash::Hash for Version {
    fn hash<H: hash::Hasher>(&self, into: &mut H) {
        self.raw.hash(into);
    }
}

#[cfg(feature = "serde")]
use serde::{
    de::{self, Deserialize, Deserializer, Visitor},
    ser::{Serialize, Serializer},
};

#[cfg(feature = "serde")]
impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

/// Deserializes any string, check [`Version::is_valid`] afterwards.
#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct VersionVisitor;

        impl<'de> Visitor<'de> for VersionVisitor {
            type Value = Version;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a version string")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Version::new(v))
            }
        }

        deserializer.deserialize_str(VersionVisitor)
    }
}

#[cfg(feature = "semver")]
impl TryFrom<&Version> for semver::Version {
    type Error = crate::SemverError;

    fn try_from(v: &Version) -> Result<Self, Self::Error> {
        if let Some(error) = v.error() {
            return Err(crate::SemverError::Invalid(error));
        }
        let pre = if v.pre_release.is_empty() {
            semver::Prerelease::EMPTY
        } else {
            semver::Prerelease::new(&v.pre_release)?
        };
        let build = if v.build.is_empty() {
            semver::BuildMetadata::EMPTY
        } else {
            semver::BuildMetadata::new(&v.build)?
        };
        Ok(semver::Version {
            major: v.major,
            minor: v.minor,
            patch: v.patch,
            pre,
            build,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Version;
    use semver_classic_parser::{PreReleaseType, Segment, ViolationKind};
    use test_case::test_case;

    #[test]
    fn test_simple_version() {
        let version = Version::new("1.2.3");
        assert!(version.is_valid());
        assert!(version.is_stable());
        assert_eq!(version.as_str(), "1.2.3");
        assert_eq!(version.major(), 1);
        assert_eq!(version.minor(), 2);
        assert_eq!(version.patch(), 3);
        assert_eq!(version.pre_release_type(), PreReleaseType::None);
        assert_eq!(version.pre_release(), "");
        assert_eq!(version.build(), "");
        assert_eq!(version.violation(), None);
    }

    #[test]
    fn test_patch_only_version() {
        let version = Version::new("0.0.1");
        assert!(version.is_valid());
        assert!(version.is_stable());
        assert_eq!(version.major(), 0);
        assert_eq!(version.minor(), 0);
        assert_eq!(version.patch(), 1);
    }

    #[test_case("a.b.c")]
    #[test_case("0.b.c")]
    #[test_case("0.1.c")]
    #[test_case("0.0.0")]
    #[test_case("")]
    fn test_simple_error_version(input: &str) {
        let version = Version::new(input);
        assert!(!version.is_valid());
        assert_eq!(version.as_str(), input);
        assert_eq!(version.major(), 0);
        assert_eq!(version.minor(), 0);
        assert_eq!(version.patch(), 0);
        assert_eq!(version.pre_release(), "");
        assert_eq!(version.build(), "");
    }

    #[test_case("0.0.0", PreReleaseType::None, true)]
    #[test_case("0.0", PreReleaseType::None, true)]
    #[test_case("0.0.0-rc", PreReleaseType::Rc, false)]
    #[test_case("0.0.0-foo+build", PreReleaseType::Alpha, false)]
    fn test_all_zero_keeps_classification(input: &str, expected: PreReleaseType, stable: bool) {
        let version = Version::new(input);
        assert!(!version.is_valid());
        assert_eq!(version.violation().map(|v| v.kind()), Some(ViolationKind::AllZero));
        assert_eq!(version.pre_release_type(), expected);
        assert_eq!(version.is_stable(), stable);
    }

    #[test]
    fn test_grammar_violation_is_unclassified() {
        let version = Version::new("1.2.3-rc!");
        assert!(!version.is_valid());
        assert_eq!(version.pre_release_type(), PreReleaseType::Alpha);
        assert!(!version.is_stable());
    }

    #[test]
    fn test_invalid_numbers_stay_zero() {
        let version = Version::new("1.2.x");
        assert!(!version.is_valid());
        assert_eq!((version.major(), version.minor(), version.patch()), (0, 0, 0));
        assert_eq!(version.pre_release_type(), PreReleaseType::Alpha);
        assert!(!version.is_stable());
    }

    #[test]
    fn test_invalid_keeps_partial_text() {
        let version = Version::new("1.2.3-be ta+bu ild");
        assert!(!version.is_valid());
        assert_eq!(version.pre_release(), "be ta");
        assert_eq!(version.build(), "bu ild");
        assert_eq!(
            version.violation().map(|v| v.kind()),
            Some(ViolationKind::UnexpectedCharacter(Segment::PreRelease))
        );
    }

    #[test]
    fn test_dotted_pre_release_is_split_into_build() {
        let version = Version::new("1.0.0-alpha.01");
        assert!(version.is_valid());
        assert!(!version.is_stable());
        assert_eq!(version.pre_release_type(), PreReleaseType::Alpha);
        assert_eq!(version.pre_release(), "alpha");
        assert_eq!(version.build(), "01");
    }

    #[test_case("1.0.0-alpha", PreReleaseType::Alpha)]
    #[test_case("1.0.0-beta", PreReleaseType::Beta)]
    #[test_case("1.0.0-rc", PreReleaseType::Rc)]
    #[test_case("1.0.0-rc.1", PreReleaseType::Rc)]
    #[test_case("1.2.3", PreReleaseType::None)]
    #[test_case("1.2.3+build", PreReleaseType::None)]
    #[test_case("1.0.0-foo", PreReleaseType::Alpha)]
    #[test_case("1.0.0-rc-beta.1", PreReleaseType::Alpha)]
    fn test_pre_release_type(input: &str, expected: PreReleaseType) {
        let version = Version::new(input);
        assert!(version.is_valid());
        assert_eq!(version.pre_release_type(), expected);
        assert_eq!(version.is_stable(), expected == PreReleaseType::None);
    }

    #[test_case("1.2.3-beta+20130101133700", "beta", "20130101133700")]
    #[test_case("1.2.3-rc-beta+20130101133700", "rc-beta", "20130101133700")]
    #[test_case("1.2.3+20130101133700", "", "20130101133700")]
    #[test_case("1.2.3+20130101133700-foo", "", "20130101133700-foo")]
    fn test_build_version(input: &str, pre: &str, build: &str) {
        let version = Version::new(input);
        assert!(version.is_valid());
        assert_eq!((version.major(), version.minor(), version.patch()), (1, 2, 3));
        assert_eq!(version.pre_release(), pre);
        assert_eq!(version.build(), build);
    }

    #[test_case("1.2.3")]
    #[test_case("1.0.0-alpha.1")]
    #[test_case("a.b.c")]
    #[test_case("")]
    #[test_case(" v1.2.3 ")]
    fn test_round_trip(input: &str) {
        let version = Version::new(input);
        assert_eq!(version.to_string(), input);
        assert_eq!(AsRef::<str>::as_ref(&version), input);
        assert_eq!(Version::from(input.to_owned()).as_str(), input);
    }

    #[test]
    fn test_display_pads() {
        let version = Version::new("1.2.3-rc");
        assert_eq!(format!("{:>10}", version), "  1.2.3-rc");
        assert_eq!(format!("{:*<10}", version), "1.2.3-rc**");
    }

    #[test]
    fn test_clone_is_independent_value() {
        let version = Version::new("1.2.4");
        let copy = version.clone();
        drop(version);
        assert!(copy.is_valid());
        assert_eq!(copy.as_str(), "1.2.4");
        assert_eq!(copy.patch(), 4);
        assert_eq!(copy.pre_release_type(), PreReleaseType::None);
    }

    #[test]
    fn test_parse_ok() {
        let version = Version::parse("1.2.3-rc").unwrap();
        assert_eq!(version.pre_release_type(), PreReleaseType::Rc);
    }

    #[test_case("", ViolationKind::EmptyInput)]
    #[test_case("0.0.0", ViolationKind::AllZero)]
    #[test_case("1.x.3", ViolationKind::UnexpectedCharacter(Segment::Minor))]
    fn test_parse_err(input: &str, kind: ViolationKind) {
        let error = Version::parse(input).unwrap_err();
        assert_eq!(error.error_kind(), kind);
        assert_eq!(input.parse::<Version>().unwrap_err(), error);
    }

    #[test]
    fn test_from_str() {
        let version: Version = "2.0.0".parse().unwrap();
        assert_eq!(version.major(), 2);
    }

    #[test]
    fn test_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Version>();
    }

    #[cfg(feature = "serde")]
    #[cfg_attr(feature = "serde", test)]
    fn test_ser() {
        let v = Version::new("1.2.3-beta+42");
        assert_eq!(r#""1.2.3-beta+42""#, serde_json::to_string(&v).unwrap());
    }

    #[cfg(feature = "serde")]
    #[cfg_attr(feature = "serde", test)]
    fn test_deser() {
        let v: Version = serde_json::from_str(r#""1.2.3""#).unwrap();
        assert_eq!(Version::new("1.2.3"), v);

        let v: Version = serde_json::from_str(r#""1.2""#).unwrap();
        assert!(v.is_valid());

        let v: Version = serde_json::from_str(r#""nope""#).unwrap();
        assert!(!v.is_valid());
        assert_eq!(v.as_str(), "nope");
    }

    #[cfg(feature = "semver")]
    #[cfg_attr(feature = "semver", test)]
    fn test_into_semver() {
        let v = Version::new("1.2.3-beta+001");
        assert_eq!(
            semver::Version::parse("1.2.3-beta+001").unwrap(),
            semver::Version::try_from(&v).unwrap()
        );

        let v = Version::new("1.2.3");
        assert_eq!(
            semver::Version::new(1, 2, 3),
            semver::Version::try_from(&v).unwrap()
        );
    }

    #[cfg(feature = "semver")]
    #[cfg_attr(feature = "semver", test)]
    fn test_into_semver_rejects_invalid() {
        let v = Version::new("0.0.0");
        assert!(matches!(
            semver::Version::try_from(&v),
            Err(crate::SemverError::Invalid(_))
        ));

        // numeric pre-release identifiers with leading zeros are not allowed by semver
        let v = Version::new("1.2.3-01");
        assert!(v.is_valid());
        assert!(matches!(
            semver::Version::try_from(&v),
            Err(crate::SemverError::Rejected(_))
        ));
    }
}
