use std::{fmt::Display, ops::Range};

use semver_classic_parser::{Violation, ViolationKind};

/// Describes why a version string is invalid
/// and the location of the input where that was detected.
///
/// # Example
///
/// ```rust
/// # use semver_classic::Version;
/// let error = Version::parse("1.2.x").unwrap_err();
/// assert_eq!(error.to_string(), "Unexpected `x` in the patch segment");
///
/// let error = Version::parse("0.0.0").unwrap_err();
/// assert_eq!(error.to_string(), "The version `0.0.0` is all zero, which is reserved for no version");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    input: String,
    violation: Violation,
}

impl Error {
    pub(crate) fn new(input: String, violation: Violation) -> Self {
        Self { input, violation }
    }

    /// Returns the original input line.
    #[inline]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Returns range into the input string that points to the erroneous input.
    ///
    /// # Examples
    ///
    /// ```rust
    /// let error = semver_classic::Version::parse("1.2.3+b!").unwrap_err();
    /// assert_eq!(error.error_span(), 7..8);
    /// ```
    #[inline]
    pub fn error_span(&self) -> Range<usize> {
        self.violation.span()
    }

    /// Returns the kind of error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use semver_classic::{Segment, Version, ViolationKind};
    ///
    /// assert_eq!(
    ///     Version::parse("").unwrap_err().error_kind(),
    ///     ViolationKind::EmptyInput
    /// );
    /// assert_eq!(
    ///     Version::parse("1.a").unwrap_err().error_kind(),
    ///     ViolationKind::UnexpectedCharacter(Segment::Minor)
    /// );
    /// assert_eq!(
    ///     Version::parse("0.0").unwrap_err().error_kind(),
    ///     ViolationKind::AllZero
    /// );
    /// ```
    #[inline]
    pub fn error_kind(&self) -> ViolationKind {
        self.violation.kind()
    }

    /// Returns a slice from the original input line that triggered the error.
    #[inline]
    pub fn erroneous_input(&self) -> &str {
        self.violation.erroneous_input(&self.input)
    }

    /// Returns a text representation of the error.
    ///
    /// This is equivalent to the [`Display`] implementation, which can be further customized with format specifiers.
    ///
    /// ```rust
    /// let error = semver_classic::Version::parse("1?").unwrap_err();
    /// assert_eq!(error.error_line(), "Unexpected `?` in the major segment");
    /// assert_eq!(format!("{:-^40}", error), "--Unexpected `?` in the major segment---");
    /// ```
    pub fn error_line(&self) -> String {
        match self.violation.kind() {
            ViolationKind::UnexpectedCharacter(segment) => format!(
                "Unexpected `{}` in the {} segment",
                self.erroneous_input(),
                segment
            ),
            ViolationKind::AllZero => format!(
                "The version `{}` is all zero, which is reserved for no version",
                self.input
            ),
            kind => kind.to_string(),
        }
    }

    /// Returns a caret line indicating the erroneous input if it was written under the original input line.
    ///
    /// # Examples
    ///
    /// ```rust
    /// let error = semver_classic::Version::parse("1.2.3 bar").unwrap_err();
    /// assert_eq!(error.indicate_erroneous_input(), "~~~~~^");
    ///
    /// let error = semver_classic::Version::parse("0.0.0").unwrap_err();
    /// assert_eq!(error.indicate_erroneous_input(), "^^^^^");
    /// ```
    pub fn indicate_erroneous_input(&self) -> String {
        let span = self.error_span();
        format!(
            "{0:~<start$}{0:^<width$}",
            "",
            start = self.input[..span.start].chars().count(),
            width = self.erroneous_input().chars().count()
        )
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(&self.error_line())?;
        if f.alternate() {
            writeln!(f)?;
            writeln!(f, "|    {}", self.input)?;
            writeln!(f, "|    {}", self.indicate_erroneous_input())?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {}

/// Possible errors when converting into a [`semver::Version`].
#[cfg(feature = "semver")]
#[derive(Debug)]
pub enum SemverError {
    /// The version itself is invalid
    Invalid(Error),
    /// The `semver` crate rejected the pre-release or build segment
    Rejected(semver::Error),
}

#[cfg(feature = "semver")]
impl From<semver::Error> for SemverError {
    fn from(error: semver::Error) -> Self {
        SemverError::Rejected(error)
    }
}

#[cfg(feature = "semver")]
impl Display for SemverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SemverError::Invalid(error) => error.fmt(f),
            SemverError::Rejected(error) => error.fmt(f),
        }
    }
}

#[cfg(feature = "semver")]
impl std::error::Error for SemverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SemverError::Invalid(error) => Some(error),
            SemverError::Rejected(error) => Some(error),
        }
    }
}
