//! Parser for classic `MAJOR.MINOR.PATCH[-PRE][+BUILD]` version strings.
//!
//! The parser is a single left-to-right scan over the input driven by an explicit state machine.
//! It never fails: every input produces a version, and the first rule the input broke
//! is reported to the builder as a [`Violation`].
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

use std::{fmt::Display, ops::Range};

/// Parse a string slice into a Version.
///
/// The grammar is the dotted triple with optional pre-release and build suffixes:
///
/// | Segment     | Accepts            | Leaves on                                  |
/// |-------------|--------------------|--------------------------------------------|
/// | major       | `0-9`              | `.` to minor                               |
/// | minor       | `0-9`              | `.` to patch                               |
/// | patch       | `0-9`              | `-` to pre-release, `+` to build           |
/// | pre-release | `0-9A-Za-z-`       | `.` or `+` to build                        |
/// | build       | `0-9A-Za-z-`       | never                                      |
///
/// Some consequences of this grammar:
///
/// - Only the identifier directly after `-` is the pre-release, anything after the first `.`
///   is build metadata (e.g. "1.0.0-alpha.1" has pre-release "alpha" and build "1")
/// - Missing numeric segments count as 0 (e.g. "1" is 1.0.0)
/// - Unexpected characters do not stop the scan, they are kept in their segment
/// - The all-zero version is never valid
///
/// ## Examples
///
/// ```rust
/// # use semver_classic_parser::{VersionBuilder, Violation, ViolationKind};
/// #[derive(Debug, Default, PartialEq)]
/// struct Triple {
///     numbers: [u64; 3],
///     violation: Option<ViolationKind>,
/// }
///
/// impl VersionBuilder<'_> for Triple {
///     type Out = Self;
///
///     fn new(_input: &str) -> Self {
///         Self::default()
///     }
///
///     fn set_major(&mut self, major: u64) {
///         self.numbers[0] = major;
///     }
///
///     fn set_minor(&mut self, minor: u64) {
///         self.numbers[1] = minor;
///     }
///
///     fn set_patch(&mut self, patch: u64) {
///         self.numbers[2] = patch;
///     }
///
///     fn reject(&mut self, violation: Violation) {
///         self.violation = Some(violation.kind());
///     }
///
///     fn build(self) -> Self::Out {
///         self
///     }
/// }
///
/// let version = semver_classic_parser::parse::<Triple>("1.2.3-beta+42");
/// assert_eq!(version.numbers, [1, 2, 3]);
/// assert_eq!(version.violation, None);
///
/// let version = semver_classic_parser::parse::<Triple>("0.0.0");
/// assert_eq!(version.violation, Some(ViolationKind::AllZero));
/// ```
pub fn parse<'input, V>(input: &'input str) -> V::Out
where
    V: VersionBuilder<'input>,
{
    let mut version = V::new(input);

    if input.is_empty() {
        version.reject(Violation::new(ViolationKind::EmptyInput, Span::default()));
        return version.build();
    }

    let mut segments = Segments::default();
    let mut violation = None;
    let mut state = Segment::Major;

    for (pos, ch) in input.char_indices() {
        let span = Span::new(pos, pos + ch.len_utf8());
        match state.transition(ch) {
            Step::Enter(next) => {
                segments.enter(next, span.end);
                state = next;
            }
            Step::Accept => segments.extend(state, span.end),
            Step::Reject => {
                segments.extend(state, span.end);
                if violation.is_none() {
                    violation = Some(Violation::new(
                        ViolationKind::UnexpectedCharacter(state),
                        span,
                    ));
                }
            }
        }
    }

    let pre_release = segments.pre_release.at(input);
    version.set_pre_release(pre_release);
    version.set_build(segments.build.at(input));

    let violation = violation.or_else(|| {
        let major = to_number(segments.major.at(input));
        let minor = to_number(segments.minor.at(input));
        let patch = to_number(segments.patch.at(input));

        version.set_major(major);
        version.set_minor(minor);
        version.set_patch(patch);
        version.set_pre_release_type(PreReleaseType::classify(pre_release));

        if major == 0 && minor == 0 && patch == 0 {
            Some(Violation::new(
                ViolationKind::AllZero,
                Span::new(0, input.len()),
            ))
        } else {
            None
        }
    });

    if let Some(violation) = violation {
        version.reject(violation);
    }

    version.build()
}

/// Trait to abstract over version building.
///
/// The parser reports each segment it found to the builder.
/// Numbers and the pre-release classification are only reported when every character
/// of the input conformed to the grammar. The segment texts are always reported,
/// for invalid input they echo whatever the scan accumulated.
///
/// Most methods have a default implementation that does nothing and ignores the input.
/// This can be used to implement some form of validation without needing to keep the result.
///
/// ## Example
///
/// ```rust
/// # use semver_classic_parser::{PreReleaseType, VersionBuilder, Violation};
/// struct IsStable(bool);
///
/// impl VersionBuilder<'_> for IsStable {
///     type Out = bool;
///
///     fn new(_input: &str) -> Self {
///         IsStable(false)
///     }
///
///     fn set_pre_release_type(&mut self, pre_release_type: PreReleaseType) {
///         self.0 = pre_release_type.is_stable();
///     }
///
///     fn reject(&mut self, _violation: Violation) {
///         self.0 = false;
///     }
///
///     fn build(self) -> Self::Out {
///         self.0
///     }
/// }
///
/// fn is_stable(v: &str) -> bool {
///     semver_classic_parser::parse::<IsStable>(v)
/// }
///
/// assert!(is_stable("1.2.3"));
/// assert!(is_stable("1.2.3+build"));
/// assert!(!is_stable("1.2.3-rc"));
/// assert!(!is_stable("1.2.x"));
/// ```
pub trait VersionBuilder<'input> {
    /// The return type of the final version.
    type Out;

    /// Construct a new version builder for the given input.
    ///
    /// The function must not fail.
    fn new(input: &'input str) -> Self;

    /// Set the major version component.
    #[allow(unused)]
    fn set_major(&mut self, major: u64) {}

    /// Set the minor version component.
    #[allow(unused)]
    fn set_minor(&mut self, minor: u64) {}

    /// Set the patch version component.
    #[allow(unused)]
    fn set_patch(&mut self, patch: u64) {}

    /// Set the classification of the pre-release segment.
    #[allow(unused)]
    fn set_pre_release_type(&mut self, pre_release_type: PreReleaseType) {}

    /// Set the pre-release segment, which might be empty.
    ///
    /// This is called exactly once, before any of the numbers are set.
    #[allow(unused)]
    fn set_pre_release(&mut self, pre_release: &'input str) {}

    /// Set the build segment, which might be empty.
    ///
    /// This is called exactly once, before any of the numbers are set.
    #[allow(unused)]
    fn set_build(&mut self, build: &'input str) {}

    /// Mark the version as invalid.
    ///
    /// Called at most once, with the first violation found in the input.
    #[allow(unused)]
    fn reject(&mut self, violation: Violation) {}

    /// Construct the final version.
    fn build(self) -> Self::Out;
}

/// Coarse classification of the pre-release segment.
///
/// The variants are ordered by precedence, a version without pre-release
/// ranks above every pre-release.
///
/// ```rust
/// # use semver_classic_parser::PreReleaseType;
/// assert!(PreReleaseType::Alpha < PreReleaseType::Beta);
/// assert!(PreReleaseType::Beta < PreReleaseType::Rc);
/// assert!(PreReleaseType::Rc < PreReleaseType::None);
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PreReleaseType {
    /// `alpha`, and any pre-release that is not otherwise recognized
    Alpha,
    /// `beta`
    Beta,
    /// `rc`
    Rc,
    /// No pre-release at all
    None,
}

impl PreReleaseType {
    /// Classify the text of a pre-release segment.
    ///
    /// The match is exact and case-sensitive.
    /// Text that is neither `alpha`, `beta`, nor `rc` falls back to [`PreReleaseType::Alpha`].
    ///
    /// ```rust
    /// # use semver_classic_parser::PreReleaseType;
    /// assert_eq!(PreReleaseType::classify(""), PreReleaseType::None);
    /// assert_eq!(PreReleaseType::classify("rc"), PreReleaseType::Rc);
    /// assert_eq!(PreReleaseType::classify("RC"), PreReleaseType::Alpha);
    /// assert_eq!(PreReleaseType::classify("snapshot"), PreReleaseType::Alpha);
    /// ```
    pub fn classify(pre_release: &str) -> Self {
        match pre_release {
            "" => PreReleaseType::None,
            "alpha" => PreReleaseType::Alpha,
            "beta" => PreReleaseType::Beta,
            "rc" => PreReleaseType::Rc,
            _ => PreReleaseType::Alpha,
        }
    }

    /// Returns true if this classification stands for a release without pre-release.
    pub fn is_stable(self) -> bool {
        self == PreReleaseType::None
    }
}

impl Default for PreReleaseType {
    fn default() -> Self {
        PreReleaseType::Alpha
    }
}

impl Display for PreReleaseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PreReleaseType::Alpha => f.pad("alpha"),
            PreReleaseType::Beta => f.pad("beta"),
            PreReleaseType::Rc => f.pad("rc"),
            PreReleaseType::None => f.pad("none"),
        }
    }
}

/// The segments of a version string, which are also the states of the parser.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Segment {
    /// The major number
    Major,
    /// The minor number
    Minor,
    /// The patch number
    Patch,
    /// The pre-release identifier, following `-`
    PreRelease,
    /// The build metadata, following `+`
    Build,
}

impl Segment {
    fn transition(self, ch: char) -> Step {
        match self {
            Segment::Major => major(ch),
            Segment::Minor => minor(ch),
            Segment::Patch => patch(ch),
            Segment::PreRelease => pre_release(ch),
            Segment::Build => build(ch),
        }
    }
}

impl Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Segment::Major => f.pad("major"),
            Segment::Minor => f.pad("minor"),
            Segment::Patch => f.pad("patch"),
            Segment::PreRelease => f.pad("pre-release"),
            Segment::Build => f.pad("build"),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Step {
    /// delimiter, switch to the next segment
    Enter(Segment),
    /// character belongs to the current segment
    Accept,
    /// character is kept in the current segment, but makes the version invalid
    Reject,
}

fn major(ch: char) -> Step {
    match ch {
        '.' => Step::Enter(Segment::Minor),
        _ => digit(ch),
    }
}

fn minor(ch: char) -> Step {
    match ch {
        '.' => Step::Enter(Segment::Patch),
        _ => digit(ch),
    }
}

fn patch(ch: char) -> Step {
    match ch {
        '-' => Step::Enter(Segment::PreRelease),
        '+' => Step::Enter(Segment::Build),
        _ => digit(ch),
    }
}

fn pre_release(ch: char) -> Step {
    match ch {
        '.' | '+' => Step::Enter(Segment::Build),
        _ => identifier(ch),
    }
}

fn build(ch: char) -> Step {
    identifier(ch)
}

fn digit(ch: char) -> Step {
    if ch.is_ascii_digit() {
        Step::Accept
    } else {
        Step::Reject
    }
}

fn identifier(ch: char) -> Step {
    if ch.is_ascii_alphanumeric() || ch == '-' {
        Step::Accept
    } else {
        Step::Reject
    }
}

/// Only called on segments that consist of ascii digits.
/// Values that overflow saturate.
fn to_number(segment: &str) -> u64 {
    if segment.is_empty() {
        return 0;
    }
    segment.parse().unwrap_or(u64::MAX)
}

#[derive(Debug, Default)]
struct Segments {
    major: Span,
    minor: Span,
    patch: Span,
    pre_release: Span,
    build: Span,
}

impl Segments {
    fn span_mut(&mut self, segment: Segment) -> &mut Span {
        match segment {
            Segment::Major => &mut self.major,
            Segment::Minor => &mut self.minor,
            Segment::Patch => &mut self.patch,
            Segment::PreRelease => &mut self.pre_release,
            Segment::Build => &mut self.build,
        }
    }

    fn enter(&mut self, segment: Segment, start: usize) {
        *self.span_mut(segment) = Span::new(start, start);
    }

    fn extend(&mut self, segment: Segment, end: usize) {
        self.span_mut(segment).end = end;
    }
}

/// The first rule a version string broke and where it happened.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Violation {
    kind: ViolationKind,
    span: Span,
}

impl Violation {
    fn new(kind: ViolationKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns the kind of violation.
    #[inline]
    pub fn kind(&self) -> ViolationKind {
        self.kind
    }

    /// Returns the range into the input string that points to the erroneous input.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use semver_classic_parser::{Violation, VersionBuilder};
    /// # struct FirstViolation(Option<Violation>);
    /// # impl VersionBuilder<'_> for FirstViolation {
    /// #     type Out = Option<Violation>;
    /// #     fn new(_input: &str) -> Self { FirstViolation(None) }
    /// #     fn reject(&mut self, violation: Violation) { self.0 = Some(violation) }
    /// #     fn build(self) -> Self::Out { self.0 }
    /// # }
    /// let violation = semver_classic_parser::parse::<FirstViolation>("1.2.x").unwrap();
    /// assert_eq!(violation.span(), 4..5);
    /// ```
    #[inline]
    pub fn span(&self) -> Range<usize> {
        self.span.into()
    }

    /// Returns the slice of `input` that triggered the violation.
    ///
    /// `input` must be the string that was parsed.
    #[inline]
    pub fn erroneous_input<'input>(&self, input: &'input str) -> &'input str {
        self.span.at(input)
    }
}

impl Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.kind.fmt(f)
    }
}

/// Possible rules that a version string can break.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    /// The input was empty
    EmptyInput,
    /// A character that is not allowed in the given segment
    UnexpectedCharacter(Segment),
    /// Major, minor, and patch are all zero
    AllZero,
}

impl Display for ViolationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViolationKind::EmptyInput => f.pad("Could not parse the version: No input"),
            ViolationKind::UnexpectedCharacter(segment) => {
                f.pad(&format!("Unexpected character in the {} segment", segment))
            }
            ViolationKind::AllZero => f.pad("The all-zero version is reserved"),
        }
    }
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
struct Span {
    start: usize,
    end: usize,
}

impl Span {
    fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    fn at<'input>(&self, input: &'input str) -> &'input str {
        &input[self.start..self.end]
    }
}

impl From<Span> for Range<usize> {
    fn from(s: Span) -> Self {
        s.start..s.end
    }
}
