//! Equality and ordering of versions.
//!
//! Equality is identity of the original input.
//! Ordering looks at major, minor, patch, and the pre-release classification, in that order.
//! Two versions that differ only in their pre-release text or build metadata
//! are neither equal nor ordered, so [`PartialOrd::partial_cmp`] returns `None` for them.
use std::cmp::Ordering;

use crate::Version;

impl PartialEq for Version {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self == other {
            return Some(Ordering::Equal);
        }
        match self.cmp_classification(other) {
            Ordering::Equal => None,
            ordering => Some(ordering),
        }
    }
}

impl Version {
    /// Three-way comparison of two versions.
    ///
    /// Returns `Equal` if both versions are equal, `Greater` if `self > other`, and `Less` otherwise.
    /// Versions that are unequal but unordered, because they differ only in pre-release text
    /// or build metadata, compare as `Less` in both directions. Use [`Version::cmp_precedence`] for a total order.
    ///
    /// The result maps to `-1`, `0`, and `1` with `as i8`.
    ///
    /// ## Examples
    ///
    /// ```rust
    /// # use semver_classic::Version;
    /// use std::cmp::Ordering;
    ///
    /// let v123 = Version::new("1.2.3");
    /// let v124 = Version::new("1.2.4");
    /// let rc = Version::new("1.2.3-rc");
    ///
    /// assert_eq!(v124.compare_to(&v123), Ordering::Greater);
    /// assert_eq!(rc.compare_to(&v123), Ordering::Less);
    /// assert_eq!(v123.compare_to(&Version::new("1.2.3")), Ordering::Equal);
    /// assert_eq!(v123.compare_to(&v124) as i8, -1);
    /// ```
    pub fn compare_to(&self, other: &Self) -> Ordering {
        if self == other {
            Ordering::Equal
        } else if self > other {
            Ordering::Greater
        } else {
            Ordering::Less
        }
    }

    /// Total order over versions following semantic version precedence.
    ///
    /// Starts like [`PartialOrd`], then breaks ties by comparing the pre-release text
    /// and the build text identifier by identifier, and finally the original input.
    /// Returns `Equal` only for equal versions.
    ///
    /// ## Examples
    ///
    /// ```rust
    /// # use semver_classic::Version;
    /// let mut versions = ["1.0.0", "1.0.0-beta.11", "1.0.0-alpha.1", "1.0.0-beta.2", "1.0.0-alpha"]
    ///     .iter()
    ///     .map(|v| Version::new(v))
    ///     .collect::<Vec<_>>();
    ///
    /// versions.sort_by(Version::cmp_precedence);
    ///
    /// let sorted = versions.iter().map(|v| v.as_str()).collect::<Vec<_>>();
    /// assert_eq!(sorted, ["1.0.0-alpha", "1.0.0-alpha.1", "1.0.0-beta.2", "1.0.0-beta.11", "1.0.0"]);
    /// ```
    pub fn cmp_precedence(&self, other: &Self) -> Ordering {
        self.cmp_classification(other)
            .then_with(|| cmp_identifiers(self.pre_release(), other.pre_release()))
            .then_with(|| cmp_identifiers(self.build(), other.build()))
            .then_with(|| self.as_str().cmp(other.as_str()))
    }

    fn cmp_classification(&self, other: &Self) -> Ordering {
        self.major()
            .cmp(&other.major())
            .then_with(|| self.minor().cmp(&other.minor()))
            .then_with(|| self.patch().cmp(&other.patch()))
            .then_with(|| self.pre_release_type().cmp(&other.pre_release_type()))
    }
}

/// Missing text sorts lowest, otherwise the dot-separated identifiers are compared in turn.
fn cmp_identifiers(lhs: &str, rhs: &str) -> Ordering {
    match (lhs.is_empty(), rhs.is_empty()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => IdentifierCmp {
            lhs: lhs.split('.'),
            rhs: rhs.split('.'),
        }
        .find(|c| *c != Ordering::Equal)
        .unwrap_or(Ordering::Equal),
    }
}

struct IdentifierCmp<I, J> {
    lhs: I,
    rhs: J,
}

impl<'input, I, J> Iterator for IdentifierCmp<I, J>
where
    I: Iterator<Item = &'input str>,
    J: Iterator<Item = &'input str>,
{
    type Item = Ordering;

    /// Identifiers consisting of only digits are compared numerically.
    /// Identifiers with letters or hyphens are compared lexically in ASCII sort order.
    /// Numeric identifiers always have lower precedence than non-numeric identifiers.
    /// A larger set of identifiers has a higher precedence than a smaller set, if all of the preceding identifiers are equal.
    fn next(&mut self) -> Option<Self::Item> {
        match (self.lhs.next(), self.rhs.next()) {
            (None, None) => None,
            (Some(_), None) => Some(Ordering::Greater),
            (None, Some(_)) => Some(Ordering::Less),
            (Some(a), Some(b)) => Some(match (numeric(a), numeric(b)) {
                (Some(a), Some(ref b)) => a.cmp(b),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => a.cmp(b),
            }),
        }
    }
}

fn numeric(identifier: &str) -> Option<u64> {
    if !identifier.is_empty() && identifier.bytes().all(|b| b.is_ascii_digit()) {
        identifier.parse().ok()
    } else {
        None
    }
}
