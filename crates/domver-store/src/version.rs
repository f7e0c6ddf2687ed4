//! Semantic-version ordering.
//!
//! Snapshot versions are plain strings on the wire; listing and
//! latest-lookup need an ascending semantic order. Numeric
//! major.minor.patch compare first; a release orders after any pre-release
//! of the same triple; pre-release tags compare ordinally.

use std::cmp::Ordering;

/// A parsed semantic version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub pre_release: Option<String>,
}

impl Version {
    /// Parse a version string of the form `major[.minor[.patch]][-pre]`.
    ///
    /// Returns `None` when any numeric component fails to parse; callers
    /// fall back to lexical ordering for such strings.
    pub fn parse(input: &str) -> Option<Version> {
        let (numbers, pre_release) = match input.split_once('-') {
            Some((head, tail)) => (head, Some(tail.to_string())),
            None => (input, None),
        };

        let mut parts = numbers.split('.');
        let major = parts.next()?.parse().ok()?;
        let minor = match parts.next() {
            Some(p) => p.parse().ok()?,
            None => 0,
        };
        let patch = match parts.next() {
            Some(p) => p.parse().ok()?,
            None => 0,
        };
        if parts.next().is_some() {
            return None;
        }

        Some(Version {
            major,
            minor,
            patch,
            pre_release,
        })
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch)
            .cmp(&(other.major, other.minor, other.patch))
            .then_with(|| match (&self.pre_release, &other.pre_release) {
                (None, None) => Ordering::Equal,
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (Some(a), Some(b)) => a.cmp(b),
            })
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Compare two version strings for ascending semantic order.
///
/// Unparseable versions sort after parseable ones, lexically among
/// themselves, so listings stay total and deterministic.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    match (Version::parse(a), Version::parse(b)) {
        (Some(va), Some(vb)) => va.cmp(&vb).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}
