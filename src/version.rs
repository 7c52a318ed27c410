use crate::error::{BumpError, Result};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Pattern a manifest version string must match in full.
pub const VERSION_PATTERN: &str = r"^\d+\.\d+\.\d+$";

fn version_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(VERSION_PATTERN).expect("version pattern is a valid regex"))
}

/// Represents a semantic version with major, minor, and patch components.
///
/// Pre-release and build-metadata suffixes are not modeled; `1.2.3-beta`
/// is rejected rather than truncated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

/// Represents the magnitude of a version bump.
///
/// Variants are ordered by priority, so `BumpLevel::Major` compares greatest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BumpLevel {
    None,
    Patch,
    Minor,
    Major,
}

impl BumpLevel {
    /// Lower-case name used in log lines.
    pub fn as_str(&self) -> &'static str {
        match self {
            BumpLevel::None => "none",
            BumpLevel::Patch => "patch",
            BumpLevel::Minor => "minor",
            BumpLevel::Major => "major",
        }
    }

    /// Whether this level changes the version at all.
    pub fn is_bump(&self) -> bool {
        *self != BumpLevel::None
    }
}

impl fmt::Display for BumpLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Version {
    /// Creates a new Version with the specified major, minor, and patch components.
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    /// Parses a strict `X.Y.Z` version string.
    ///
    /// # Returns
    /// * `Ok(Version)` - All three components parsed
    /// * `Err(BumpError::Parse)` - Wrong number of components, a non-numeric
    ///   component, or a component too large for `u64`
    pub fn parse(input: &str) -> Result<Self> {
        if !version_regex().is_match(input) {
            return Err(BumpError::parse(format!(
                "Invalid version format: '{}' - expected X.Y.Z",
                input
            )));
        }

        let mut parts = input.split('.');
        let mut next = |name: &str| -> Result<u64> {
            let part = parts.next().unwrap_or_default();
            part.parse::<u64>().map_err(|e| {
                BumpError::parse(format!("Invalid {} version '{}': {}", name, part, e))
            })
        };

        let major = next("major")?;
        let minor = next("minor")?;
        let patch = next("patch")?;

        Ok(Version::new(major, minor, patch))
    }

    /// Returns the version that follows `self` for the given bump level.
    ///
    /// - **Major**: major += 1, minor = 0, patch = 0
    /// - **Minor**: minor += 1, patch = 0
    /// - **Patch**: patch += 1
    /// - **None**: unchanged
    ///
    /// # Returns
    /// * `Err(BumpError::Parse)` - The component to increment is already `u64::MAX`
    pub fn bump(self, level: BumpLevel) -> Result<Self> {
        let next = match level {
            BumpLevel::Major => Version::new(step(self.major, "major", self)?, 0, 0),
            BumpLevel::Minor => Version::new(self.major, step(self.minor, "minor", self)?, 0),
            BumpLevel::Patch => {
                Version::new(self.major, self.minor, step(self.patch, "patch", self)?)
            }
            BumpLevel::None => self,
        };
        Ok(next)
    }
}

fn step(component: u64, name: &str, version: Version) -> Result<u64> {
    component.checked_add(1).ok_or_else(|| {
        BumpError::parse(format!(
            "Cannot bump {} version of {}: component is at its maximum",
            name, version
        ))
    })
}

impl FromStr for Version {
    type Err = BumpError;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Parses `current` and bumps it by `level`.
///
/// # Example
/// ```
/// use commit_bump::version::{increment, BumpLevel, Version};
/// assert_eq!(increment("1.2.3", BumpLevel::Minor).unwrap(), Version::new(1, 3, 0));
/// assert!(increment("1.2", BumpLevel::Patch).is_err());
/// ```
pub fn increment(current: &str, level: BumpLevel) -> Result<Version> {
    Version::parse(current)?.bump(level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert_eq!(Version::parse("1.2.3").unwrap(), Version::new(1, 2, 3));
        assert_eq!(Version::parse("0.0.0").unwrap(), Version::new(0, 0, 0));
        assert_eq!(
            "10.20.30".parse::<Version>().unwrap(),
            Version::new(10, 20, 30)
        );
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for input in [
            "1.2", "1.2.3.4", "v1.2.3", "1.2.x", "", "1..3", " 1.2.3", "1.2.3-beta", "-1.2.3",
        ] {
            let err = Version::parse(input).unwrap_err();
            assert!(
                matches!(err, BumpError::Parse(_)),
                "expected parse error for {:?}",
                input
            );
        }
    }

    #[test]
    fn test_parse_rejects_overflow() {
        let err = Version::parse("1.2.99999999999999999999").unwrap_err();
        assert!(err.to_string().contains("patch"));
    }

    #[test]
    fn test_bump_major_resets_lower_components() {
        assert_eq!(
            Version::new(1, 2, 3).bump(BumpLevel::Major).unwrap(),
            Version::new(2, 0, 0)
        );
        assert_eq!(
            Version::new(0, 9, 9).bump(BumpLevel::Major).unwrap(),
            Version::new(1, 0, 0)
        );
    }

    #[test]
    fn test_bump_minor_resets_patch() {
        assert_eq!(
            Version::new(1, 2, 3).bump(BumpLevel::Minor).unwrap(),
            Version::new(1, 3, 0)
        );
    }

    #[test]
    fn test_bump_patch() {
        assert_eq!(
            Version::new(1, 2, 3).bump(BumpLevel::Patch).unwrap(),
            Version::new(1, 2, 4)
        );
    }

    #[test]
    fn test_bump_none_is_identity() {
        for v in [Version::new(0, 0, 0), Version::new(4, 5, 6)] {
            assert_eq!(v.bump(BumpLevel::None).unwrap(), v);
        }
    }

    #[test]
    fn test_bump_laws_over_range() {
        for a in 0..4 {
            for b in 0..4 {
                for c in 0..4 {
                    let v = Version::new(a, b, c);
                    assert_eq!(v.bump(BumpLevel::Major).unwrap(), Version::new(a + 1, 0, 0));
                    assert_eq!(v.bump(BumpLevel::Minor).unwrap(), Version::new(a, b + 1, 0));
                    assert_eq!(v.bump(BumpLevel::Patch).unwrap(), Version::new(a, b, c + 1));
                }
            }
        }
    }

    #[test]
    fn test_bump_overflow_is_an_error() {
        let max = u64::MAX;
        let cases = [
            (Version::new(max, 0, 0), BumpLevel::Major, "major"),
            (Version::new(1, max, 0), BumpLevel::Minor, "minor"),
            (Version::new(1, 2, max), BumpLevel::Patch, "patch"),
        ];

        for (version, level, component) in cases {
            let err = version.bump(level).unwrap_err();
            assert!(matches!(err, BumpError::Parse(_)));
            assert!(err.to_string().contains(component));
        }
    }

    #[test]
    fn test_bump_lower_components_at_maximum() {
        let max = u64::MAX;
        assert_eq!(
            Version::new(1, max, max).bump(BumpLevel::Major).unwrap(),
            Version::new(2, 0, 0)
        );
        assert_eq!(
            Version::new(1, 2, max).bump(BumpLevel::Minor).unwrap(),
            Version::new(1, 3, 0)
        );
        assert_eq!(
            Version::new(max, max, max).bump(BumpLevel::None).unwrap(),
            Version::new(max, max, max)
        );
    }

    #[test]
    fn test_increment_rejects_maximum_patch() {
        let err = increment("1.2.18446744073709551615", BumpLevel::Patch).unwrap_err();
        assert!(matches!(err, BumpError::Parse(_)));
    }

    #[test]
    fn test_increment_parses_then_bumps() {
        assert_eq!(
            increment("1.2.3", BumpLevel::Patch).unwrap(),
            Version::new(1, 2, 4)
        );
        assert_eq!(
            increment("1.2.3", BumpLevel::None).unwrap(),
            Version::new(1, 2, 3)
        );
        assert!(matches!(
            increment("1.2", BumpLevel::Major),
            Err(BumpError::Parse(_))
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(Version::new(1, 3, 0).to_string(), "1.3.0");
        assert_eq!(BumpLevel::Major.to_string(), "major");
        assert_eq!(BumpLevel::None.to_string(), "none");
    }

    #[test]
    fn test_bump_level_priority_order() {
        assert!(BumpLevel::Major > BumpLevel::Minor);
        assert!(BumpLevel::Minor > BumpLevel::Patch);
        assert!(BumpLevel::Patch > BumpLevel::None);
        assert!(!BumpLevel::None.is_bump());
        assert!(BumpLevel::Patch.is_bump());
    }
}
