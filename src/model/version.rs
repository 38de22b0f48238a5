use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// A strict `major.minor.patch` triple.
///
/// Unlike [`semver::Version`], pre-release and build suffixes are rejected:
/// release tags only ever carry the three numeric components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SemanticVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl SemanticVersion {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        let invalid = || Error::InvalidVersion {
            value: value.to_string(),
        };

        let mut parts = value.split('.');
        let mut component = || -> Result<u64> {
            let part = parts.next().ok_or_else(invalid)?;
            // u64::from_str accepts a leading '+', so check the digits ourselves
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            part.parse().map_err(|_| invalid())
        };

        let major = component()?;
        let minor = component()?;
        let patch = component()?;
        if parts.next().is_some() {
            return Err(invalid());
        }

        Ok(Self::new(major, minor, patch))
    }

    /// Fails only when the patch component is already `u64::MAX`.
    pub fn next_patch(&self) -> Result<Self> {
        let patch = self.patch.checked_add(1).ok_or_else(|| Error::InvalidVersion {
            value: self.to_string(),
        })?;
        Ok(Self { patch, ..*self })
    }
}

impl FromStr for SemanticVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl From<SemanticVersion> for semver::Version {
    fn from(v: SemanticVersion) -> Self {
        semver::Version::new(v.major, v.minor, v.patch)
    }
}

/// Returns the version following `version` in the patch series.
pub fn next_patch(version: &str) -> Result<SemanticVersion> {
    SemanticVersion::parse(version)?.next_patch()
}

/// Whether `candidate` sorts after `current` under semver rules.
///
/// Returns `None` when either side is not valid semver, in which case the
/// caller has nothing to compare.
pub fn is_newer(candidate: &str, current: &str) -> Option<bool> {
    let candidate = semver::Version::parse(candidate.trim_start_matches('v')).ok()?;
    let current = semver::Version::parse(current.trim_start_matches('v')).ok()?;
    Some(candidate > current)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_patch_increments_patch_only() {
        assert_eq!(next_patch("1.2.3").unwrap(), SemanticVersion::new(1, 2, 4));
        assert_eq!(next_patch("0.0.0").unwrap().to_string(), "0.0.1");
        assert_eq!(next_patch("10.20.99").unwrap().to_string(), "10.20.100");
    }

    #[test]
    fn test_next_patch_rejects_wrong_shapes() {
        for bad in ["1.2", "a.b.c", "1.2.3.4", "", "1..3", "1.2.3-rc1", "+1.2.3", " 1.2.3", "1.2.-3"] {
            assert!(
                matches!(next_patch(bad), Err(Error::InvalidVersion { .. })),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_next_patch_at_u64_max() {
        assert!(matches!(
            next_patch("1.2.18446744073709551615"),
            Err(Error::InvalidVersion { value }) if value == "1.2.18446744073709551615"
        ));
        assert_eq!(
            next_patch("18446744073709551615.0.0").unwrap().to_string(),
            "18446744073709551615.0.1"
        );
    }

    #[test]
    fn test_parse_rejects_overflow() {
        assert!(SemanticVersion::parse("1.2.99999999999999999999999").is_err());
    }

    #[test]
    fn test_display_roundtrips() {
        let v: SemanticVersion = "4.5.6".parse().unwrap();
        assert_eq!(v.to_string(), "4.5.6");
    }

    #[test]
    fn test_semver_conversion() {
        let v: semver::Version = SemanticVersion::new(1, 2, 3).into();
        assert_eq!(v, semver::Version::new(1, 2, 3));
    }

    #[test]
    fn test_is_newer() {
        assert_eq!(is_newer("1.0.1", "1.0.0"), Some(true));
        assert_eq!(is_newer("1.0.0", "1.0.0"), Some(false));
        assert_eq!(is_newer("0.9.0", "1.0.0"), Some(false));
        assert_eq!(is_newer("v2.0.0", "1.9.9"), Some(true));
        assert_eq!(is_newer("nightly", "1.0.0"), None);
    }
}
