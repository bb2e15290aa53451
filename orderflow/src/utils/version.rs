//! Three-component ordered version strings.

use crate::errors::VersionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A dot-separated numeric version with exactly three components.
///
/// Missing components default to 0, so `"1"`, `"1.0"`, and `"1.0.0"`
/// compare equal. Parsing rejects more than three components and any
/// component that is empty or not a base-10 integer.
///
/// Ordering is the usual tuple ordering on `(major, minor, patch)`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Version {
    /// Major component.
    pub major: u64,
    /// Minor component.
    pub minor: u64,
    /// Patch component.
    pub patch: u64,
}

impl Version {
    /// Creates a version from explicit components.
    #[must_use]
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let components: Vec<&str> = s.split('.').collect();
        if components.len() > 3 {
            return Err(VersionError::TooManyComponents {
                found: components.len(),
                input: s.to_string(),
            });
        }
        let mut parsed = [0_u64; 3];
        for (i, component) in components.iter().enumerate() {
            parsed[i] = component
                .parse()
                .map_err(|_| VersionError::InvalidComponent {
                    component: (*component).to_string(),
                    input: s.to_string(),
                })?;
        }
        Ok(Self::new(parsed[0], parsed[1], parsed[2]))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
