//! Engine version information

use std::fmt;

/// Release tier of a version
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Tier {
    /// Tier could not be determined
    #[default]
    Unknown,
    /// Pre-alpha / nightly build
    PreAlpha,
    /// Alpha build
    Alpha,
    /// Beta build
    Beta,
    /// Release build
    Release,
}

impl Tier {
    /// Short lowercase tag used in version strings
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::PreAlpha => "prealpha",
            Self::Alpha => "alpha",
            Self::Beta => "beta",
            Self::Release => "release",
        }
    }
}

/// Version number with a release tier.
///
/// Versions order lexicographically by major, minor, revision, then tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    /// Major version number
    pub major: u32,
    /// Minor version number
    pub minor: u32,
    /// Revision number
    pub revision: u32,
    /// Release tier
    pub tier: Tier,
}

impl Version {
    /// Create a new version
    #[must_use]
    pub const fn new(major: u32, minor: u32, revision: u32, tier: Tier) -> Self {
        Self {
            major,
            minor,
            revision,
            tier,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}-{}",
            self.major,
            self.minor,
            self.revision,
            self.tier.tag()
        )
    }
}
