//! Version strategy types

use serde::{Deserialize, Serialize};

/// Magnitude of the version increment a commit calls for.
///
/// Variants are declared in increasing order so that `Ord` yields
/// `Major > Minor > Patch > None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BumpType {
    /// No bump needed
    None,
    /// Patch version bump (fixes and maintenance)
    Patch,
    /// Minor version bump (new features)
    Minor,
    /// Major version bump (breaking changes)
    Major,
}

impl std::fmt::Display for BumpType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Major => write!(f, "major"),
            Self::Minor => write!(f, "minor"),
            Self::Patch => write!(f, "patch"),
            Self::None => write!(f, "none"),
        }
    }
}

/// Outcome of resolving the next version
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionDecision {
    /// Next version; absent when no current version was given
    pub version: Option<semver::Version>,
    /// Highest bump level found in the commits
    pub bump_type: BumpType,
    /// Whether any commit calls for a release
    pub updated: bool,
}
