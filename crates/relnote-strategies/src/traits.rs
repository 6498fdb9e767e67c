//! Version strategy traits

use relnote_core::error::VersionError;
use relnote_core::{CommitLogEntry, CommitMessage};

use crate::types::{BumpType, VersionDecision};

/// Trait for version strategies
pub trait VersionStrategy: Send + Sync {
    /// Parse a version string, as found in a tag name
    fn parse(&self, version: &str) -> Result<semver::Version, VersionError>;

    /// Apply a bump to a version
    fn bump(
        &self,
        current: &semver::Version,
        bump_type: BumpType,
    ) -> Result<semver::Version, VersionError>;

    /// Bump level a single commit calls for
    fn classify(&self, message: &CommitMessage) -> BumpType;

    /// Highest bump level over a commit list
    fn aggregate(&self, commits: &[CommitLogEntry]) -> BumpType {
        commits
            .iter()
            .map(|c| self.classify(&c.message))
            .max()
            .unwrap_or(BumpType::None)
    }

    /// Resolve the next version from the current one and the commits since it
    fn next_version(
        &self,
        current: Option<&semver::Version>,
        commits: &[CommitLogEntry],
    ) -> Result<VersionDecision, VersionError>;

    /// Check if a version string is valid for this strategy
    fn is_valid(&self, version: &str) -> bool {
        self.parse(version).is_ok()
    }
}
