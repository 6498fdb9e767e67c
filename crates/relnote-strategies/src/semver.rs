//! SemVer version strategy

use std::collections::HashSet;

use relnote_core::config::{Config, VersioningConfig};
use relnote_core::error::VersionError;
use relnote_core::{CommitLogEntry, CommitMessage};
use semver::{BuildMetadata, Prerelease, Version};
use tracing::{debug, instrument};

use crate::traits::VersionStrategy;
use crate::types::{BumpType, VersionDecision};

/// Semantic Versioning strategy driven by commit type rules.
///
/// The type sets are built once from configuration; resolving versions does
/// not touch shared state, so one strategy can serve many threads.
#[derive(Debug, Clone)]
pub struct SemVerStrategy {
    major_types: HashSet<String>,
    minor_types: HashSet<String>,
    patch_types: HashSet<String>,
    known_types: HashSet<String>,
    unknown_as_patch: bool,
}

impl SemVerStrategy {
    /// Create a strategy from versioning rules and the known commit types
    pub fn new(versioning: &VersioningConfig, known_types: &[String]) -> Self {
        Self {
            major_types: versioning.update_major.iter().cloned().collect(),
            minor_types: versioning.update_minor.iter().cloned().collect(),
            patch_types: versioning.update_patch.iter().cloned().collect(),
            known_types: known_types.iter().cloned().collect(),
            unknown_as_patch: versioning.unknown_as_patch(),
        }
    }

    /// Create a strategy from the full configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.versioning, &config.commit_message.types)
    }
}

impl Default for SemVerStrategy {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl VersionStrategy for SemVerStrategy {
    fn parse(&self, version: &str) -> Result<Version, VersionError> {
        let version = version.strip_prefix('v').unwrap_or(version);
        if version.is_empty() {
            return Ok(Version::new(0, 0, 0));
        }

        Version::parse(version)
            .or_else(|e| pad_components(version).ok_or(e))
            .map_err(|e| VersionError::ParseFailed(version.to_string(), e.to_string()))
    }

    fn bump(&self, current: &Version, bump_type: BumpType) -> Result<Version, VersionError> {
        let overflow = || VersionError::Overflow(current.to_string());
        let mut result = current.clone();

        match bump_type {
            BumpType::Major => {
                result.major = result.major.checked_add(1).ok_or_else(overflow)?;
                result.minor = 0;
                result.patch = 0;
            }
            BumpType::Minor => {
                result.minor = result.minor.checked_add(1).ok_or_else(overflow)?;
                result.patch = 0;
            }
            BumpType::Patch => {
                // A prerelease is released as-is
                if result.pre.is_empty() {
                    result.patch = result.patch.checked_add(1).ok_or_else(overflow)?;
                }
            }
            BumpType::None => return Ok(result),
        }

        result.pre = Prerelease::EMPTY;
        result.build = BuildMetadata::EMPTY;
        Ok(result)
    }

    fn classify(&self, message: &CommitMessage) -> BumpType {
        let commit_type = message.commit_type.as_str();

        if message.is_breaking_change || self.major_types.contains(commit_type) {
            BumpType::Major
        } else if self.minor_types.contains(commit_type) {
            BumpType::Minor
        } else if self.patch_types.contains(commit_type) {
            BumpType::Patch
        } else if self.unknown_as_patch && !self.known_types.contains(commit_type) {
            BumpType::Patch
        } else {
            BumpType::None
        }
    }

    #[instrument(skip(self, commits), fields(commit_count = commits.len()))]
    fn next_version(
        &self,
        current: Option<&Version>,
        commits: &[CommitLogEntry],
    ) -> Result<VersionDecision, VersionError> {
        let bump_type = self.aggregate(commits);
        let updated = bump_type != BumpType::None;

        let version = current
            .map(|current| {
                let next = self.bump(current, bump_type)?;
                // no 0.0.x releases: at least a minor bump while major and minor are zero
                if next.major == 0 && next.minor == 0 {
                    self.bump(current, BumpType::Minor)
                } else {
                    Ok(next)
                }
            })
            .transpose()?;

        debug!(
            current = ?current.map(ToString::to_string),
            next = ?version.as_ref().map(ToString::to_string),
            %bump_type,
            updated,
            "resolved next version"
        );

        Ok(VersionDecision {
            version,
            bump_type,
            updated,
        })
    }
}

/// Accept `1` and `1.2` as `1.0.0` and `1.2.0`
fn pad_components(version: &str) -> Option<Version> {
    let parts: Vec<&str> = version.split('.').collect();
    if parts.len() >= 3 || parts.iter().any(|p| p.parse::<u64>().is_err()) {
        return None;
    }

    let mut numbers = parts.iter().filter_map(|p| p.parse::<u64>().ok());
    Some(Version::new(
        numbers.next().unwrap_or(0),
        numbers.next().unwrap_or(0),
        numbers.next().unwrap_or(0),
    ))
}
