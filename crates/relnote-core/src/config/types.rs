//! Configuration types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::ISSUE_METADATA_KEY;

/// Main configuration for relnote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Version of the config schema
    pub version: String,

    /// Console log level used when RUST_LOG is unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    /// Version bump rules
    pub versioning: VersioningConfig,

    /// Tag naming
    pub tag: TagConfig,

    /// Release note sections
    pub release_notes: ReleaseNotesConfig,

    /// Branch rules
    pub branches: BranchesConfig,

    /// Commit message rules
    pub commit_message: CommitMessageConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.1".to_string(),
            log_level: None,
            versioning: VersioningConfig::default(),
            tag: TagConfig::default(),
            release_notes: ReleaseNotesConfig::default(),
            branches: BranchesConfig::default(),
            commit_message: CommitMessageConfig::default(),
        }
    }
}

/// Commit types driving each bump level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct VersioningConfig {
    /// Types that bump the major version
    pub update_major: Vec<String>,

    /// Types that bump the minor version
    pub update_minor: Vec<String>,

    /// Types that bump the patch version
    pub update_patch: Vec<String>,

    /// Whether types outside the known list are ignored instead of counted as patch
    pub ignore_unknown: bool,
}

impl VersioningConfig {
    /// Whether unknown commit types count as patch-level
    pub fn unknown_as_patch(&self) -> bool {
        !self.ignore_unknown
    }
}

impl Default for VersioningConfig {
    fn default() -> Self {
        Self {
            update_major: Vec::new(),
            update_minor: strings(&["feat"]),
            update_patch: strings(&[
                "build", "ci", "chore", "docs", "fix", "perf", "refactor", "style", "test",
            ]),
            ignore_unknown: false,
        }
    }
}

/// Tag configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TagConfig {
    /// Tag name pattern with `{major}`, `{minor}`, `{patch}` or `{version}` placeholders
    pub pattern: String,

    /// Glob restricting which tags are considered
    pub filter: String,
}

impl TagConfig {
    /// Placeholders accepted in the tag pattern
    pub const PLACEHOLDERS: [&'static str; 4] = ["{major}", "{minor}", "{patch}", "{version}"];

    /// Render a tag name for the given version
    pub fn format(&self, version: &semver::Version) -> String {
        self.pattern
            .replace("{version}", &version.to_string())
            .replace("{major}", &version.major.to_string())
            .replace("{minor}", &version.minor.to_string())
            .replace("{patch}", &version.patch.to_string())
    }
}

impl Default for TagConfig {
    fn default() -> Self {
        Self {
            pattern: "{major}.{minor}.{patch}".to_string(),
            filter: String::new(),
        }
    }
}

/// Kind of a release note section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionType {
    /// Commits grouped by type
    Commits,
    /// Breaking change messages
    BreakingChanges,
}

/// Release notes configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseNotesConfig {
    /// Sections in output order
    pub sections: Vec<SectionConfig>,
}

impl Default for ReleaseNotesConfig {
    fn default() -> Self {
        Self {
            sections: vec![
                SectionConfig::commits("Features", &["feat"]),
                SectionConfig::commits("Bug Fixes", &["fix"]),
                SectionConfig::breaking_changes("Breaking Changes"),
            ],
        }
    }
}

/// A single release note section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SectionConfig {
    /// Section title
    pub name: String,

    /// Section kind
    pub section_type: SectionType,

    /// Commit types collected by a commits section
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commit_types: Vec<String>,
}

impl SectionConfig {
    /// Create a commits section
    pub fn commits(name: impl Into<String>, commit_types: &[&str]) -> Self {
        Self {
            name: name.into(),
            section_type: SectionType::Commits,
            commit_types: strings(commit_types),
        }
    }

    /// Create a breaking changes section
    pub fn breaking_changes(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            section_type: SectionType::BreakingChanges,
            commit_types: Vec::new(),
        }
    }
}

/// Branch configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BranchesConfig {
    /// Regex fragment matched before the issue id
    pub prefix: String,

    /// Regex fragment matched after the issue id
    pub suffix: String,

    /// Disable issue id extraction from branch names
    pub disable_issue: bool,

    /// Branches where commit message validation is skipped
    pub skip: Vec<String>,

    /// Skip validation on a detached HEAD
    pub skip_detached: bool,
}

impl BranchesConfig {
    /// Anchored branch pattern wrapping the issue regex in its own group
    pub fn issue_pattern(&self, issue_regex: &str) -> String {
        format!("^{}({}){}$", self.prefix, issue_regex, self.suffix)
    }
}

impl Default for BranchesConfig {
    fn default() -> Self {
        Self {
            prefix: r"([a-z]+\/)?".to_string(),
            suffix: "(-.*)?".to_string(),
            disable_issue: false,
            skip: strings(&["master", "main", "developer"]),
            skip_detached: false,
        }
    }
}

/// Commit message rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CommitMessageConfig {
    /// Known commit types
    pub types: Vec<String>,

    /// Regex with a `header` group extracting the conventional header from the subject
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_selector: Option<String>,

    /// Scope rules
    pub scope: ScopeConfig,

    /// Footer keys by canonical metadata key
    pub footer: BTreeMap<String, FooterConfig>,

    /// Issue id rules
    pub issue: IssueConfig,
}

impl CommitMessageConfig {
    /// Footer configuration for the issue reference, if a key is set
    pub fn issue_footer(&self) -> Option<&FooterConfig> {
        self.footer
            .get(ISSUE_METADATA_KEY)
            .filter(|f| !f.key.is_empty())
    }

    /// Header selector, treating an empty pattern as unset
    pub fn header_selector(&self) -> Option<&str> {
        self.header_selector
            .as_deref()
            .filter(|s| !s.is_empty())
    }
}

impl Default for CommitMessageConfig {
    fn default() -> Self {
        let mut footer = BTreeMap::new();
        footer.insert(
            ISSUE_METADATA_KEY.to_string(),
            FooterConfig {
                key: "jira".to_string(),
                key_synonyms: strings(&["Jira", "JIRA"]),
                use_hash: false,
                add_value_prefix: String::new(),
            },
        );

        Self {
            types: strings(&[
                "build", "ci", "chore", "docs", "feat", "fix", "perf", "refactor", "revert",
                "style", "test",
            ]),
            header_selector: None,
            scope: ScopeConfig::default(),
            footer,
            issue: IssueConfig {
                regex: "[A-Z]+-[0-9]+".to_string(),
            },
        }
    }
}

/// Scope allow-list; empty allows any scope
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScopeConfig {
    pub values: Vec<String>,
}

/// A footer key with its synonyms
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FooterConfig {
    /// Key written when formatting the footer
    pub key: String,

    /// Alternative keys accepted when parsing
    pub key_synonyms: Vec<String>,

    /// Use `key #value` instead of `key: value`
    pub use_hash: bool,

    /// Prefix enforced on the value when formatting
    pub add_value_prefix: String,
}

impl FooterConfig {
    /// Primary key followed by its synonyms
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.key.as_str()).chain(self.key_synonyms.iter().map(String::as_str))
    }
}

/// Issue id configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssueConfig {
    /// Regex matching an issue id
    pub regex: String,
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| (*s).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_format() {
        let version = semver::Version::new(1, 2, 3);

        assert_eq!(TagConfig::default().format(&version), "1.2.3");

        let tag = TagConfig {
            pattern: "v{version}".to_string(),
            filter: String::new(),
        };
        assert_eq!(tag.format(&version), "v1.2.3");
    }

    #[test]
    fn test_issue_pattern() {
        let branches = BranchesConfig::default();
        assert_eq!(
            branches.issue_pattern("[A-Z]+-[0-9]+"),
            r"^([a-z]+\/)?([A-Z]+-[0-9]+)(-.*)?$"
        );
    }

    #[test]
    fn test_issue_footer_requires_key() {
        let mut config = CommitMessageConfig::default();
        assert_eq!(config.issue_footer().map(|f| f.key.as_str()), Some("jira"));

        config.footer.get_mut(ISSUE_METADATA_KEY).unwrap().key = String::new();
        assert!(config.issue_footer().is_none());
    }

    #[test]
    fn test_footer_keys_order() {
        let footer = FooterConfig {
            key: "jira".to_string(),
            key_synonyms: vec!["Jira".to_string(), "JIRA".to_string()],
            ..Default::default()
        };
        assert_eq!(footer.keys().collect::<Vec<_>>(), vec!["jira", "Jira", "JIRA"]);
    }

    #[test]
    fn test_section_type_serde() {
        let yaml = "name: Breaking\nsection-type: breaking-changes\n";
        let section: SectionConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(section.section_type, SectionType::BreakingChanges);
        assert!(section.commit_types.is_empty());
    }
}
