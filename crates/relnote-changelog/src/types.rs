//! Release note types

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use relnote_core::CommitLogEntry;

/// Release notes for one version or tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseNote {
    /// Version, when the release is versioned
    pub version: Option<semver::Version>,
    /// Tag label, empty for unreleased commits
    pub tag: String,
    /// Release date, truncated to the minute
    pub date: Option<DateTime<Utc>>,
    /// Non-empty sections in configured order
    pub sections: Vec<Section>,
    /// Distinct author names
    pub author_names: HashSet<String>,
}

impl ReleaseNote {
    /// Author names sorted lexicographically
    pub fn sorted_authors(&self) -> Vec<&str> {
        let mut authors: Vec<&str> = self.author_names.iter().map(String::as_str).collect();
        authors.sort_unstable();
        authors
    }

    /// Label used in headings: `v<version>`, else the tag
    pub fn label(&self) -> Option<String> {
        match &self.version {
            Some(version) => Some(format!("v{}", version)),
            None if !self.tag.is_empty() => Some(self.tag.clone()),
            None => None,
        }
    }
}

/// A named release note section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Section {
    /// Commits grouped by type
    Commits(CommitsSection),
    /// Breaking change messages
    BreakingChanges(BreakingChangeSection),
}

impl Section {
    /// Section title
    pub fn name(&self) -> &str {
        match self {
            Self::Commits(section) => &section.name,
            Self::BreakingChanges(section) => &section.name,
        }
    }
}

/// Commits collected for a set of types
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitsSection {
    pub name: String,
    pub types: Vec<String>,
    pub items: Vec<CommitLogEntry>,
}

impl CommitsSection {
    /// Whether the section groups more than one commit type
    pub fn has_multiple_types(&self) -> bool {
        self.types.len() > 1
    }
}

/// Breaking change messages, in commit order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreakingChangeSection {
    pub name: String,
    pub messages: Vec<String>,
}
