//! Commit data model shared by the parser, version and release-note crates

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Footer token carrying a breaking change description
pub const BREAKING_CHANGE_FOOTER_KEY: &str = "BREAKING CHANGE";

/// Metadata key under which the breaking change message is stored
pub const BREAKING_CHANGE_METADATA_KEY: &str = "breaking-change";

/// Canonical footer key of the issue reference
pub const ISSUE_METADATA_KEY: &str = "issue";

/// Capture group a header selector must define
pub const HEADER_GROUP_NAME: &str = "header";

/// A commit message following the conventional commits format
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitMessage {
    /// Commit type (feat, fix, ...); empty when the subject is not conventional
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub commit_type: String,
    /// Scope, empty when absent
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub scope: String,
    /// Description, or the raw subject for non-conventional messages
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Body with carriage returns removed
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub body: String,
    /// Whether the commit carries a breaking change
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_breaking_change: bool,
    /// Footer metadata by canonical key
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl CommitMessage {
    /// Build a message from its parts; empty issue and breaking texts are omitted
    pub fn new(
        commit_type: impl Into<String>,
        scope: impl Into<String>,
        description: impl Into<String>,
        body: impl Into<String>,
        issue: &str,
        breaking_change: &str,
    ) -> Self {
        let mut metadata = BTreeMap::new();
        if !issue.is_empty() {
            metadata.insert(ISSUE_METADATA_KEY.to_string(), issue.to_string());
        }
        if !breaking_change.is_empty() {
            metadata.insert(
                BREAKING_CHANGE_METADATA_KEY.to_string(),
                breaking_change.to_string(),
            );
        }

        Self {
            commit_type: commit_type.into(),
            scope: scope.into(),
            description: description.into(),
            body: body.into(),
            is_breaking_change: !breaking_change.is_empty(),
            metadata,
        }
    }

    /// Issue reference from the footer metadata
    pub fn issue(&self) -> Option<&str> {
        self.metadata.get(ISSUE_METADATA_KEY).map(String::as_str)
    }

    /// Breaking change message from the footer metadata
    pub fn breaking_message(&self) -> Option<&str> {
        self.metadata
            .get(BREAKING_CHANGE_METADATA_KEY)
            .map(String::as_str)
    }
}

/// A single parsed entry of the commit log
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitLogEntry {
    /// Author date as `YYYY-MM-DD`
    pub date: String,
    /// Author time as unix seconds
    pub timestamp: i64,
    /// Author name
    pub author_name: String,
    /// Abbreviated commit hash
    pub hash: String,
    /// Parsed message
    pub message: CommitMessage,
}
