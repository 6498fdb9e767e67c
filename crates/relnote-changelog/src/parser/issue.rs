//! Issue id resolution from branch names

use regex::Regex;
use tracing::debug;

use relnote_core::config::{compile_pattern, BranchesConfig, IssueConfig};
use relnote_core::error::ConfigError;

/// Extracts an issue id from a branch name.
///
/// The branch must match `^<prefix>(<issue regex>)<suffix>$` as a whole; the
/// issue id is the group wrapping the issue regex.
#[derive(Debug, Clone)]
pub struct IssueResolver {
    pattern: Option<Regex>,
}

impl IssueResolver {
    /// Build the resolver; disabled when issue tracking is off or no issue regex is set
    pub fn new(branches: &BranchesConfig, issue: &IssueConfig) -> Result<Self, ConfigError> {
        if branches.disable_issue || issue.regex.is_empty() {
            return Ok(Self::disabled());
        }

        let pattern = compile_pattern(
            "branches.prefix/suffix + commit-message.issue.regex",
            &branches.issue_pattern(&issue.regex),
        )?;
        Ok(Self {
            pattern: Some(pattern),
        })
    }

    /// A resolver that never finds an issue
    pub fn disabled() -> Self {
        Self { pattern: None }
    }

    /// Issue id for a branch, if the branch name carries one
    pub fn issue_id(&self, branch: &str) -> Option<String> {
        let pattern = self.pattern.as_ref()?;

        // whole match, prefix group, issue group, suffix group
        if pattern.captures_len() != 4 {
            debug!(groups = pattern.captures_len(), "issue pattern has unexpected group count");
            return None;
        }

        let issue = pattern
            .captures(branch)
            .and_then(|caps| caps.get(2))
            .map(|m| m.as_str().to_string());

        debug!(branch, issue = ?issue, "resolved issue id");
        issue
    }
}
