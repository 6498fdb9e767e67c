//! Commit message parsing

mod conventional;
mod footer;
mod issue;

pub use conventional::{split_message, ConventionalParser};
pub use footer::{
    extract_footer_metadata, format_issue_footer, has_footer, FooterRule, IssueFooter,
};
pub use issue::IssueResolver;

use relnote_core::error::MessageError;
use relnote_core::{CommitLogEntry, CommitMessage};
use relnote_git::RawCommit;

/// A commit message split into the parts written to a commit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormattedMessage {
    pub header: String,
    pub body: String,
    pub footer: String,
}

/// Trait for commit message processors
pub trait MessageProcessor: Send + Sync {
    /// Parse a subject and body into a structured message
    fn parse(&self, subject: &str, body: &str) -> Result<CommitMessage, MessageError>;

    /// Check a raw commit message against the commit conventions
    fn validate(&self, message: &str) -> Result<(), MessageError>;

    /// Whether commit message checks are skipped on this branch
    fn skip_branch(&self, branch: &str, detached: bool) -> bool;

    /// Footer text to append so the message references the branch's issue.
    ///
    /// Empty when nothing needs to be appended.
    fn enhance(&self, branch: &str, message: &str) -> Result<String, MessageError>;

    /// Issue id carried by a branch name
    fn issue_id(&self, branch: &str) -> Option<String>;

    /// Render a message back into header, body and footer
    fn format(&self, message: &CommitMessage) -> FormattedMessage;

    /// Parse a commit read from the log
    fn parse_commit(&self, commit: &RawCommit) -> Result<CommitLogEntry, MessageError> {
        Ok(CommitLogEntry {
            date: commit.date.clone(),
            timestamp: commit.timestamp,
            author_name: commit.author_name.clone(),
            hash: commit.hash.clone(),
            message: self.parse(&commit.subject, &commit.body)?,
        })
    }

    /// Parse every commit of a log, keeping order
    fn parse_log(&self, commits: &[RawCommit]) -> Result<Vec<CommitLogEntry>, MessageError> {
        commits.iter().map(|c| self.parse_commit(c)).collect()
    }
}
