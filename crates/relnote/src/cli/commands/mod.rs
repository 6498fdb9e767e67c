//! CLI commands

mod changelog;
mod commit_log;
mod commit_notes;
mod completions;
mod config;
mod current_version;
mod next_version;
mod release_notes;
mod tag;
mod validate_commit_message;

pub use changelog::ChangelogCommand;
pub use commit_log::CommitLogCommand;
pub use commit_notes::CommitNotesCommand;
pub use completions::CompletionsCommand;
pub use config::ConfigCommand;
pub use current_version::CurrentVersionCommand;
pub use next_version::NextVersionCommand;
pub use release_notes::ReleaseNotesCommand;
pub use tag::TagCommand;
pub use validate_commit_message::ValidateCommitMessageCommand;

use clap::{Args, ValueEnum};
use relnote_git::LogRangeType;

/// How the bounds of `--start` and `--end` are read
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum RangeKind {
    /// Tag names; the start defaults to the latest tag
    #[default]
    Tag,
    /// `YYYY-MM-DD` dates, both inclusive
    Date,
    /// Commit hashes or other revisions
    Hash,
}

impl From<RangeKind> for LogRangeType {
    fn from(kind: RangeKind) -> Self {
        match kind {
            RangeKind::Tag => LogRangeType::Tag,
            RangeKind::Date => LogRangeType::Date,
            RangeKind::Hash => LogRangeType::Hash,
        }
    }
}

/// Commit range selection shared by the log commands
#[derive(Debug, Clone, Args)]
pub struct RangeArgs {
    /// Type of range
    #[arg(short, long, value_enum, default_value = "tag")]
    pub range: RangeKind,

    /// Start of the range (exclusive for tag and hash, inclusive for date)
    #[arg(short, long)]
    pub start: Option<String>,

    /// End of the range (inclusive, defaults to HEAD or today)
    #[arg(short, long)]
    pub end: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_kind_conversion() {
        assert_eq!(LogRangeType::from(RangeKind::Tag), LogRangeType::Tag);
        assert_eq!(LogRangeType::from(RangeKind::Date), LogRangeType::Date);
        assert_eq!(LogRangeType::from(RangeKind::Hash), LogRangeType::Hash);
    }
}
