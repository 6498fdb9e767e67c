//! Release note generation from the raw commit log

use chrono::{DateTime, Utc};
use tracing::{info, instrument};

use relnote_core::config::Config;
use relnote_core::error::MessageError;
use relnote_core::CommitLogEntry;
use relnote_git::RawCommit;

use crate::formatter::{MarkdownFormatter, ReleaseNoteFormatter};
use crate::parser::{ConventionalParser, MessageProcessor};
use crate::release_notes::ReleaseNoteBuilder;
use crate::types::ReleaseNote;

/// Parses raw commits, assembles release notes and renders them
pub struct ChangelogGenerator {
    processor: Box<dyn MessageProcessor>,
    builder: ReleaseNoteBuilder,
    formatter: Box<dyn ReleaseNoteFormatter>,
}

impl ChangelogGenerator {
    /// Create a generator with the conventional parser and markdown output
    pub fn from_config(config: &Config) -> Result<Self, MessageError> {
        Ok(Self {
            processor: Box::new(ConventionalParser::from_config(config)?),
            builder: ReleaseNoteBuilder::new(&config.release_notes)?,
            formatter: Box::new(MarkdownFormatter::new()),
        })
    }

    /// The message processor in use
    pub fn processor(&self) -> &dyn MessageProcessor {
        self.processor.as_ref()
    }

    /// Parse a raw log
    pub fn parse_log(&self, commits: &[RawCommit]) -> Result<Vec<CommitLogEntry>, MessageError> {
        self.processor.parse_log(commits)
    }

    /// Build the release note for a parsed log
    pub fn release_note(
        &self,
        version: Option<semver::Version>,
        tag: &str,
        date: Option<DateTime<Utc>>,
        commits: &[CommitLogEntry],
    ) -> ReleaseNote {
        self.builder.create(version, tag, date, commits)
    }

    /// Parse a raw log and build its release note
    #[instrument(skip(self, version, date, commits), fields(commit_count = commits.len()))]
    pub fn generate(
        &self,
        version: Option<semver::Version>,
        tag: &str,
        date: Option<DateTime<Utc>>,
        commits: &[RawCommit],
    ) -> Result<ReleaseNote, MessageError> {
        info!(tag, commit_count = commits.len(), "generating release note");
        let parsed = self.parse_log(commits)?;
        Ok(self.release_note(version, tag, date, &parsed))
    }

    /// Render one release note
    pub fn format_release_note(&self, note: &ReleaseNote) -> String {
        self.formatter.format_release_note(note)
    }

    /// Render a changelog
    pub fn format_changelog(&self, notes: &[ReleaseNote]) -> String {
        self.formatter.format_changelog(notes)
    }
}
