//! relnote changelog - commit parsing and release note generation
//!
//! This crate parses conventional commit messages, resolves issue ids from
//! branch names, groups parsed commits into release note sections and renders
//! them as Markdown.

pub mod formatter;
pub mod generator;
pub mod parser;
pub mod release_notes;
pub mod types;

pub use formatter::{MarkdownFormatter, ReleaseNoteFormatter};
pub use generator::ChangelogGenerator;
pub use parser::{ConventionalParser, FormattedMessage, IssueResolver, MessageProcessor};
pub use release_notes::ReleaseNoteBuilder;
pub use types::{BreakingChangeSection, CommitsSection, ReleaseNote, Section};
