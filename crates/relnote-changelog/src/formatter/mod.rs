//! Release note formatters

mod markdown;

pub use markdown::MarkdownFormatter;

use crate::types::ReleaseNote;

/// Trait for release note formatters
pub trait ReleaseNoteFormatter: Send + Sync {
    /// Format the notes of a single release
    fn format_release_note(&self, note: &ReleaseNote) -> String;

    /// Format a changelog made of several releases, newest first
    fn format_changelog(&self, notes: &[ReleaseNote]) -> String;
}
