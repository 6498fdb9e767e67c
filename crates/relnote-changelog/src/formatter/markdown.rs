//! Markdown release note formatter

use tracing::{debug, instrument};

use relnote_core::CommitLogEntry;

use super::ReleaseNoteFormatter;
use crate::types::{ReleaseNote, Section};

/// Markdown release note formatter
pub struct MarkdownFormatter {
    /// Append the sorted author list to each release
    pub include_authors: bool,
}

impl MarkdownFormatter {
    /// Create a new markdown formatter
    pub fn new() -> Self {
        Self {
            include_authors: true,
        }
    }

    fn heading(note: &ReleaseNote) -> String {
        let date = note.date.map(|d| d.format("%Y-%m-%d").to_string());
        match (note.label(), date) {
            (Some(label), Some(date)) => format!("## {} ({})", label, date),
            (Some(label), None) => format!("## {}", label),
            (None, Some(date)) => format!("## {}", date),
            (None, None) => "## Unreleased".to_string(),
        }
    }

    /// One list item; sections spanning several types label each item with its type
    fn format_item(output: &mut String, commit: &CommitLogEntry, show_type: bool) {
        let message = &commit.message;
        output.push_str("- ");
        match (show_type, message.scope.is_empty()) {
            (true, true) => output.push_str(&format!("**{}:** ", message.commit_type)),
            (true, false) => {
                output.push_str(&format!("**{}({}):** ", message.commit_type, message.scope))
            }
            (false, false) => output.push_str(&format!("**{}:** ", message.scope)),
            (false, true) => {}
        }
        output.push_str(&format!("{} ({})", message.description, commit.hash));
        if let Some(issue) = message.issue() {
            output.push_str(&format!(" ({})", issue));
        }
        output.push('\n');
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReleaseNoteFormatter for MarkdownFormatter {
    #[instrument(skip(self, note), fields(tag = %note.tag, section_count = note.sections.len()))]
    fn format_release_note(&self, note: &ReleaseNote) -> String {
        let mut output = String::new();

        output.push_str(&Self::heading(note));
        output.push_str("\n\n");

        for section in &note.sections {
            output.push_str(&format!("### {}\n\n", section.name()));

            match section {
                Section::Commits(section) => {
                    let show_type = section.has_multiple_types();
                    for commit in &section.items {
                        Self::format_item(&mut output, commit, show_type);
                    }
                }
                Section::BreakingChanges(section) => {
                    for message in &section.messages {
                        output.push_str(&format!("- {}\n", message));
                    }
                }
            }

            output.push('\n');
        }

        if self.include_authors && !note.author_names.is_empty() {
            output.push_str(&format!("**Authors:** {}\n\n", note.sorted_authors().join(", ")));
        }

        debug!(output_len = output.len(), "markdown release note formatted");
        output
    }

    #[instrument(skip(self, notes), fields(release_count = notes.len()))]
    fn format_changelog(&self, notes: &[ReleaseNote]) -> String {
        let mut output = String::from("# Changelog\n\n");
        for note in notes {
            output.push_str(&self.format_release_note(note));
        }
        output
    }
}
