//! Release note assembly
//!
//! Commits are dispatched to the commits section that owns their type;
//! breaking changes are collected into a single flat list.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Timelike, Utc};
use tracing::{debug, instrument};

use relnote_core::config::{ReleaseNotesConfig, SectionConfig, SectionType};
use relnote_core::error::ConfigError;
use relnote_core::CommitLogEntry;

use crate::types::{BreakingChangeSection, CommitsSection, ReleaseNote, Section};

/// Builds release notes from parsed commits
#[derive(Debug, Clone)]
pub struct ReleaseNoteBuilder {
    sections: Vec<SectionConfig>,
    /// Commit type to index of its owning commits section
    owners: HashMap<String, usize>,
}

impl ReleaseNoteBuilder {
    /// Create a builder.
    ///
    /// A commit type listed in two commits sections is rejected, as is a
    /// second breaking-changes section.
    pub fn new(config: &ReleaseNotesConfig) -> Result<Self, ConfigError> {
        let mut owners: HashMap<String, usize> = HashMap::new();
        let mut breaking: Option<&str> = None;

        for (index, section) in config.sections.iter().enumerate() {
            if section.section_type == SectionType::BreakingChanges {
                if let Some(first) = breaking.replace(&section.name) {
                    return Err(ConfigError::MultipleBreakingSections {
                        first: first.to_string(),
                        second: section.name.clone(),
                    });
                }
                continue;
            }
            for commit_type in &section.commit_types {
                if let Some(first) = owners.insert(commit_type.clone(), index) {
                    return Err(ConfigError::DuplicateSectionType {
                        commit_type: commit_type.clone(),
                        first: config.sections[first].name.clone(),
                        second: section.name.clone(),
                    });
                }
            }
        }

        Ok(Self {
            sections: config.sections.clone(),
            owners,
        })
    }

    /// Assemble the release note for a set of commits, given in presentation order
    #[instrument(skip(self, commits), fields(commit_count = commits.len()))]
    pub fn create(
        &self,
        version: Option<semver::Version>,
        tag: &str,
        date: Option<DateTime<Utc>>,
        commits: &[CommitLogEntry],
    ) -> ReleaseNote {
        let mut author_names = HashSet::new();
        let mut items: HashMap<usize, Vec<CommitLogEntry>> = HashMap::new();
        let mut breaking_messages = Vec::new();

        for commit in commits {
            author_names.insert(commit.author_name.clone());

            if let Some(&index) = self.owners.get(&commit.message.commit_type) {
                items.entry(index).or_default().push(commit.clone());
            }

            if commit.message.is_breaking_change {
                breaking_messages.push(
                    commit
                        .message
                        .breaking_message()
                        .unwrap_or_default()
                        .to_string(),
                );
            }
        }

        let mut sections = Vec::new();
        for (index, config) in self.sections.iter().enumerate() {
            match config.section_type {
                SectionType::BreakingChanges if !breaking_messages.is_empty() => {
                    sections.push(Section::BreakingChanges(BreakingChangeSection {
                        name: config.name.clone(),
                        messages: std::mem::take(&mut breaking_messages),
                    }));
                }
                SectionType::Commits => {
                    if let Some(items) = items.remove(&index) {
                        sections.push(Section::Commits(CommitsSection {
                            name: config.name.clone(),
                            types: config.commit_types.clone(),
                            items,
                        }));
                    }
                }
                SectionType::BreakingChanges => {}
            }
        }

        debug!(
            sections = sections.len(),
            authors = author_names.len(),
            "release note assembled"
        );

        ReleaseNote {
            version,
            tag: tag.to_string(),
            date: date.map(truncate_to_minute),
            sections,
            author_names,
        }
    }
}

fn truncate_to_minute(date: DateTime<Utc>) -> DateTime<Utc> {
    date.with_second(0)
        .and_then(|d| d.with_nanosecond(0))
        .unwrap_or(date)
}
