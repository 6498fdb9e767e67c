//! Configuration validation
//!
//! Patterns are compiled here once so that a broken configuration fails at
//! load time instead of on the first commit that exercises it.

use std::collections::HashMap;

use regex::Regex;
use tracing::debug;

use crate::error::ConfigError;
use crate::types::HEADER_GROUP_NAME;

use super::types::{Config, SectionType, TagConfig};

type Result<T> = std::result::Result<T, ConfigError>;

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_commit_message(config)?;
    validate_branches(config)?;
    validate_release_notes(config)?;
    validate_tag(&config.tag)?;
    debug!("configuration validation passed");
    Ok(())
}

/// Compile a configured pattern, naming the field on failure
pub fn compile_pattern(field: &str, pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| ConfigError::InvalidRegex {
        field: field.to_string(),
        pattern: pattern.to_string(),
        source,
    })
}

/// Compile the header selector and check it defines the `header` group
pub fn compile_header_selector(pattern: &str) -> Result<Regex> {
    let regex = compile_pattern("commit-message.header-selector", pattern)?;
    if !regex
        .capture_names()
        .any(|name| name == Some(HEADER_GROUP_NAME))
    {
        return Err(ConfigError::InvalidValue {
            field: "commit-message.header-selector".to_string(),
            message: format!("could not find group {}", HEADER_GROUP_NAME),
        });
    }
    Ok(regex)
}

fn validate_commit_message(config: &Config) -> Result<()> {
    let message = &config.commit_message;

    if let Some(selector) = message.header_selector() {
        compile_header_selector(selector)?;
    }

    for (name, footer) in &message.footer {
        if footer.key.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: format!("commit-message.footer.{}.key", name),
                message: "key cannot be empty".to_string(),
            });
        }
    }

    Ok(())
}

fn validate_branches(config: &Config) -> Result<()> {
    let issue_regex = &config.commit_message.issue.regex;
    if config.branches.disable_issue || issue_regex.is_empty() {
        return Ok(());
    }

    compile_pattern(
        "branches.prefix/suffix + commit-message.issue.regex",
        &config.branches.issue_pattern(issue_regex),
    )?;
    Ok(())
}

fn validate_release_notes(config: &Config) -> Result<()> {
    let sections = &config.release_notes.sections;
    let mut owners: HashMap<&str, &str> = HashMap::new();
    let mut breaking_section: Option<&str> = None;

    for (i, section) in sections.iter().enumerate() {
        if section.name.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: format!("release-notes.sections[{}].name", i),
                message: "section name cannot be empty".to_string(),
            });
        }

        match section.section_type {
            SectionType::BreakingChanges => {
                if let Some(first) = breaking_section.replace(&section.name) {
                    return Err(ConfigError::MultipleBreakingSections {
                        first: first.to_string(),
                        second: section.name.clone(),
                    });
                }
            }
            SectionType::Commits => {
                for commit_type in &section.commit_types {
                    if let Some(first) = owners.insert(commit_type, &section.name) {
                        return Err(ConfigError::DuplicateSectionType {
                            commit_type: commit_type.clone(),
                            first: first.to_string(),
                            second: section.name.clone(),
                        });
                    }
                }
            }
        }
    }

    Ok(())
}

fn validate_tag(tag: &TagConfig) -> Result<()> {
    if !TagConfig::PLACEHOLDERS
        .iter()
        .any(|p| tag.pattern.contains(p))
    {
        return Err(ConfigError::InvalidValue {
            field: "tag.pattern".to_string(),
            message: format!("must contain one of {}", TagConfig::PLACEHOLDERS.join(", ")),
        });
    }
    Ok(())
}
