//! Conventional Commits parser
//!
//! Parses commits following the Conventional Commits specification:
//! https://www.conventionalcommits.org/

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, instrument};

use relnote_core::config::{
    compile_header_selector, BranchesConfig, CommitMessageConfig, Config,
};
use relnote_core::error::{MessageError, ValidationError};
use relnote_core::types::{
    BREAKING_CHANGE_FOOTER_KEY, BREAKING_CHANGE_METADATA_KEY, HEADER_GROUP_NAME,
    ISSUE_METADATA_KEY,
};
use relnote_core::CommitMessage;

use super::footer::{extract_footer_metadata, has_footer, FooterRule, IssueFooter};
use super::issue::IssueResolver;
use super::{FormattedMessage, MessageProcessor};

/// Regex for parsing conventional commit headers
static HEADER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-z]+)(\(([^)]*)\))?(!)?: (.*)$").expect("Invalid regex")
});

/// Shape a subject must have to pass validation
static VALID_SUBJECT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z+]+(\(.+\))?!?: .+$").expect("Invalid regex"));

/// Descriptions start with a lowercase letter
static VALID_DESCRIPTION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z].*").expect("Invalid regex"));

/// Split a raw message into its first line and the remaining lines
pub fn split_message(content: &str) -> (String, String) {
    let mut lines = content.lines();
    let subject = lines.next().unwrap_or_default().to_string();
    let body = lines.collect::<Vec<_>>().join("\n");
    (subject, body)
}

/// Parser for Conventional Commits format.
///
/// All patterns are compiled when the parser is built, so an invalid
/// configuration fails before any commit is read.
#[derive(Debug, Clone)]
pub struct ConventionalParser {
    types: Vec<String>,
    scopes: Vec<String>,
    header_selector: Option<Regex>,
    footers: Vec<FooterRule>,
    issue_footer: Option<IssueFooter>,
    issues: IssueResolver,
    skip_branches: Vec<String>,
    skip_detached: bool,
    disable_issue: bool,
}

impl ConventionalParser {
    /// Create a parser from commit message and branch rules
    pub fn new(
        message: &CommitMessageConfig,
        branches: &BranchesConfig,
    ) -> Result<Self, MessageError> {
        let header_selector = message
            .header_selector()
            .map(compile_header_selector)
            .transpose()?;

        let footers = message
            .footer
            .iter()
            .filter(|(_, footer)| !footer.key.is_empty())
            .map(|(canonical, footer)| FooterRule::new(canonical, footer))
            .collect::<Result<Vec<_>, _>>()?;

        let issue_footer = message.issue_footer().map(IssueFooter::new).transpose()?;

        Ok(Self {
            types: message.types.clone(),
            scopes: message.scope.values.clone(),
            header_selector,
            footers,
            issue_footer,
            issues: IssueResolver::new(branches, &message.issue)?,
            skip_branches: branches.skip.clone(),
            skip_detached: branches.skip_detached,
            disable_issue: branches.disable_issue,
        })
    }

    /// Create a parser from the full configuration
    pub fn from_config(config: &Config) -> Result<Self, MessageError> {
        Self::new(&config.commit_message, &config.branches)
    }

    /// Conventional header of a subject, after the header selector if one is set
    fn select_header<'a>(&self, subject: &'a str) -> Result<&'a str, MessageError> {
        let Some(selector) = &self.header_selector else {
            return Ok(subject);
        };

        selector
            .captures(subject)
            .and_then(|caps| caps.name(HEADER_GROUP_NAME))
            .map(|m| m.as_str())
            .ok_or_else(|| {
                MessageError::HeaderSelector(format!(
                    "could not find group {} in match result for '{}'",
                    HEADER_GROUP_NAME, subject
                ))
            })
    }

    fn validate_type(&self, commit_type: &str) -> Result<(), ValidationError> {
        if commit_type.is_empty() || !self.types.iter().any(|t| t == commit_type) {
            return Err(ValidationError::UnknownType {
                found: commit_type.to_string(),
                allowed: self.types.clone(),
            });
        }
        Ok(())
    }

    fn validate_scope(&self, scope: &str) -> Result<(), ValidationError> {
        if !self.scopes.is_empty() && !self.scopes.iter().any(|s| s == scope) {
            return Err(ValidationError::ScopeNotAllowed {
                found: scope.to_string(),
                allowed: self.scopes.clone(),
            });
        }
        Ok(())
    }

    fn validate_description(&self, description: &str) -> Result<(), ValidationError> {
        if !VALID_DESCRIPTION_REGEX.is_match(description) {
            return Err(ValidationError::InvalidDescription(description.to_string()));
        }
        Ok(())
    }
}

impl MessageProcessor for ConventionalParser {
    fn parse(&self, subject: &str, body: &str) -> Result<CommitMessage, MessageError> {
        let header = self.select_header(subject)?;
        let body = body.replace('\r', "");

        let mut message = match HEADER_REGEX.captures(header) {
            Some(caps) => CommitMessage {
                commit_type: caps[1].to_string(),
                scope: caps.get(3).map(|m| m.as_str().to_string()).unwrap_or_default(),
                description: caps[5].trim().to_string(),
                is_breaking_change: caps.get(4).is_some(),
                ..Default::default()
            },
            None => CommitMessage {
                description: header.to_string(),
                ..Default::default()
            },
        };

        for footer in &self.footers {
            if let Some(value) = footer.extract(&body) {
                message.metadata.insert(footer.canonical().to_string(), value);
            }
        }

        if message.is_breaking_change {
            message.metadata.insert(
                BREAKING_CHANGE_METADATA_KEY.to_string(),
                message.description.clone(),
            );
        }

        // an explicit footer wins over the `!` marker
        if let Some(value) = extract_footer_metadata(BREAKING_CHANGE_FOOTER_KEY, &body, false) {
            message.is_breaking_change = true;
            message
                .metadata
                .insert(BREAKING_CHANGE_METADATA_KEY.to_string(), value);
        }

        message.body = body;
        Ok(message)
    }

    #[instrument(skip(self, message))]
    fn validate(&self, message: &str) -> Result<(), MessageError> {
        let (subject, body) = split_message(message);
        let parsed = self.parse(&subject, &body)?;

        let header = self.select_header(&subject)?;
        if !VALID_SUBJECT_REGEX.is_match(header) {
            return Err(ValidationError::InvalidSubject(subject).into());
        }

        self.validate_type(&parsed.commit_type)?;
        self.validate_scope(&parsed.scope)?;
        self.validate_description(&parsed.description)?;

        debug!(commit_type = %parsed.commit_type, "commit message is valid");
        Ok(())
    }

    fn skip_branch(&self, branch: &str, detached: bool) -> bool {
        self.skip_branches.iter().any(|b| b == branch) || (self.skip_detached && detached)
    }

    #[instrument(skip(self, message))]
    fn enhance(&self, branch: &str, message: &str) -> Result<String, MessageError> {
        if self.disable_issue {
            return Ok(String::new());
        }
        let Some(issue_footer) = &self.issue_footer else {
            return Ok(String::new());
        };
        if issue_footer.is_present(message) {
            debug!("issue footer already present");
            return Ok(String::new());
        }

        let issue = self
            .issue_id(branch)
            .ok_or_else(|| MessageError::IssueNotFound {
                branch: branch.to_string(),
            })?;

        let footer = issue_footer.format(&issue);
        debug!(%footer, "adding issue footer");

        if has_footer(message) {
            Ok(footer)
        } else {
            Ok(format!("\n{}", footer))
        }
    }

    fn issue_id(&self, branch: &str) -> Option<String> {
        self.issues.issue_id(branch)
    }

    fn format(&self, message: &CommitMessage) -> FormattedMessage {
        let mut header = message.commit_type.clone();
        if !message.scope.is_empty() {
            header.push_str(&format!("({})", message.scope));
        }
        header.push_str(": ");
        header.push_str(&message.description);

        let mut footer_lines = Vec::new();
        if let Some(breaking) = message.breaking_message().filter(|m| !m.is_empty()) {
            footer_lines.push(format!("{}: {}", BREAKING_CHANGE_FOOTER_KEY, breaking));
        }
        if let (Some(issue), Some(issue_footer)) = (
            message.metadata.get(ISSUE_METADATA_KEY),
            &self.issue_footer,
        ) {
            footer_lines.push(issue_footer.format(issue));
        }

        FormattedMessage {
            header,
            body: message.body.clone(),
            footer: footer_lines.join("\n"),
        }
    }
}
