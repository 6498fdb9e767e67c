//! Footer metadata extraction
//!
//! Footers are `key: value` lines, or `key #value` lines for trackers that
//! reference issues by number. Matching is per physical line.

use std::sync::LazyLock;

use regex::Regex;

use relnote_core::config::{compile_pattern, FooterConfig};
use relnote_core::error::ConfigError;
use relnote_core::types::BREAKING_CHANGE_FOOTER_KEY;

/// Any line shaped like a footer
static FOOTER_LINE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^[a-zA-Z-]+: .*|^[a-zA-Z-]+ #.*|^{}: .*",
        BREAKING_CHANGE_FOOTER_KEY
    ))
    .expect("Invalid regex")
});

fn footer_pattern(key: &str, use_hash: bool) -> String {
    if use_hash {
        format!(r"(?m)^{} (#.*)$", regex::escape(key))
    } else {
        format!(r"(?m)^{}: (.*)$", regex::escape(key))
    }
}

/// Value of the first `key: value` (or `key #value`) line in `text`.
///
/// In hash style the leading `#` is part of the value. Empty values count as
/// absent.
pub fn extract_footer_metadata(key: &str, text: &str, use_hash: bool) -> Option<String> {
    let regex = Regex::new(&footer_pattern(key, use_hash)).ok()?;
    first_value(&regex, text)
}

fn first_value(regex: &Regex, text: &str) -> Option<String> {
    regex
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .filter(|v| !v.is_empty())
}

/// Whether any line after the subject looks like a footer
pub fn has_footer(message: &str) -> bool {
    message
        .lines()
        .skip(1)
        .any(|line| FOOTER_LINE_REGEX.is_match(line))
}

/// Format an issue footer line, adding the configured value prefix if missing
pub fn format_issue_footer(config: &FooterConfig, issue: &str) -> String {
    let issue = if issue.starts_with(&config.add_value_prefix) {
        issue.to_string()
    } else {
        format!("{}{}", config.add_value_prefix, issue)
    };

    if config.use_hash {
        format!("{} #{}", config.key, issue.strip_prefix('#').unwrap_or(&issue))
    } else {
        format!("{}: {}", config.key, issue)
    }
}

/// Compiled lookup of one metadata footer and its synonyms
#[derive(Debug, Clone)]
pub struct FooterRule {
    canonical: String,
    patterns: Vec<Regex>,
}

impl FooterRule {
    /// Compile the patterns for every key of the footer
    pub fn new(canonical: impl Into<String>, config: &FooterConfig) -> Result<Self, ConfigError> {
        let canonical = canonical.into();
        let patterns = config
            .keys()
            .map(|key| {
                compile_pattern(
                    &format!("commit-message.footer.{}", canonical),
                    &footer_pattern(key, config.use_hash),
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            canonical,
            patterns,
        })
    }

    /// Canonical metadata key
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    /// Value under the primary key, else under the first synonym that matches
    pub fn extract(&self, text: &str) -> Option<String> {
        self.patterns.iter().find_map(|regex| first_value(regex, text))
    }
}

/// The issue footer: detection in raw messages and formatting
#[derive(Debug, Clone)]
pub struct IssueFooter {
    config: FooterConfig,
    present: Regex,
}

impl IssueFooter {
    pub fn new(config: &FooterConfig) -> Result<Self, ConfigError> {
        let key = regex::escape(&config.key);
        let pattern = if config.use_hash {
            format!(r"(?m)^{} #.+$", key)
        } else {
            format!(r"(?m)^{}: .+$", key)
        };

        Ok(Self {
            config: config.clone(),
            present: compile_pattern("commit-message.footer.issue", &pattern)?,
        })
    }

    /// Whether the message already carries the issue footer under its primary key
    pub fn is_present(&self, message: &str) -> bool {
        self.present.is_match(message)
    }

    /// Footer line for an issue id
    pub fn format(&self, issue: &str) -> String {
        format_issue_footer(&self.config, issue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jira() -> FooterConfig {
        FooterConfig {
            key: "jira".to_string(),
            key_synonyms: vec!["Jira".to_string(), "JIRA".to_string()],
            ..Default::default()
        }
    }

    fn refs_hash() -> FooterConfig {
        FooterConfig {
            key: "Refs".to_string(),
            use_hash: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_extract_colon_style() {
        let body = "some text\n\njira: JIRA-12\nother: x";
        assert_eq!(
            extract_footer_metadata("jira", body, false),
            Some("JIRA-12".to_string())
        );
        assert_eq!(extract_footer_metadata("missing", body, false), None);
    }

    #[test]
    fn test_extract_hash_style_keeps_hash() {
        let body = "Refs #133";
        assert_eq!(
            extract_footer_metadata("Refs", body, true),
            Some("#133".to_string())
        );
        assert_eq!(extract_footer_metadata("Refs", body, false), None);
    }

    #[test]
    fn test_extract_is_anchored_per_line() {
        assert_eq!(extract_footer_metadata("jira", "see jira: X-1", false), None);
        assert_eq!(
            extract_footer_metadata("BREAKING CHANGE", "intro\nBREAKING CHANGE: gone", false),
            Some("gone".to_string())
        );
    }

    #[test]
    fn test_rule_prefers_primary_key() {
        let rule = FooterRule::new("issue", &jira()).unwrap();
        assert_eq!(rule.canonical(), "issue");
        assert_eq!(rule.extract("JIRA: B-2\njira: A-1"), Some("A-1".to_string()));
        assert_eq!(rule.extract("Jira: C-3"), Some("C-3".to_string()));
        assert_eq!(rule.extract("nothing here"), None);
    }

    #[test]
    fn test_has_footer() {
        assert!(!has_footer("feat: add x"));
        assert!(!has_footer("jira: JIRA-1"));
        assert!(has_footer("feat: add x\n\njira: JIRA-1"));
        assert!(has_footer("feat: add x\n\nRefs #12"));
        assert!(has_footer("feat: add x\n\nBREAKING CHANGE: all gone"));
        assert!(!has_footer("feat: add x\n\njust a body line"));
    }

    #[test]
    fn test_format_issue_footer() {
        assert_eq!(format_issue_footer(&jira(), "JIRA-9"), "jira: JIRA-9");
        assert_eq!(format_issue_footer(&refs_hash(), "#12"), "Refs #12");
        assert_eq!(format_issue_footer(&refs_hash(), "12"), "Refs #12");

        let prefixed = FooterConfig {
            add_value_prefix: "ABC-".to_string(),
            ..jira()
        };
        assert_eq!(format_issue_footer(&prefixed, "7"), "jira: ABC-7");
        assert_eq!(format_issue_footer(&prefixed, "ABC-7"), "jira: ABC-7");
    }

    #[test]
    fn test_issue_footer_presence_uses_primary_key() {
        let footer = IssueFooter::new(&jira()).unwrap();
        assert!(footer.is_present("feat: x\n\njira: JIRA-1"));
        assert!(!footer.is_present("feat: x\n\nJira: JIRA-1"));
        assert!(!footer.is_present("feat: x\n\njira: "));
    }
}
