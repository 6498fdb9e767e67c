//! Error types for relnote

use std::path::PathBuf;
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found at {0}")]
    NotFound(PathBuf),

    /// Failed to parse configuration
    #[error("Failed to parse configuration {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// A configured pattern does not compile
    #[error("Invalid regex on {field}: {pattern}: {source}")]
    InvalidRegex {
        field: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A commit type is owned by more than one commits section
    #[error("Commit type '{commit_type}' is listed in both '{first}' and '{second}' release-note sections")]
    DuplicateSectionType {
        commit_type: String,
        first: String,
        second: String,
    },

    /// More than one breaking-changes section is configured
    #[error("Only one breaking-changes release-note section is allowed, found '{first}' and '{second}'")]
    MultipleBreakingSections { first: String, second: String },

    /// YAML error
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Merged configuration does not match the schema
    #[error("Configuration schema error: {0}")]
    Schema(#[from] serde_json::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Git-related errors
#[derive(Debug, Error)]
pub enum GitError {
    /// Repository not found
    #[error("Git repository not found at {0}")]
    RepositoryNotFound(PathBuf),

    /// Not a git repository
    #[error("Not a git repository: {0}")]
    NotARepository(PathBuf),

    /// Failed to open repository
    #[error("Failed to open repository: {0}")]
    OpenFailed(String),

    /// Tag is not known, or excluded by the tag filter
    #[error("Unknown tag: {0} not found, check tag filter")]
    UnknownTag(String),

    /// Tag already exists
    #[error("Tag already exists: {0}")]
    TagExists(String),

    /// Log range could not be resolved
    #[error("Invalid log range: {0}")]
    InvalidRange(String),

    /// Git2 library error
    #[error("Git error: {0}")]
    Git2(#[from] git2::Error),
}

/// Version-related errors
#[derive(Debug, Error)]
pub enum VersionError {
    /// Failed to parse version
    #[error("Failed to parse version '{0}': {1}")]
    ParseFailed(String, String),

    /// A version component is already at its maximum
    #[error("Version '{0}' cannot be bumped further")]
    Overflow(String),
}

/// Errors raised while parsing, validating or enhancing a commit message
#[derive(Debug, Error)]
pub enum MessageError {
    /// Invalid pattern in the commit message or branch rules
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Message violates the commit conventions
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Header selector did not yield a `header` group for the subject
    #[error("invalid regex on header-selector: {0}")]
    HeaderSelector(String),

    /// Issue id required but not derivable from the branch name
    #[error("could not find issue id using configured regex on branch '{branch}'")]
    IssueNotFound { branch: String },
}

/// Reasons a commit message fails validation, in check order
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Subject is not `type(scope)!: description`
    #[error("commit message not valid: subject [{0}] not valid")]
    InvalidSubject(String),

    /// Type is not one of the known types
    #[error("commit message not valid: type must be one of [{}]", .allowed.join(", "))]
    UnknownType { found: String, allowed: Vec<String> },

    /// Scope is not on the allow-list
    #[error("commit message not valid: scope must be one of [{}]", .allowed.join(", "))]
    ScopeNotAllowed { found: String, allowed: Vec<String> },

    /// Description must start with a lowercase letter
    #[error("commit message not valid: description [{0}] must start with lowercase")]
    InvalidDescription(String),
}
