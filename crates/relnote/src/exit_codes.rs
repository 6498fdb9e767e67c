//! Exit codes for the CLI

use relnote_core::error::{ConfigError, GitError, MessageError, VersionError};

/// Success
pub const SUCCESS: i32 = 0;

/// General error
pub const ERROR: i32 = 1;

/// Configuration error
pub const CONFIG_ERROR: i32 = 2;

/// Git error
pub const GIT_ERROR: i32 = 3;

/// Version error
pub const VERSION_ERROR: i32 = 4;

/// Validation error
pub const VALIDATION_ERROR: i32 = 5;

/// Map a command failure to its exit code, using the first typed error in the chain
pub fn from_error(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if let Some(err) = cause.downcast_ref::<MessageError>() {
            return message_code(err);
        }
        if cause.is::<ConfigError>() {
            return CONFIG_ERROR;
        }
        if cause.is::<GitError>() {
            return GIT_ERROR;
        }
        if cause.is::<VersionError>() {
            return VERSION_ERROR;
        }
    }
    ERROR
}

fn message_code(err: &MessageError) -> i32 {
    match err {
        MessageError::Config(_) => CONFIG_ERROR,
        MessageError::Validation(_) | MessageError::HeaderSelector(_) => VALIDATION_ERROR,
        MessageError::IssueNotFound { .. } => ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use relnote_core::error::ValidationError;

    #[test]
    fn test_typed_errors() {
        let err = anyhow::Error::new(GitError::UnknownTag("v9".to_string()));
        assert_eq!(from_error(&err), GIT_ERROR);

        let err = anyhow::Error::new(VersionError::ParseFailed("x".into(), "bad".into()));
        assert_eq!(from_error(&err), VERSION_ERROR);

        let err = anyhow::Error::new(ConfigError::NotFound("relnote.yml".into()));
        assert_eq!(from_error(&err), CONFIG_ERROR);
    }

    #[test]
    fn test_message_errors() {
        let err = anyhow::Error::new(MessageError::Validation(ValidationError::InvalidSubject(
            "oops".to_string(),
        )));
        assert_eq!(from_error(&err), VALIDATION_ERROR);

        let err = anyhow::Error::new(MessageError::Config(ConfigError::InvalidValue {
            field: "tag.pattern".to_string(),
            message: "missing placeholder".to_string(),
        }));
        assert_eq!(from_error(&err), CONFIG_ERROR);
    }

    #[test]
    fn test_context_is_looked_through() {
        let result: Result<(), GitError> = Err(GitError::TagExists("1.0.0".to_string()));
        let err = result.context("creating tag").unwrap_err();
        assert_eq!(from_error(&err), GIT_ERROR);
    }

    #[test]
    fn test_untyped_errors() {
        let err = std::fs::read_to_string("/nonexistent/relnote.yml").unwrap_err();
        assert_eq!(from_error(&anyhow::Error::new(err)), ERROR);

        assert_eq!(from_error(&anyhow::anyhow!("something else")), ERROR);
    }
}
