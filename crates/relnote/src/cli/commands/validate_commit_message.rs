//! Commit message validation command, meant for the prepare-commit-msg hook

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Args;
use tracing::{debug, info, warn};

use crate::cli::context::Context;
use crate::cli::Cli;

/// Validate and enhance a commit message
#[derive(Debug, Args)]
pub struct ValidateCommitMessageCommand {
    /// Directory holding the message file
    #[arg(long, default_value = ".git")]
    pub path: PathBuf,

    /// Name of the file holding the commit message
    #[arg(long, default_value = "COMMIT_EDITMSG")]
    pub file: String,

    /// Source of the commit message, as passed to the hook
    #[arg(long)]
    pub source: Option<String>,
}

impl ValidateCommitMessageCommand {
    /// Execute the validate-commit-message command
    pub fn execute(&self, _cli: &Cli, ctx: &Context) -> anyhow::Result<()> {
        info!(
            path = %self.path.display(),
            file = %self.file,
            source = ?self.source,
            "executing validate-commit-message command"
        );
        let repo = ctx.repo()?;
        let generator = ctx.generator()?;
        let processor = generator.processor();

        let branch = repo.current_branch()?.unwrap_or_default();
        let detached = repo.is_head_detached().unwrap_or(false);

        if processor.skip_branch(&branch, detached) {
            warn!(%branch, detached, "commit message validation skipped for this branch");
            return Ok(());
        }
        if self.source.as_deref() == Some("merge") {
            warn!("commit message validation skipped, ignoring source: merge");
            return Ok(());
        }

        let path = self.path.join(&self.file);
        let message = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read commit message {}", path.display()))?;

        processor
            .validate(&message)
            .context("invalid commit message")?;

        match processor.enhance(&branch, &message) {
            Ok(footer) if footer.is_empty() => debug!("commit message left unchanged"),
            Ok(footer) => {
                append_footer(&path, &message, &footer)
                    .with_context(|| format!("failed to append footer to {}", path.display()))?;
                info!(%footer, "issue footer appended");
            }
            Err(err) => warn!(error = %err, "could not enhance commit message"),
        }

        Ok(())
    }
}

/// Append a footer, starting it on its own line
fn append_footer(path: &Path, message: &str, footer: &str) -> std::io::Result<()> {
    let mut file = std::fs::OpenOptions::new().append(true).open(path)?;
    if !message.is_empty() && !message.ends_with('\n') {
        file.write_all(b"\n")?;
    }
    writeln!(file, "{}", footer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::context::test_support::repo_with_commits;
    use clap::Parser;
    use relnote_core::config::Config;

    fn setup(branch: &str, message: &str) -> (tempfile::TempDir, Context, PathBuf) {
        let (temp, repo) = repo_with_commits(&["chore: initial"]);
        let head = repo.head().unwrap().peel_to_commit().unwrap();
        if repo.find_branch(branch, git2::BranchType::Local).is_err() {
            repo.branch(branch, &head, false).unwrap();
        }
        repo.set_head(&format!("refs/heads/{}", branch)).unwrap();

        let path = temp.path().join(".git").join("COMMIT_EDITMSG");
        std::fs::write(&path, message).unwrap();

        let ctx = Context {
            config: Config::default(),
            files: Vec::new(),
            dir: temp.path().to_path_buf(),
        };
        (temp, ctx, path)
    }

    fn command(dir: &Path, source: Option<&str>) -> ValidateCommitMessageCommand {
        ValidateCommitMessageCommand {
            path: dir.join(".git"),
            file: "COMMIT_EDITMSG".to_string(),
            source: source.map(str::to_string),
        }
    }

    fn cli() -> Cli {
        Cli::try_parse_from(["relnote", "vcm"]).unwrap()
    }

    #[test]
    fn test_valid_message_gets_issue_footer() {
        let (temp, ctx, path) = setup("feature/JIRA-42-login", "feat: add login\n");

        command(temp.path(), None).execute(&cli(), &ctx).unwrap();

        assert_eq!(
            std::fs::read_to_string(path).unwrap(),
            "feat: add login\n\njira: JIRA-42\n"
        );
    }

    #[test]
    fn test_invalid_message_rejected() {
        let (temp, ctx, path) = setup("feature/JIRA-42-login", "added login\n");

        let err = command(temp.path(), None).execute(&cli(), &ctx).unwrap_err();

        assert_eq!(
            crate::exit_codes::from_error(&err),
            crate::exit_codes::VALIDATION_ERROR
        );
        assert_eq!(std::fs::read_to_string(path).unwrap(), "added login\n");
    }

    #[test]
    fn test_merge_source_skipped() {
        let (temp, ctx, path) = setup("feature/JIRA-42-login", "Merge branch 'x'\n");

        command(temp.path(), Some("merge"))
            .execute(&cli(), &ctx)
            .unwrap();

        assert_eq!(std::fs::read_to_string(path).unwrap(), "Merge branch 'x'\n");
    }

    #[test]
    fn test_skipped_branch_left_alone() {
        let (temp, ctx, path) = setup("main", "not conventional\n");

        command(temp.path(), None).execute(&cli(), &ctx).unwrap();

        assert_eq!(std::fs::read_to_string(path).unwrap(), "not conventional\n");
    }

    #[test]
    fn test_missing_issue_is_not_an_error() {
        let (temp, ctx, path) = setup("feature/login", "fix: handle empty password\n");

        command(temp.path(), None).execute(&cli(), &ctx).unwrap();

        assert_eq!(
            std::fs::read_to_string(path).unwrap(),
            "fix: handle empty password\n"
        );
    }

    #[test]
    fn test_append_footer_adds_missing_newline() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("MSG");
        std::fs::write(&path, "feat: x").unwrap();

        append_footer(&path, "feat: x", "\njira: JIRA-1").unwrap();

        assert_eq!(std::fs::read_to_string(path).unwrap(), "feat: x\n\njira: JIRA-1\n");
    }
}
