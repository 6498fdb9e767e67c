//! Tag command

use anyhow::Context as _;
use clap::Args;
use tracing::info;

use crate::cli::context::Context;
use crate::cli::{output, Cli, OutputFormat};

/// Tag HEAD with the next version
#[derive(Debug, Args)]
pub struct TagCommand {
    /// Print the tag that would be created without creating it
    #[arg(long)]
    pub dry_run: bool,
}

impl TagCommand {
    /// Execute the tag command
    pub fn execute(&self, cli: &Cli, ctx: &Context) -> anyhow::Result<()> {
        info!(dry_run = self.dry_run, "executing tag command");
        let repo = ctx.repo()?;
        let generator = ctx.generator()?;
        let next = ctx.next_version(&repo, &ctx.strategy(), &generator)?;

        if !next.decision.updated {
            if !cli.quiet {
                output::info(&format!(
                    "nothing to do: current version {} unchanged",
                    next.current.version
                ));
            }
            return Ok(());
        }

        let version = next.version();
        let name = ctx.config.tag.format(&version);

        if !self.dry_run {
            repo.create_tag(&name, &format!("Version {}", version))
                .with_context(|| format!("error generating tag version: {}", version))?;
            info!(tag = %name, %version, "tag created");
        }

        match cli.format {
            OutputFormat::Json => output::print_json(&serde_json::json!({
                "tag": name,
                "version": version.to_string(),
                "created": !self.dry_run,
            }))?,
            OutputFormat::Text => {
                println!("{}", name);
                if cli.verbose && !cli.quiet && !self.dry_run {
                    output::success(&format!(
                        "tagged HEAD as {}",
                        output::tag_style().apply_to(&name)
                    ));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::context::test_support::{commit, repo_with_commits, tag};
    use clap::Parser;
    use relnote_core::config::Config;

    #[test]
    fn test_creates_next_version_tag() {
        let (temp, repo) = repo_with_commits(&["feat: first"]);
        tag(&repo, "1.0.0", 1_700_100_000);
        commit(&repo, "fix: repair", 1_700_200_000);

        let mut config = Config::default();
        config.tag.pattern = "v{version}".to_string();
        let ctx = Context {
            config,
            files: Vec::new(),
            dir: temp.path().to_path_buf(),
        };
        let cli = Cli::try_parse_from(["relnote", "-q", "tag"]).unwrap();

        TagCommand { dry_run: false }.execute(&cli, &ctx).unwrap();

        let created = repo.find_reference("refs/tags/v1.0.1").unwrap();
        let annotation = created.peel_to_tag().unwrap();
        assert_eq!(annotation.message().map(str::trim), Some("Version 1.0.1"));
    }

    #[test]
    fn test_dry_run_creates_nothing() {
        let (temp, _repo) = repo_with_commits(&["feat: first"]);
        let ctx = Context {
            config: Config::default(),
            files: Vec::new(),
            dir: temp.path().to_path_buf(),
        };
        let cli = Cli::try_parse_from(["relnote", "-q", "tag", "--dry-run"]).unwrap();

        TagCommand { dry_run: true }.execute(&cli, &ctx).unwrap();

        let git = ctx.repo().unwrap();
        assert!(git.tags("").unwrap().is_empty());
    }
}
