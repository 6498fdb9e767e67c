//! Next version command

use clap::Args;
use console::style;
use tracing::info;

use crate::cli::context::{Context, NextVersion};
use crate::cli::{output, Cli, OutputFormat};

/// Compute the next version from the commits since the last tag
#[derive(Debug, Args)]
pub struct NextVersionCommand {}

impl NextVersionCommand {
    /// Execute the next-version command
    pub fn execute(&self, cli: &Cli, ctx: &Context) -> anyhow::Result<()> {
        info!("executing next-version command");
        let repo = ctx.repo()?;
        let generator = ctx.generator()?;
        let next = ctx.next_version(&repo, &ctx.strategy(), &generator)?;
        let version = next.version();

        if !next.decision.updated && !cli.quiet && cli.format == OutputFormat::Text {
            output::info(&format!(
                "no release-worthy commits since {}",
                next.current.version
            ));
        }

        match cli.format {
            OutputFormat::Json => output::print_json(&serde_json::json!({
                "current": next.current.version.to_string(),
                "next": version.to_string(),
                "bumpType": next.decision.bump_type,
                "updated": next.decision.updated,
                "commits": next.commits.len(),
            }))?,
            OutputFormat::Text if cli.verbose && !cli.quiet => {
                let current = style(&next.current.version).cyan().to_string();
                let bump = style(next.decision.bump_type).yellow().to_string();
                println!("{}", style("Version Calculation").bold());
                println!();
                println!("{}", output::key_value("Current version", &current));
                let next_version = output::version_style().apply_to(&version).to_string();
                println!("{}", output::key_value("Next version", &next_version));
                println!("{}", output::key_value("Bump type", &bump));
                println!(
                    "{}",
                    output::key_value("Commits analyzed", &next.commits.len().to_string())
                );
            }
            OutputFormat::Text => println!("{}", plain_version(&next)),
        }

        Ok(())
    }
}

/// `major.minor.patch` of the next version, printed whether or not it changed
fn plain_version(next: &NextVersion) -> String {
    let version = next.version();
    format!("{}.{}.{}", version.major, version.minor, version.patch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::context::test_support::{commit, repo_with_commits, tag};
    use clap::Parser;
    use relnote_core::config::Config;
    use semver::Version;

    fn context(dir: &std::path::Path) -> Context {
        Context {
            config: Config::default(),
            files: Vec::new(),
            dir: dir.to_path_buf(),
        }
    }

    #[test]
    fn test_unchanged_version_is_still_reported() {
        let (temp, repo) = repo_with_commits(&["feat: first"]);
        tag(&repo, "1.2.3", 1_700_100_000);
        commit(&repo, "revert: undo first", 1_700_200_000);

        let ctx = context(temp.path());
        let git = ctx.repo().unwrap();
        let generator = ctx.generator().unwrap();
        let next = ctx.next_version(&git, &ctx.strategy(), &generator).unwrap();

        assert!(!next.decision.updated);
        assert_eq!(next.version(), Version::new(1, 2, 3));
        assert_eq!(plain_version(&next), "1.2.3");

        let cli = Cli::try_parse_from(["relnote", "-q", "next-version"]).unwrap();
        NextVersionCommand {}.execute(&cli, &ctx).unwrap();
    }

    #[test]
    fn test_first_release_is_clamped_to_minor() {
        let (temp, _repo) = repo_with_commits(&["fix: first"]);

        let ctx = context(temp.path());
        let git = ctx.repo().unwrap();
        let generator = ctx.generator().unwrap();
        let next = ctx.next_version(&git, &ctx.strategy(), &generator).unwrap();

        assert!(next.decision.updated);
        assert_eq!(next.version(), Version::new(0, 1, 0));
        assert_eq!(plain_version(&next), "0.1.0");

        let cli = Cli::try_parse_from(["relnote", "next-version"]).unwrap();
        NextVersionCommand {}.execute(&cli, &ctx).unwrap();
    }
}
