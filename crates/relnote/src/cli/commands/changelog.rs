//! Changelog command

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Args;
use tracing::{debug, info};

use relnote_git::LogRange;
use relnote_strategies::VersionStrategy;

use crate::cli::context::Context;
use crate::cli::{output, Cli, OutputFormat};

/// Generate a changelog from the version tags
#[derive(Debug, Args)]
pub struct ChangelogCommand {
    /// Number of most recent tags to include
    #[arg(short = 'n', long, default_value_t = 10)]
    pub size: usize,

    /// Include every tag, ignoring --size
    #[arg(long)]
    pub all: bool,

    /// Prepend the next version when there are release-worthy commits since the last tag
    #[arg(long)]
    pub add_next_version: bool,

    /// Only include tags that parse as semantic versions
    #[arg(long)]
    pub semantic_version_only: bool,

    /// Output file name; standard output when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl ChangelogCommand {
    /// Execute the changelog command
    pub fn execute(&self, cli: &Cli, ctx: &Context) -> anyhow::Result<()> {
        info!(
            size = self.size,
            all = self.all,
            add_next_version = self.add_next_version,
            semantic_version_only = self.semantic_version_only,
            "executing changelog command"
        );
        let repo = ctx.repo()?;
        let strategy = ctx.strategy();
        let generator = ctx.generator()?;

        let mut tags = repo.tags(ctx.tag_filter())?;
        tags.reverse();

        let mut notes = Vec::new();

        if self.add_next_version {
            let next = ctx.next_version(&repo, &strategy, &generator)?;
            if next.decision.updated {
                notes.push(ctx.next_release_note(&next, &generator));
            }
        }

        for (i, tag) in tags.iter().enumerate() {
            if !self.all && i >= self.size {
                break;
            }
            if self.semantic_version_only && !strategy.is_valid(&tag.name) {
                debug!(tag = %tag.name, "skipping non-semver tag");
                continue;
            }

            let previous = tags.get(i + 1).map(|t| t.name.as_str());
            let raw = repo
                .log(&LogRange::tags(previous, Some(&tag.name)))
                .with_context(|| format!("error getting git log from tag: {}", tag.name))?;
            notes.push(generator.generate(
                strategy.parse(&tag.name).ok(),
                &tag.name,
                tag.date,
                &raw,
            )?);
        }

        let document = match cli.format {
            OutputFormat::Json => serde_json::to_string_pretty(&notes)?,
            OutputFormat::Text => generator.format_changelog(&notes),
        };
        output::write_document(&document, self.output.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["relnote", "changelog"]).unwrap();
        match cli.command {
            crate::cli::Commands::Changelog(cmd) => {
                assert_eq!(cmd.size, 10);
                assert!(!cmd.all);
                assert!(!cmd.add_next_version);
                assert!(!cmd.semantic_version_only);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
