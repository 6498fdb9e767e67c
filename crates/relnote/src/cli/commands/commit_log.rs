//! Commit log command

use anyhow::Context as _;
use clap::Args;
use tracing::info;

use relnote_git::LogRange;

use super::RangeArgs;
use crate::cli::context::Context;
use crate::cli::Cli;

/// List parsed commits of a range as JSON lines
#[derive(Debug, Args)]
pub struct CommitLogCommand {
    /// List the commits of a tag, since the tag before it
    #[arg(short, long, conflicts_with_all = ["range", "start", "end"])]
    pub tag: Option<String>,

    #[command(flatten)]
    pub range: RangeArgs,
}

impl CommitLogCommand {
    /// Execute the commit-log command
    pub fn execute(&self, _cli: &Cli, ctx: &Context) -> anyhow::Result<()> {
        info!(tag = ?self.tag, range = ?self.range, "executing commit-log command");
        let repo = ctx.repo()?;
        let generator = ctx.generator()?;

        let range = match &self.tag {
            Some(tag) => {
                let previous = repo.previous_tag(tag, ctx.tag_filter())?;
                LogRange::tags(previous.as_ref().map(|t| t.name.as_str()), Some(tag))
            }
            None => ctx.log_range(
                &repo,
                self.range.range.into(),
                self.range.start.as_deref(),
                self.range.end.as_deref(),
            )?,
        };

        let raw = repo.log(&range).context("error getting git log")?;
        for entry in generator.parse_log(&raw)? {
            println!("{}", serde_json::to_string(&entry)?);
        }

        Ok(())
    }
}
