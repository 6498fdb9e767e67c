//! Commit notes command

use std::path::PathBuf;

use anyhow::Context as _;
use chrono::DateTime;
use clap::Args;
use tracing::info;

use super::RangeArgs;
use crate::cli::context::Context;
use crate::cli::{output, Cli, OutputFormat};

/// Generate notes for a range of commits
#[derive(Debug, Args)]
pub struct CommitNotesCommand {
    #[command(flatten)]
    pub range: RangeArgs,

    /// Output file name; standard output when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl CommitNotesCommand {
    /// Execute the commit-notes command
    pub fn execute(&self, cli: &Cli, ctx: &Context) -> anyhow::Result<()> {
        info!(range = ?self.range, "executing commit-notes command");
        let repo = ctx.repo()?;
        let generator = ctx.generator()?;

        let range = ctx.log_range(
            &repo,
            self.range.range.into(),
            self.range.start.as_deref(),
            self.range.end.as_deref(),
        )?;
        let raw = repo
            .log(&range)
            .with_context(|| format!("error getting git log from range: {}", range.range_type))?;

        // dated by the newest commit of the range
        let date = raw
            .first()
            .and_then(|c| DateTime::from_timestamp(c.timestamp, 0));
        let note = generator.generate(None, "", date, &raw)?;

        let document = match cli.format {
            OutputFormat::Json => serde_json::to_string_pretty(&note)?,
            OutputFormat::Text => generator.format_release_note(&note),
        };
        output::write_document(&document, self.output.as_deref())
    }
}
