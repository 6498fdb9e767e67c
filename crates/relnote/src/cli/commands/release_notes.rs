//! Release notes command

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use crate::cli::context::Context;
use crate::cli::{output, Cli, OutputFormat};

/// Generate release notes for a tag or the next version
#[derive(Debug, Args)]
pub struct ReleaseNotesCommand {
    /// Existing tag to describe; the next version when omitted
    #[arg(short, long)]
    pub tag: Option<String>,

    /// Output file name; standard output when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl ReleaseNotesCommand {
    /// Execute the release-notes command
    pub fn execute(&self, cli: &Cli, ctx: &Context) -> anyhow::Result<()> {
        info!(tag = ?self.tag, "executing release-notes command");
        let repo = ctx.repo()?;
        let strategy = ctx.strategy();
        let generator = ctx.generator()?;

        let note = match &self.tag {
            Some(tag) => ctx.tag_release_note(&repo, &strategy, &generator, tag)?,
            None => {
                let next = ctx.next_version(&repo, &strategy, &generator)?;
                if !next.decision.updated && !cli.quiet {
                    output::warning(&format!(
                        "no release-worthy commits since {}",
                        next.current.version
                    ));
                }
                ctx.next_release_note(&next, &generator)
            }
        };

        let document = match cli.format {
            OutputFormat::Json => serde_json::to_string_pretty(&note)?,
            OutputFormat::Text => generator.format_release_note(&note),
        };
        output::write_document(&document, self.output.as_deref())
    }
}
