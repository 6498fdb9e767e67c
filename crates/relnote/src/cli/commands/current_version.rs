//! Current version command

use clap::Args;
use tracing::info;

use crate::cli::context::Context;
use crate::cli::{output, Cli, OutputFormat};

/// Get the last released version from git tags
#[derive(Debug, Args)]
pub struct CurrentVersionCommand {}

impl CurrentVersionCommand {
    /// Execute the current-version command
    pub fn execute(&self, cli: &Cli, ctx: &Context) -> anyhow::Result<()> {
        info!("executing current-version command");
        let repo = ctx.repo()?;
        let current = ctx.current_version(&repo, &ctx.strategy())?;
        let version = &current.version;
        let plain = format!("{}.{}.{}", version.major, version.minor, version.patch);

        match cli.format {
            OutputFormat::Json => output::print_json(&serde_json::json!({
                "tag": current.tag,
                "version": plain,
            }))?,
            OutputFormat::Text if cli.verbose && !cli.quiet => {
                let tag = output::tag_style().apply_to(current.tag_name()).to_string();
                let styled = output::version_style().apply_to(&plain).to_string();
                println!("{}", output::key_value("Tag", &tag));
                println!("{}", output::key_value("Version", &styled));
            }
            OutputFormat::Text => println!("{}", plain),
        }

        Ok(())
    }
}
