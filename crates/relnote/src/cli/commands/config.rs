//! Config command

use clap::{Args, Subcommand};
use tracing::info;

use relnote_core::config::default_config_yaml;
use relnote_core::error::ConfigError;

use crate::cli::context::Context;
use crate::cli::{output, Cli, OutputFormat};

/// Show the default or the effective configuration
#[derive(Debug, Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration views
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Print the built-in defaults
    Default,
    /// Print the configuration in effect for the working directory
    Show,
}

impl ConfigCommand {
    /// Execute the config command
    pub fn execute(&self, cli: &Cli, config: Result<Context, ConfigError>) -> anyhow::Result<()> {
        info!(action = ?self.action, "executing config command");

        match self.action {
            ConfigAction::Default => match cli.format {
                OutputFormat::Json => {
                    output::print_json(&relnote_core::config::Config::default())?
                }
                OutputFormat::Text => print!("{}", default_config_yaml()?),
            },
            ConfigAction::Show => {
                let ctx = config?;
                match cli.format {
                    OutputFormat::Json => output::print_json(&serde_json::json!({
                        "files": ctx.files,
                        "config": ctx.config,
                    }))?,
                    OutputFormat::Text => {
                        if !cli.quiet {
                            for file in &ctx.files {
                                output::info(&format!(
                                    "loaded {}",
                                    output::path_style().apply_to(file.display())
                                ));
                            }
                        }
                        print!("{}", serde_yaml::to_string(&ctx.config)?);
                    }
                }
            }
        }

        Ok(())
    }
}
