//! CLI definition and command handling

pub mod commands;
pub mod context;
pub mod output;

use clap::{Parser, Subcommand};

use relnote_core::error::ConfigError;

use commands::{
    ChangelogCommand, CommitLogCommand, CommitNotesCommand, CompletionsCommand, ConfigCommand,
    CurrentVersionCommand, NextVersionCommand, ReleaseNotesCommand, TagCommand,
    ValidateCommitMessageCommand,
};
use context::Context;

/// relnote - release versions and notes from conventional commits
#[derive(Debug, Parser)]
#[command(name = "relnote")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Working directory
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the default or the effective configuration
    #[command(visible_alias = "cfg")]
    Config(ConfigCommand),

    /// Get the last released version from git tags
    #[command(visible_alias = "cv")]
    CurrentVersion(CurrentVersionCommand),

    /// Compute the next version from the commits since the last tag
    #[command(visible_alias = "nv")]
    NextVersion(NextVersionCommand),

    /// List parsed commits of a range as JSON lines
    #[command(visible_alias = "cl")]
    CommitLog(CommitLogCommand),

    /// Generate notes for a range of commits
    #[command(visible_alias = "cn")]
    CommitNotes(CommitNotesCommand),

    /// Generate release notes for a tag or the next version
    #[command(visible_alias = "rn")]
    ReleaseNotes(ReleaseNotesCommand),

    /// Generate a changelog from the version tags
    #[command(visible_alias = "cgl")]
    Changelog(ChangelogCommand),

    /// Tag HEAD with the next version
    #[command(visible_alias = "tg")]
    Tag(TagCommand),

    /// Validate and enhance a commit message (prepare-commit-msg hook)
    #[command(visible_alias = "vcm")]
    ValidateCommitMessage(ValidateCommitMessageCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

impl Cli {
    /// Load the effective configuration for the current directory
    pub fn load_config(&self) -> Result<Context, ConfigError> {
        let cwd = std::env::current_dir()?;
        Context::load(&cwd)
    }

    /// Execute the CLI command.
    ///
    /// Commands that need no configuration still run when it failed to load.
    pub fn execute(&self, config: Result<Context, ConfigError>) -> anyhow::Result<()> {
        match &self.command {
            Commands::Completions(cmd) => cmd.execute(self),
            Commands::Config(cmd) => cmd.execute(self, config),
            Commands::CurrentVersion(cmd) => cmd.execute(self, &config?),
            Commands::NextVersion(cmd) => cmd.execute(self, &config?),
            Commands::CommitLog(cmd) => cmd.execute(self, &config?),
            Commands::CommitNotes(cmd) => cmd.execute(self, &config?),
            Commands::ReleaseNotes(cmd) => cmd.execute(self, &config?),
            Commands::Changelog(cmd) => cmd.execute(self, &config?),
            Commands::Tag(cmd) => cmd.execute(self, &config?),
            Commands::ValidateCommitMessage(cmd) => cmd.execute(self, &config?),
        }
    }
}
