//! relnote - release versions and notes from conventional commits

mod cli;
mod exit_codes;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use cli::{output, Cli};

fn main() {
    let code = run();
    std::process::exit(code);
}

/// Run the CLI and return the process exit code.
///
/// The tracing guard lives in this scope so buffered log lines are flushed
/// before the process exits.
fn run() -> i32 {
    let cli = Cli::parse();

    if let Some(dir) = &cli.directory {
        if let Err(err) = std::env::set_current_dir(dir) {
            output::error(&format!("cannot enter {}: {}", dir.display(), err));
            return exit_codes::ERROR;
        }
    }

    let config = cli.load_config();
    let config_level = config
        .as_ref()
        .ok()
        .and_then(|ctx| ctx.config.log_level.clone());
    let _guard = init_tracing(cli.verbose, config_level.as_deref());

    match cli.execute(config) {
        Ok(()) => exit_codes::SUCCESS,
        Err(err) => {
            output::error(&format!("{:#}", err));
            exit_codes::from_error(&err)
        }
    }
}

/// Console filter: RUST_LOG, then `--verbose`, then the configured level, then warn
fn console_filter(verbose: bool, config_level: Option<&str>) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    if verbose {
        return EnvFilter::new("debug");
    }
    config_level
        .and_then(|level| EnvFilter::try_new(level).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}

/// Set up tracing with two layers:
/// - Console: controlled by RUST_LOG, `--verbose` or the config `log-level` (default: warn)
/// - File: always debug-level JSON to ~/.relnote/logs/
fn init_tracing(
    verbose: bool,
    config_level: Option<&str>,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let console_filter = console_filter(verbose, config_level);

    if let Some(log_dir) = log_directory() {
        let file_appender = tracing_appender::rolling::daily(&log_dir, "relnote.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_filter(console_filter),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(non_blocking)
                    .with_target(true)
                    .with_filter(EnvFilter::new("debug")),
            )
            .init();

        return Some(guard);
    }

    // Fallback: console only
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(console_filter),
        )
        .init();

    None
}

/// Returns the log directory path, creating it if needed.
fn log_directory() -> Option<std::path::PathBuf> {
    let log_dir = dirs::home_dir()?.join(".relnote").join("logs");
    std::fs::create_dir_all(&log_dir).ok()?;
    Some(log_dir)
}
