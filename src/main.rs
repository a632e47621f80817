//! agesweep - delete pattern-matched files older than a retention threshold.
//!
//! Usage:
//!   agesweep [PATH]                      Scan PATH daily, delete segments older than 5 days
//!   agesweep -i 0 [PATH]                 Scan once and exit
//!   agesweep -a 12h -i 1h -p '*.ts'      Custom threshold, interval and pattern
//!   agesweep --help                      Show help

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser};
use color_eyre::eyre::{Context, Result};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use agesweep_core::{SweepConfig, TimestampSource, format_age, parse_duration};
use agesweep_ops::Scheduler;

#[derive(Parser)]
#[command(
    name = "agesweep",
    version,
    about = "Periodically delete pattern-matched files older than a retention threshold",
    long_about = "agesweep bounds the disk usage of an append-only file store by age.\n\n\
                  Every INTERVAL it lists PATH (not recursively), picks the entries whose \
                  names match one of the patterns, and deletes those whose timestamp is \
                  older than MAX_AGE. Press Ctrl-C to stop."
)]
struct Cli {
    /// Directory to scan (defaults to current directory)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Delete files older than this (e.g., "5d", "1d12h", "90m")
    #[arg(short = 'a', long, default_value = "5d", value_parser = parse_duration)]
    max_age: Duration,

    /// Time between scans; 0 scans once and exits
    #[arg(short, long, default_value = "1d", value_parser = parse_duration)]
    interval: Duration,

    /// Measure age from creation time instead of modification time
    #[arg(short = 'c', long)]
    use_creation_time: bool,

    /// File name pattern to match (repeatable; replaces the default patterns)
    #[arg(short, long = "pattern", value_name = "GLOB")]
    patterns: Vec<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    /// Turn the parsed flags into the immutable sweep configuration.
    fn into_config(self) -> Result<SweepConfig> {
        let mut builder = SweepConfig::builder();
        builder
            .path(self.path)
            .max_file_age(self.max_age)
            .interval(self.interval)
            .timestamp_source(TimestampSource::from_creation_flag(self.use_creation_time));
        if !self.patterns.is_empty() {
            builder.patterns(self.patterns);
        }
        builder.build().context("Invalid configuration")
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let config = cli.into_config()?;
    run(config).await
}

/// Install the stderr log sink. `RUST_LOG` takes precedence over the flags.
fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "warn",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Run the scheduler until it completes, is interrupted or fails.
async fn run(config: SweepConfig) -> Result<()> {
    tracing::info!(
        "Monitoring {} for {} older than {} (by {})",
        config.path.display(),
        config.patterns.join(", "),
        format_age(config.max_file_age),
        config.timestamp_source
    );

    let token = CancellationToken::new();
    let mut scheduler = Scheduler::new(&config, token.clone()).context("Invalid configuration")?;
    watch_interrupt(token)?;

    scheduler.run().await.context("Sweep failed")?;
    Ok(())
}

/// Cancel `token` on Ctrl-C.
///
/// The handler is installed before returning, so an interrupt that arrives
/// before the runtime next polls the watcher task is still caught.
#[cfg(unix)]
fn watch_interrupt(token: CancellationToken) -> Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut interrupt = signal(SignalKind::interrupt()).context("Cannot listen for Ctrl-C")?;
    tokio::spawn(async move {
        if interrupt.recv().await.is_some() {
            token.cancel();
        }
    });
    Ok(())
}

/// Cancel `token` on Ctrl-C.
#[cfg(windows)]
fn watch_interrupt(token: CancellationToken) -> Result<()> {
    let mut interrupt = tokio::signal::windows::ctrl_c().context("Cannot listen for Ctrl-C")?;
    tokio::spawn(async move {
        if interrupt.recv().await.is_some() {
            token.cancel();
        }
    });
    Ok(())
}
