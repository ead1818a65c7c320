//! # tmplcheck CLI entry point
//!
//! Parses command-line arguments, initialises logging, runs the check, and
//! maps the outcome to a process exit status.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tmplcheck_cli::check::{run_check, CheckArgs};
use tmplcheck_cli::EXIT_FAILURE;
use tmplcheck_loader::ExternalLinter;

/// Validates configuration files against template files, reporting every
/// missing key, unexpected key, and type mismatch.
#[derive(Parser, Debug)]
#[command(name = "tmplcheck", version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(flatten)]
    check: CheckArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("tmplcheck v{} starting", env!("CARGO_PKG_VERSION"));

    let linter = ExternalLinter::new();
    let mut stdout = std::io::stdout().lock();

    match run_check(&cli.check, &linter, &mut stdout) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}
