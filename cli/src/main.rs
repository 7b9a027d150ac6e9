//! claimcheck: evidence-graph claim verification CLI
//!
//! Replays recorded planner runs through the claimcheck engine and prints a
//! verdict per claim. No network calls are made; every step comes from the
//! fixture file.
//!
//! Usage:
//!   cargo run -p cli -- verify '"The Eiffel Tower is painted every 7 years", 2+2=4' \
//!       --steps crates/claimcheck-replay/fixtures/demo.json
//!   cargo run -p cli -- replay --steps crates/claimcheck-replay/fixtures/demo.json --trace
//!   cargo run -p cli -- verify "2+2=4" --steps demo.json --interactive
//!   cargo run -p cli -- check reports.json

mod query;
mod render;

use std::io;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use claimcheck_config::RunConfig;
use claimcheck_contracts::error::{ClaimCheckError, ClaimCheckResult};
use claimcheck_replay::{
    parse_claims, read_reports, verify_claims, write_reports, FixtureStepSource,
};

// ── CLI definition ────────────────────────────────────────────────────────────

/// claimcheck: verify factual claims against recorded evidence.
#[derive(Parser)]
#[command(
    name = "claimcheck",
    about = "Evidence-graph claim verification over recorded planner runs",
    long_about = "Replays recorded search, fetch and classify steps for each claim,\n\
                  builds an evidence graph and aggregates a verdict with confidence."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Verify the claims in INPUT (quoted segments, otherwise comma-separated).
    Verify {
        /// Raw claim text, e.g. '"A is true", B is false'.
        input: String,

        #[command(flatten)]
        options: RunOptions,
    },
    /// Verify every claim recorded in the fixture.
    Replay {
        #[command(flatten)]
        options: RunOptions,
    },
    /// Recompute the evidence digest of every report in a `--report` file.
    Check {
        /// Report file written by `verify` or `replay`.
        report: PathBuf,
    },
}

#[derive(Args)]
struct RunOptions {
    /// JSON fixture holding the recorded steps per claim.
    #[arg(long)]
    steps: PathBuf,

    /// TOML run configuration (tool names, URL cap, top-k).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write all claim reports to this path as JSON.
    #[arg(long)]
    report: Option<PathBuf>,

    /// Open a query prompt after each claim.
    #[arg(long)]
    interactive: bool,

    /// Print the processing trace for each claim.
    #[arg(long)]
    trace: bool,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Verify { input, options } => run(Some(&input), &options),
        Command::Replay { options } => run(None, &options),
        Command::Check { report } => check(&report),
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

// ── Batch ─────────────────────────────────────────────────────────────────────

/// Verify the claims in `input`, or every recorded claim when `None`.
fn run(input: Option<&str>, options: &RunOptions) -> ClaimCheckResult<()> {
    let config = match &options.config {
        Some(path) => RunConfig::from_file(path)?,
        None => RunConfig::default(),
    };
    let source = FixtureStepSource::from_file(&options.steps)?;

    let claims = match input {
        Some(text) => parse_claims(text),
        None => source.claims(),
    };
    if claims.is_empty() {
        println!("No claims to verify.");
        return Ok(());
    }

    info!(claims = claims.len(), "verifying claims");
    let reports = verify_claims(&claims, &source, &config);

    let stdin = io::stdin();
    for report in &reports {
        for line in render::report_lines(report, options.trace) {
            println!("{}", line);
        }

        if options.interactive {
            if let Err(e) = query::run_query_loop(report, stdin.lock(), io::stdout()) {
                eprintln!("query loop ended: {}", e);
            }
        }
    }

    if let Some(path) = &options.report {
        write_reports(path, &reports)?;
        println!();
        println!("Reports written to {}", path.display());
    }

    Ok(())
}

// ── Check ─────────────────────────────────────────────────────────────────────

/// Fails if any report in `path` no longer matches its evidence digest.
fn check(path: &Path) -> ClaimCheckResult<()> {
    let reports = read_reports(path)?;
    for line in render::check_lines(&reports) {
        println!("{}", line);
    }

    let mismatched = reports.iter().filter(|r| !r.digest_matches()).count();
    if mismatched > 0 {
        return Err(ClaimCheckError::Report {
            reason: format!(
                "{} of {} reports in '{}' fail the evidence digest check",
                mismatched,
                reports.len(),
                path.display()
            ),
        });
    }
    Ok(())
}
