//! lcov-delta CLI
//!
//! Coverage-trace differencing and directory snapshotting.
//! The `diff` subcommand isolates newly covered lines between two test
//! runs; the `watch` subcommand observes a directory tree over the
//! lifetime of a command.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use lcov_delta::commands::{diff, watch, DiffArgs, WatchArgs};

/// lcov-delta - coverage-trace differencing and snapshotting
#[derive(Parser, Debug)]
#[command(name = "lcov-delta")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Zero out lines already covered by a reference trace
    Diff {
        /// Reference trace whose covered lines are suppressed
        reference: PathBuf,

        /// Trace to rewrite
        input: PathBuf,

        /// Where to write the rewritten trace (overwritten if present)
        output: PathBuf,

        /// Write a JSON report of the run
        #[arg(long)]
        report: Option<PathBuf>,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Snapshot a directory on a thinning schedule while a command runs
    Watch {
        /// Directory tree to snapshot
        directory: PathBuf,

        /// Destination directory for checkpoint snapshots
        snapshot_dir: PathBuf,

        /// Command to spawn and observe
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
        command: Vec<String>,
    },
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Diff {
            reference,
            input,
            output,
            report,
            summary,
        } => {
            let args = DiffArgs {
                reference,
                input,
                output,
                report,
                print_summary: summary,
            };

            // Validate args first
            diff::validate_args(&args)?;

            // Execute diff
            diff::execute_diff(args)?;
        }

        Commands::Watch {
            directory,
            snapshot_dir,
            command,
        } => {
            let args = WatchArgs {
                directory,
                snapshot_dir,
                command,
            };

            watch::validate_args(&args)?;

            // Runs until externally terminated
            watch::execute_watch(args)?;
        }
    }

    Ok(())
}
