//! Diff command implementation.
//!
//! The diff command:
//! 1. Reads the reference trace and builds the covered-lines set
//! 2. Rewrites the input trace, zeroing entries the reference covered
//! 3. Writes the optional JSON report

use crate::output::write_report;
use crate::trace::{read_covered_lines, rewrite_trace, DiffReport};
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::PathBuf;
use std::time::Instant;

/// Arguments for the diff command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct DiffArgs {
    /// Reference trace whose covered lines are suppressed
    pub reference: PathBuf,

    /// Trace to rewrite
    pub input: PathBuf,

    /// Where to write the rewritten trace
    pub output: PathBuf,

    /// Optional path for a JSON report of the run
    pub report: Option<PathBuf>,

    /// Print text summary to stdout
    pub print_summary: bool,
}

/// Validate diff arguments
///
/// **Public** - can be called before execute_diff for early validation
///
/// # Arguments
/// * `args` - arguments to validate
///
/// # Returns
/// Ok if arguments are valid, Err with message if not
pub fn validate_args(args: &DiffArgs) -> Result<()> {
    if !args.reference.is_file() {
        anyhow::bail!(
            "Reference trace not found: {}",
            args.reference.display()
        );
    }

    if !args.input.is_file() {
        anyhow::bail!("Input trace not found: {}", args.input.display());
    }

    if args.output.as_os_str().is_empty() {
        anyhow::bail!("Output path cannot be empty");
    }

    if args.output.is_dir() {
        anyhow::bail!(
            "Output path is a directory: {}",
            args.output.display()
        );
    }

    Ok(())
}

/// Execute the diff command
///
/// **Public** - main entry point called from main.rs
///
/// # Arguments
/// * `args` - diff command arguments
///
/// # Returns
/// Ok if the rewrite succeeds, Err with context if any step fails
///
/// # Errors
/// * Unreadable reference or input trace
/// * Malformed line-hit entries in either trace
/// * File write errors on the output or report path
pub fn execute_diff(args: DiffArgs) -> Result<()> {
    let start_time = Instant::now();

    info!("Diffing {} against {}", args.input.display(), args.reference.display());

    // Step 1: Build the covered-lines set from the reference trace
    info!("Step 1/3: Reading reference trace...");
    let covered = read_covered_lines(&args.reference)
        .context("Failed to read reference trace")?;

    debug!("Covered-lines set holds {} keys", covered.len());

    // Step 2: Rewrite the input trace
    info!("Step 2/3: Rewriting input trace...");
    let stats = rewrite_trace(&args.input, &args.output, &covered)
        .context("Failed to rewrite input trace")?;

    info!("✓ Rewritten trace written to: {}", args.output.display());

    // Step 3: Write report (if requested)
    if let Some(report_path) = &args.report {
        info!("Step 3/3: Writing JSON report...");
        let report =
            DiffReport::from_run(&args.reference, &args.input, &args.output, &covered, stats);
        write_report(&report, report_path).context("Failed to write JSON report")?;

        info!("✓ Report written to: {}", report_path.display());
    } else {
        info!("Step 3/3: Skipping report (not requested)");
    }

    // Print text summary (if requested)
    if args.print_summary {
        println!("\n{}", "=".repeat(80));
        println!("DIFF SUMMARY");
        println!("{}", "=".repeat(80));
        println!("Reference:     {}", args.reference.display());
        println!("Input:         {}", args.input.display());
        println!("Output:        {}", args.output.display());
        println!("Covered lines: {}", covered.len());
        println!("Entries seen:  {}", stats.entries_seen);
        println!("Entries zeroed: {}", stats.entries_zeroed);
        println!("{}", "=".repeat(80));
    }

    let elapsed = start_time.elapsed();
    info!("Diff completed in {:.2}s", elapsed.as_secs_f64());

    Ok(())
}
