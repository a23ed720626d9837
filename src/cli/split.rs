use std::path::PathBuf;

use anyhow::bail;
use clap::Args;

use crate::scanning::split::{compile_header_pattern, split_fasta, DEFAULT_HEADER_PATTERN};

#[derive(Args)]
pub struct SplitArgs {
    /// Input FASTA file (e.g. syncom.align)
    #[arg(short = 'i', long = "in")]
    pub input: PathBuf,

    /// Directory for the split FASTA files (created if missing)
    #[arg(short = 'o', long)]
    pub outdir: PathBuf,

    /// Prefix for every output file name
    #[arg(short = 'p', long)]
    pub prefix: String,

    /// Regex applied to each header; capture group 1 names the output file
    #[arg(long, default_value = DEFAULT_HEADER_PATTERN)]
    pub pattern: String,
}

/// Execute split-fasta subcommand
///
/// # Errors
///
/// Returns an error if the input is missing, the pattern is invalid, or an
/// output file cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: SplitArgs) -> anyhow::Result<()> {
    if !args.input.exists() {
        bail!("Input file '{}' not found", args.input.display());
    }

    let pattern = compile_header_pattern(&args.pattern)?;
    let summary = split_fasta(&args.input, &args.outdir, &args.prefix, &pattern)?;

    println!("Processing complete.");
    println!("Total FASTA records written: {}", summary.records_written);
    println!("Total unique FASTA files generated: {}", summary.files.len());
    if summary.records_skipped > 0 {
        println!(
            "Records skipped (header did not match): {}",
            summary.records_skipped
        );
    }

    Ok(())
}
