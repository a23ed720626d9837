use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Args;
use tracing::info;

use crate::parsing::fasta::read_fasta_file;
use crate::scanning::windows::{
    scan_records, write_window_report, WindowScanConfig, DEFAULT_UPPER_THRESHOLD,
    DEFAULT_WINDOW_SIZE,
};

#[derive(Args)]
pub struct WindowArgs {
    /// Consensus FASTA file (lowercase marks low-confidence bases)
    pub fasta: PathBuf,

    /// Minimum number of canonical A/C/G/T bases in a window
    pub enrichment_threshold: usize,

    /// Window length in bases
    #[arg(long, default_value_t = DEFAULT_WINDOW_SIZE)]
    pub window_size: usize,

    /// Minimum number of uppercase characters in a window
    #[arg(long, default_value_t = DEFAULT_UPPER_THRESHOLD)]
    pub upper_threshold: usize,

    /// Write the report here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute common-regions subcommand
///
/// # Errors
///
/// Returns an error if the FASTA file is missing or unreadable, or the report
/// cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: WindowArgs) -> anyhow::Result<()> {
    if !args.fasta.exists() {
        bail!("File not found: {}", args.fasta.display());
    }

    let config = WindowScanConfig {
        window_size: args.window_size,
        upper_threshold: args.upper_threshold,
        enrichment_threshold: args.enrichment_threshold,
    };
    config.validate()?;

    let records = read_fasta_file(&args.fasta)
        .with_context(|| format!("Failed to read {}", args.fasta.display()))?;
    let scans = scan_records(&records, &config);

    let mut writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    for scan in &scans {
        write_window_report(&mut writer, scan, &config)?;
        info!(
            "{}: {} of {} windows matched",
            scan.name,
            scan.matches.len(),
            scan.windows_checked
        );
    }
    writer.flush()?;

    Ok(())
}
