use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tracing::{info, warn};

use crate::scanning::motifs::{scan_fasta, write_amplicon_header, write_amplicon_rows, MotifPair};

#[derive(Args)]
pub struct AmpliconArgs {
    /// Output TSV file
    #[arg(short, long)]
    pub output: PathBuf,

    /// Degenerate start primer (e.g. TTYRTNGAYAAYATCTWYCG)
    #[arg(short = 'f', long)]
    pub primer_start: String,

    /// Degenerate end primer (e.g. TCNGCNGTNGGNTAYCARCC)
    #[arg(short = 'r', long)]
    pub primer_end: String,

    /// Input FASTA files
    pub fasta: Vec<PathBuf>,
}

/// Execute amplicons subcommand
///
/// # Errors
///
/// Returns an error if a primer is invalid or the output cannot be written.
/// Missing or unreadable inputs are logged and skipped.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: AmpliconArgs) -> anyhow::Result<()> {
    let motifs = MotifPair::new(&args.primer_start, &args.primer_end)?;
    info!(
        "Start motif: {} -> {}",
        args.primer_start,
        motifs.start_pattern()
    );
    info!("End motif: {} -> {}", args.primer_end, motifs.end_pattern());

    if args.fasta.is_empty() {
        warn!("No input FASTA files given");
        return Ok(());
    }

    let file = File::create(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;
    let mut writer = BufWriter::new(file);
    write_amplicon_header(&mut writer)?;

    let mut total = 0;
    let mut scanned = 0;
    for path in &args.fasta {
        let filename = path
            .file_name()
            .map_or_else(|| path.to_string_lossy(), |name| name.to_string_lossy());
        if !path.exists() {
            warn!("No file found at '{}'; skipping", path.display());
            continue;
        }
        info!("Processing {filename}");

        let hits = match scan_fasta(path, &motifs) {
            Ok(hits) => hits,
            Err(e) => {
                warn!("Error reading file {}: {e}; skipping", path.display());
                continue;
            }
        };
        write_amplicon_rows(&mut writer, &filename, &hits)?;
        total += hits.len();
        scanned += 1;
    }
    writer.flush()?;

    println!(
        "Found {total} amplicons in {scanned} files. Results saved to {}",
        args.output.display()
    );
    Ok(())
}
