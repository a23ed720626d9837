use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::Args;
use tracing::info;

use crate::core::cache::SequenceCache;
use crate::parsing::tsv::{read_kmer_list, write_kmer_hits};
use crate::scanning::kmers::{locate_kmers, DEFAULT_ASSEMBLY_MARKER};

const FALLBACK_OUTPUT: &str = "kmer_positions_results.tsv";

#[derive(Args)]
pub struct PositionArgs {
    /// K-mer table with `seq` and `contigs` columns
    pub tsv_file: PathBuf,

    /// Directory holding `<assembly>.<contig>.fasta` files
    pub fasta_base_dir: PathBuf,

    /// Output table (default: input name with `.tsv` replaced by `_positions.tsv`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Suffix that ends the assembly part of each `assembly.contig` reference
    #[arg(long, default_value = DEFAULT_ASSEMBLY_MARKER)]
    pub assembly_marker: String,
}

/// Output path derived from the input name
fn default_output(input: &Path) -> PathBuf {
    let name = input.to_string_lossy();
    let derived = name.replace(".tsv", "_positions.tsv");
    if derived == name {
        PathBuf::from(FALLBACK_OUTPUT)
    } else {
        PathBuf::from(derived)
    }
}

/// Execute kmer-positions subcommand
///
/// # Errors
///
/// Returns an error if the k-mer table is missing or malformed, or the output
/// cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: PositionArgs) -> anyhow::Result<()> {
    if !args.tsv_file.exists() {
        bail!("Input file '{}' not found", args.tsv_file.display());
    }

    info!("Reading input k-mer file: {}", args.tsv_file.display());
    info!("Using FASTA base directory: {}", args.fasta_base_dir.display());

    let entries = read_kmer_list(&args.tsv_file)
        .with_context(|| format!("Failed to read {}", args.tsv_file.display()))?;
    info!("Processing {} k-mer entries", entries.len());

    let mut cache = SequenceCache::new(&args.fasta_base_dir);
    let hits = locate_kmers(&entries, &mut cache, &args.assembly_marker);

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output(&args.tsv_file));
    let file =
        File::create(&output).with_context(|| format!("Failed to create {}", output.display()))?;
    let mut writer = BufWriter::new(file);
    write_kmer_hits(&mut writer, &hits)?;
    writer.flush()?;

    println!("Processing complete. Results saved to {}", output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output() {
        assert_eq!(
            default_output(Path::new("data/multiassembly_kmers.tsv")),
            PathBuf::from("data/multiassembly_kmers_positions.tsv")
        );
        assert_eq!(
            default_output(Path::new("kmers.txt")),
            PathBuf::from(FALLBACK_OUTPUT)
        );
    }
}
