//! Command-line interface for primer-scout.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **split-fasta**: Split a FASTA file by a header annotation
//! - **common-regions**: Report confident windows of consensus sequences
//! - **kmer-positions**: Locate k-mers on both strands of per-contig FASTA files
//! - **universal-primers**: Find k-mer pairs that amplify in every assembly
//! - **amplicons**: Extract regions bounded by degenerate primers
//! - **meme**: Reformat MEME motif sites into TSV and FASTA files
//!
//! ## Usage
//!
//! ```text
//! # Locate k-mers, then search for universal primer pairs
//! primer-scout kmer-positions multiassembly_kmers.tsv assembly/
//! primer-scout universal-primers --input_file multiassembly_kmers_positions.tsv --fasta_dir assembly/
//!
//! # JSON pair summary for scripting
//! primer-scout universal-primers --summary-format json
//!
//! # Degenerate primer search over many genomes
//! primer-scout amplicons -o amplicons.tsv -f TTYRTNGAYAAYATCTWYCG -r TCNGCNGTNGGNTAYCARCC assembly/*.fasta
//! ```

use clap::{Parser, Subcommand};

pub mod amplicons;
pub mod meme;
pub mod positions;
pub mod split;
pub mod universal;
pub mod windows;

#[derive(Parser)]
#[command(name = "primer-scout")]
#[command(version)]
#[command(about = "Find universal PCR primer pairs and related sequence analyses")]
#[command(
    long_about = "primer-scout finds forward/reverse k-mer pairs that produce an in-range PCR product in every target assembly.\n\nIt also bundles the helper steps around that search:\n- Splitting annotated FASTA files\n- Scanning consensus sequences for confident windows\n- Locating k-mers in contig FASTA files\n- Extracting amplicons bounded by degenerate primers\n- Reformatting MEME motif output"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split a FASTA file by the annotation captured from each header
    SplitFasta(split::SplitArgs),

    /// Slide a window over consensus sequences and report confident regions
    CommonRegions(windows::WindowArgs),

    /// Locate k-mers (both strands) in per-contig FASTA files
    KmerPositions(positions::PositionArgs),

    /// Find k-mer pairs that amplify in every target assembly
    UniversalPrimers(universal::UniversalArgs),

    /// Extract amplicons bounded by two degenerate primers
    Amplicons(amplicons::AmpliconArgs),

    /// Convert MEME motif sites into TSV and FASTA files
    Meme(meme::MemeArgs),
}

/// Console format for result summaries
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

impl Cli {
    /// Dispatch to the selected subcommand
    ///
    /// # Errors
    ///
    /// Returns the subcommand's error.
    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Commands::SplitFasta(args) => split::run(args),
            Commands::CommonRegions(args) => windows::run(args),
            Commands::KmerPositions(args) => positions::run(args),
            Commands::UniversalPrimers(args) => universal::run(args),
            Commands::Amplicons(args) => amplicons::run(args),
            Commands::Meme(args) => meme::run(args),
        }
    }
}
