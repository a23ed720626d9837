use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Args;
use tracing::info;

use crate::cli::OutputFormat;
use crate::core::cache::SequenceCache;
use crate::core::types::PairSummary;
use crate::parsing::tsv::read_kmer_hits;
use crate::primers::extract::extract_amplicons;
use crate::primers::homology::{HomologyMap, TargetAssemblies};
use crate::primers::pairs::find_universal_pairs;
use crate::primers::report::PrimerReport;
use crate::primers::{PrimerSearchConfig, DEFAULT_MAX_PRODUCT_SIZE, DEFAULT_MIN_PRODUCT_SIZE};

#[derive(Args)]
pub struct UniversalArgs {
    /// K-mer hit table (seq, assembly, contig, position, strand)
    #[arg(
        long = "input_file",
        alias = "input-file",
        default_value = "multiassembly_kmers_positions.tsv"
    )]
    pub input_file: PathBuf,

    /// Report TSV to write
    #[arg(
        long = "output_file",
        alias = "output-file",
        default_value = "universal_primer_pairs_short.tsv"
    )]
    pub output_file: PathBuf,

    /// Minimum PCR product size in bp (inclusive)
    #[arg(
        long = "min_product_size",
        alias = "min-product-size",
        default_value_t = DEFAULT_MIN_PRODUCT_SIZE
    )]
    pub min_product_size: u64,

    /// Maximum PCR product size in bp (inclusive)
    #[arg(
        long = "max_product_size",
        alias = "max-product-size",
        default_value_t = DEFAULT_MAX_PRODUCT_SIZE
    )]
    pub max_product_size: u64,

    /// Directory holding `<assembly>.<contig>.fasta` files
    #[arg(long = "fasta_dir", alias = "fasta-dir", default_value = "./assembly/")]
    pub fasta_dir: PathBuf,

    /// Restrict the search to these assemblies (repeatable; default: all in the input)
    #[arg(long = "assembly")]
    pub assemblies: Vec<String>,

    /// Append primer melting temperatures (Fwd_Tm, Rev_Tm) to the report
    #[arg(long)]
    pub with_tm: bool,

    /// Format of the console pair summary
    #[arg(long, value_enum, default_value = "text")]
    pub summary_format: OutputFormat,
}

/// Execute universal-primers subcommand
///
/// # Errors
///
/// Returns an error if the input table is missing or malformed, no target
/// assembly is present, the size range is invalid, or the report cannot be
/// written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: UniversalArgs) -> anyhow::Result<()> {
    if !args.input_file.exists() {
        bail!("Input file '{}' not found", args.input_file.display());
    }

    let hits = read_kmer_hits(&args.input_file)
        .with_context(|| format!("Failed to read {}", args.input_file.display()))?;
    info!("Loaded {} k-mer hits", hits.len());

    let targets = TargetAssemblies::from_list(args.assemblies.iter().cloned());
    let map = HomologyMap::build(&hits, &targets);
    if map.is_empty() {
        bail!("Homology map is empty; none of the target assemblies occur in the input");
    }

    let config = PrimerSearchConfig {
        min_product_size: args.min_product_size,
        max_product_size: args.max_product_size,
    };
    let search = find_universal_pairs(&hits, &map, &config)?;

    if search.pairs.is_empty() {
        println!(
            "No universal primer pairs found with product size between {} and {} bp.",
            config.min_product_size, config.max_product_size
        );
        return Ok(());
    }

    info!("Extracting amplicon sequences from {}", args.fasta_dir.display());

    let mut cache = SequenceCache::new(&args.fasta_dir);
    let amplicons = extract_amplicons(&search, &mut cache);
    let report = PrimerReport::build(amplicons);

    let file = File::create(&args.output_file)
        .with_context(|| format!("Failed to create {}", args.output_file.display()))?;
    let mut writer = BufWriter::new(file);
    report.write_tsv(&mut writer, args.with_tm)?;
    writer.flush()?;

    let summaries = report.summaries();
    match args.summary_format {
        OutputFormat::Text => print_text_summary(&summaries),
        OutputFormat::Json => print_json_summary(&summaries)?,
        OutputFormat::Tsv => print_tsv_summary(&summaries),
    }

    println!(
        "Results for {} pairs ({} amplicons) saved to {}",
        summaries.len(),
        report.rows().len(),
        args.output_file.display()
    );

    Ok(())
}

fn print_text_summary(summaries: &[PairSummary]) {
    println!("| Fwd_Kmer | Rev_Kmer | Product_Size_Avg | Product_Size_Min | Product_Size_Max |");
    println!("|----------|----------|------------------|------------------|------------------|");
    for s in summaries {
        println!(
            "| {} | {} | {} | {} | {} |",
            s.fwd_kmer, s.rev_kmer, s.avg, s.min, s.max
        );
    }
}

fn print_json_summary(summaries: &[PairSummary]) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(summaries)?);
    Ok(())
}

fn print_tsv_summary(summaries: &[PairSummary]) {
    println!("Fwd_Kmer\tRev_Kmer\tProduct_Size_Avg\tProduct_Size_Min\tProduct_Size_Max");
    for s in summaries {
        println!(
            "{}\t{}\t{}\t{}\t{}",
            s.fwd_kmer, s.rev_kmer, s.avg, s.min, s.max
        );
    }
}
