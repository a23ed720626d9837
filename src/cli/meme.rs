use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::Args;

use crate::parsing::meme::{parse_meme_file, MotifBlock};
use crate::utils::validation::{clean_consensus_for_filename, clean_sequence_name};

#[derive(Args)]
pub struct MemeArgs {
    /// MEME text output (e.g. meme.txt)
    pub meme_file: PathBuf,

    /// Directory for the per-motif TSV and FASTA files
    pub output_dir: PathBuf,
}

/// Write `motif_<consensus>_<label>.{tsv,fasta}` for a motif with sites.
///
/// Returns `None` without touching the filesystem if the motif has no sites.
fn write_motif_files(block: &MotifBlock, output_dir: &Path) -> anyhow::Result<Option<[PathBuf; 2]>> {
    if block.sites.is_empty() {
        return Ok(None);
    }

    let stem = format!(
        "motif_{}_{}",
        clean_consensus_for_filename(&block.consensus),
        block.label
    );
    let tsv_path = output_dir.join(format!("{stem}.tsv"));
    let fasta_path = output_dir.join(format!("{stem}.fasta"));

    let mut tsv = BufWriter::new(
        File::create(&tsv_path).with_context(|| format!("Failed to create {}", tsv_path.display()))?,
    );
    let mut fasta = BufWriter::new(
        File::create(&fasta_path)
            .with_context(|| format!("Failed to create {}", fasta_path.display()))?,
    );

    writeln!(tsv, "sequence name\tstart\tpvalue\tsite")?;
    for site in &block.sites {
        writeln!(
            tsv,
            "{}\t{}\t{}\t{}",
            site.seq_name, site.start, site.pvalue, site.site
        )?;
        writeln!(fasta, ">{}_{}", clean_sequence_name(&site.seq_name), site.start)?;
        writeln!(fasta, "{}", site.site)?;
    }
    tsv.flush()?;
    fasta.flush()?;

    Ok(Some([tsv_path, fasta_path]))
}

/// Execute meme subcommand
///
/// # Errors
///
/// Returns an error if the MEME file is missing or an output file cannot be
/// written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: MemeArgs) -> anyhow::Result<()> {
    if !args.meme_file.exists() {
        bail!("The input file '{}' was not found", args.meme_file.display());
    }

    let blocks = parse_meme_file(&args.meme_file)
        .with_context(|| format!("Failed to read {}", args.meme_file.display()))?;
    fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("Failed to create {}", args.output_dir.display()))?;

    let mut processed = 0;
    for block in &blocks {
        if let Some(paths) = write_motif_files(block, &args.output_dir)? {
            for path in &paths {
                println!("Successfully generated: {}", path.display());
            }
            processed += 1;
        }
    }

    if processed == 0 {
        println!("No motifs or valid site data sections were found in the file matching the expected MEME format.");
    } else {
        println!("Processing complete. Total motifs processed: {processed}");
    }

    Ok(())
}
