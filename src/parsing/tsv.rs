//! Tab-separated k-mer tables.
//!
//! Two tables are exchanged between the tools:
//!
//! | Table          | Required columns                             | Producer / consumer |
//! |----------------|----------------------------------------------|---------------------|
//! | k-mer list     | `seq`, `contigs`                             | external → `kmer-positions` |
//! | k-mer hits     | `seq`, `assembly`, `contig`, `position`, `strand` | `kmer-positions` → `universal-primers` |
//!
//! Columns are located by header name, so extra columns and column order do
//! not matter.

use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

use crate::core::types::{KmerHit, Strand};
use crate::parsing::ParseError;

/// Column names of the k-mer hit table, in output order
pub const KMER_HIT_COLUMNS: [&str; 5] = ["seq", "assembly", "contig", "position", "strand"];

/// One row of a k-mer list: a k-mer and the contigs it was reported in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KmerEntry {
    pub seq: String,

    /// `assembly.contig` references, as written in the `contigs` column
    pub contigs: Vec<String>,
}

/// Header of a tab-separated table, mapping column names to indices
#[derive(Debug)]
struct TsvHeader {
    columns: HashMap<String, usize>,
}

impl TsvHeader {
    fn parse(line: &str) -> Self {
        let columns = line
            .split('\t')
            .enumerate()
            .map(|(i, name)| (name.trim().to_string(), i))
            .collect();
        Self { columns }
    }

    fn require(&self, name: &str) -> Result<usize, ParseError> {
        self.columns
            .get(name)
            .copied()
            .ok_or_else(|| ParseError::MissingColumn(name.to_string()))
    }
}

/// Split the text into its header and the numbered, non-blank data lines
fn split_table(text: &str) -> Result<(TsvHeader, Vec<(usize, Vec<&str>)>), ParseError> {
    let mut lines = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let (_, header_line) = lines
        .next()
        .ok_or_else(|| ParseError::InvalidFormat("Table is empty".to_string()))?;
    let header = TsvHeader::parse(header_line);

    // Line numbers in errors are 1-based for user friendliness
    let rows = lines
        .map(|(i, line)| (i + 1, line.split('\t').collect()))
        .collect();

    Ok((header, rows))
}

fn field<'a>(fields: &[&'a str], index: usize, line_num: usize) -> Result<&'a str, ParseError> {
    fields.get(index).copied().map(str::trim).ok_or_else(|| {
        ParseError::InvalidFormat(format!(
            "Line {line_num} has {} fields, expected at least {}",
            fields.len(),
            index + 1
        ))
    })
}

/// Parse a k-mer hit table file
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn read_kmer_hits(path: &Path) -> Result<Vec<KmerHit>, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_kmer_hits_text(&content)
}

/// Parse k-mer hit table text
///
/// # Errors
///
/// Returns `ParseError::MissingColumn` if a required column is absent, or
/// `ParseError::InvalidFormat` for short rows, non-positive positions and
/// unknown strand symbols.
pub fn parse_kmer_hits_text(text: &str) -> Result<Vec<KmerHit>, ParseError> {
    let (header, rows) = split_table(text)?;

    let seq_col = header.require("seq")?;
    let assembly_col = header.require("assembly")?;
    let contig_col = header.require("contig")?;
    let position_col = header.require("position")?;
    let strand_col = header.require("strand")?;

    let mut hits = Vec::with_capacity(rows.len());
    for (line_num, fields) in rows {
        let position_text = field(&fields, position_col, line_num)?;
        let position: u64 = position_text.parse().map_err(|_| {
            ParseError::InvalidFormat(format!(
                "Invalid position on line {line_num}: '{position_text}'"
            ))
        })?;
        if position == 0 {
            return Err(ParseError::InvalidFormat(format!(
                "Position on line {line_num} must be 1-based, got 0"
            )));
        }

        let strand_text = field(&fields, strand_col, line_num)?;
        let strand = Strand::parse(strand_text).ok_or_else(|| {
            ParseError::InvalidFormat(format!(
                "Invalid strand on line {line_num}: '{strand_text}' (expected '+' or '-')"
            ))
        })?;

        hits.push(KmerHit::new(
            field(&fields, seq_col, line_num)?,
            field(&fields, assembly_col, line_num)?,
            field(&fields, contig_col, line_num)?,
            position,
            strand,
        ));
    }

    Ok(hits)
}

/// Parse a k-mer list file (`seq` and `contigs` columns)
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn read_kmer_list(path: &Path) -> Result<Vec<KmerEntry>, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_kmer_list_text(&content)
}

/// Parse k-mer list text
///
/// The `contigs` column holds comma-separated `assembly.contig` references.
///
/// # Errors
///
/// Returns `ParseError::MissingColumn` if `seq` or `contigs` is absent, or
/// `ParseError::InvalidFormat` for short rows.
pub fn parse_kmer_list_text(text: &str) -> Result<Vec<KmerEntry>, ParseError> {
    let (header, rows) = split_table(text)?;

    let seq_col = header.require("seq")?;
    let contigs_col = header.require("contigs")?;

    rows.into_iter()
        .map(|(line_num, fields)| {
            let seq = field(&fields, seq_col, line_num)?.to_uppercase();
            let contigs = field(&fields, contigs_col, line_num)?
                .split(',')
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string)
                .collect();
            Ok::<_, ParseError>(KmerEntry { seq, contigs })
        })
        .collect()
}

/// Write k-mer hits as a tab-separated table with a header row
///
/// # Errors
///
/// Returns any I/O error from the writer.
pub fn write_kmer_hits<W: Write>(writer: &mut W, hits: &[KmerHit]) -> std::io::Result<()> {
    writeln!(writer, "{}", KMER_HIT_COLUMNS.join("\t"))?;
    for hit in hits {
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{}",
            hit.seq, hit.assembly, hit.contig, hit.position, hit.strand
        )?;
    }
    Ok(())
}
