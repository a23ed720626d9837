//! FASTA reading using noodles.
//!
//! Supports both uncompressed and gzip/bgzip compressed files; compression is
//! detected from the `.gz` / `.bgz` extension.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use noodles::fasta;

use crate::parsing::ParseError;

/// A FASTA record with its definition split into name and description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaRecord {
    /// First word of the definition line
    pub name: String,

    /// Remainder of the definition line, if any
    pub description: Option<String>,

    /// Raw sequence bytes, case preserved
    pub sequence: Vec<u8>,
}

impl FastaRecord {
    /// Definition line text without the leading `>`
    #[must_use]
    pub fn definition(&self) -> String {
        match &self.description {
            Some(description) => format!("{} {description}", self.name),
            None => self.name.clone(),
        }
    }

    /// Sequence as an upper-cased string
    #[must_use]
    pub fn sequence_upper(&self) -> String {
        String::from_utf8_lossy(&self.sequence).to_ascii_uppercase()
    }
}

impl From<fasta::Record> for FastaRecord {
    fn from(record: fasta::Record) -> Self {
        let name = String::from_utf8_lossy(record.name()).to_string();
        let description = record
            .description()
            .map(|d| String::from_utf8_lossy(d).to_string());
        let sequence = record.sequence().as_ref().to_vec();

        Self {
            name,
            description,
            sequence,
        }
    }
}

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Open a FASTA file, transparently decompressing gzip/bgzip input.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be opened.
pub fn open_fasta(path: &Path) -> Result<fasta::io::Reader<Box<dyn BufRead>>, ParseError> {
    let file = File::open(path)?;
    let inner: Box<dyn BufRead> = if is_gzipped(path) {
        Box::new(BufReader::new(MultiGzDecoder::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };

    Ok(fasta::io::Reader::new(inner))
}

/// Read every record of a FASTA file.
///
/// An empty file yields an empty vector.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or `ParseError::Noodles`
/// if a record is malformed.
pub fn read_fasta_file(path: &Path) -> Result<Vec<FastaRecord>, ParseError> {
    let mut reader = open_fasta(path)?;
    let mut records = Vec::new();

    for result in reader.records() {
        let record = result
            .map_err(|e| ParseError::Noodles(format!("Failed to parse FASTA record: {e}")))?;
        records.push(FastaRecord::from(record));
    }

    Ok(records)
}

/// Read the first record's sequence, upper-cased.
///
/// Multi-line sequences are concatenated. Returns `None` when the file holds no
/// record or the first record has no sequence.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or `ParseError::Noodles`
/// if the record is malformed.
pub fn read_first_sequence(path: &Path) -> Result<Option<String>, ParseError> {
    let mut reader = open_fasta(path)?;

    let Some(result) = reader.records().next() else {
        return Ok(None);
    };
    let record = result
        .map_err(|e| ParseError::Noodles(format!("Failed to parse FASTA record: {e}")))?;

    let sequence = FastaRecord::from(record).sequence_upper();
    if sequence.is_empty() {
        Ok(None)
    } else {
        Ok(Some(sequence))
    }
}
