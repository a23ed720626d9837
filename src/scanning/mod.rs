//! Sequence scanning tools that feed or complement the primer search.
//!
//! - [`split`]: split a FASTA file into one file per header annotation
//! - [`windows`]: sliding-window confidence scan over consensus sequences
//! - [`kmers`]: locate k-mers on both strands of per-contig FASTA files
//! - [`motifs`]: extract amplicons bounded by degenerate (IUPAC) primers

use thiserror::Error;

use crate::parsing::ParseError;
use crate::utils::validation::ValidationError;

pub mod kmers;
pub mod motifs;
pub mod split;
pub mod windows;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Header pattern must contain a capture group: {0}")]
    MissingCaptureGroup(String),

    #[error("Invalid regular expression: {0}")]
    Regex(#[from] regex::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
