//! Parsers for the flat files the tools exchange.
//!
//! - **FASTA** ([`fasta`]): records via noodles, plain or gzip/bgzip compressed
//! - **K-mer tables** ([`tsv`]): header-indexed tab-separated tables of k-mer hits
//!   and k-mer/contig lists
//! - **MEME reports** ([`meme`]): motif site blocks from MEME text output
//!
//! ## Example
//!
//! ```rust,no_run
//! use primer_scout::parsing::tsv::read_kmer_hits;
//! use std::path::Path;
//!
//! let hits = read_kmer_hits(Path::new("multiassembly_kmers_positions.tsv")).unwrap();
//! println!("{} k-mer hits", hits.len());
//! ```

use thiserror::Error;

pub mod fasta;
pub mod meme;
pub mod tsv;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("noodles error: {0}")]
    Noodles(String),

    #[error("Missing required column '{0}'")]
    MissingColumn(String),
}
