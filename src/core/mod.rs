//! Core data types shared by every tool.
//!
//! - [`types`]: k-mer hits, strands, amplicons and pair summaries
//! - [`dna`]: complements, IUPAC degenerate codes, melting temperature
//! - [`cache`]: the per-run [`cache::SequenceCache`] of contig sequences
//!
//! ## Coordinates
//!
//! All positions exposed by this crate are **1-based**, matching how k-mer
//! tables and amplicon reports are written. Conversion to 0-based slice
//! offsets happens only at the point where a sequence is sliced.

pub mod cache;
pub mod dna;
pub mod types;
