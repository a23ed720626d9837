//! # primer-scout
//!
//! A library and command-line tool for finding universal PCR primer pairs
//! across a set of bacterial assemblies.
//!
//! Given a table of k-mer occurrences (which assembly, which contig, which
//! position, which strand), `primer-scout` looks for forward/reverse k-mer pairs
//! that produce an amplicon within a product size range in **every** target
//! assembly, then extracts the amplicon sequences and summarises product sizes.
//!
//! ## Features
//!
//! - **Universal pair search**: exhaustive, deterministic enumeration of k-mer pairs
//! - **Amplicon extraction**: lazily cached per-contig FASTA loading, soft failures
//! - **K-mer location**: overlapping matches on both strands, 1-based positions
//! - **Degenerate primers**: IUPAC primer search on both strands
//! - **Helpers**: FASTA splitting, consensus window scans, MEME reformatting
//!
//! ## Example
//!
//! ```rust,no_run
//! use primer_scout::{find_universal_pairs, HomologyMap, PrimerSearchConfig, TargetAssemblies};
//! use primer_scout::parsing::tsv::parse_kmer_hits_text;
//!
//! let text = "seq\tassembly\tcontig\tposition\tstrand\n\
//!             AAAA\tX\tc1\t10\t+\n\
//!             TTTT\tX\tc1\t200\t-\n";
//! let hits = parse_kmer_hits_text(text).unwrap();
//!
//! let map = HomologyMap::build(&hits, &TargetAssemblies::All);
//! let search = find_universal_pairs(&hits, &map, &PrimerSearchConfig::default()).unwrap();
//!
//! for pair in &search.pairs {
//!     println!("{} / {}: {} amplicons", pair.fwd_kmer, pair.rev_kmer, pair.matches.len());
//! }
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Core data types, nucleotide helpers and the sequence cache
//! - [`parsing`]: Parsers for FASTA, k-mer tables and MEME reports
//! - [`primers`]: The universal primer pipeline
//! - [`scanning`]: Splitting, window scans, k-mer location and motif search
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod parsing;
pub mod primers;
pub mod scanning;
pub mod utils;

// Re-export commonly used types for convenience
pub use core::cache::SequenceCache;
pub use core::types::*;
pub use primers::homology::{HomologyMap, TargetAssemblies};
pub use primers::pairs::{find_universal_pairs, PairSearch, UniversalPair};
pub use primers::report::PrimerReport;
pub use primers::PrimerSearchConfig;
