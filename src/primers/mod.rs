//! Universal primer-pair discovery.
//!
//! The pipeline runs strictly in sequence, each stage consuming the complete
//! output of the previous one:
//!
//! 1. [`homology`]: which contigs each target assembly contributes
//! 2. [`pairs`]: forward/reverse k-mer pairs that amplify in **every** assembly
//! 3. [`extract`]: amplicon sequences sliced from the contig FASTA files
//! 4. [`report`]: per-pair size statistics, TSV and console summary
//!
//! ## Example
//!
//! ```rust,no_run
//! use primer_scout::core::cache::SequenceCache;
//! use primer_scout::parsing::tsv::read_kmer_hits;
//! use primer_scout::primers::extract::extract_amplicons;
//! use primer_scout::primers::homology::{HomologyMap, TargetAssemblies};
//! use primer_scout::primers::pairs::find_universal_pairs;
//! use primer_scout::primers::report::PrimerReport;
//! use primer_scout::primers::PrimerSearchConfig;
//! use std::path::Path;
//!
//! let hits = read_kmer_hits(Path::new("multiassembly_kmers_positions.tsv")).unwrap();
//! let map = HomologyMap::build(&hits, &TargetAssemblies::All);
//! let search = find_universal_pairs(&hits, &map, &PrimerSearchConfig::default()).unwrap();
//!
//! let mut cache = SequenceCache::new("./assembly/");
//! let amplicons = extract_amplicons(&search, &mut cache);
//! let report = PrimerReport::build(amplicons);
//! for summary in report.summaries() {
//!     println!("{} / {}: {} bp", summary.fwd_kmer, summary.rev_kmer, summary.avg);
//! }
//! ```

use thiserror::Error;

use crate::utils::validation::ValidationError;

pub mod extract;
pub mod homology;
pub mod pairs;
pub mod report;

/// Default minimum PCR product size in base pairs
pub const DEFAULT_MIN_PRODUCT_SIZE: u64 = 150;

/// Default maximum PCR product size in base pairs
pub const DEFAULT_MAX_PRODUCT_SIZE: u64 = 7000;

#[derive(Error, Debug)]
pub enum PrimerError {
    #[error("No forward-strand k-mers found; cannot determine k-mer length")]
    NoForwardKmers,

    #[error("Homology map is empty; no target assembly was found in the input")]
    EmptyHomologyMap,

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Configuration for the pair search
#[derive(Debug, Clone)]
pub struct PrimerSearchConfig {
    /// Smallest accepted product size (inclusive)
    pub min_product_size: u64,

    /// Largest accepted product size (inclusive)
    pub max_product_size: u64,
}

impl Default for PrimerSearchConfig {
    fn default() -> Self {
        Self {
            min_product_size: DEFAULT_MIN_PRODUCT_SIZE,
            max_product_size: DEFAULT_MAX_PRODUCT_SIZE,
        }
    }
}

impl PrimerSearchConfig {
    /// Whether a product size falls inside the configured range
    #[must_use]
    pub fn accepts(&self, size: u64) -> bool {
        (self.min_product_size..=self.max_product_size).contains(&size)
    }
}
