use serde::Serialize;

/// Strand on which a k-mer was observed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Strand {
    /// The k-mer itself matched (`+`)
    Forward,
    /// The reverse complement matched (`-`)
    Reverse,
}

impl Strand {
    /// Parse a strand symbol (`+` or `-`)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "+" => Some(Self::Forward),
            "-" => Some(Self::Reverse),
            _ => None,
        }
    }

    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            Self::Forward => '+',
            Self::Reverse => '-',
        }
    }
}

impl std::fmt::Display for Strand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A single observed occurrence of a k-mer in an assembly contig
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KmerHit {
    /// The k-mer sequence (always the forward k-mer, even for `-` hits)
    pub seq: String,

    /// Assembly identifier (e.g. `GCF_001423335.1_Leaf289_genomic`)
    pub assembly: String,

    /// Contig identifier within the assembly
    pub contig: String,

    /// 1-based start position on the contig
    pub position: u64,

    pub strand: Strand,
}

impl KmerHit {
    pub fn new(
        seq: impl Into<String>,
        assembly: impl Into<String>,
        contig: impl Into<String>,
        position: u64,
        strand: Strand,
    ) -> Self {
        Self {
            seq: seq.into(),
            assembly: assembly.into(),
            contig: contig.into(),
            position,
            strand,
        }
    }
}

/// An amplicon produced by a universal primer pair in one assembly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Amplicon {
    pub fwd_kmer: String,
    pub rev_kmer: String,
    pub assembly: String,
    pub contig: String,

    /// 1-based start of the forward k-mer
    pub fwd_start: u64,

    /// 1-based start of the reverse k-mer
    pub rev_start: u64,

    /// `rev_start - fwd_start + kmer_len`
    pub size: u64,

    /// Extracted sequence, or a sentinel string when extraction failed
    pub sequence: String,
}

/// Product size statistics for one primer pair across all of its amplicons
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairSummary {
    pub fwd_kmer: String,
    pub rev_kmer: String,

    /// Integer-truncated mean product size
    pub avg: u64,
    pub min: u64,
    pub max: u64,
}
