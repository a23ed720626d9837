use tracing::debug;

use crate::core::cache::SequenceCache;
use crate::core::types::Amplicon;
use crate::primers::pairs::{PairMatch, PairSearch};

/// Recorded in place of a sequence when the contig FASTA could not be loaded
pub const FASTA_LOAD_FAILED: &str = "FASTA_LOAD_FAILED";

/// Recorded in place of a sequence when the amplicon runs past the contig end
pub const INDEX_OUT_OF_BOUNDS: &str = "ERROR_SEQUENCE_INDEX_OUT_OF_BOUNDS";

/// Slice the amplicon `[fwd_start - 1, rev_start + kmer_len - 1)` out of a contig.
///
/// Returns `None` if the slice does not fit inside the sequence.
#[must_use]
pub fn slice_amplicon(sequence: &str, fwd_start: u64, rev_start: u64, kmer_len: usize) -> Option<&str> {
    let start = usize::try_from(fwd_start.checked_sub(1)?).ok()?;
    let end = usize::try_from(rev_start).ok()?.checked_add(kmer_len)?.checked_sub(1)?;
    if start > end {
        return None;
    }
    sequence.get(start..end)
}

/// Amplicon sequence for one geometry, or a sentinel describing the failure
pub fn amplicon_sequence(cache: &mut SequenceCache, m: &PairMatch, kmer_len: usize) -> String {
    let Some(sequence) = cache.get(&m.assembly, &m.contig) else {
        return FASTA_LOAD_FAILED.to_string();
    };

    match slice_amplicon(sequence, m.fwd_start, m.rev_start, kmer_len) {
        Some(amplicon) => amplicon.to_string(),
        None => {
            debug!(
                "Amplicon {}..{} exceeds {}.{} ({} bp)",
                m.fwd_start,
                m.rev_start,
                m.assembly,
                m.contig,
                sequence.len()
            );
            INDEX_OUT_OF_BOUNDS.to_string()
        }
    }
}

/// Turn every geometry of every universal pair into an [`Amplicon`].
///
/// Extraction failures never abort; they are recorded as sentinel sequences.
pub fn extract_amplicons(search: &PairSearch, cache: &mut SequenceCache) -> Vec<Amplicon> {
    let mut amplicons = Vec::new();

    for pair in &search.pairs {
        for m in &pair.matches {
            amplicons.push(Amplicon {
                fwd_kmer: pair.fwd_kmer.clone(),
                rev_kmer: pair.rev_kmer.clone(),
                assembly: m.assembly.clone(),
                contig: m.contig.clone(),
                fwd_start: m.fwd_start,
                rev_start: m.rev_start,
                size: m.size,
                sequence: amplicon_sequence(cache, m, search.kmer_len),
            });
        }
    }

    amplicons
}
