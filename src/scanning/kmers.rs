use tracing::{debug, info, warn};

use crate::core::cache::SequenceCache;
use crate::core::dna::reverse_complement;
use crate::core::types::{KmerHit, Strand};
use crate::parsing::tsv::KmerEntry;

/// Default suffix that ends an assembly identifier in `assembly.contig` references
pub const DEFAULT_ASSEMBLY_MARKER: &str = "_genomic";

/// Split an `assembly.contig` reference at the first `<marker>.`.
///
/// The assembly keeps the marker. Returns `None` if the marker is absent or
/// either part is empty.
///
/// # Examples
///
/// ```
/// use primer_scout::scanning::kmers::split_contig_pair;
///
/// assert_eq!(
///     split_contig_pair("GCF_1.1_Leaf289_genomic.NZ_LMPO01000001.1", "_genomic"),
///     Some(("GCF_1.1_Leaf289_genomic", "NZ_LMPO01000001.1"))
/// );
/// assert_eq!(split_contig_pair("GCF_1.1.contig", "_genomic"), None);
/// ```
#[must_use]
pub fn split_contig_pair<'a>(pair: &'a str, marker: &str) -> Option<(&'a str, &'a str)> {
    let pair = pair.trim();
    let separator = format!("{marker}.");
    let idx = pair.find(&separator)?;

    let assembly = pair[..idx + marker.len()].trim();
    let contig = pair[idx + separator.len()..].trim();
    if assembly.is_empty() || contig.is_empty() {
        return None;
    }
    Some((assembly, contig))
}

/// 1-based start of every (overlapping) occurrence of `needle` in `haystack`
#[must_use]
pub fn find_occurrences(haystack: &str, needle: &str) -> Vec<u64> {
    if needle.is_empty() {
        return Vec::new();
    }

    haystack
        .as_bytes()
        .windows(needle.len())
        .enumerate()
        .filter(|(_, window)| *window == needle.as_bytes())
        .map(|(i, _)| i as u64 + 1)
        .collect()
}

/// Locate every k-mer of `entries` in the contigs it was reported for.
///
/// For each reference, forward hits (`+`) are emitted before reverse-complement
/// hits (`-`). Unsplittable references and unreadable contigs are logged and
/// skipped.
pub fn locate_kmers(
    entries: &[KmerEntry],
    cache: &mut SequenceCache,
    marker: &str,
) -> Vec<KmerHit> {
    let mut hits = Vec::new();

    for entry in entries {
        let kmer = entry.seq.trim().to_ascii_uppercase();
        if kmer.is_empty() {
            warn!("Skipping row with an empty k-mer");
            continue;
        }
        let rev_comp = reverse_complement(&kmer);

        for pair in &entry.contigs {
            let Some((assembly, contig)) = split_contig_pair(pair, marker) else {
                warn!("Could not split '{pair}' into assembly and contig using '{marker}.'; skipping");
                continue;
            };

            let Some(sequence) = cache.get(assembly, contig) else {
                continue;
            };

            for (pattern, strand) in [(&kmer, Strand::Forward), (&rev_comp, Strand::Reverse)] {
                for position in find_occurrences(sequence, pattern) {
                    hits.push(KmerHit::new(kmer.as_str(), assembly, contig, position, strand));
                }
            }
            debug!("Searched {kmer} in {assembly}.{contig}");
        }
    }

    info!(
        "Located {} k-mer hits across {} contigs",
        hits.len(),
        cache.len()
    );
    hits
}
