use std::collections::{HashMap, HashSet};

use tracing::{debug, info};

use crate::core::types::{KmerHit, Strand};
use crate::primers::homology::HomologyMap;
use crate::primers::{PrimerError, PrimerSearchConfig};
use crate::utils::validation::validate_product_range;

/// One qualifying amplicon geometry for a primer pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairMatch {
    pub assembly: String,
    pub contig: String,

    /// 1-based start of the forward k-mer
    pub fwd_start: u64,

    /// 1-based start of the reverse k-mer
    pub rev_start: u64,

    /// `rev_start - fwd_start + kmer_len`
    pub size: u64,
}

/// A primer pair that amplifies in every assembly of the homology map
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniversalPair {
    pub fwd_kmer: String,
    pub rev_kmer: String,

    /// Every qualifying geometry, grouped by assembly in map order
    pub matches: Vec<PairMatch>,
}

/// Outcome of a pair search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairSearch {
    /// Length shared by all k-mers, taken from the first forward k-mer
    pub kmer_len: usize,
    pub pairs: Vec<UniversalPair>,
}

/// Hits of one k-mer on one strand, grouped by assembly (file order kept)
type HitsByAssembly<'a> = HashMap<&'a str, Vec<&'a KmerHit>>;

/// Index of hits by (k-mer, strand), restricted to the homology map
struct HitIndex<'a> {
    by_kmer: HashMap<(&'a str, Strand), HitsByAssembly<'a>>,
}

impl<'a> HitIndex<'a> {
    fn build(hits: impl Iterator<Item = &'a KmerHit>) -> Self {
        let mut by_kmer: HashMap<(&'a str, Strand), HitsByAssembly<'a>> = HashMap::new();
        for hit in hits {
            by_kmer
                .entry((hit.seq.as_str(), hit.strand))
                .or_default()
                .entry(hit.assembly.as_str())
                .or_default()
                .push(hit);
        }
        Self { by_kmer }
    }

    /// Hits of `kmer` on `strand`, only if present in at least `min_assemblies`
    fn complete(
        &self,
        kmer: &'a str,
        strand: Strand,
        min_assemblies: usize,
    ) -> Option<&HitsByAssembly<'a>> {
        self.by_kmer
            .get(&(kmer, strand))
            .filter(|by_assembly| by_assembly.len() >= min_assemblies)
    }
}

/// Every qualifying geometry between forward and reverse hits in one assembly
fn matches_in_assembly(
    assembly: &str,
    fwd_hits: &[&KmerHit],
    rev_hits: &[&KmerHit],
    kmer_len: u64,
    config: &PrimerSearchConfig,
) -> Vec<PairMatch> {
    let mut matches = Vec::new();

    for fwd in fwd_hits {
        for rev in rev_hits {
            if fwd.contig != rev.contig || fwd.position >= rev.position {
                continue;
            }

            let size = rev.position - fwd.position + kmer_len;
            if config.accepts(size) {
                matches.push(PairMatch {
                    assembly: assembly.to_string(),
                    contig: fwd.contig.clone(),
                    fwd_start: fwd.position,
                    rev_start: rev.position,
                    size,
                });
            }
        }
    }

    matches
}

/// Find every k-mer pair that yields an in-range amplicon in all mapped assemblies.
///
/// The forward k-mer must occur on `+` and the reverse k-mer on `-`, on the
/// same contig, with the forward start strictly before the reverse start.
/// Unique k-mers are tried in first-appearance order, so results are
/// deterministic for a given input.
///
/// # Errors
///
/// Returns `PrimerError::EmptyHomologyMap` if the map is empty,
/// `PrimerError::Validation` for an inverted size range, or
/// `PrimerError::NoForwardKmers` if no mapped hit is on the `+` strand.
pub fn find_universal_pairs(
    hits: &[KmerHit],
    map: &HomologyMap,
    config: &PrimerSearchConfig,
) -> Result<PairSearch, PrimerError> {
    validate_product_range(config.min_product_size, config.max_product_size)?;
    if map.is_empty() {
        return Err(PrimerError::EmptyHomologyMap);
    }

    let mapped: Vec<&KmerHit> = hits.iter().filter(|h| map.covers(h)).collect();

    let kmer_len = mapped
        .iter()
        .find(|h| h.strand == Strand::Forward)
        .map(|h| h.seq.len())
        .ok_or(PrimerError::NoForwardKmers)?;

    let mut seen = HashSet::new();
    let unique_kmers: Vec<&str> = mapped
        .iter()
        .map(|h| h.seq.as_str())
        .filter(|seq| seen.insert(*seq))
        .collect();

    info!("Found {} unique k-mers to check", unique_kmers.len());
    info!(
        "Filtering for product size between {} and {} bp",
        config.min_product_size, config.max_product_size
    );

    let index = HitIndex::build(mapped.iter().copied());
    let assembly_count = map.len();
    let mut pairs = Vec::new();

    for &fwd_kmer in &unique_kmers {
        let Some(fwd_hits) = index.complete(fwd_kmer, Strand::Forward, assembly_count) else {
            continue;
        };

        for &rev_kmer in &unique_kmers {
            if rev_kmer == fwd_kmer {
                continue;
            }
            let Some(rev_hits) = index.complete(rev_kmer, Strand::Reverse, assembly_count) else {
                continue;
            };

            let mut all_matches = Vec::new();
            let mut universal = true;

            for (assembly, _) in map.iter() {
                let (Some(fwd), Some(rev)) = (fwd_hits.get(assembly), rev_hits.get(assembly))
                else {
                    universal = false;
                    break;
                };

                let found = matches_in_assembly(assembly, fwd, rev, kmer_len as u64, config);
                if found.is_empty() {
                    universal = false;
                    break;
                }
                all_matches.extend(found);
            }

            if universal {
                debug!(
                    "Universal pair {fwd_kmer}/{rev_kmer} with {} amplicons",
                    all_matches.len()
                );
                pairs.push(UniversalPair {
                    fwd_kmer: fwd_kmer.to_string(),
                    rev_kmer: rev_kmer.to_string(),
                    matches: all_matches,
                });
            }
        }
    }

    info!("Found {} universal primer pairs", pairs.len());
    Ok(PairSearch { kmer_len, pairs })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primers::homology::TargetAssemblies;
    use crate::utils::validation::ValidationError;

    fn hit(seq: &str, assembly: &str, contig: &str, position: u64, strand: Strand) -> KmerHit {
        KmerHit::new(seq, assembly, contig, position, strand)
    }

    fn config(min: u64, max: u64) -> PrimerSearchConfig {
        PrimerSearchConfig {
            min_product_size: min,
            max_product_size: max,
        }
    }

    fn search(hits: &[KmerHit], min: u64, max: u64) -> PairSearch {
        let map = HomologyMap::build(hits, &TargetAssemblies::All);
        find_universal_pairs(hits, &map, &config(min, max)).unwrap()
    }

    #[test]
    fn test_single_assembly_pair() {
        let hits = vec![
            hit("AAAA", "X", "C1", 10, Strand::Forward),
            hit("TTTT", "X", "C1", 20, Strand::Reverse),
        ];

        let result = search(&hits, 5, 20);
        assert_eq!(result.kmer_len, 4);
        assert_eq!(result.pairs.len(), 1);

        let pair = &result.pairs[0];
        assert_eq!(pair.fwd_kmer, "AAAA");
        assert_eq!(pair.rev_kmer, "TTTT");
        assert_eq!(
            pair.matches,
            vec![PairMatch {
                assembly: "X".to_string(),
                contig: "C1".to_string(),
                fwd_start: 10,
                rev_start: 20,
                size: 14,
            }]
        );
    }

    #[test]
    fn test_size_bounds_are_inclusive() {
        let hits = vec![
            hit("AAAA", "X", "C1", 10, Strand::Forward),
            hit("TTTT", "X", "C1", 20, Strand::Reverse),
        ];

        assert_eq!(search(&hits, 14, 14).pairs.len(), 1);
        assert!(search(&hits, 15, 100).pairs.is_empty());
        assert!(search(&hits, 1, 13).pairs.is_empty());
    }

    #[test]
    fn test_order_and_contig_required() {
        // Reverse before forward
        let reversed = vec![
            hit("AAAA", "X", "C1", 20, Strand::Forward),
            hit("TTTT", "X", "C1", 10, Strand::Reverse),
        ];
        assert!(search(&reversed, 1, 100).pairs.is_empty());

        // Same start is not "before"
        let same = vec![
            hit("AAAA", "X", "C1", 10, Strand::Forward),
            hit("TTTT", "X", "C1", 10, Strand::Reverse),
        ];
        assert!(search(&same, 1, 100).pairs.is_empty());

        // Different contigs
        let split = vec![
            hit("AAAA", "X", "C1", 10, Strand::Forward),
            hit("TTTT", "X", "C2", 20, Strand::Reverse),
        ];
        assert!(search(&split, 1, 100).pairs.is_empty());
    }

    #[test]
    fn test_pair_must_be_universal() {
        let hits = vec![
            hit("AAAA", "X", "C1", 10, Strand::Forward),
            hit("TTTT", "X", "C1", 20, Strand::Reverse),
            hit("AAAA", "Y", "C2", 5, Strand::Forward),
            // Out of range in Y
            hit("TTTT", "Y", "C2", 500, Strand::Reverse),
        ];
        assert!(search(&hits, 5, 100).pairs.is_empty());

        // Only present in X when restricted to X and Y
        let partial = vec![
            hit("AAAA", "X", "C1", 10, Strand::Forward),
            hit("TTTT", "X", "C1", 20, Strand::Reverse),
            hit("GGGG", "Y", "C2", 1, Strand::Forward),
        ];
        assert!(search(&partial, 5, 100).pairs.is_empty());
    }

    #[test]
    fn test_all_matches_retained() {
        let hits = vec![
            hit("AAAA", "X", "C1", 10, Strand::Forward),
            hit("AAAA", "X", "C1", 12, Strand::Forward),
            hit("TTTT", "X", "C1", 20, Strand::Reverse),
            hit("AAAA", "Y", "C2", 5, Strand::Forward),
            hit("TTTT", "Y", "C2", 30, Strand::Reverse),
        ];

        let result = search(&hits, 5, 100);
        assert_eq!(result.pairs.len(), 1);
        let sizes: Vec<(&str, u64)> = result.pairs[0]
            .matches
            .iter()
            .map(|m| (m.assembly.as_str(), m.size))
            .collect();
        assert_eq!(sizes, vec![("X", 14), ("X", 12), ("Y", 29)]);
    }

    #[test]
    fn test_self_pairing_excluded() {
        let hits = vec![
            hit("ACGT", "X", "C1", 10, Strand::Forward),
            hit("ACGT", "X", "C1", 20, Strand::Reverse),
        ];
        assert!(search(&hits, 1, 100).pairs.is_empty());
    }

    #[test]
    fn test_pair_enumeration_order() {
        let hits = vec![
            hit("CCCC", "X", "C1", 1, Strand::Forward),
            hit("AAAA", "X", "C1", 2, Strand::Forward),
            hit("TTTT", "X", "C1", 20, Strand::Reverse),
            hit("GGGG", "X", "C1", 30, Strand::Reverse),
        ];

        let result = search(&hits, 1, 100);
        let names: Vec<(&str, &str)> = result
            .pairs
            .iter()
            .map(|p| (p.fwd_kmer.as_str(), p.rev_kmer.as_str()))
            .collect();
        assert_eq!(
            names,
            vec![
                ("CCCC", "TTTT"),
                ("CCCC", "GGGG"),
                ("AAAA", "TTTT"),
                ("AAAA", "GGGG")
            ]
        );
    }

    #[test]
    fn test_no_forward_kmers() {
        let hits = vec![hit("TTTT", "X", "C1", 20, Strand::Reverse)];
        let map = HomologyMap::build(&hits, &TargetAssemblies::All);
        let err = find_universal_pairs(&hits, &map, &config(1, 100)).unwrap_err();
        assert!(matches!(err, PrimerError::NoForwardKmers));
    }

    #[test]
    fn test_invalid_range_and_empty_map() {
        let hits = vec![hit("AAAA", "X", "C1", 1, Strand::Forward)];
        let map = HomologyMap::build(&hits, &TargetAssemblies::All);

        let err = find_universal_pairs(&hits, &map, &config(100, 10)).unwrap_err();
        assert!(matches!(
            err,
            PrimerError::Validation(ValidationError::InvalidProductRange { .. })
        ));

        let empty = HomologyMap::default();
        let err = find_universal_pairs(&hits, &empty, &config(1, 10)).unwrap_err();
        assert!(matches!(err, PrimerError::EmptyHomologyMap));
    }

    #[test]
    fn test_hits_outside_targets_ignored() {
        let hits = vec![
            hit("AAAA", "X", "C1", 10, Strand::Forward),
            hit("TTTT", "X", "C1", 20, Strand::Reverse),
            // Y is not a target, so its missing reverse hit does not matter
            hit("AAAA", "Y", "C2", 5, Strand::Forward),
        ];
        let map = HomologyMap::build(&hits, &TargetAssemblies::from_list(["X"]));
        let result = find_universal_pairs(&hits, &map, &config(1, 100)).unwrap();
        assert_eq!(result.pairs.len(), 1);
        assert!(result.pairs[0].matches.iter().all(|m| m.assembly == "X"));
    }
}
