use std::collections::{BTreeMap, BTreeSet};

use tracing::{info, warn};

use crate::core::types::KmerHit;

/// Which assemblies a primer pair must amplify in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetAssemblies {
    /// Every assembly present in the input table
    All,
    /// An explicit set of assembly identifiers
    Only(BTreeSet<String>),
}

impl TargetAssemblies {
    /// Build from command-line values; an empty list means [`TargetAssemblies::All`]
    pub fn from_list<I, S>(assemblies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set: BTreeSet<String> = assemblies.into_iter().map(Into::into).collect();
        if set.is_empty() {
            Self::All
        } else {
            Self::Only(set)
        }
    }

    #[must_use]
    pub fn includes(&self, assembly: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(set) => set.contains(assembly),
        }
    }
}

/// Assembly → distinct contigs observed for it.
///
/// Assemblies iterate in sorted order; contigs keep first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HomologyMap {
    contigs: BTreeMap<String, Vec<String>>,
}

impl HomologyMap {
    /// Build the map from k-mer hits, restricted to the target assemblies.
    ///
    /// Targets with no rows are left out of the map (and logged); a pair can
    /// then never be universal for them.
    pub fn build(hits: &[KmerHit], targets: &TargetAssemblies) -> Self {
        let mut contigs: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for hit in hits.iter().filter(|h| targets.includes(&h.assembly)) {
            let entry = contigs.entry(hit.assembly.clone()).or_default();
            if !entry.contains(&hit.contig) {
                entry.push(hit.contig.clone());
            }
        }

        let map = Self { contigs };

        if let TargetAssemblies::Only(expected) = targets {
            let missing: Vec<&str> = expected
                .iter()
                .filter(|a| !map.contigs.contains_key(*a))
                .map(String::as_str)
                .collect();
            if !missing.is_empty() {
                warn!(
                    "The following target assemblies were not found in the input: {}",
                    missing.join(", ")
                );
            }
        }

        info!("Homology map generated for {} assemblies", map.len());
        map
    }

    /// Assembly identifiers in sorted order
    pub fn assemblies(&self) -> impl Iterator<Item = &str> {
        self.contigs.keys().map(String::as_str)
    }

    /// Iterate `(assembly, contigs)` in sorted assembly order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.contigs
            .iter()
            .map(|(assembly, contigs)| (assembly.as_str(), contigs.as_slice()))
    }

    #[must_use]
    pub fn contigs(&self, assembly: &str) -> Option<&[String]> {
        self.contigs.get(assembly).map(Vec::as_slice)
    }

    /// Whether the hit's assembly and contig are both part of the map
    #[must_use]
    pub fn covers(&self, hit: &KmerHit) -> bool {
        self.contigs
            .get(&hit.assembly)
            .is_some_and(|contigs| contigs.contains(&hit.contig))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.contigs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contigs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Strand;

    fn hits() -> Vec<KmerHit> {
        vec![
            KmerHit::new("AAAA", "Y", "c2", 1, Strand::Forward),
            KmerHit::new("AAAA", "X", "c9", 1, Strand::Forward),
            KmerHit::new("TTTT", "X", "c1", 5, Strand::Reverse),
            KmerHit::new("GGGG", "X", "c9", 8, Strand::Reverse),
            KmerHit::new("GGGG", "Z", "c3", 2, Strand::Forward),
        ]
    }

    #[test]
    fn test_build_all_assemblies() {
        let map = HomologyMap::build(&hits(), &TargetAssemblies::All);

        assert_eq!(map.len(), 3);
        assert_eq!(map.assemblies().collect::<Vec<_>>(), vec!["X", "Y", "Z"]);
        // Distinct contigs in first-seen order
        assert_eq!(
            map.contigs("X"),
            Some(&["c9".to_string(), "c1".to_string()][..])
        );
    }

    #[test]
    fn test_build_restricted_targets() {
        let targets = TargetAssemblies::from_list(["X", "Missing"]);
        let map = HomologyMap::build(&hits(), &targets);

        assert_eq!(map.assemblies().collect::<Vec<_>>(), vec!["X"]);
        assert!(map.contigs("Missing").is_none());
        assert!(map.contigs("Y").is_none());
    }

    #[test]
    fn test_from_empty_list_is_all() {
        assert_eq!(
            TargetAssemblies::from_list(Vec::<String>::new()),
            TargetAssemblies::All
        );
    }

    #[test]
    fn test_covers() {
        let map = HomologyMap::build(&hits(), &TargetAssemblies::from_list(["X"]));
        assert!(map.covers(&KmerHit::new("A", "X", "c1", 1, Strand::Forward)));
        assert!(!map.covers(&KmerHit::new("A", "X", "c7", 1, Strand::Forward)));
        assert!(!map.covers(&KmerHit::new("A", "Y", "c2", 1, Strand::Forward)));
    }

    #[test]
    fn test_empty_input() {
        let map = HomologyMap::build(&[], &TargetAssemblies::All);
        assert!(map.is_empty());
    }
}
