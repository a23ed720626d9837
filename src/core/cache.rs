use std::collections::HashMap;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::parsing::fasta::read_first_sequence;

/// Lazily loaded contig sequences for one run.
///
/// Files are looked up as `<fasta_dir>/<assembly>.<contig>.fasta`. Each file is
/// read at most once; failed loads are remembered too, so a missing file is
/// only reported the first time it is requested.
#[derive(Debug)]
pub struct SequenceCache {
    fasta_dir: PathBuf,
    sequences: HashMap<String, Option<String>>,
}

impl SequenceCache {
    pub fn new(fasta_dir: impl Into<PathBuf>) -> Self {
        Self {
            fasta_dir: fasta_dir.into(),
            sequences: HashMap::new(),
        }
    }

    /// Path of the FASTA file holding `assembly`/`contig`
    #[must_use]
    pub fn path_for(&self, assembly: &str, contig: &str) -> PathBuf {
        self.fasta_dir.join(format!("{assembly}.{contig}.fasta"))
    }

    /// Upper-cased sequence for the contig, or `None` if it could not be loaded
    pub fn get(&mut self, assembly: &str, contig: &str) -> Option<&str> {
        let key = format!("{assembly}.{contig}");
        if !self.sequences.contains_key(&key) {
            let loaded = self.load(assembly, contig);
            self.sequences.insert(key.clone(), loaded);
        }
        self.sequences.get(&key).and_then(Option::as_deref)
    }

    fn load(&self, assembly: &str, contig: &str) -> Option<String> {
        let path = self.path_for(assembly, contig);
        if !path.exists() {
            warn!(
                "FASTA file not found for {assembly}.{contig} at {}",
                path.display()
            );
            return None;
        }

        match read_first_sequence(&path) {
            Ok(Some(sequence)) => {
                debug!("Loaded {} bp from {}", sequence.len(), path.display());
                Some(sequence)
            }
            Ok(None) => {
                warn!("FASTA file appears empty or malformed: {}", path.display());
                None
            }
            Err(e) => {
                warn!("Error reading FASTA file {}: {e}", path.display());
                None
            }
        }
    }

    /// Number of contigs requested so far, including failed loads
    #[must_use]
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }
}
