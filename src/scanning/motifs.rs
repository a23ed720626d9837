use std::fmt;
use std::io::Write;
use std::path::Path;

use regex::Regex;
use tracing::debug;

use crate::core::dna::{iupac_to_regex, reverse_complement};
use crate::parsing::fasta::read_fasta_file;
use crate::scanning::ScanError;
use crate::utils::validation::validate_primer;

/// Columns of the amplicon table, in output order
pub const AMPLICON_COLUMNS: [&str; 8] = [
    "filename",
    "contig accession",
    "strand",
    "amplicon start",
    "amplicon end",
    "fwd matched window sequence",
    "rev matched window sequence",
    "amplicon sequence",
];

/// Strand an amplicon was found on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotifStrand {
    Forward,
    Reverse,
}

impl fmt::Display for MotifStrand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forward => write!(f, "FORWARD"),
            Self::Reverse => write!(f, "REVERSE"),
        }
    }
}

/// A region bounded by the two primers, in forward-strand coordinates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmpliconHit {
    pub contig: String,
    pub strand: MotifStrand,

    /// 1-based start on the forward strand
    pub start: usize,

    /// 1-based inclusive end on the forward strand
    pub end: usize,

    /// Text matched by the start primer
    pub fwd_motif: String,

    /// Text matched by the end primer
    pub rev_motif: String,

    /// Amplicon as read on its own strand
    pub sequence: String,
}

/// A match on one strand, in that strand's 0-based coordinates
#[derive(Debug, Clone, PartialEq, Eq)]
struct StrandMatch {
    start: usize,
    end: usize,
    first_motif: String,
    second_motif: String,
}

/// Compiled start/end primers
#[derive(Debug, Clone)]
pub struct MotifPair {
    start: Regex,
    end: Regex,
}

impl MotifPair {
    /// Validate both degenerate primers and compile them.
    ///
    /// # Errors
    ///
    /// Returns `ScanError::Validation` if a primer is empty or contains a
    /// non-IUPAC character.
    pub fn new(primer_start: &str, primer_end: &str) -> Result<Self, ScanError> {
        validate_primer("Start", primer_start)?;
        validate_primer("End", primer_end)?;

        let start = Regex::new(&iupac_to_regex(primer_start))?;
        let end = Regex::new(&iupac_to_regex(primer_end))?;
        debug!("Start motif {primer_start} -> {}", start.as_str());
        debug!("End motif {primer_end} -> {}", end.as_str());

        Ok(Self { start, end })
    }

    #[must_use]
    pub fn start_pattern(&self) -> &str {
        self.start.as_str()
    }

    #[must_use]
    pub fn end_pattern(&self) -> &str {
        self.end.as_str()
    }

    /// Every non-overlapping amplicon on both strands of `sequence`.
    ///
    /// The reverse strand is searched on the reverse complement with the
    /// primers swapped; coordinates are mapped back to the forward strand.
    #[must_use]
    pub fn find_amplicons(&self, contig: &str, sequence: &str) -> Vec<AmpliconHit> {
        let len = sequence.len();
        let mut hits: Vec<AmpliconHit> = search_strand(sequence, &self.start, &self.end)
            .into_iter()
            .map(|m| AmpliconHit {
                contig: contig.to_string(),
                strand: MotifStrand::Forward,
                start: m.start + 1,
                end: m.end,
                sequence: sequence[m.start..m.end].to_string(),
                fwd_motif: m.first_motif,
                rev_motif: m.second_motif,
            })
            .collect();

        let rev_comp = reverse_complement(sequence);
        hits.extend(
            search_strand(&rev_comp, &self.end, &self.start)
                .into_iter()
                .map(|m| AmpliconHit {
                    contig: contig.to_string(),
                    strand: MotifStrand::Reverse,
                    start: len - m.end + 1,
                    end: len - m.start,
                    sequence: rev_comp[m.start..m.end].to_string(),
                    fwd_motif: m.second_motif,
                    rev_motif: m.first_motif,
                }),
        );

        hits
    }
}

/// Non-overlapping `first ... second` regions on one strand.
///
/// After a hit the search resumes at its end; if `first` has no `second`
/// after it, the search resumes one base past the start of `first`.
fn search_strand(sequence: &str, first: &Regex, second: &Regex) -> Vec<StrandMatch> {
    let mut matches = Vec::new();
    let mut cursor = 0;

    while cursor < sequence.len() {
        let Some(open) = first.find_at(sequence, cursor) else {
            break;
        };

        match second.find_at(sequence, open.end()) {
            Some(close) => {
                matches.push(StrandMatch {
                    start: open.start(),
                    end: close.end(),
                    first_motif: open.as_str().to_string(),
                    second_motif: close.as_str().to_string(),
                });
                cursor = close.end();
            }
            None => cursor = open.start() + 1,
        }
    }

    matches
}

/// Upper-case a raw sequence and drop everything but A, C, G and T
#[must_use]
pub fn clean_sequence(raw: &[u8]) -> String {
    raw.iter()
        .map(u8::to_ascii_uppercase)
        .filter(|b| matches!(b, b'A' | b'C' | b'G' | b'T'))
        .map(char::from)
        .collect()
}

/// Search every record of a FASTA file.
///
/// Records are identified by the first word of their header; records whose
/// cleaned sequence is empty are skipped.
///
/// # Errors
///
/// Returns `ScanError::Parse` if the file cannot be read.
pub fn scan_fasta(path: &Path, motifs: &MotifPair) -> Result<Vec<AmpliconHit>, ScanError> {
    let records = read_fasta_file(path)?;
    let mut hits = Vec::new();

    for record in &records {
        let sequence = clean_sequence(&record.sequence);
        if sequence.is_empty() {
            debug!("Skipping empty record {}", record.name);
            continue;
        }
        hits.extend(motifs.find_amplicons(&record.name, &sequence));
    }

    Ok(hits)
}

/// Write the amplicon table header
///
/// # Errors
///
/// Returns any I/O error from the writer.
pub fn write_amplicon_header<W: Write>(writer: &mut W) -> std::io::Result<()> {
    writeln!(writer, "{}", AMPLICON_COLUMNS.join("\t"))
}

/// Write the amplicons found in one input file
///
/// # Errors
///
/// Returns any I/O error from the writer.
pub fn write_amplicon_rows<W: Write>(
    writer: &mut W,
    filename: &str,
    hits: &[AmpliconHit],
) -> std::io::Result<()> {
    for hit in hits {
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            filename,
            hit.contig,
            hit.strand,
            hit.start,
            hit.end,
            hit.fwd_motif,
            hit.rev_motif,
            hit.sequence
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_amplicon() {
        let motifs = MotifPair::new("ACG", "CCC").unwrap();
        let hits = motifs.find_amplicons("c1", "TTTACGGGGGGCCCTTT");

        assert_eq!(hits.len(), 1);
        let hit = &hits[0];
        assert_eq!(hit.strand, MotifStrand::Forward);
        assert_eq!((hit.start, hit.end), (4, 14));
        assert_eq!(hit.sequence, "ACGGGGGGCCC");
        assert_eq!(hit.fwd_motif, "ACG");
        assert_eq!(hit.rev_motif, "CCC");
    }

    #[test]
    fn test_reverse_amplicon() {
        let motifs = MotifPair::new("ACG", "CCC").unwrap();
        // Reverse complement is AACCCTTACGAA
        let hits = motifs.find_amplicons("c1", "TTCGTAAGGGTT");

        assert_eq!(hits.len(), 1);
        let hit = &hits[0];
        assert_eq!(hit.strand, MotifStrand::Reverse);
        assert_eq!((hit.start, hit.end), (3, 10));
        assert_eq!(hit.fwd_motif, "ACG");
        assert_eq!(hit.rev_motif, "CCC");
        assert_eq!(hit.sequence, "CCCTTACG");
    }

    #[test]
    fn test_degenerate_primers_non_overlapping() {
        let motifs = MotifPair::new("AYG", "GGN").unwrap();
        let hits = motifs.find_amplicons("c1", "ACGTGGAATGTTGGC");

        let forward: Vec<(&str, &str)> = hits
            .iter()
            .filter(|h| h.strand == MotifStrand::Forward)
            .map(|h| (h.fwd_motif.as_str(), h.sequence.as_str()))
            .collect();
        assert_eq!(forward, vec![("ACG", "ACGTGGA"), ("ATG", "ATGTTGGC")]);
    }

    #[test]
    fn test_unpaired_start_advances_cursor() {
        let first = Regex::new("AA").unwrap();
        let second = Regex::new("C").unwrap();
        // AA at 0 has a C after it; nothing follows the second AA
        let matches = search_strand("AAACAA", &first, &second);
        assert_eq!(matches.len(), 1);
        assert_eq!((matches[0].start, matches[0].end), (0, 4));
    }

    #[test]
    fn test_invalid_primer() {
        assert!(matches!(
            MotifPair::new("ACGX", "CCC"),
            Err(ScanError::Validation(_))
        ));
        assert!(matches!(MotifPair::new("ACG", ""), Err(ScanError::Validation(_))));
    }

    #[test]
    fn test_clean_sequence() {
        assert_eq!(clean_sequence(b"acg-tNn RY\r"), "ACGT");
    }

    #[test]
    fn test_scan_fasta_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("genome.fasta");
        std::fs::write(
            &path,
            ">contig_1 description\nTTTACGGG\nGGGCCCTTT\n>empty\nNNNN\n",
        )
        .unwrap();

        let motifs = MotifPair::new("ACG", "CCC").unwrap();
        let hits = scan_fasta(&path, &motifs).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].contig, "contig_1");

        let mut out = Vec::new();
        write_amplicon_header(&mut out).unwrap();
        write_amplicon_rows(&mut out, "genome.fasta", &hits).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text.lines().nth(1),
            Some("genome.fasta\tcontig_1\tFORWARD\t4\t14\tACG\tCCC\tACGGGGGGCCC")
        );
    }
}
