//! Parser for MEME text reports (`meme.txt`).
//!
//! Only the "sites sorted by position p-value" section of each motif is read:
//!
//! ```text
//! --------------------------------------------------------------------------------
//!
//! --------------------------------------------------------------------------------
//!     Motif ACGTACGT MEME-1 sites sorted by position p-value
//! --------------------------------------------------------------------------------
//! Sequence name            Start   P-value                    Site
//! -------------            ----- ------------            --------
//! seqA                        12  1.5e-05 TTGACCA ACGTACGT GGCATTA
//! --------------------------------------------------------------------------------
//! ```
//!
//! Site lines may carry a strand column between the name and the start
//! (`seqA + 12 ...`); it is accepted and ignored.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::parsing::ParseError;

/// One motif occurrence from a sites table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MotifSite {
    pub seq_name: String,
    pub start: u64,

    /// P-value as written in the report
    pub pvalue: String,
    pub site: String,
}

/// A motif and the sites MEME reported for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MotifBlock {
    /// IUPAC consensus, e.g. `RRGGAGGAAAAW`
    pub consensus: String,

    /// MEME label, e.g. `MEME-1`
    pub label: String,
    pub sites: Vec<MotifSite>,
}

fn block_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?ms)^-{70,}\s*\n^-{70,}\s*\n\s*Motif\s+(?P<consensus>\S+)\s+(?P<label>MEME-\d+)\s+sites sorted by position p-value\s*\n^-{70,}\s*\n(?P<sites>.*?)\n^-{70,}\s*$",
        )
        .expect("motif block pattern is valid")
    })
}

fn site_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^(?P<seq_name>\S+)\s+(?:[+-]\s+)?(?P<start>\d+)\s+(?P<pvalue>[0-9.eE\-]+)\s+\S+\s+(?P<site>\S+)\s+\S+\s*$",
        )
        .expect("site line pattern is valid")
    })
}

/// Parse one line of a sites table, returning `None` for headers and rulers
#[must_use]
pub fn parse_site_line(line: &str) -> Option<MotifSite> {
    let caps = site_regex().captures(line.trim())?;
    Some(MotifSite {
        seq_name: caps["seq_name"].to_string(),
        start: caps["start"].parse().ok()?,
        pvalue: caps["pvalue"].to_string(),
        site: caps["site"].to_string(),
    })
}

/// Extract every motif sites block from MEME report text.
///
/// Blocks are returned in report order, including blocks whose table held no
/// parseable site.
#[must_use]
pub fn parse_meme_text(text: &str) -> Vec<MotifBlock> {
    block_regex()
        .captures_iter(text)
        .map(|caps| {
            let sites = caps["sites"]
                .lines()
                .filter(|line| !line.trim().is_empty())
                .filter_map(parse_site_line)
                .collect();

            MotifBlock {
                consensus: caps["consensus"].to_string(),
                label: caps["label"].to_string(),
                sites,
            }
        })
        .collect()
}

/// Read and parse a MEME text report
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read.
pub fn parse_meme_file(path: &Path) -> Result<Vec<MotifBlock>, ParseError> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_meme_text(&content))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// A trimmed MEME report with two motifs; MEME-2's table has no parseable site
    pub(crate) fn sample_report() -> String {
        let rule = "-".repeat(80);
        format!(
            "MEME version 5.5.0\n\
             \n\
             {rule}\n\
             \tMotif ACGT[AT]CGT MEME-1 Description\n\
             {rule}\n\
             Simplified        A  :::::::\n\
             {rule}\n\
             \n\
             {rule}\n\
             \tMotif ACGT[AT]CGT MEME-1 sites sorted by position p-value\n\
             {rule}\n\
             Sequence name            Start   P-value                Site\n\
             -------------            ----- ------------            --------\n\
             seqA|x                      12  1.5e-05 TTGACCA ACGTACGT GGCATTA\n\
             seqB:y                      40  3.2e-04 CCGATAA ACGTTCGT TTAGGCA\n\
             {rule}\n\
             \n\
             {rule}\n\
             \tMotif ACGT[AT]CGT MEME-1 block diagrams\n\
             {rule}\n\
             SEQUENCE NAME            POSITION P-VALUE  MOTIF DIAGRAM\n\
             seqA|x                      1.5e-05  11_[1]_30\n\
             {rule}\n\
             \n\
             {rule}\n\
             \tMotif GGGCCC MEME-2 sites sorted by position p-value\n\
             {rule}\n\
             Sequence name            Start   P-value                Site\n\
             -------------            ----- ------------            --------\n\
             {rule}\n"
        )
    }

    #[test]
    fn test_parse_site_line() {
        let site = parse_site_line("seqA   12  1.5e-05 TTGACCA ACGTACGT GGCATTA").unwrap();
        assert_eq!(site.seq_name, "seqA");
        assert_eq!(site.start, 12);
        assert_eq!(site.pvalue, "1.5e-05");
        assert_eq!(site.site, "ACGTACGT");
    }

    #[test]
    fn test_parse_site_line_with_strand() {
        let site = parse_site_line("seqA  -  7  2.0e-03 AAAA GGCC TTTT").unwrap();
        assert_eq!(site.start, 7);
        assert_eq!(site.site, "GGCC");
    }

    #[test]
    fn test_parse_site_line_rejects_headers() {
        assert!(parse_site_line("Sequence name            Start   P-value       Site").is_none());
        assert!(parse_site_line("-------------            ----- ------------  ----").is_none());
    }

    #[test]
    fn test_parse_meme_text() {
        let blocks = parse_meme_text(&sample_report());
        assert_eq!(blocks.len(), 2);

        assert_eq!(blocks[0].consensus, "ACGT[AT]CGT");
        assert_eq!(blocks[0].label, "MEME-1");
        assert_eq!(blocks[0].sites.len(), 2);
        assert_eq!(blocks[0].sites[0].seq_name, "seqA|x");
        assert_eq!(blocks[0].sites[1].start, 40);
        assert_eq!(blocks[0].sites[1].site, "ACGTTCGT");

        assert_eq!(blocks[1].label, "MEME-2");
        assert!(blocks[1].sites.is_empty());
    }

    #[test]
    fn test_parse_meme_text_without_motifs() {
        assert!(parse_meme_text("nothing to see here\n").is_empty());
    }
}
