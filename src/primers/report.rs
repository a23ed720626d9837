use std::collections::HashMap;
use std::io::Write;

use crate::core::dna::melting_temperature;
use crate::core::types::{Amplicon, PairSummary};

/// Columns of the universal primer report, in output order
pub const REPORT_COLUMNS: [&str; 11] = [
    "Fwd_Kmer",
    "Rev_Kmer",
    "Product_Size_Avg",
    "Product_Size_Min",
    "Product_Size_Max",
    "Amplicon_Sequence",
    "Assembly",
    "Contig",
    "Fwd_Start_Pos",
    "Rev_Start_Pos",
    "Calculated_Size",
];

/// Extra columns appended by the melting-temperature stage
pub const TM_COLUMNS: [&str; 2] = ["Fwd_Tm", "Rev_Tm"];

/// One report row: an amplicon with its pair's size statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub amplicon: Amplicon,
    pub avg: u64,
    pub min: u64,
    pub max: u64,
}

/// Flattened, sorted primer report
#[derive(Debug, Clone, Default)]
pub struct PrimerReport {
    rows: Vec<ReportRow>,
}

#[derive(Debug, Clone, Copy)]
struct SizeStats {
    total: u64,
    count: u64,
    min: u64,
    max: u64,
}

impl SizeStats {
    fn new(size: u64) -> Self {
        Self {
            total: size,
            count: 1,
            min: size,
            max: size,
        }
    }

    fn add(&mut self, size: u64) {
        self.total += size;
        self.count += 1;
        self.min = self.min.min(size);
        self.max = self.max.max(size);
    }

    fn avg(&self) -> u64 {
        self.total / self.count
    }
}

impl PrimerReport {
    /// Compute per-pair statistics and sort rows by (fwd, rev, assembly).
    ///
    /// The sort is stable, so amplicons of the same pair and assembly keep
    /// their enumeration order.
    #[must_use]
    pub fn build(amplicons: Vec<Amplicon>) -> Self {
        let mut stats: HashMap<(String, String), SizeStats> = HashMap::new();
        for amplicon in &amplicons {
            stats
                .entry((amplicon.fwd_kmer.clone(), amplicon.rev_kmer.clone()))
                .and_modify(|s| s.add(amplicon.size))
                .or_insert_with(|| SizeStats::new(amplicon.size));
        }

        let mut rows: Vec<ReportRow> = amplicons
            .into_iter()
            .map(|amplicon| {
                let key = (amplicon.fwd_kmer.clone(), amplicon.rev_kmer.clone());
                let s = stats[&key];
                ReportRow {
                    amplicon,
                    avg: s.avg(),
                    min: s.min,
                    max: s.max,
                }
            })
            .collect();

        rows.sort_by(|a, b| {
            let (a, b) = (&a.amplicon, &b.amplicon);
            (&a.fwd_kmer, &a.rev_kmer, &a.assembly).cmp(&(&b.fwd_kmer, &b.rev_kmer, &b.assembly))
        });

        Self { rows }
    }

    #[must_use]
    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// One summary per distinct pair, in report order
    #[must_use]
    pub fn summaries(&self) -> Vec<PairSummary> {
        let mut summaries: Vec<PairSummary> = Vec::new();
        for row in &self.rows {
            let a = &row.amplicon;
            let is_new = summaries
                .last()
                .map_or(true, |s| s.fwd_kmer != a.fwd_kmer || s.rev_kmer != a.rev_kmer);
            if is_new {
                summaries.push(PairSummary {
                    fwd_kmer: a.fwd_kmer.clone(),
                    rev_kmer: a.rev_kmer.clone(),
                    avg: row.avg,
                    min: row.min,
                    max: row.max,
                });
            }
        }
        summaries
    }

    /// Write the report as TSV, optionally with primer melting temperatures.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `writer` fails.
    pub fn write_tsv<W: Write>(&self, writer: &mut W, with_tm: bool) -> std::io::Result<()> {
        let mut header = REPORT_COLUMNS.join("\t");
        if with_tm {
            header.push('\t');
            header.push_str(&TM_COLUMNS.join("\t"));
        }
        writeln!(writer, "{header}")?;

        for row in &self.rows {
            let a = &row.amplicon;
            write!(
                writer,
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                a.fwd_kmer,
                a.rev_kmer,
                row.avg,
                row.min,
                row.max,
                a.sequence,
                a.assembly,
                a.contig,
                a.fwd_start,
                a.rev_start,
                a.size
            )?;
            if with_tm {
                write!(
                    writer,
                    "\t{:.1}\t{:.1}",
                    melting_temperature(&a.fwd_kmer),
                    melting_temperature(&a.rev_kmer)
                )?;
            }
            writeln!(writer)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amplicon(fwd: &str, rev: &str, assembly: &str, size: u64) -> Amplicon {
        Amplicon {
            fwd_kmer: fwd.to_string(),
            rev_kmer: rev.to_string(),
            assembly: assembly.to_string(),
            contig: "c1".to_string(),
            fwd_start: 1,
            rev_start: size - 3,
            size,
            sequence: "ACGT".to_string(),
        }
    }

    #[test]
    fn test_statistics_and_truncated_average() {
        let report = PrimerReport::build(vec![
            amplicon("AAAA", "TTTT", "X", 14),
            amplicon("AAAA", "TTTT", "X", 12),
            amplicon("AAAA", "TTTT", "Y", 29),
        ]);

        let summaries = report.summaries();
        assert_eq!(summaries.len(), 1);
        // (14 + 12 + 29) / 3 = 18.33
        assert_eq!(summaries[0].avg, 18);
        assert_eq!(summaries[0].min, 12);
        assert_eq!(summaries[0].max, 29);
        assert!(report.rows().iter().all(|r| r.avg == 18));
    }

    #[test]
    fn test_rows_sorted_stably() {
        let report = PrimerReport::build(vec![
            amplicon("CCCC", "TTTT", "X", 10),
            amplicon("AAAA", "TTTT", "Y", 20),
            amplicon("AAAA", "TTTT", "X", 30),
            amplicon("AAAA", "TTTT", "X", 15),
        ]);

        let order: Vec<(&str, u64)> = report
            .rows()
            .iter()
            .map(|r| (r.amplicon.assembly.as_str(), r.amplicon.size))
            .collect();
        assert_eq!(order, vec![("X", 30), ("X", 15), ("Y", 20), ("X", 10)]);
        assert_eq!(report.summaries().len(), 2);
    }

    #[test]
    fn test_write_tsv() {
        let report = PrimerReport::build(vec![amplicon("AAAA", "TTTT", "X", 14)]);
        let mut out = Vec::new();
        report.write_tsv(&mut out, false).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0].split('\t').count(), 11);
        assert!(lines[0].starts_with("Fwd_Kmer\tRev_Kmer\tProduct_Size_Avg"));
        assert_eq!(lines[1], "AAAA\tTTTT\t14\t14\t14\tACGT\tX\tc1\t1\t11\t14");
    }

    #[test]
    fn test_write_tsv_with_tm() {
        let report = PrimerReport::build(vec![amplicon("AAAA", "GGGG", "X", 14)]);
        let mut out = Vec::new();
        report.write_tsv(&mut out, true).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[0].ends_with("\tFwd_Tm\tRev_Tm"));
        // Wallace rule: 2 * 4 and 4 * 4
        assert!(lines[1].ends_with("\t8.0\t16.0"));
    }

    #[test]
    fn test_empty_report() {
        let report = PrimerReport::build(Vec::new());
        assert!(report.is_empty());
        assert!(report.summaries().is_empty());
    }
}
