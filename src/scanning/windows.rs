use std::io::Write;

use tracing::warn;

use crate::core::dna::{NBDHV_BASES, RYSWKM_BASES};
use crate::parsing::fasta::FastaRecord;
use crate::utils::validation::ValidationError;

pub const DEFAULT_WINDOW_SIZE: usize = 20;
pub const DEFAULT_UPPER_THRESHOLD: usize = 18;
pub const DEFAULT_ENRICHMENT_THRESHOLD: usize = 15;

const RULE_WIDTH: usize = 140;

/// Thresholds for the consensus window scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowScanConfig {
    pub window_size: usize,

    /// Minimum number of uppercase (confident) characters
    pub upper_threshold: usize,

    /// Minimum number of canonical A/C/G/T bases
    pub enrichment_threshold: usize,
}

impl Default for WindowScanConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            upper_threshold: DEFAULT_UPPER_THRESHOLD,
            enrichment_threshold: DEFAULT_ENRICHMENT_THRESHOLD,
        }
    }
}

impl WindowScanConfig {
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyWindow` for a zero window size.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.window_size == 0 {
            return Err(ValidationError::EmptyWindow);
        }
        Ok(())
    }
}

/// Character counts of one window
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowStats {
    /// 1-based window start
    pub position: usize,
    pub a: usize,
    pub t: usize,
    pub c: usize,
    pub g: usize,
    pub upper: usize,
    pub nbdhv: usize,
    pub ryswkm: usize,
    pub window: String,
}

impl WindowStats {
    fn count(position: usize, window: &[u8]) -> Self {
        let mut stats = Self {
            position,
            window: String::from_utf8_lossy(window).into_owned(),
            ..Self::default()
        };

        for &ch in window {
            if ch.is_ascii_uppercase() {
                stats.upper += 1;
            }
            let base = ch.to_ascii_uppercase();
            match base {
                b'A' => stats.a += 1,
                b'T' => stats.t += 1,
                b'C' => stats.c += 1,
                b'G' => stats.g += 1,
                _ if NBDHV_BASES.contains(&base) => stats.nbdhv += 1,
                _ if RYSWKM_BASES.contains(&base) => stats.ryswkm += 1,
                _ => {}
            }
        }

        stats
    }

    /// Total canonical A/C/G/T bases
    #[must_use]
    pub fn canonical(&self) -> usize {
        self.a + self.t + self.c + self.g
    }
}

/// Result of scanning one sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowScan {
    pub name: String,
    pub length: usize,
    pub windows_checked: usize,
    pub matches: Vec<WindowStats>,
}

/// Slide a window over `sequence` and keep windows passing both thresholds.
///
/// Returns `None` when the sequence is shorter than the window.
#[must_use]
pub fn scan_windows(name: &str, sequence: &[u8], config: &WindowScanConfig) -> Option<WindowScan> {
    if config.window_size == 0 || sequence.len() < config.window_size {
        return None;
    }

    let mut scan = WindowScan {
        name: name.to_string(),
        length: sequence.len(),
        windows_checked: 0,
        matches: Vec::new(),
    };

    for (i, window) in sequence.windows(config.window_size).enumerate() {
        scan.windows_checked += 1;
        let stats = WindowStats::count(i + 1, window);
        if stats.upper >= config.upper_threshold
            && stats.canonical() >= config.enrichment_threshold
        {
            scan.matches.push(stats);
        }
    }

    Some(scan)
}

/// Scan every record; records shorter than the window are logged and skipped
pub fn scan_records(records: &[FastaRecord], config: &WindowScanConfig) -> Vec<WindowScan> {
    records
        .iter()
        .filter_map(|record| {
            let name = record.definition();
            let scan = scan_windows(&name, &record.sequence, config);
            if scan.is_none() {
                warn!(
                    "Sequence '{name}' ({} bp) is shorter than the window size ({})",
                    record.sequence.len(),
                    config.window_size
                );
            }
            scan
        })
        .collect()
}

/// Write one scan as a commented, tab-separated report.
///
/// # Errors
///
/// Returns an error if writing to `writer` fails.
pub fn write_window_report<W: Write>(
    writer: &mut W,
    scan: &WindowScan,
    config: &WindowScanConfig,
) -> std::io::Result<()> {
    let rule = "-".repeat(RULE_WIDTH);

    writeln!(writer, "## Sequence length: {}", scan.length)?;
    writeln!(
        writer,
        "## {} NT Window Analysis: {}",
        config.window_size, scan.name
    )?;
    writeln!(
        writer,
        "## Thresholds: Upper Case >= {}; Canonical Count Check >= {}",
        config.upper_threshold, config.enrichment_threshold
    )?;
    writeln!(writer, "{rule}")?;
    writeln!(
        writer,
        "Position\tA_Count\tT_Count\tC_Count\tG_Count\tUpper_Count\tNBDHV_Count\tRYSWKM_Count\tWindow_Sequence"
    )?;
    writeln!(writer, "{rule}")?;

    for w in &scan.matches {
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            w.position, w.a, w.t, w.c, w.g, w.upper, w.nbdhv, w.ryswkm, w.window
        )?;
    }

    writeln!(writer, "{rule}")?;
    writeln!(
        writer,
        "## Analysis Complete. Total windows checked: {}. Matching windows found: {}",
        scan.windows_checked,
        scan.matches.len()
    )?;
    writeln!(writer, "{rule}")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(enrichment_threshold: usize) -> WindowScanConfig {
        WindowScanConfig {
            window_size: 4,
            upper_threshold: 3,
            enrichment_threshold,
        }
    }

    #[test]
    fn test_counts() {
        let stats = WindowStats::count(1, b"AcNRgt");
        assert_eq!((stats.a, stats.t, stats.c, stats.g), (1, 1, 1, 1));
        assert_eq!(stats.upper, 3);
        assert_eq!(stats.nbdhv, 1);
        assert_eq!(stats.ryswkm, 1);
        assert_eq!(stats.canonical(), 4);
    }

    #[test]
    fn test_scan_thresholds() {
        let scan = scan_windows("cons", b"ACGTacNRAC", &config(3)).unwrap();

        assert_eq!(scan.windows_checked, 7);
        let positions: Vec<usize> = scan.matches.iter().map(|w| w.position).collect();
        // ACGT and CGTa pass; later windows lack confident or canonical bases
        assert_eq!(positions, vec![1, 2]);
        assert_eq!(scan.matches[1].window, "CGTa");
    }

    #[test]
    fn test_scan_counts_ambiguity_codes() {
        let scan = scan_windows("cons", b"ACGTacNRAC", &config(2)).unwrap();
        let last = scan.matches.last().unwrap();

        assert_eq!(last.position, 7);
        assert_eq!(last.window, "NRAC");
        assert_eq!(last.nbdhv, 1);
        assert_eq!(last.ryswkm, 1);
    }

    #[test]
    fn test_short_sequence() {
        assert!(scan_windows("short", b"ACG", &config(1)).is_none());
        let records = vec![FastaRecord {
            name: "short".to_string(),
            description: None,
            sequence: b"ACG".to_vec(),
        }];
        assert!(scan_records(&records, &config(1)).is_empty());
    }

    #[test]
    fn test_report_layout() {
        let scan = scan_windows("cons", b"ACGTacNRAC", &config(3)).unwrap();
        let mut out = Vec::new();
        write_window_report(&mut out, &scan, &config(3)).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "## Sequence length: 10");
        assert_eq!(lines[1], "## 4 NT Window Analysis: cons");
        assert!(lines[4].starts_with("Position\tA_Count"));
        assert_eq!(lines[6], "1\t1\t1\t1\t1\t4\t0\t0\tACGT");
        assert!(text.contains("Total windows checked: 7. Matching windows found: 2"));
    }

    #[test]
    fn test_zero_window_rejected() {
        let config = WindowScanConfig {
            window_size: 0,
            ..WindowScanConfig::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::EmptyWindow));
    }
}
