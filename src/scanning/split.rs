use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::{debug, info};

use crate::parsing::fasta::read_fasta_file;
use crate::scanning::ScanError;
use crate::utils::validation::sanitize_file_component;

/// Default header pattern; group 1 is the functional annotation
pub const DEFAULT_HEADER_PATTERN: &str = r"^([^_]*)___Bacteria_71___";

/// What a split run produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitSummary {
    /// Records written to some output file
    pub records_written: usize,

    /// Records whose header did not match the pattern
    pub records_skipped: usize,

    /// Output files created, in creation order
    pub files: Vec<PathBuf>,
}

/// Compile a header pattern, rejecting patterns without a capture group.
///
/// # Errors
///
/// Returns `ScanError::Regex` for an invalid pattern or
/// `ScanError::MissingCaptureGroup` if it captures nothing.
pub fn compile_header_pattern(pattern: &str) -> Result<Regex, ScanError> {
    let regex = Regex::new(pattern)?;
    if regex.captures_len() < 2 {
        return Err(ScanError::MissingCaptureGroup(pattern.to_string()));
    }
    Ok(regex)
}

/// Split `input` into `<outdir>/<prefix>_<annotation>.fasta` files.
///
/// The pattern is matched against the definition line (without `>`); capture
/// group 1 is the annotation. Records whose header does not match are skipped.
///
/// Headers are written back as the record name, one space, then the
/// description, so the separator after the name is normalised to a single
/// space. Sequences are written on one line.
///
/// # Errors
///
/// Returns `ScanError::Parse` if the input cannot be read, or `ScanError::Io`
/// if an output file cannot be created or written.
pub fn split_fasta(
    input: &Path,
    outdir: &Path,
    prefix: &str,
    pattern: &Regex,
) -> Result<SplitSummary, ScanError> {
    let records = read_fasta_file(input)?;

    if !outdir.exists() {
        fs::create_dir_all(outdir)?;
        info!("Created output directory: {}", outdir.display());
    }

    let mut writers: HashMap<String, BufWriter<File>> = HashMap::new();
    let mut summary = SplitSummary::default();

    for record in &records {
        let definition = record.definition();
        let Some(annotation) = pattern
            .captures(&definition)
            .and_then(|caps| caps.get(1))
            .map(|m| sanitize_file_component(m.as_str()))
        else {
            debug!("Skipping record without annotation: {definition}");
            summary.records_skipped += 1;
            continue;
        };

        if !writers.contains_key(&annotation) {
            let path = outdir.join(format!("{prefix}_{annotation}.fasta"));
            writers.insert(annotation.clone(), BufWriter::new(File::create(&path)?));
            summary.files.push(path);
        }

        if let Some(writer) = writers.get_mut(&annotation) {
            writeln!(writer, ">{definition}")?;
            writer.write_all(&record.sequence)?;
            writeln!(writer)?;
            summary.records_written += 1;
        }
    }

    for writer in writers.values_mut() {
        writer.flush()?;
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    const INPUT: &str = "\
>OSCP___Bacteria_71___strain1 some description
ACGT
ACGT
>ATP-synt___Bacteria_71___strain2
GGGG
>unannotated_record
TTTT
>OSCP___Bacteria_71___strain3
CCCC
";

    #[test]
    fn test_split_by_annotation() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("syncom.align");
        fs::write(&input, INPUT).unwrap();
        let outdir = dir.path().join("split");

        let pattern = compile_header_pattern(DEFAULT_HEADER_PATTERN).unwrap();
        let summary = split_fasta(&input, &outdir, "core", &pattern).unwrap();

        assert_eq!(summary.records_written, 3);
        assert_eq!(summary.records_skipped, 1);
        assert_eq!(
            summary.files,
            vec![outdir.join("core_OSCP.fasta"), outdir.join("core_ATP-synt.fasta")]
        );

        let oscp = fs::read_to_string(outdir.join("core_OSCP.fasta")).unwrap();
        assert_eq!(
            oscp,
            ">OSCP___Bacteria_71___strain1 some description\nACGTACGT\n>OSCP___Bacteria_71___strain3\nCCCC\n"
        );
    }

    #[test]
    fn test_header_separator_normalised() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.fasta");
        fs::write(&input, ">OSCP___Bacteria_71___s1\tdesc  two\nAC\nGT\n").unwrap();

        let pattern = compile_header_pattern(DEFAULT_HEADER_PATTERN).unwrap();
        split_fasta(&input, dir.path(), "core", &pattern).unwrap();

        let written = fs::read_to_string(dir.path().join("core_OSCP.fasta")).unwrap();
        assert_eq!(written, ">OSCP___Bacteria_71___s1 desc  two\nACGT\n");
    }

    #[test]
    fn test_annotation_is_sanitized() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.fasta");
        fs::write(&input, ">a/b c___x\nACGT\n").unwrap();

        let pattern = compile_header_pattern(r"^(.*)___x").unwrap();
        let summary = split_fasta(&input, dir.path(), "p", &pattern).unwrap();

        assert_eq!(summary.files, vec![dir.path().join("p_a_b_c.fasta")]);
    }

    #[test]
    fn test_pattern_without_group_rejected() {
        assert!(matches!(
            compile_header_pattern("___Bacteria_71___"),
            Err(ScanError::MissingCaptureGroup(_))
        ));
        assert!(matches!(compile_header_pattern("(["), Err(ScanError::Regex(_))));
    }

    #[test]
    fn test_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let pattern = compile_header_pattern(DEFAULT_HEADER_PATTERN).unwrap();
        let result = split_fasta(&dir.path().join("nope.fasta"), dir.path(), "p", &pattern);
        assert!(matches!(result, Err(ScanError::Parse(_))));
    }
}
