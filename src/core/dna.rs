//! Nucleotide helpers: complements, IUPAC codes and primer melting temperature.

/// Ambiguity codes counted together as "any of three or four bases"
pub const NBDHV_BASES: &[u8] = b"NBDHV";

/// Ambiguity codes counted together as "either of two bases"
pub const RYSWKM_BASES: &[u8] = b"RYSWKM";

/// Every base accepted in a degenerate primer
pub const IUPAC_BASES: &[u8] = b"ACGTURYSWKMBDHVN";

/// Complement of a single (upper-cased) nucleotide, IUPAC-aware.
///
/// Unknown characters are returned unchanged.
#[must_use]
pub fn complement(base: u8) -> u8 {
    match base.to_ascii_uppercase() {
        b'A' => b'T',
        b'T' | b'U' => b'A',
        b'C' => b'G',
        b'G' => b'C',
        b'R' => b'Y',
        b'Y' => b'R',
        b'K' => b'M',
        b'M' => b'K',
        b'B' => b'V',
        b'V' => b'B',
        b'D' => b'H',
        b'H' => b'D',
        other => other,
    }
}

/// Upper-cased reverse complement of a sequence
#[must_use]
pub fn reverse_complement(seq: &str) -> String {
    seq.bytes().rev().map(|b| complement(b) as char).collect()
}

/// Regex character class for one base of a degenerate primer
fn iupac_class(base: char) -> Option<&'static str> {
    let class = match base {
        'R' => "[AG]",
        'Y' => "[CT]",
        'S' => "[GC]",
        'W' => "[AT]",
        'K' => "[GT]",
        'M' => "[AC]",
        'B' => "[CGT]",
        'D' => "[AGT]",
        'H' => "[ACT]",
        'V' => "[ACG]",
        'N' => "[ACGT]",
        _ => return None,
    };
    Some(class)
}

/// Convert a degenerate IUPAC primer into a regex pattern.
///
/// Non-degenerate characters are matched literally.
///
/// # Examples
///
/// ```
/// use primer_scout::core::dna::iupac_to_regex;
///
/// assert_eq!(iupac_to_regex("ACN"), "AC[ACGT]");
/// assert_eq!(iupac_to_regex("tty"), "TT[CT]");
/// ```
#[must_use]
pub fn iupac_to_regex(primer: &str) -> String {
    primer
        .to_uppercase()
        .chars()
        .map(|c| match iupac_class(c) {
            Some(class) => class.to_string(),
            None => regex::escape(&c.to_string()),
        })
        .collect()
}

/// Estimated melting temperature of a short oligo in °C.
///
/// Uses the Wallace rule below 14 nt and the basic GC formula above.
#[must_use]
#[allow(clippy::cast_precision_loss)] // Oligo lengths are tiny
pub fn melting_temperature(seq: &str) -> f64 {
    let (mut at, mut gc) = (0usize, 0usize);
    for b in seq.bytes().map(|b| b.to_ascii_uppercase()) {
        match b {
            b'A' | b'T' | b'U' => at += 1,
            b'G' | b'C' => gc += 1,
            _ => {}
        }
    }

    let len = at + gc;
    if len == 0 {
        return 0.0;
    }
    if len < 14 {
        (2 * at + 4 * gc) as f64
    } else {
        64.9 + 41.0 * (gc as f64 - 16.4) / len as f64
    }
}
