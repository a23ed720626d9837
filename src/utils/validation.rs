//! Centralized validation and naming helpers.

use crate::core::dna::IUPAC_BASES;

/// Input validation error types
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Minimum product size ({min}) cannot be greater than maximum product size ({max})")]
    InvalidProductRange { min: u64, max: u64 },

    #[error("{0} primer cannot be empty")]
    EmptyPrimer(String),

    #[error("{name} primer contains invalid character '{base}' (must be DNA/IUPAC alphabet)")]
    InvalidPrimerBase { name: String, base: char },

    #[error("Window size must be greater than 0")]
    EmptyWindow,
}

/// Check that a product size range is well formed (bounds are inclusive).
///
/// # Errors
///
/// Returns `ValidationError::InvalidProductRange` if `min > max`.
pub fn validate_product_range(min: u64, max: u64) -> Result<(), ValidationError> {
    if min > max {
        return Err(ValidationError::InvalidProductRange { min, max });
    }
    Ok(())
}

/// Check that a primer is a non-empty IUPAC nucleotide string (any case).
///
/// # Examples
///
/// ```
/// use primer_scout::utils::validation::validate_primer;
///
/// assert!(validate_primer("forward", "TTYRTNGAYAAYATCTWYCG").is_ok());
/// assert!(validate_primer("reverse", "ACGX").is_err());
/// ```
///
/// # Errors
///
/// Returns `ValidationError::EmptyPrimer` or `ValidationError::InvalidPrimerBase`.
pub fn validate_primer(name: &str, primer: &str) -> Result<(), ValidationError> {
    if primer.is_empty() {
        return Err(ValidationError::EmptyPrimer(name.to_string()));
    }

    if let Some(base) = primer
        .chars()
        .find(|c| !c.is_ascii() || !IUPAC_BASES.contains(&(*c as u8).to_ascii_uppercase()))
    {
        return Err(ValidationError::InvalidPrimerBase {
            name: name.to_string(),
            base,
        });
    }

    Ok(())
}

/// Make an annotation safe to embed in a file name.
///
/// Word characters, `-` and `.` are kept; everything else becomes `_`.
#[must_use]
pub fn sanitize_file_component(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' || c == '-' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Replace characters that break FASTA headers or file names (`|` and `:`)
#[must_use]
pub fn clean_sequence_name(name: &str) -> String {
    name.replace(['|', ':'], "_")
}

/// Replace regex/IUPAC bracket characters in a motif consensus for use in file names
#[must_use]
pub fn clean_consensus_for_filename(consensus: &str) -> String {
    consensus.replace(['[', ']', '|', '.', '*', '+', '?'], "_")
}
