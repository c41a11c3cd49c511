//! # Document Number Validation
//!
//! Check-digit validation for Brazilian taxpayer numbers used in the
//! producer's payout data.
//!
//! ## Classification
//! ```text
//! raw input ──► strip non-digits ──┬── 11 digits → CPF  (individual)
//!                                  ├── 14 digits → CNPJ (company)
//!                                  └── otherwise → invalid
//! ```
//!
//! ## Usage
//! ```rust
//! use nexus_core::document::{validate_document_number, DocumentKind, classify_document};
//!
//! assert!(validate_document_number("529.982.247-25"));
//! assert!(validate_document_number("11.222.333/0001-81"));
//! assert!(!validate_document_number("000.000.000-00"));
//! assert_eq!(classify_document("11222333000181"), Some(DocumentKind::Cnpj));
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::validation::ValidationResult;

const CPF_LEN: usize = 11;
const CNPJ_LEN: usize = 14;

/// CNPJ weights; the first check digit uses the table from index 1.
const CNPJ_WEIGHTS: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

/// Kind of taxpayer number, decided by digit count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// Cadastro de Pessoas Físicas (11 digits).
    Cpf,
    /// Cadastro Nacional da Pessoa Jurídica (14 digits).
    Cnpj,
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentKind::Cpf => write!(f, "CPF"),
            DocumentKind::Cnpj => write!(f, "CNPJ"),
        }
    }
}

// =============================================================================
// Public API
// =============================================================================

/// Returns true when `raw` is a CPF or CNPJ with correct check digits.
///
/// Total over all input: malformed strings are `false`, never a panic.
pub fn validate_document_number(raw: &str) -> bool {
    let digits = strip_digits(raw);
    match digits.len() {
        CPF_LEN => is_valid_cpf(&digits),
        CNPJ_LEN => is_valid_cnpj(&digits),
        _ => false,
    }
}

/// Classifies `raw` by digit count without checking the check digits.
pub fn classify_document(raw: &str) -> Option<DocumentKind> {
    match strip_digits(raw).len() {
        CPF_LEN => Some(DocumentKind::Cpf),
        CNPJ_LEN => Some(DocumentKind::Cnpj),
        _ => None,
    }
}

/// Form-level validation with a message the UI can show.
///
/// ## Example
/// ```rust
/// use nexus_core::document::{validate_document, DocumentKind};
///
/// assert_eq!(validate_document("529.982.247-25").unwrap(), DocumentKind::Cpf);
/// assert!(validate_document("529.982.247-24").is_err());
/// ```
pub fn validate_document(raw: &str) -> ValidationResult<DocumentKind> {
    if raw.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "document".to_string(),
        });
    }

    let kind = classify_document(raw).ok_or_else(|| ValidationError::InvalidFormat {
        field: "document".to_string(),
        reason: "must have 11 (CPF) or 14 (CNPJ) digits".to_string(),
    })?;

    if !validate_document_number(raw) {
        return Err(ValidationError::InvalidFormat {
            field: "document".to_string(),
            reason: format!("{} check digits do not match", kind),
        });
    }

    Ok(kind)
}

/// Renders a valid document with its usual mask.
///
/// `52998224725` → `529.982.247-25`, `11222333000181` → `11.222.333/0001-81`.
/// Returns `None` for anything `validate_document_number` rejects.
pub fn format_document(raw: &str) -> Option<String> {
    if !validate_document_number(raw) {
        return None;
    }
    let d: String = raw.chars().filter(char::is_ascii_digit).collect();
    match d.len() {
        CPF_LEN => Some(format!("{}.{}.{}-{}", &d[0..3], &d[3..6], &d[6..9], &d[9..11])),
        CNPJ_LEN => Some(format!(
            "{}.{}.{}/{}-{}",
            &d[0..2],
            &d[2..5],
            &d[5..8],
            &d[8..12],
            &d[12..14]
        )),
        _ => None,
    }
}

// =============================================================================
// Check Digit Algorithms
// =============================================================================

fn strip_digits(raw: &str) -> Vec<u32> {
    raw.chars().filter_map(|c| c.to_digit(10)).collect()
}

fn all_same(digits: &[u32]) -> bool {
    digits.windows(2).all(|w| w[0] == w[1])
}

/// Weighted sum for a CPF check digit over the first `count` digits,
/// weights running from `count + 1` down to 2.
fn cpf_check_digit(digits: &[u32], count: usize) -> u32 {
    let sum: u32 = digits[..count]
        .iter()
        .enumerate()
        .map(|(i, d)| d * (count as u32 + 1 - i as u32))
        .sum();
    (sum * 10) % 11 % 10
}

fn is_valid_cpf(digits: &[u32]) -> bool {
    if digits.len() != CPF_LEN || all_same(digits) {
        return false;
    }
    cpf_check_digit(digits, 9) == digits[9] && cpf_check_digit(digits, 10) == digits[10]
}

/// CNPJ check digit over the first `count` digits (12 or 13), using the
/// tail of the weight table that lines up with them.
fn cnpj_check_digit(digits: &[u32], count: usize) -> u32 {
    let weights = &CNPJ_WEIGHTS[CNPJ_WEIGHTS.len() - count..];
    let remainder = digits[..count]
        .iter()
        .zip(weights)
        .map(|(d, w)| d * w)
        .sum::<u32>()
        % 11;
    if remainder < 2 {
        0
    } else {
        11 - remainder
    }
}

fn is_valid_cnpj(digits: &[u32]) -> bool {
    if digits.len() != CNPJ_LEN || all_same(digits) {
        return false;
    }
    cnpj_check_digit(digits, 12) == digits[12] && cnpj_check_digit(digits, 13) == digits[13]
}

// =============================================================================
// Unit Tests
// =============================================================================
