//! Ordered pattern tables shared by the extraction passes.
//!
//! Table order is observable: classification and section detection take
//! the first entry that matches, so reordering a table changes results.

use regex::Regex;
use std::sync::LazyLock;

use crate::types::{DocumentType, LegalEntity, SectionName};

/// Keyword whose presence marks an article as an amendment.
pub const AMENDMENT_KEYWORD: &str = "modifica";

/// Canonical keyword used when normalizing article references.
pub const ARTICLE_KEYWORD: &str = "artículo";

#[allow(clippy::expect_used)] // Static patterns that are guaranteed to be valid
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid regex")
}

/// Document-type patterns in priority order.
pub static DOCUMENT_TYPE_PATTERNS: LazyLock<Vec<(DocumentType, Regex)>> = LazyLock::new(|| {
    vec![
        (DocumentType::Reglamento, compile(r"(?i)reglamento")),
        (DocumentType::OtroSi, compile(r"(?i)otro\s+s[ií]")),
        (DocumentType::Resolucion, compile(r"(?i)resoluci[oó]n")),
        (DocumentType::Circular, compile(r"(?i)circular")),
        (DocumentType::Acuerdo, compile(r"(?i)acuerdo")),
        (DocumentType::Decreto, compile(r"(?i)decreto")),
    ]
});

/// Legal-entity patterns in priority order.
pub static LEGAL_ENTITY_PATTERNS: LazyLock<Vec<(LegalEntity, Regex)>> = LazyLock::new(|| {
    vec![
        (LegalEntity::Colsubsidio, compile(r"(?i)colsubsidio")),
        (LegalEntity::Compensar, compile(r"(?i)compensar")),
        (LegalEntity::Cafam, compile(r"(?i)cafam")),
        (LegalEntity::Comfacundi, compile(r"(?i)comfacundi")),
        (LegalEntity::Comcaja, compile(r"(?i)comcaja")),
    ]
});

/// Section-heading patterns in priority order.
///
/// A line is a heading when a pattern matches anywhere in it.
pub static SECTION_PATTERNS: LazyLock<Vec<(SectionName, Regex)>> = LazyLock::new(|| {
    vec![
        (SectionName::Considerandos, compile(r"(?i)considerandos?")),
        (SectionName::Objetivo, compile(r"(?i)objetivos?")),
        (SectionName::Definiciones, compile(r"(?i)definici[oó]n(?:es)?")),
        (SectionName::Alcance, compile(r"(?i)alcance")),
        (SectionName::Vigencia, compile(r"(?i)vigencia")),
        (
            SectionName::Disposiciones,
            compile(r"(?i)disposici[oó]n(?:es)?\s+final(?:es)?"),
        ),
    ]
});

/// Date written out with a Spanish month name: "15 de marzo de 2024".
pub static SPANISH_DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)([0-9]{1,2})\s+de\s+(\p{L}+)\s+de\s+([0-9]{4})"));

/// Numeric day/month/year: "15/03/2024".
pub static DAY_MONTH_YEAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| compile(r"([0-9]{1,2})/([0-9]{1,2})/([0-9]{4})"));

/// Numeric year/month/day: "2024-03-15" or "2024/03/15".
pub static YEAR_MONTH_DAY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| compile(r"([0-9]{4})[-/]([0-9]{1,2})[-/]([0-9]{1,2})"));

/// Article heading: keyword, number, punctuation and the whitespace after it.
pub static ARTICLE_HEADING_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)art[ií]culo\s+([0-9]+)[.:]\s*"));

/// Reference to an article anywhere in the text ("artículo 5", "art. 5").
pub static REFERENCE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)(?:art[ií]culo|art\.)\s+([0-9]+)"));

/// Spanish month names.
const MONTHS: [(&str, u32); 13] = [
    ("enero", 1),
    ("febrero", 2),
    ("marzo", 3),
    ("abril", 4),
    ("mayo", 5),
    ("junio", 6),
    ("julio", 7),
    ("agosto", 8),
    ("septiembre", 9),
    ("setiembre", 9),
    ("octubre", 10),
    ("noviembre", 11),
    ("diciembre", 12),
];

/// Map a Spanish month name to its number.
///
/// Unrecognized names map to January.
///
/// # Examples
/// ```
/// use legal_extractor::patterns::spanish_month_to_number;
///
/// assert_eq!(spanish_month_to_number("Marzo"), 3);
/// assert_eq!(spanish_month_to_number("brumario"), 1);
/// ```
#[must_use]
pub fn spanish_month_to_number(month: &str) -> u32 {
    let month = month.to_lowercase();
    MONTHS
        .iter()
        .find(|(name, _)| *name == month)
        .map_or(1, |(_, number)| *number)
}
