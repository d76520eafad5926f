//! Document-type and legal-entity detection.

use regex::Regex;

use crate::patterns::{DOCUMENT_TYPE_PATTERNS, LEGAL_ENTITY_PATTERNS};
use crate::types::{ClassificationResult, DocumentType, LegalEntity};

/// Return the label of the first table entry whose pattern matches `text`.
fn first_match<T: Copy>(table: &[(T, Regex)], text: &str) -> Option<T> {
    table
        .iter()
        .find(|(_, pattern)| pattern.is_match(text))
        .map(|(label, _)| *label)
}

/// Detect the document type. Earlier table entries win over later ones.
#[must_use]
pub fn detect_document_type(text: &str) -> DocumentType {
    first_match(DOCUMENT_TYPE_PATTERNS.as_slice(), text).unwrap_or(DocumentType::Unknown)
}

/// Detect the issuing entity. Earlier table entries win over later ones.
#[must_use]
pub fn detect_legal_entity(text: &str) -> LegalEntity {
    first_match(LEGAL_ENTITY_PATTERNS.as_slice(), text).unwrap_or(LegalEntity::Unknown)
}

/// Classify a document by type and issuing entity.
///
/// # Examples
/// ```
/// use legal_extractor::classifier::classify;
/// use legal_extractor::types::{DocumentType, LegalEntity};
///
/// let result = classify("RESOLUCIÓN 045 de Cafam");
/// assert_eq!(result.document_type, DocumentType::Resolucion);
/// assert_eq!(result.legal_entity, LegalEntity::Cafam);
/// ```
#[must_use]
pub fn classify(text: &str) -> ClassificationResult {
    ClassificationResult {
        document_type: detect_document_type(text),
        legal_entity: detect_legal_entity(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_pattern_is_unknown() {
        assert_eq!(classify("Texto sin palabras clave."), ClassificationResult::unknown());
        assert_eq!(classify(""), ClassificationResult::unknown());
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(detect_document_type("DECRETO 1072"), DocumentType::Decreto);
        assert_eq!(detect_legal_entity("CoLsUbSiDiO"), LegalEntity::Colsubsidio);
    }

    #[test]
    fn test_accent_variants() {
        assert_eq!(detect_document_type("Resolucion 12"), DocumentType::Resolucion);
        assert_eq!(detect_document_type("Resolución 12"), DocumentType::Resolucion);
        assert_eq!(detect_document_type("OTRO SÍ No. 3"), DocumentType::OtroSi);
        assert_eq!(detect_document_type("otro  si"), DocumentType::OtroSi);
    }

    #[test]
    fn test_table_order_breaks_ties_not_text_position() {
        // "circular" appears first in the text, but resolucion is earlier in the table.
        let text = "Circular informativa sobre la resolución 10";
        assert_eq!(detect_document_type(text), DocumentType::Resolucion);

        let text = "Acuerdo que adopta el reglamento interno";
        assert_eq!(detect_document_type(text), DocumentType::Reglamento);

        let text = "Convenio entre Comcaja y Compensar";
        assert_eq!(detect_legal_entity(text), LegalEntity::Compensar);
    }

    #[test]
    fn test_fields_are_independent() {
        let result = classify("Circular de la entidad");
        assert_eq!(result.document_type, DocumentType::Circular);
        assert_eq!(result.legal_entity, LegalEntity::Unknown);
    }
}
