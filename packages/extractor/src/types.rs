//! Core data types for the extractor.
//!
//! These types describe one processed regulatory document: its coarse
//! classification, effective date, section breakdown and articles.

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Regulatory instrument categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// Reglamento (regulation).
    Reglamento,

    /// Otrosí (contract addendum).
    OtroSi,

    /// Resolución (resolution).
    Resolucion,

    /// Circular.
    Circular,

    /// Acuerdo (agreement).
    Acuerdo,

    /// Decreto (decree).
    Decreto,

    /// No pattern matched.
    #[serde(rename = "desconocido")]
    Unknown,
}

impl DocumentType {
    /// Get the string value used in records.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reglamento => "reglamento",
            Self::OtroSi => "otro_si",
            Self::Resolucion => "resolucion",
            Self::Circular => "circular",
            Self::Acuerdo => "acuerdo",
            Self::Decreto => "decreto",
            Self::Unknown => "desconocido",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Known issuing institutions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LegalEntity {
    Colsubsidio,
    Compensar,
    Cafam,
    Comfacundi,
    Comcaja,

    /// No pattern matched.
    #[serde(rename = "desconocida")]
    Unknown,
}

impl LegalEntity {
    /// Get the string value used in records.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Colsubsidio => "colsubsidio",
            Self::Compensar => "compensar",
            Self::Cafam => "cafam",
            Self::Comfacundi => "comfacundi",
            Self::Comcaja => "comcaja",
            Self::Unknown => "desconocida",
        }
    }
}

impl fmt::Display for LegalEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of the classification pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassificationResult {
    pub document_type: DocumentType,
    pub legal_entity: LegalEntity,
}

impl ClassificationResult {
    /// Classification with both fields unknown.
    #[must_use]
    pub fn unknown() -> Self {
        Self {
            document_type: DocumentType::Unknown,
            legal_entity: LegalEntity::Unknown,
        }
    }
}

/// Effective date of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectiveDate {
    Known(NaiveDate),
    Unknown,
}

impl EffectiveDate {
    /// Value written to records when no date was found.
    pub const UNKNOWN_LABEL: &'static str = "desconocida";
}

impl fmt::Display for EffectiveDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::Unknown => f.write_str(Self::UNKNOWN_LABEL),
        }
    }
}

impl Serialize for EffectiveDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Named document sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionName {
    /// Default bucket for text before the first recognized heading.
    Introduccion,
    Considerandos,
    Objetivo,
    Definiciones,
    Alcance,
    Vigencia,
    /// Disposiciones finales.
    Disposiciones,
}

impl SectionName {
    /// Get the key used in records.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Introduccion => "introduccion",
            Self::Considerandos => "considerandos",
            Self::Objetivo => "objetivo",
            Self::Definiciones => "definiciones",
            Self::Alcance => "alcance",
            Self::Vigencia => "vigencia",
            Self::Disposiciones => "disposiciones",
        }
    }
}

impl fmt::Display for SectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sections keyed by name.
///
/// Inserting a name that is already present replaces its body in place,
/// keeping the position of the first insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionMap {
    entries: Vec<(SectionName, Vec<String>)>,
}

impl SectionMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the body of `name`.
    pub fn insert(&mut self, name: SectionName, body: Vec<String>) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = body,
            None => self.entries.push((name, body)),
        }
    }

    /// Body lines of `name`, if present.
    #[must_use]
    pub fn get(&self, name: SectionName) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(existing, _)| *existing == name)
            .map(|(_, body)| body.as_slice())
    }

    #[must_use]
    pub fn contains(&self, name: SectionName) -> bool {
        self.get(name).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate sections in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (SectionName, &[String])> {
        self.entries
            .iter()
            .map(|(name, body)| (*name, body.as_slice()))
    }
}

/// Records store each section body as newline-joined text.
impl Serialize for SectionMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, body) in &self.entries {
            map.serialize_entry(name.as_str(), &body.join("\n"))?;
        }
        map.end()
    }
}

/// A single numbered article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Article {
    /// Article number as written (digits only).
    pub number: String,

    /// Full matched block including the heading, trimmed.
    pub text: String,

    /// Whether the article amends another provision.
    pub is_amendment: bool,

    /// Non-empty trimmed content lines.
    pub paragraphs: Vec<String>,
}

impl Article {
    /// Display label, e.g. "Artículo 5".
    #[must_use]
    pub fn label(&self) -> String {
        format!("Artículo {}", self.number)
    }
}

/// Record metadata block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordMetadata {
    pub legal_entity: LegalEntity,
    pub document_type: DocumentType,
    pub effective_date: EffectiveDate,
    /// Labels of amending articles, in article order.
    pub articles_modified: Vec<String>,
    pub jurisdiction: String,
    /// Normalized cross-references ("artículo N").
    pub references: BTreeSet<String>,
    pub total_articles: usize,
    pub total_sections: usize,
}

/// Record content block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordContent {
    pub sections: SectionMap,
    pub articles: Vec<Article>,
}

/// Complete structured record for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentRecord {
    pub metadata: RecordMetadata,
    pub content: RecordContent,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_article_label() {
        let article = Article {
            number: "12".to_string(),
            text: "Artículo 12. Texto".to_string(),
            is_amendment: false,
            paragraphs: vec!["Texto".to_string()],
        };
        assert_eq!(article.label(), "Artículo 12");
    }

    #[test]
    fn test_document_type_as_str() {
        assert_eq!(DocumentType::Reglamento.as_str(), "reglamento");
        assert_eq!(DocumentType::OtroSi.as_str(), "otro_si");
        assert_eq!(DocumentType::Unknown.as_str(), "desconocido");
    }

    #[test]
    fn test_enum_serialization_matches_as_str() {
        for doc_type in [
            DocumentType::Reglamento,
            DocumentType::OtroSi,
            DocumentType::Resolucion,
            DocumentType::Unknown,
        ] {
            assert_eq!(
                serde_json::to_string(&doc_type).unwrap(),
                format!("\"{}\"", doc_type.as_str())
            );
        }
        assert_eq!(
            serde_json::to_string(&LegalEntity::Unknown).unwrap(),
            "\"desconocida\""
        );
    }

    #[test]
    fn test_effective_date_display() {
        let date = NaiveDate::from_ymd_opt(2023, 1, 5).unwrap();
        assert_eq!(EffectiveDate::Known(date).to_string(), "2023-01-05");
        assert_eq!(EffectiveDate::Unknown.to_string(), "desconocida");
        assert_eq!(EffectiveDate::UNKNOWN_LABEL, "desconocida");
        assert_eq!(
            serde_json::to_string(&EffectiveDate::Known(date)).unwrap(),
            "\"2023-01-05\""
        );
    }

    #[test]
    fn test_section_map_overwrites_in_place() {
        let mut sections = SectionMap::new();
        sections.insert(SectionName::Introduccion, vec!["a".to_string()]);
        sections.insert(SectionName::Alcance, vec!["b".to_string()]);
        sections.insert(SectionName::Introduccion, vec!["c".to_string()]);

        assert_eq!(sections.len(), 2);
        assert_eq!(
            sections.get(SectionName::Introduccion),
            Some(&["c".to_string()][..])
        );
        let order: Vec<_> = sections.iter().map(|(name, _)| name).collect();
        assert_eq!(order, vec![SectionName::Introduccion, SectionName::Alcance]);
    }

    #[test]
    fn test_section_map_serializes_joined_bodies() {
        let mut sections = SectionMap::new();
        sections.insert(
            SectionName::Objetivo,
            vec!["línea uno".to_string(), "línea dos".to_string()],
        );
        let json = serde_json::to_string(&sections).unwrap();
        assert_eq!(json, r#"{"objetivo":"línea uno\nlínea dos"}"#);
    }
}
