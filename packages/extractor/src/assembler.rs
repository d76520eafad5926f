//! Record assembly from the outputs of the extraction passes.

use std::collections::BTreeSet;

use crate::config::DEFAULT_JURISDICTION;
use crate::types::{
    Article, ClassificationResult, DocumentRecord, EffectiveDate, RecordContent, RecordMetadata,
    SectionMap,
};

/// Merge classification, date, sections, articles and references into one record.
///
/// Pure composition: the modified-articles list keeps article order, the
/// counts are taken from the collections and the jurisdiction is always
/// [`DEFAULT_JURISDICTION`].
#[must_use]
pub fn assemble(
    classification: ClassificationResult,
    effective_date: EffectiveDate,
    sections: SectionMap,
    articles: Vec<Article>,
    references: BTreeSet<String>,
) -> DocumentRecord {
    let articles_modified = articles
        .iter()
        .filter(|article| article.is_amendment)
        .map(Article::label)
        .collect();

    DocumentRecord {
        metadata: RecordMetadata {
            legal_entity: classification.legal_entity,
            document_type: classification.document_type,
            effective_date,
            articles_modified,
            jurisdiction: DEFAULT_JURISDICTION.to_string(),
            references,
            total_articles: articles.len(),
            total_sections: sections.len(),
        },
        content: RecordContent { sections, articles },
    }
}
