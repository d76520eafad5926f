//! Extraction pipeline and batch driver.
//!
//! [`extract_record`] is the pure core: text in, record out. The functions
//! around it acquire text from disk, persist records and isolate failures
//! per document.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::acquisition::TextSource;
use crate::articles::{extract_articles, extract_references};
use crate::assembler::assemble;
use crate::classifier::classify;
use crate::config::ExtractorConfig;
use crate::date::extract_date;
use crate::error::{ExtractorError, Result};
use crate::output::RecordWriter;
use crate::sections::split_sections;
use crate::types::DocumentRecord;

/// Run every extraction pass over one document's text.
///
/// # Examples
/// ```
/// use legal_extractor::pipeline::extract_record;
///
/// let record = extract_record("CIRCULAR de Compensar\n\nArtículo 1. Texto.");
/// assert_eq!(record.metadata.document_type.as_str(), "circular");
/// assert_eq!(record.metadata.total_articles, 1);
/// ```
#[must_use]
pub fn extract_record(text: &str) -> DocumentRecord {
    let classification = classify(text);
    let effective_date = extract_date(text);
    let sections = split_sections(text);
    let articles = extract_articles(text);
    let references = extract_references(text);

    assemble(classification, effective_date, sections, articles, references)
}

/// A document whose record was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedDocument {
    pub source: PathBuf,
    pub output: PathBuf,
}

/// A document that could not be processed.
#[derive(Debug)]
pub struct FailedDocument {
    pub source: PathBuf,
    pub error: ExtractorError,
}

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub processed: Vec<ProcessedDocument>,
    pub failed: Vec<FailedDocument>,
}

impl BatchReport {
    /// Number of documents attempted.
    #[must_use]
    pub fn total(&self) -> usize {
        self.processed.len() + self.failed.len()
    }

    /// Whether every attempted document was processed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Base name used for a document's record file.
fn base_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string())
}

/// Acquire, extract and persist one document.
///
/// # Arguments
/// * `path` - Document to process
/// * `source` - Text source used to read the document
/// * `writer` - Destination of the record
///
/// # Returns
/// The source and output paths of the written record
pub fn process_file(
    path: &Path,
    source: &impl TextSource,
    writer: &RecordWriter,
) -> Result<ProcessedDocument> {
    tracing::debug!(path = %path.display(), "Processing document");

    let text = source.extract_text(path)?;
    let record = extract_record(&text);
    let output = writer.write(&base_name(path), &record)?;

    tracing::debug!(
        path = %path.display(),
        output = %output.display(),
        articles = record.metadata.total_articles,
        sections = record.metadata.total_sections,
        "Document processed"
    );

    Ok(ProcessedDocument {
        source: path.to_path_buf(),
        output,
    })
}

/// List supported documents under `root`, recursively, in sorted order.
///
/// Symlinks are followed. Entries that cannot be read, such as a directory
/// without permissions or a symlink loop, are logged and skipped.
#[must_use]
pub fn discover_documents(root: &Path, source: &impl TextSource) -> Vec<PathBuf> {
    let mut documents = Vec::new();
    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(error = %e, "Skipping unreadable entry");
                continue;
            }
        };
        if entry.file_type().is_file() && source.supports(entry.path()) {
            documents.push(entry.into_path());
        }
    }
    documents
}

/// Progress after one document of a batch.
#[derive(Debug, Clone, Copy)]
pub struct BatchProgress<'a> {
    /// Document just attempted.
    pub path: &'a Path,
    /// Documents attempted so far, including this one.
    pub done: usize,
    pub total: usize,
}

/// Process a list of documents, isolating failures per document.
///
/// `on_document` is called after each document, whatever its outcome.
pub fn process_documents(
    documents: &[PathBuf],
    source: &impl TextSource,
    writer: &RecordWriter,
    mut on_document: impl FnMut(&BatchProgress<'_>),
) -> BatchReport {
    let mut report = BatchReport::default();

    for (index, path) in documents.iter().enumerate() {
        match process_file(path, source, writer) {
            Ok(processed) => report.processed.push(processed),
            Err(error) => {
                tracing::error!(path = %path.display(), error = %error, "Failed to process document");
                report.failed.push(FailedDocument {
                    source: path.clone(),
                    error,
                });
            }
        }
        on_document(&BatchProgress {
            path,
            done: index + 1,
            total: documents.len(),
        });
    }

    report
}

/// Process every supported document under the configured input root.
///
/// Directories are created if missing. A failing document is logged and
/// recorded in the report; it never stops the batch. `on_document` is
/// called after each document.
pub fn process_directory(
    config: &ExtractorConfig,
    source: &impl TextSource,
    writer: &RecordWriter,
    on_document: impl FnMut(&BatchProgress<'_>),
) -> Result<BatchReport> {
    config.ensure_directories()?;

    let documents = discover_documents(&config.input_dir, source);
    if documents.is_empty() {
        tracing::warn!(input = %config.input_dir.display(), "No documents found");
        return Ok(BatchReport::default());
    }

    tracing::info!(count = documents.len(), "Found documents to process");
    let report = process_documents(&documents, source, writer, on_document);
    tracing::info!(
        processed = report.processed.len(),
        failed = report.failed.len(),
        "Batch finished"
    );

    Ok(report)
}
