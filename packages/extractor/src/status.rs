//! Processing status: which input documents already have a record.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::acquisition::TextSource;
use crate::config::{ExtractorConfig, OutputFormat};
use crate::error::Result;
use crate::pipeline::discover_documents;

/// Metadata fields read back from a record file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RecordSummary {
    pub legal_entity: String,
    pub document_type: String,
    pub effective_date: String,
    pub articles_modified: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct SummaryFile {
    metadata: RecordSummary,
}

/// Status of one input document.
#[derive(Debug)]
pub enum DocumentStatus {
    /// A record exists; holds its summary or the reason it could not be read.
    Processed {
        record: PathBuf,
        summary: std::result::Result<RecordSummary, String>,
    },
    Pending,
}

#[derive(Debug)]
pub struct DocumentEntry {
    pub source: PathBuf,
    pub status: DocumentStatus,
}

impl DocumentEntry {
    #[must_use]
    pub fn is_processed(&self) -> bool {
        matches!(self.status, DocumentStatus::Processed { .. })
    }
}

/// Status of every input document plus totals.
#[derive(Debug, Default)]
pub struct StatusReport {
    pub documents: Vec<DocumentEntry>,
    /// Number of record files found in the output directory.
    pub record_files: usize,
}

impl StatusReport {
    #[must_use]
    pub fn total_documents(&self) -> usize {
        self.documents.len()
    }

    #[must_use]
    pub fn processed_count(&self) -> usize {
        self.documents.iter().filter(|d| d.is_processed()).count()
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.total_documents() - self.processed_count()
    }
}

/// Read the metadata summary of a record file.
pub fn read_summary(path: &Path) -> Result<RecordSummary> {
    let content = fs::read_to_string(path)?;
    let file: SummaryFile = match OutputFormat::from_path(path) {
        Some(OutputFormat::Yaml) => serde_yaml_ng::from_str(&content)?,
        _ => serde_json::from_str(&content)?,
    };
    Ok(file.metadata)
}

/// Record files in `output_dir` keyed by file stem, plus the number of files.
///
/// When a stem has records in several formats, the `preferred` one wins.
fn record_files(
    output_dir: &Path,
    preferred: OutputFormat,
) -> Result<(BTreeMap<String, PathBuf>, usize)> {
    let mut records: BTreeMap<String, PathBuf> = BTreeMap::new();
    let mut count = 0;
    if !output_dir.is_dir() {
        return Ok((records, count));
    }

    for entry in fs::read_dir(output_dir)? {
        let path = entry?.path();
        let Some(format) = OutputFormat::from_path(&path) else {
            continue;
        };
        if !path.is_file() {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };

        count += 1;
        let keep_existing = records
            .get(stem)
            .is_some_and(|existing| OutputFormat::from_path(existing) == Some(preferred));
        if !keep_existing && (format == preferred || !records.contains_key(stem)) {
            records.insert(stem.to_string(), path.clone());
        }
    }
    Ok((records, count))
}

/// Report which input documents have a record in the output directory.
///
/// Documents and records are matched by file stem; a record in the
/// configured format is preferred over one in another format. A missing
/// input or output directory counts as empty.
pub fn check_status(config: &ExtractorConfig, source: &impl TextSource) -> Result<StatusReport> {
    let (records, record_count) = record_files(&config.output_dir, config.format)?;
    let documents = if config.input_dir.is_dir() {
        discover_documents(&config.input_dir, source)
    } else {
        Vec::new()
    };

    let documents = documents
        .into_iter()
        .map(|path| {
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            let status = match records.get(&stem) {
                Some(record) => DocumentStatus::Processed {
                    record: record.clone(),
                    summary: read_summary(record).map_err(|e| {
                        tracing::warn!(path = %record.display(), error = %e, "Unreadable record");
                        e.to_string()
                    }),
                },
                None => DocumentStatus::Pending,
            };
            DocumentEntry {
                source: path,
                status,
            }
        })
        .collect();

    Ok(StatusReport {
        documents,
        record_files: record_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acquisition::FileTextSource;
    use crate::output::RecordWriter;
    use crate::pipeline::extract_record;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn setup() -> (tempfile::TempDir, ExtractorConfig) {
        let dir = tempdir().unwrap();
        let config = ExtractorConfig::default()
            .with_input_dir(dir.path().join("raw"))
            .with_output_dir(dir.path().join("processed"));
        config.ensure_directories().unwrap();
        (dir, config)
    }

    #[test]
    fn test_pending_and_processed() {
        let (_dir, config) = setup();
        fs::write(config.input_dir.join("a.txt"), "").unwrap();
        fs::write(config.input_dir.join("b.txt"), "").unwrap();

        let record = extract_record("Resolución de Cafam, 2 de mayo de 2022\n\nArtículo 1. Modifica.");
        RecordWriter::new(&config.output_dir, OutputFormat::Json)
            .write("a", &record)
            .unwrap();

        let report = check_status(&config, &FileTextSource::new()).unwrap();
        assert_eq!(report.total_documents(), 2);
        assert_eq!(report.processed_count(), 1);
        assert_eq!(report.pending_count(), 1);
        assert_eq!(report.record_files, 1);

        let DocumentStatus::Processed { summary, .. } = &report.documents[0].status else {
            panic!("expected a.txt to be processed");
        };
        assert_eq!(
            summary.as_ref().unwrap(),
            &RecordSummary {
                legal_entity: "cafam".to_string(),
                document_type: "resolucion".to_string(),
                effective_date: "2022-05-02".to_string(),
                articles_modified: vec!["Artículo 1".to_string()],
            }
        );
        assert!(matches!(report.documents[1].status, DocumentStatus::Pending));
    }

    #[test]
    fn test_reads_yaml_records() {
        let (_dir, config) = setup();
        fs::write(config.input_dir.join("doc.txt"), "").unwrap();
        RecordWriter::new(&config.output_dir, OutputFormat::Yaml)
            .write("doc", &extract_record("sin datos"))
            .unwrap();

        let report = check_status(&config, &FileTextSource::new()).unwrap();
        let DocumentStatus::Processed { summary, .. } = &report.documents[0].status else {
            panic!("expected doc.txt to be processed");
        };
        let summary = summary.as_ref().unwrap();
        assert_eq!(summary.legal_entity, "desconocida");
        assert_eq!(summary.document_type, "desconocido");
        assert_eq!(summary.effective_date, "desconocida");
        assert!(summary.articles_modified.is_empty());
    }

    #[test]
    fn test_corrupt_record_reports_error() {
        let (_dir, config) = setup();
        fs::write(config.input_dir.join("doc.txt"), "").unwrap();
        fs::write(config.output_dir.join("doc.json"), "{ not json").unwrap();

        let report = check_status(&config, &FileTextSource::new()).unwrap();
        let DocumentStatus::Processed { summary, .. } = &report.documents[0].status else {
            panic!("expected doc.txt to be processed");
        };
        assert!(summary.is_err());
    }

    #[test]
    fn test_configured_format_wins_when_both_records_exist() {
        let (_dir, config) = setup();
        fs::write(config.input_dir.join("doc.txt"), "").unwrap();
        RecordWriter::new(&config.output_dir, OutputFormat::Json)
            .write("doc", &extract_record("Circular de Cafam"))
            .unwrap();
        RecordWriter::new(&config.output_dir, OutputFormat::Yaml)
            .write("doc", &extract_record("Decreto de Comcaja"))
            .unwrap();

        for (format, entity) in [(OutputFormat::Json, "cafam"), (OutputFormat::Yaml, "comcaja")] {
            let config = config.clone().with_format(format);
            let report = check_status(&config, &FileTextSource::new()).unwrap();
            assert_eq!(report.record_files, 2);

            let DocumentStatus::Processed { record, summary } = &report.documents[0].status else {
                panic!("expected doc.txt to be processed");
            };
            assert_eq!(OutputFormat::from_path(record), Some(format));
            assert_eq!(summary.as_ref().unwrap().legal_entity, entity);
        }
    }

    #[test]
    fn test_missing_directories_are_empty() {
        let dir = tempdir().unwrap();
        let config = ExtractorConfig::default()
            .with_input_dir(dir.path().join("nope"))
            .with_output_dir(dir.path().join("nada"));

        let report = check_status(&config, &FileTextSource::new()).unwrap();
        assert_eq!(report.total_documents(), 0);
        assert_eq!(report.record_files, 0);
    }
}
