//! Legal Extractor - Structured records from Spanish legal documents.
//!
//! This crate turns the text of regulations, resolutions, circulars,
//! agreements and decrees issued by Colombian family compensation funds
//! into a structured record: document type, issuing entity, effective date,
//! named sections, numbered articles with amendment flags and the articles
//! they cite.
//!
//! # Example
//!
//! ```
//! use legal_extractor::extract_record;
//!
//! let text = "REGLAMENTO\nCOLSUBSIDIO\n15 de enero de 2023\n\n\
//!             Objetivo\nEste reglamento busca...\n\n\
//!             Artículo 1: Se modifica el artículo 5.\n";
//! let record = extract_record(text);
//!
//! assert_eq!(record.metadata.document_type.as_str(), "reglamento");
//! assert_eq!(record.metadata.effective_date.to_string(), "2023-01-15");
//! assert_eq!(record.metadata.articles_modified, vec!["Artículo 1"]);
//! ```
//!
//! # Architecture
//!
//! The extractor is organized into several modules:
//!
//! - [`patterns`]: Ordered pattern tables and Spanish month names
//! - [`classifier`]: Document type and legal entity detection
//! - [`date`]: Effective date extraction
//! - [`sections`]: Section segmentation
//! - [`articles`]: Article and reference extraction
//! - [`assembler`]: Record assembly
//! - [`types`]: Core data types (DocumentRecord, Article, SectionMap, etc.)
//! - [`acquisition`]: Text extraction from PDF and text files
//! - [`output`]: JSON/YAML record persistence
//! - [`pipeline`]: Extraction pipeline and batch driver
//! - [`status`]: Processing status report
//! - [`config`]: Directory and format configuration
//! - [`error`]: Error types and Result alias
//! - [`cli`]: Command-line interface

pub mod acquisition;
pub mod articles;
pub mod assembler;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod date;
pub mod error;
pub mod output;
pub mod patterns;
pub mod pipeline;
pub mod sections;
pub mod status;
pub mod types;

// Re-export main functions
pub use pipeline::{extract_record, process_directory, process_file};

// Re-export commonly used items
pub use acquisition::{FileTextSource, TextSource};
pub use config::{ExtractorConfig, OutputFormat};
pub use error::{ExtractorError, Result};
pub use output::RecordWriter;
pub use types::{
    Article, ClassificationResult, DocumentRecord, DocumentType, EffectiveDate, LegalEntity,
    SectionMap, SectionName,
};
