//! Record persistence: one JSON or YAML file per processed document.

use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;

use crate::config::OutputFormat;
use crate::error::{ExtractorError, Result};
use crate::types::DocumentRecord;

/// Render a record in the given format.
///
/// JSON is pretty-printed with two-space indentation and keeps non-ASCII
/// characters literal. YAML starts with a `---` marker and indents sequence
/// items under their parent key.
pub fn render_record(record: &DocumentRecord, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let mut content = serde_json::to_string_pretty(record)?;
            content.push('\n');
            Ok(content)
        }
        OutputFormat::Yaml => {
            let yaml_string = serde_yaml_ng::to_string(record)?;
            let yaml_string = indent_yaml_sequences(&yaml_string);

            // Add document start marker and clean up trailing whitespace
            let lines: Vec<&str> = yaml_string.lines().map(str::trim_end).collect();
            Ok(format!("---\n{}\n", lines.join("\n")))
        }
    }
}

/// Whether a YAML line opens a block scalar (`key: |-`, `- >`, ...).
fn opens_block_scalar(trimmed: &str) -> bool {
    let Some(indicator) = trimmed.rsplit(' ').next() else {
        return false;
    };
    let starts_block = indicator.starts_with('|') || indicator.starts_with('>');
    let is_indicator = indicator
        .chars()
        .all(|c| matches!(c, '|' | '>' | '+' | '-') || c.is_ascii_digit());
    starts_block && is_indicator && (trimmed.contains(": ") || trimmed.starts_with("- "))
}

/// Indent YAML sequences under their parent key.
///
/// serde_yaml_ng places sequence items (`- `) at the same indent as their
/// parent key. This adds 2 spaces per open sequence so items sit under it:
///
/// ```yaml
/// # Before:              # After:
/// articles_modified:     articles_modified:
/// - Artículo 1             - Artículo 1
/// ```
///
/// Block scalar content is shifted with its parent line and never parsed
/// for sequence markers.
fn indent_yaml_sequences(yaml: &str) -> String {
    let mut result: Vec<String> = Vec::new();
    // Stack of indent levels where sequences start
    let mut seq_indents: Vec<usize> = Vec::new();
    // Key indent and applied shift of the line that opened the current block scalar
    let mut block: Option<(usize, usize)> = None;

    for line in yaml.lines() {
        let trimmed = line.trim_start();

        if trimmed.is_empty() {
            result.push(line.to_string());
            continue;
        }

        let indent = line.len() - trimmed.len();

        if let Some((parent_indent, parent_extra)) = block {
            if indent > parent_indent {
                result.push(format!("{}{line}", " ".repeat(parent_extra)));
                continue;
            }
            block = None;
        }

        // Pop sequences we've exited
        while let Some(&seq_indent) = seq_indents.last() {
            if indent < seq_indent || (indent == seq_indent && !trimmed.starts_with("- ")) {
                seq_indents.pop();
            } else {
                break;
            }
        }

        if trimmed.starts_with("- ") || trimmed == "-" {
            let is_continuation = seq_indents.last().is_some_and(|&si| si == indent);
            if !is_continuation {
                seq_indents.push(indent);
            }
        }

        let extra = seq_indents.len() * 2;
        if opens_block_scalar(trimmed) {
            let key_indent = if trimmed.starts_with("- ") && trimmed.contains(": ") {
                indent + 2
            } else {
                indent
            };
            block = Some((key_indent, extra));
        }
        result.push(format!("{}{trimmed}", " ".repeat(indent + extra)));
    }

    result.join("\n")
}

/// Writes records into an output directory.
#[derive(Debug, Clone)]
pub struct RecordWriter {
    output_dir: PathBuf,
    format: OutputFormat,
}

impl RecordWriter {
    pub fn new(output_dir: impl Into<PathBuf>, format: OutputFormat) -> Self {
        Self {
            output_dir: output_dir.into(),
            format,
        }
    }

    /// Path of the record file for a document with the given base name.
    #[must_use]
    pub fn record_path(&self, base_name: &str) -> PathBuf {
        self.output_dir
            .join(format!("{base_name}.{}", self.format.extension()))
    }

    /// Write a record as `<base_name>.<ext>`, replacing any earlier file.
    ///
    /// Uses atomic write pattern: writes to temp file, syncs to disk, then renames.
    ///
    /// # Arguments
    /// * `base_name` - Source document file name without extension
    /// * `record` - The record to persist
    ///
    /// # Returns
    /// Path to the written file
    pub fn write(&self, base_name: &str, record: &DocumentRecord) -> Result<PathBuf> {
        let content = render_record(record, self.format)?;
        let output_file = self.record_path(base_name);
        let temp_file = self
            .output_dir
            .join(format!(".{base_name}.{}.tmp", self.format.extension()));

        let persist = |source| ExtractorError::Persistence {
            path: output_file.clone(),
            source,
        };

        fs::create_dir_all(&self.output_dir).map_err(persist)?;

        {
            let mut file = File::create(&temp_file).map_err(persist)?;
            file.write_all(content.as_bytes()).map_err(persist)?;
            file.sync_all().map_err(persist)?;
        }

        // On Windows, rename fails if the destination already exists
        #[cfg(target_os = "windows")]
        if output_file.exists() {
            fs::remove_file(&output_file).map_err(persist)?;
        }

        fs::rename(&temp_file, &output_file).map_err(persist)?;

        tracing::debug!(path = %output_file.display(), "Record written");
        Ok(output_file)
    }
}
