//! Command-line interface for the extractor.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::acquisition::{FileTextSource, TextSource};
use crate::config::{ExtractorConfig, OutputFormat};
use crate::error::{ExtractorError, Result};
use crate::output::{render_record, RecordWriter};
use crate::pipeline::{extract_record, process_directory, process_file};
use crate::status::{check_status, DocumentStatus};

/// Legal Extractor - Structured records from Spanish legal documents.
#[derive(Parser)]
#[command(name = "legal-extractor")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Input root searched recursively for documents
    #[arg(long, global = true)]
    pub input: Option<PathBuf>,

    /// Output directory for records
    #[arg(long, global = true)]
    pub output: Option<PathBuf>,

    /// Log file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Record format: json or yaml
    #[arg(long, global = true)]
    pub format: Option<OutputFormat>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Process every document under the input root.
    Process,

    /// Process a single document.
    Extract {
        /// Document to process (.pdf or .txt)
        file: PathBuf,

        /// Print the record instead of writing it
        #[arg(long)]
        stdout: bool,
    },

    /// Show which documents have been processed.
    Status,
}

impl Cli {
    /// Resolve configuration: defaults, then environment, then flags.
    pub fn config(&self) -> Result<ExtractorConfig> {
        let mut config = ExtractorConfig::from_env()?;
        if let Some(dir) = &self.input {
            config = config.with_input_dir(dir);
        }
        if let Some(dir) = &self.output {
            config = config.with_output_dir(dir);
        }
        if let Some(file) = &self.log_file {
            config = config.with_log_file(file);
        }
        if let Some(format) = self.format {
            config = config.with_format(format);
        }
        Ok(config)
    }
}

/// Run a parsed command against a resolved configuration.
pub fn run(command: Commands, config: &ExtractorConfig) -> Result<()> {
    match command {
        Commands::Process => process_command(config),
        Commands::Extract { file, stdout } => extract_command(config, &file, stdout),
        Commands::Status => status_command(config),
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Execute the process command.
fn process_command(config: &ExtractorConfig) -> Result<()> {
    let source = FileTextSource::new();
    let writer = RecordWriter::new(&config.output_dir, config.format);

    println!(
        "{} documents from {}",
        style("Processing").bold(),
        style(config.input_dir.display()).green()
    );
    println!();

    let pb = ProgressBar::new(0);
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("valid template"),
    );

    let report = process_directory(config, &source, &writer, |progress| {
        pb.set_length(progress.total as u64);
        pb.set_position(progress.done as u64);
        pb.set_message(file_name(progress.path));
    })?;
    pb.finish_and_clear();

    if report.total() == 0 {
        println!(
            "{} {}",
            style("No documents found in").yellow(),
            config.input_dir.display()
        );
        return Ok(());
    }

    println!(
        "  Processed: {}",
        style(report.processed.len()).green().bold()
    );
    if !report.failed.is_empty() {
        println!("  Failed: {}", style(report.failed.len()).red().bold());
        for failure in &report.failed {
            println!("    {} {}", style("✗").red(), failure.error);
        }
    }

    println!();
    println!(
        "{} {}",
        style("Records in:").green().bold(),
        config.output_dir.display()
    );

    Ok(())
}

/// Execute the extract command.
fn extract_command(config: &ExtractorConfig, file: &Path, stdout: bool) -> Result<()> {
    let source = FileTextSource::new();
    if !file.is_file() {
        return Err(ExtractorError::acquisition(file, "file not found"));
    }
    if !source.supports(file) {
        return Err(ExtractorError::acquisition(file, "unsupported document type"));
    }

    if stdout {
        let text = source.extract_text(file)?;
        let record = extract_record(&text);
        print!("{}", render_record(&record, config.format)?);
        return Ok(());
    }

    let writer = RecordWriter::new(&config.output_dir, config.format);
    let processed = process_file(file, &source, &writer)?;

    println!(
        "{} {}",
        style("Saved to:").green().bold(),
        processed.output.display()
    );
    Ok(())
}

/// Execute the status command.
fn status_command(config: &ExtractorConfig) -> Result<()> {
    let report = check_status(config, &FileTextSource::new())?;

    println!("{}", style("Document processing status").bold());
    println!();
    println!("  Documents found: {}", style(report.total_documents()).cyan());
    println!("  Record files: {}", style(report.record_files).cyan());
    println!();

    for entry in &report.documents {
        let name = file_name(&entry.source);
        match &entry.status {
            DocumentStatus::Pending => {
                println!("{} {name}", style("Pending  ").yellow());
            }
            DocumentStatus::Processed { summary, .. } => {
                println!("{} {name}", style("Processed").green());
                match summary {
                    Ok(summary) => {
                        println!("    Entity: {}", summary.legal_entity);
                        println!("    Type: {}", summary.document_type);
                        println!("    Date: {}", summary.effective_date);
                        println!(
                            "    Modified articles: {}",
                            summary.articles_modified.len()
                        );
                    }
                    Err(message) => {
                        println!("    {} {message}", style("Unreadable record:").red());
                    }
                }
            }
        }
    }

    println!();
    println!(
        "{} processed, {} pending",
        style(report.processed_count()).green().bold(),
        style(report.pending_count()).yellow().bold()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_process() {
        let cli = Cli::parse_from(["legal-extractor", "process"]);
        assert!(matches!(cli.command, Commands::Process));
        assert!(cli.input.is_none());
        assert!(cli.format.is_none());
    }

    #[test]
    fn test_cli_parse_extract_with_flags() {
        let cli = Cli::parse_from([
            "legal-extractor",
            "extract",
            "doc.pdf",
            "--stdout",
            "--format",
            "yaml",
        ]);

        let Commands::Extract { file, stdout } = cli.command else {
            panic!("expected extract command");
        };
        assert_eq!(file, PathBuf::from("doc.pdf"));
        assert!(stdout);
        assert_eq!(cli.format, Some(OutputFormat::Yaml));
    }

    #[test]
    fn test_cli_global_flags_before_subcommand() {
        let cli = Cli::parse_from([
            "legal-extractor",
            "--input",
            "in",
            "--output",
            "out",
            "--log-file",
            "run.log",
            "status",
        ]);
        assert!(matches!(cli.command, Commands::Status));

        let config = cli.config().unwrap();
        assert_eq!(config.input_dir, PathBuf::from("in"));
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.log_file, PathBuf::from("run.log"));
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        let result = Cli::try_parse_from(["legal-extractor", "process", "--format", "xml"]);
        assert!(result.is_err());
    }
}
