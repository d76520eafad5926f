//! CLI entry point for the extractor.

use std::fs;
use std::path::Path;

use clap::Parser;
use legal_extractor::cli::{self, Cli};
use legal_extractor::error::{ExtractorError, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Log to stderr and to `log_file`, with INFO level by default and respecting RUST_LOG.
///
/// The returned guard flushes the file writer when dropped.
fn init_logging(log_file: &Path) -> Result<WorkerGuard> {
    let dir = log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let file_name = log_file
        .file_name()
        .ok_or_else(|| ExtractorError::Logging(format!("not a file: {}", log_file.display())))?;
    fs::create_dir_all(dir)?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy())
        .build(dir)
        .map_err(|e| ExtractorError::Logging(e.to_string()))?;
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(file_writer),
        )
        .try_init()
        .map_err(|e| ExtractorError::Logging(e.to_string()))?;

    Ok(guard)
}

fn main() {
    let cli = Cli::parse();

    let result = cli.config().and_then(|config| {
        let _guard = init_logging(&config.log_file)?;
        cli::run(cli.command, &config)
    });

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
