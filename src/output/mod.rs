// Thu Oct 15 2026 - Alex

pub mod formatter;
pub mod json;
pub mod manager;
pub mod report;

pub use formatter::Block;
pub use json::{JsonSerializer, StructuredReport};
pub use manager::{FailedReport, OutputManager, ReportSummary, WrittenReport};
pub use report::ReportGenerator;

use chrono::{DateTime, Utc};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::orchestration::ResultAggregate;

pub const NO_MODULES_NOTICE: &str = "No modules executed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ReportFormat {
    Json,
    Markdown,
    Html,
}

impl ReportFormat {
    pub const ALL: [ReportFormat; 3] = [ReportFormat::Json, ReportFormat::Markdown, ReportFormat::Html];

    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Json => "json",
            ReportFormat::Markdown => "md",
            ReportFormat::Html => "html",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReportFormat::Json => "JSON",
            ReportFormat::Markdown => "Markdown",
            ReportFormat::Html => "HTML",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("cannot create report directory {}: {message}", .path.display())]
    Directory { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Renders one document. `generated_at` is the only value that differs between two
/// renders of the same aggregate.
pub fn render(
    aggregate: &ResultAggregate,
    format: ReportFormat,
    generated_at: DateTime<Utc>,
) -> Result<Vec<u8>, ReportError> {
    let text = ReportGenerator::new(format).generate(aggregate, generated_at)?;
    Ok(text.into_bytes())
}
