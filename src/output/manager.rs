// Thu Oct 15 2026 - Alex

use chrono::{DateTime, Utc};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::orchestration::ResultAggregate;
use crate::output::{render, ReportError, ReportFormat};
use crate::utils::sanitize_file_component;

pub const REPORTS_DIR: &str = "reports";
pub const SUBDOMAINS_KEY: &str = "subdomains";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenReport {
    pub format: ReportFormat,
    pub path: PathBuf,
}

#[derive(Debug)]
pub struct FailedReport {
    pub format: ReportFormat,
    pub path: PathBuf,
    pub error: ReportError,
}

#[derive(Debug, Default)]
pub struct ReportSummary {
    pub written: Vec<WrittenReport>,
    pub failed: Vec<FailedReport>,
}

impl ReportSummary {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn path_for(&self, format: ReportFormat) -> Option<&Path> {
        self.written
            .iter()
            .find(|w| w.format == format)
            .map(|w| w.path.as_path())
    }
}

/// Writes the report files for a run under `<output_dir>/reports/`.
pub struct OutputManager {
    output_dir: PathBuf,
    report_dir: PathBuf,
    formats: Vec<ReportFormat>,
    generated_at: Option<DateTime<Utc>>,
}

impl OutputManager {
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            report_dir: output_dir.as_ref().join(REPORTS_DIR),
            formats: ReportFormat::ALL.to_vec(),
            generated_at: None,
        }
    }

    pub fn with_formats(mut self, formats: &[ReportFormat]) -> Self {
        self.formats = formats.to_vec();
        self
    }

    /// Pins the generation timestamp instead of reading the clock at write time.
    pub fn with_generated_at(mut self, generated_at: DateTime<Utc>) -> Self {
        self.generated_at = Some(generated_at);
        self
    }

    pub fn report_dir(&self) -> &Path {
        &self.report_dir
    }

    pub fn report_path(&self, target: &str, format: ReportFormat, generated_at: DateTime<Utc>) -> PathBuf {
        self.report_dir.join(report_file_name(target, format, generated_at))
    }

    /// Writes every configured format. A failing format is recorded and the rest still run.
    pub fn write_all(&self, aggregate: &ResultAggregate) -> ReportSummary {
        let generated_at = self.generated_at.unwrap_or_else(Utc::now);
        let mut summary = ReportSummary::default();

        let dir_error = fs::create_dir_all(&self.report_dir).err().map(|e| e.to_string());

        for &format in &self.formats {
            let path = self.report_path(aggregate.target(), format, generated_at);

            let result = match &dir_error {
                Some(message) => Err(ReportError::Directory {
                    path: self.report_dir.clone(),
                    message: message.clone(),
                }),
                None => Self::write_one(aggregate, format, generated_at, &path),
            };

            match result {
                Ok(()) => {
                    log::info!("{} report written to {}", format, path.display());
                    summary.written.push(WrittenReport { format, path });
                }
                Err(error) => {
                    log::error!("failed to write {} report {}: {}", format, path.display(), error);
                    summary.failed.push(FailedReport { format, path, error });
                }
            }
        }

        summary
    }

    /// Writes the full subdomain list, one name per line, to `<output_dir>/<target>_subdomains.txt`.
    /// Returns `None` when the run produced no subdomain list.
    pub fn write_subdomain_list(&self, aggregate: &ResultAggregate) -> Result<Option<PathBuf>, ReportError> {
        let names = subdomain_list(aggregate);
        if names.is_empty() {
            return Ok(None);
        }

        fs::create_dir_all(&self.output_dir).map_err(|e| ReportError::Directory {
            path: self.output_dir.clone(),
            message: e.to_string(),
        })?;

        let path = self
            .output_dir
            .join(format!("{}_subdomains.txt", sanitize_file_component(aggregate.target())));
        let mut writer = BufWriter::new(File::create(&path)?);
        for name in &names {
            writeln!(writer, "{}", name)?;
        }
        writer.flush()?;

        log::info!("{} subdomains written to {}", names.len(), path.display());
        Ok(Some(path))
    }

    fn write_one(
        aggregate: &ResultAggregate,
        format: ReportFormat,
        generated_at: DateTime<Utc>,
        path: &Path,
    ) -> Result<(), ReportError> {
        let bytes = render(aggregate, format, generated_at)?;

        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(&bytes)?;
        writer.flush()?;

        Ok(())
    }
}

pub fn report_file_name(target: &str, format: ReportFormat, generated_at: DateTime<Utc>) -> String {
    format!(
        "{}_{}_report.{}",
        sanitize_file_component(target),
        generated_at.format("%Y%m%d_%H%M%S"),
        format.extension()
    )
}

/// Subdomains found by the `subdomains` module, empty when it failed or did not run.
pub fn subdomain_list(aggregate: &ResultAggregate) -> Vec<&str> {
    aggregate
        .get(SUBDOMAINS_KEY)
        .and_then(|result| result.payload())
        .and_then(|payload| payload.document().get(SUBDOMAINS_KEY))
        .and_then(|value| value.as_array())
        .map(|items| items.iter().filter_map(|item| item.as_str()).collect())
        .unwrap_or_default()
}
