// Thu Oct 15 2026 - Alex

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::modules::ModuleResult;
use crate::orchestration::{AggregateBuilder, ResultAggregate, SummaryMetric};
use crate::output::{ReportError, NO_MODULES_NOTICE};
use crate::utils::format_duration;

/// On-disk shape of the JSON report. Loading it back yields the same aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredReport {
    pub version: String,
    pub generated_at: DateTime<Utc>,
    pub target: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration: String,
    pub summary: Vec<SummaryMetric>,
    pub modules: BTreeMap<String, ModuleResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl StructuredReport {
    pub fn from_aggregate(aggregate: &ResultAggregate, generated_at: DateTime<Utc>) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at,
            target: aggregate.target().to_string(),
            start_time: aggregate.start_time(),
            end_time: aggregate.end_time(),
            duration: format_duration(aggregate.duration()),
            summary: aggregate.summarize(),
            modules: aggregate
                .modules()
                .map(|(name, result)| (name.to_string(), result.clone()))
                .collect(),
            notice: aggregate.is_empty().then(|| NO_MODULES_NOTICE.to_string()),
        }
    }

    /// Rebuilds the sealed aggregate. Entries are keyed by the map key, not the embedded name.
    pub fn into_aggregate(self) -> ResultAggregate {
        let mut builder = AggregateBuilder::started_at(&self.target, self.start_time);
        for (name, mut result) in self.modules {
            result.module = name;
            builder.record(result);
        }
        builder.seal_at(self.end_time)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ReportError> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, ReportError> {
        Ok(serde_json::from_str(contents)?)
    }
}

pub struct JsonSerializer {
    pretty_print: bool,
}

impl Default for JsonSerializer {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonSerializer {
    pub fn new() -> Self {
        Self { pretty_print: true }
    }

    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    pub fn serialize(&self, report: &StructuredReport) -> Result<String, ReportError> {
        let text = if self.pretty_print {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        Ok(text)
    }

    pub fn render(&self, aggregate: &ResultAggregate, generated_at: DateTime<Utc>) -> Result<String, ReportError> {
        self.serialize(&StructuredReport::from_aggregate(aggregate, generated_at))
    }
}
