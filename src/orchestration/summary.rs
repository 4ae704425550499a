// Wed Oct 14 2026 - Alex

use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::orchestration::aggregator::ResultAggregate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryMetric {
    pub metric: String,
    pub value: String,
}

impl SummaryMetric {
    pub fn new(metric: &str, value: impl Display) -> Self {
        Self {
            metric: metric.to_string(),
            value: value.to_string(),
        }
    }

    pub fn as_number(&self) -> Option<u64> {
        self.value.parse().ok()
    }
}

pub struct HeadlineCounter {
    pub label: &'static str,
    pub module: &'static str,
    pub field: &'static str,
}

pub const HEADLINE_COUNTERS: &[HeadlineCounter] = &[
    HeadlineCounter { label: "Subdomains Found", module: "subdomains", field: "count" },
    HeadlineCounter { label: "Open Ports", module: "ports", field: "count" },
    HeadlineCounter { label: "Web Services", module: "web", field: "count" },
    HeadlineCounter { label: "Vulnerabilities", module: "vulnerabilities", field: "count" },
];

pub const MODULES_EXECUTED: &str = "Modules Executed";
pub const MODULES_FAILED: &str = "Modules Failed";

/// Counter a module explicitly published. `None` when the module failed, never ran,
/// or did not publish `field`.
pub fn extract_count(aggregate: &ResultAggregate, module: &str, field: &str) -> Option<u64> {
    aggregate
        .get(module)
        .and_then(|result| result.payload())
        .and_then(|payload| payload.count(field))
}

/// Fixed, ordered headline metrics. Missing counters show as 0.
pub fn summarize(aggregate: &ResultAggregate) -> Vec<SummaryMetric> {
    let mut metrics: Vec<SummaryMetric> = HEADLINE_COUNTERS
        .iter()
        .map(|c| SummaryMetric::new(c.label, extract_count(aggregate, c.module, c.field).unwrap_or(0)))
        .collect();

    metrics.push(SummaryMetric::new(MODULES_EXECUTED, aggregate.len()));
    metrics.push(SummaryMetric::new(MODULES_FAILED, aggregate.failed_count()));
    metrics
}
