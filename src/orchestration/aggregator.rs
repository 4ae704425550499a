// Wed Oct 14 2026 - Alex

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::time::Duration;

use crate::modules::ModuleResult;
use crate::orchestration::summary::{self, SummaryMetric};

/// Mutable side of an aggregate. Only the orchestrator's fan-in writes to it.
#[derive(Debug, Clone)]
pub struct AggregateBuilder {
    target: String,
    start_time: DateTime<Utc>,
    modules: BTreeMap<String, ModuleResult>,
}

impl AggregateBuilder {
    pub fn new(target: &str) -> Self {
        Self::started_at(target, Utc::now())
    }

    pub fn started_at(target: &str, start_time: DateTime<Utc>) -> Self {
        Self {
            target: target.to_string(),
            start_time,
            modules: BTreeMap::new(),
        }
    }

    /// Inserts keyed by module name. A later result for the same name wins.
    pub fn record(&mut self, result: ModuleResult) -> Option<ModuleResult> {
        self.modules.insert(result.module.clone(), result)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn seal(self) -> ResultAggregate {
        self.seal_at(Utc::now())
    }

    pub fn seal_at(self, end_time: DateTime<Utc>) -> ResultAggregate {
        ResultAggregate {
            target: self.target,
            start_time: self.start_time,
            end_time: end_time.max(self.start_time),
            modules: self.modules,
        }
    }
}

/// Sealed outcome of one run. Read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultAggregate {
    target: String,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    modules: BTreeMap<String, ModuleResult>,
}

impl ResultAggregate {
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub fn end_time(&self) -> DateTime<Utc> {
        self.end_time
    }

    pub fn duration(&self) -> Duration {
        (self.end_time - self.start_time).to_std().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn get(&self, module: &str) -> Option<&ModuleResult> {
        self.modules.get(module)
    }

    pub fn contains(&self, module: &str) -> bool {
        self.modules.contains_key(module)
    }

    /// Entries in name order. The iterator is `Clone`, so it can be restarted.
    pub fn modules(&self) -> impl Iterator<Item = (&str, &ModuleResult)> + Clone + '_ {
        self.modules.iter().map(|(name, result)| (name.as_str(), result))
    }

    pub fn module_names(&self) -> impl Iterator<Item = &str> + Clone + '_ {
        self.modules.keys().map(String::as_str)
    }

    pub fn for_each_module<F>(&self, mut visitor: F)
    where
        F: FnMut(&str, &ModuleResult),
    {
        for (name, result) in &self.modules {
            visitor(name, result);
        }
    }

    pub fn extract_count(&self, module: &str, field: &str) -> Option<u64> {
        summary::extract_count(self, module, field)
    }

    pub fn succeeded_count(&self) -> usize {
        self.modules.values().filter(|r| r.is_success()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.modules.values().filter(|r| r.is_failure()).count()
    }

    pub fn summarize(&self) -> Vec<SummaryMetric> {
        summary::summarize(self)
    }
}
