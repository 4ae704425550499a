// Wed Oct 14 2026 - Alex

use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::config::ScanConfig;
use crate::engine::{spawn_module_task, CancelToken, Deadline};
use crate::events::{LogSink, ScanEvent, SharedSink, ORCHESTRATOR_TARGET};
use crate::modules::{Module, ModuleContext, ModuleRegistry};
use crate::orchestration::aggregator::{AggregateBuilder, ResultAggregate};
use crate::orchestration::collector::ResultCollector;
use crate::utils::{parse_ip_literal, ScopedTimer};

const MAX_TARGET_LEN: usize = 253;

static HOSTNAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[A-Za-z0-9_](?:[A-Za-z0-9_-]{0,61}[A-Za-z0-9])?\.)*[A-Za-z0-9_](?:[A-Za-z0-9_-]{0,61}[A-Za-z0-9])?\.?$")
        .expect("hostname pattern is valid")
});

#[derive(Error, Debug)]
pub enum RunError {
    #[error("invalid target '{target}': {reason}")]
    InvalidTarget { target: String, reason: String },

    #[error("cannot create output directory {}: {source}", .path.display())]
    OutputDirectory { path: PathBuf, source: io::Error },
}

/// Accepts a hostname or an IP literal (IPv6 optionally bracketed). Returns it trimmed.
pub fn validate_target(target: &str) -> Result<String, RunError> {
    let trimmed = target.trim();
    let invalid = |reason: &str| RunError::InvalidTarget {
        target: target.to_string(),
        reason: reason.to_string(),
    };

    if trimmed.is_empty() {
        return Err(invalid("target is empty"));
    }
    if trimmed.len() > MAX_TARGET_LEN {
        return Err(invalid("target is longer than 253 characters"));
    }

    if parse_ip_literal(trimmed).is_some() || HOSTNAME.is_match(trimmed) {
        Ok(trimmed.to_string())
    } else {
        Err(invalid("not a hostname or IP address"))
    }
}

/// Runs every enabled module concurrently against one target and gathers exactly one
/// result per module.
pub struct Orchestrator {
    config: Arc<ScanConfig>,
    registry: ModuleRegistry,
    sink: SharedSink,
    timeout: Duration,
}

impl Orchestrator {
    pub fn new(config: ScanConfig, registry: ModuleRegistry) -> Self {
        let timeout = config.timeout();
        Self {
            config: Arc::new(config),
            registry,
            sink: Arc::new(LogSink),
            timeout,
        }
    }

    pub fn with_sink(mut self, sink: SharedSink) -> Self {
        self.sink = sink;
        self
    }

    /// Overrides the run deadline derived from the config.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }

    pub fn enabled_modules(&self) -> Vec<Arc<dyn Module>> {
        self.registry.enabled(&self.config)
    }

    pub fn run(&self, target: &str) -> Result<ResultAggregate, RunError> {
        let target = validate_target(target)?;

        let output_dir = &self.config.output_dir;
        fs::create_dir_all(output_dir).map_err(|source| RunError::OutputDirectory {
            path: output_dir.clone(),
            source,
        })?;

        let timer = ScopedTimer::new("reconnaissance run");
        let modules = self.enabled_modules();
        let mut builder = AggregateBuilder::new(&target);
        let deadline = Deadline::after(self.timeout);
        let cancel = CancelToken::new();

        self.sink.emit(ScanEvent::RunStarted {
            target: target.clone(),
            modules: modules.iter().map(|m| m.name().to_string()).collect(),
        });

        let (collector, slots) = ResultCollector::open(modules.iter().map(|m| m.name().to_string()));

        for (module, slot) in modules.iter().zip(slots) {
            let ctx = ModuleContext::new(
                module.name(),
                &target,
                self.config.clone(),
                deadline,
                cancel.clone(),
                self.sink.clone(),
            );

            if let Err(e) = spawn_module_task(module.clone(), ctx, slot) {
                log::error!(target: ORCHESTRATOR_TARGET, "could not start module {}: {}", module.name(), e);
            }
        }

        for result in collector.wait(deadline, &cancel, self.sink.as_ref()) {
            builder.record(result);
        }

        let aggregate = builder.seal();
        self.sink.emit(ScanEvent::RunCompleted {
            target,
            elapsed: timer.elapsed(),
            total: aggregate.len(),
            failed: aggregate.failed_count(),
        });

        Ok(aggregate)
    }
}
