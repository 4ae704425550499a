// Mon Oct 12 2026 - Alex

use log::Level;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

use crate::utils::format_duration;

pub const ORCHESTRATOR_TARGET: &str = "recon::orchestrator";
pub const MODULE_TARGET: &str = "recon::module";

#[derive(Debug, Clone, PartialEq)]
pub enum ScanEvent {
    RunStarted { target: String, modules: Vec<String> },
    ModuleStarted { module: String },
    ModuleCompleted { module: String, elapsed: Duration },
    ModuleFailed { module: String, error: String },
    ModuleTimedOut { module: String },
    Message { module: String, level: Level, text: String },
    RunCompleted { target: String, elapsed: Duration, total: usize, failed: usize },
}

impl ScanEvent {
    pub fn module(&self) -> Option<&str> {
        match self {
            ScanEvent::ModuleStarted { module }
            | ScanEvent::ModuleCompleted { module, .. }
            | ScanEvent::ModuleFailed { module, .. }
            | ScanEvent::ModuleTimedOut { module }
            | ScanEvent::Message { module, .. } => Some(module),
            ScanEvent::RunStarted { .. } | ScanEvent::RunCompleted { .. } => None,
        }
    }

    /// True for the events that close out a module, whatever the outcome.
    pub fn is_module_terminal(&self) -> bool {
        matches!(
            self,
            ScanEvent::ModuleCompleted { .. }
                | ScanEvent::ModuleFailed { .. }
                | ScanEvent::ModuleTimedOut { .. }
        )
    }
}

/// Receives progress and diagnostics from the orchestrator and from modules.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: ScanEvent);
}

pub type SharedSink = Arc<dyn EventSink>;

/// Forwards every event to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl EventSink for LogSink {
    fn emit(&self, event: ScanEvent) {
        match event {
            ScanEvent::RunStarted { target, modules } => {
                log::info!(
                    target: ORCHESTRATOR_TARGET,
                    "starting reconnaissance of {} with {} module(s): {}",
                    target,
                    modules.len(),
                    modules.join(", ")
                );
            }
            ScanEvent::ModuleStarted { module } => {
                log::debug!(target: ORCHESTRATOR_TARGET, "module {} started", module);
            }
            ScanEvent::ModuleCompleted { module, elapsed } => {
                log::info!(
                    target: ORCHESTRATOR_TARGET,
                    "module {} completed in {}",
                    module,
                    format_duration(elapsed)
                );
            }
            ScanEvent::ModuleFailed { module, error } => {
                log::error!(target: ORCHESTRATOR_TARGET, "module {} failed: {}", module, error);
            }
            ScanEvent::ModuleTimedOut { module } => {
                log::warn!(target: ORCHESTRATOR_TARGET, "module {} timed out", module);
            }
            ScanEvent::Message { module, level, text } => {
                log::log!(target: MODULE_TARGET, level, "[{}] {}", module, text);
            }
            ScanEvent::RunCompleted { target, elapsed, total, failed } => {
                log::info!(
                    target: ORCHESTRATOR_TARGET,
                    "reconnaissance of {} finished in {}: {} module(s), {} failed",
                    target,
                    format_duration(elapsed),
                    total,
                    failed
                );
            }
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: ScanEvent) {}
}

/// Keeps every event in memory. Useful when the caller wants to inspect a run afterwards.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<ScanEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ScanEvent> {
        self.events.lock().clone()
    }

    pub fn count_where<F>(&self, predicate: F) -> usize
    where
        F: Fn(&ScanEvent) -> bool,
    {
        self.events.lock().iter().filter(|e| predicate(e)).count()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl EventSink for MemorySink {
    fn emit(&self, event: ScanEvent) {
        self.events.lock().push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_records_in_order() {
        let sink = MemorySink::new();
        sink.emit(ScanEvent::ModuleStarted { module: "ports".into() });
        sink.emit(ScanEvent::ModuleTimedOut { module: "ports".into() });

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], ScanEvent::ModuleStarted { module: "ports".into() });
        assert_eq!(sink.count_where(ScanEvent::is_module_terminal), 1);

        sink.clear();
        assert!(sink.events().is_empty());
    }

    #[test]
    fn test_event_module_accessor() {
        let event = ScanEvent::ModuleFailed { module: "osint".into(), error: "boom".into() };
        assert_eq!(event.module(), Some("osint"));

        let event = ScanEvent::RunStarted { target: "x".into(), modules: vec![] };
        assert_eq!(event.module(), None);
        assert!(!event.is_module_terminal());
    }

    #[test]
    fn test_log_sink_accepts_every_event() {
        let sink = LogSink;
        sink.emit(ScanEvent::RunStarted { target: "example.com".into(), modules: vec!["web".into()] });
        sink.emit(ScanEvent::RunCompleted {
            target: "example.com".into(),
            elapsed: Duration::from_millis(5),
            total: 1,
            failed: 0,
        });
    }
}
