// Fri Oct 16 2026 - Alex

pub mod config;
pub mod engine;
pub mod events;
pub mod modules;
pub mod orchestration;
pub mod output;
pub mod ui;
pub mod utils;

pub use config::{OutputFormat, ScanConfig, ScanProfile};
pub use events::{EventSink, LogSink, ScanEvent};
pub use modules::{Module, ModuleContext, ModuleError, ModuleRegistry, ModuleResult, Payload};
pub use orchestration::{Orchestrator, ResultAggregate, SummaryMetric};
pub use output::{OutputManager, ReportFormat, StructuredReport};
