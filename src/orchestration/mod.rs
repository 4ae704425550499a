// Wed Oct 14 2026 - Alex

pub mod aggregator;
pub mod collector;
pub mod coordinator;
pub mod summary;

pub use aggregator::{AggregateBuilder, ResultAggregate};
pub use collector::{ResultCollector, ResultSlot};
pub use coordinator::{validate_target, Orchestrator, RunError};
pub use summary::{extract_count, summarize, SummaryMetric};
