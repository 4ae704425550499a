// Fri Oct 16 2026 - Alex

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

use crate::events::{EventSink, ScanEvent, SharedSink};

const BAR_TEMPLATE: &str = "{spinner:.cyan} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} modules {msg}";

/// Drives a progress bar from scan events and forwards every event to `inner`.
pub struct ProgressSink {
    bar: ProgressBar,
    inner: SharedSink,
}

impl ProgressSink {
    pub fn new(inner: SharedSink) -> Self {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::default_bar()
                .template(BAR_TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓▒░ "),
        );
        Self { bar, inner }
    }

    /// Same bookkeeping, nothing drawn. Used when stderr is not a terminal.
    pub fn hidden(inner: SharedSink) -> Self {
        let sink = Self::new(inner);
        sink.bar.set_draw_target(ProgressDrawTarget::hidden());
        sink
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    pub fn length(&self) -> Option<u64> {
        self.bar.length()
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl EventSink for ProgressSink {
    fn emit(&self, event: ScanEvent) {
        match &event {
            ScanEvent::RunStarted { modules, .. } => {
                self.bar.set_length(modules.len() as u64);
                self.bar.set_position(0);
                self.bar.enable_steady_tick(Duration::from_millis(100));
            }
            ScanEvent::ModuleStarted { module } => {
                self.bar.set_message(module.clone());
            }
            ScanEvent::RunCompleted { .. } => {
                self.bar.finish_and_clear();
            }
            e if e.is_module_terminal() => {
                self.bar.inc(1);
            }
            _ => {}
        }

        // keep log lines from tearing through the bar
        self.bar.suspend(|| self.inner.emit(event));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::MemorySink;
    use std::sync::Arc;

    #[test]
    fn test_counts_terminal_events_and_forwards_everything() {
        let memory = Arc::new(MemorySink::new());
        let sink = ProgressSink::hidden(memory.clone());

        sink.emit(ScanEvent::RunStarted {
            target: "example.com".into(),
            modules: vec!["a".into(), "b".into(), "c".into()],
        });
        assert_eq!(sink.length(), Some(3));

        sink.emit(ScanEvent::ModuleStarted { module: "a".into() });
        sink.emit(ScanEvent::ModuleCompleted { module: "a".into(), elapsed: Duration::from_millis(5) });
        sink.emit(ScanEvent::ModuleFailed { module: "b".into(), error: "boom".into() });
        sink.emit(ScanEvent::Message {
            module: "c".into(),
            level: log::Level::Info,
            text: "still going".into(),
        });
        assert_eq!(sink.position(), 2);

        sink.emit(ScanEvent::ModuleTimedOut { module: "c".into() });
        assert_eq!(sink.position(), 3);

        assert_eq!(memory.events().len(), 6);
        sink.finish();
    }
}
