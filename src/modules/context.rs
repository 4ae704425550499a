// Mon Oct 12 2026 - Alex

use log::Level;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{ScanConfig, ScanProfile};
use crate::engine::{CancelToken, Deadline};
use crate::events::{EventSink, ScanEvent, SharedSink};
use crate::modules::error::ModuleError;

/// Everything a module may look at while it runs. Cheap to clone.
#[derive(Clone)]
pub struct ModuleContext {
    module: String,
    target: String,
    config: Arc<ScanConfig>,
    deadline: Deadline,
    cancel: CancelToken,
    sink: SharedSink,
}

impl ModuleContext {
    pub fn new(
        module: &str,
        target: &str,
        config: Arc<ScanConfig>,
        deadline: Deadline,
        cancel: CancelToken,
        sink: SharedSink,
    ) -> Self {
        Self {
            module: module.to_string(),
            target: target.to_string(),
            config,
            deadline,
            cancel,
            sink,
        }
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub fn profile(&self) -> ScanProfile {
        self.config.profile
    }

    pub fn deadline(&self) -> Deadline {
        self.deadline
    }

    pub fn remaining(&self) -> Duration {
        self.deadline.remaining()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn should_stop(&self) -> bool {
        self.is_cancelled() || self.deadline.is_expired()
    }

    /// Returns the error a module should bail out with once it has to stop.
    pub fn check(&self) -> Result<(), ModuleError> {
        if self.is_cancelled() {
            Err(ModuleError::Cancelled)
        } else if self.deadline.is_expired() {
            Err(ModuleError::Timeout(self.deadline.budget()))
        } else {
            Ok(())
        }
    }

    pub fn sink(&self) -> &dyn EventSink {
        self.sink.as_ref()
    }

    pub fn emit(&self, event: ScanEvent) {
        self.sink.emit(event);
    }

    pub fn log(&self, level: Level, text: impl Into<String>) {
        self.sink.emit(ScanEvent::Message {
            module: self.module.clone(),
            level,
            text: text.into(),
        });
    }

    pub fn info(&self, text: impl Into<String>) {
        self.log(Level::Info, text);
    }

    pub fn warn(&self, text: impl Into<String>) {
        self.log(Level::Warn, text);
    }

    pub fn debug(&self, text: impl Into<String>) {
        self.log(Level::Debug, text);
    }
}
