// Wed Oct 14 2026 - Alex

use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::config::ScanConfig;
use crate::engine::{CancelToken, Deadline};
use crate::events::{MemorySink, NullSink};
use crate::modules::{Module, ModuleContext, ModuleError, Payload};

pub fn context(target: &str) -> ModuleContext {
    context_with_deadline(target, Deadline::after(Duration::from_secs(30)))
}

pub fn context_with_deadline(target: &str, deadline: Deadline) -> ModuleContext {
    ModuleContext::new(
        "test",
        target,
        Arc::new(ScanConfig::new(target)),
        deadline,
        CancelToken::new(),
        Arc::new(NullSink),
    )
}

pub fn context_with_sink(target: &str, sink: Arc<MemorySink>) -> ModuleContext {
    ModuleContext::new(
        "test",
        target,
        Arc::new(ScanConfig::new(target)),
        Deadline::after(Duration::from_secs(30)),
        CancelToken::new(),
        sink,
    )
}

pub fn items_payload(key: &str, items: &[&str]) -> Payload {
    let mut document = serde_json::Map::new();
    document.insert(key.to_string(), json!(items));
    Payload::new(serde_json::Value::Object(document)).with_count("count", items.len() as u64)
}

/// Returns a fixed payload, optionally after a delay that honours cancellation.
pub struct StaticModule {
    name: String,
    payload: Payload,
    delay: Duration,
    runs: Arc<AtomicUsize>,
}

impl StaticModule {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            payload: Payload::new(json!({ "module": name })),
            delay: Duration::ZERO,
            runs: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = payload;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn run_counter(&self) -> Arc<AtomicUsize> {
        self.runs.clone()
    }
}

impl Module for StaticModule {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "returns a fixed payload"
    }

    fn run(&self, ctx: &ModuleContext) -> Result<Payload, ModuleError> {
        self.runs.fetch_add(1, Ordering::SeqCst);
        sleep_cooperatively(ctx, self.delay)?;
        Ok(self.payload.clone())
    }
}

pub struct FailingModule {
    name: String,
    message: String,
}

impl FailingModule {
    pub fn new(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            message: message.to_string(),
        }
    }
}

impl Module for FailingModule {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "always fails"
    }

    fn run(&self, _ctx: &ModuleContext) -> Result<Payload, ModuleError> {
        Err(ModuleError::Other(self.message.clone()))
    }
}

pub struct PanickingModule {
    name: String,
}

impl PanickingModule {
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string() }
    }
}

impl Module for PanickingModule {
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, _ctx: &ModuleContext) -> Result<Payload, ModuleError> {
        panic!("scanner state corrupted");
    }
}

/// Sleeps for its whole delay and ignores cancellation.
pub struct WedgedModule {
    name: String,
    delay: Duration,
}

impl WedgedModule {
    pub fn new(name: &str, delay: Duration) -> Self {
        Self {
            name: name.to_string(),
            delay,
        }
    }
}

impl Module for WedgedModule {
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, _ctx: &ModuleContext) -> Result<Payload, ModuleError> {
        thread::sleep(self.delay);
        Ok(Payload::empty())
    }
}

pub struct DisabledModule {
    name: String,
    runs: Arc<AtomicUsize>,
}

impl DisabledModule {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            runs: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn run_counter(&self) -> Arc<AtomicUsize> {
        self.runs.clone()
    }
}

impl Module for DisabledModule {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_enabled(&self, _config: &ScanConfig) -> bool {
        false
    }

    fn run(&self, _ctx: &ModuleContext) -> Result<Payload, ModuleError> {
        self.runs.fetch_add(1, Ordering::SeqCst);
        Ok(Payload::empty())
    }
}

fn sleep_cooperatively(ctx: &ModuleContext, total: Duration) -> Result<(), ModuleError> {
    let step = Duration::from_millis(5);
    let mut slept = Duration::ZERO;

    while slept < total {
        ctx.check()?;
        let chunk = step.min(total - slept);
        thread::sleep(chunk);
        slept += chunk;
    }

    Ok(())
}
