// Wed Oct 14 2026 - Alex

use std::any::Any;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

use crate::events::ScanEvent;
use crate::modules::{Module, ModuleContext, ModuleFailure, Outcome};
use crate::orchestration::collector::ResultSlot;

/// Starts `module` on its own named thread. The slot travels with the thread and is
/// dropped unfilled if spawning fails.
pub fn spawn_module_task(
    module: Arc<dyn Module>,
    ctx: ModuleContext,
    slot: ResultSlot,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name(format!("module-{}", module.name()))
        .spawn(move || run_module(module.as_ref(), &ctx, slot))
}

/// Runs one module to completion and fills its slot exactly once.
pub fn run_module(module: &dyn Module, ctx: &ModuleContext, slot: ResultSlot) {
    let name = slot.module().to_string();
    ctx.emit(ScanEvent::ModuleStarted { module: name.clone() });

    let started = Instant::now();
    let outcome = match panic::catch_unwind(AssertUnwindSafe(|| module.run(ctx))) {
        Ok(Ok(payload)) => {
            ctx.emit(ScanEvent::ModuleCompleted {
                module: name,
                elapsed: started.elapsed(),
            });
            Outcome::Success { payload }
        }
        Ok(Err(error)) => {
            ctx.emit(ScanEvent::ModuleFailed {
                module: name,
                error: error.to_string(),
            });
            Outcome::Failure { error: ModuleFailure::from(&error) }
        }
        Err(payload) => {
            let message = format!("module panicked: {}", panic_message(payload.as_ref()));
            ctx.emit(ScanEvent::ModuleFailed {
                module: name,
                error: message.clone(),
            });
            Outcome::Failure { error: ModuleFailure::panic(message) }
        }
    };

    slot.complete(outcome);
}

pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::MemorySink;
    use crate::modules::testing::{context_with_sink, FailingModule, PanickingModule, StaticModule};
    use crate::modules::FailureKind;
    use crate::orchestration::collector::ResultCollector;

    #[test]
    fn test_panic_message_variants() {
        let boxed: Box<dyn Any + Send> = Box::new("static str");
        assert_eq!(panic_message(boxed.as_ref()), "static str");

        let boxed: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(boxed.as_ref()), "owned");

        let boxed: Box<dyn Any + Send> = Box::new(42u32);
        assert_eq!(panic_message(boxed.as_ref()), "unknown panic");
    }

    #[test]
    fn test_run_module_success_and_events() {
        let sink = Arc::new(MemorySink::new());
        let ctx = context_with_sink("example.com", sink.clone());
        let (collector, mut slots) = ResultCollector::open(["static"]);

        run_module(&StaticModule::new("static"), &ctx, slots.remove(0));

        let results = collector.drain_ready();
        assert_eq!(results.len(), 1);
        assert!(results[0].is_success());

        let events = sink.events();
        assert_eq!(events[0], ScanEvent::ModuleStarted { module: "static".into() });
        assert!(matches!(events[1], ScanEvent::ModuleCompleted { .. }));
    }

    #[test]
    fn test_run_module_error_becomes_failure() {
        let sink = Arc::new(MemorySink::new());
        let ctx = context_with_sink("example.com", sink.clone());
        let (collector, mut slots) = ResultCollector::open(["broken"]);

        run_module(&FailingModule::new("broken", "tool not found"), &ctx, slots.remove(0));

        let results = collector.drain_ready();
        let error = results[0].error().unwrap();
        assert_eq!(error.message, "tool not found");
        assert_eq!(error.kind, FailureKind::Error);
    }

    #[test]
    fn test_spawned_panic_is_contained() {
        let sink = Arc::new(MemorySink::new());
        let ctx = context_with_sink("example.com", sink.clone());
        let (collector, mut slots) = ResultCollector::open(["boom"]);

        let handle = spawn_module_task(Arc::new(PanickingModule::new("boom")), ctx, slots.remove(0)).unwrap();
        handle.join().unwrap();

        let results = collector.drain_ready();
        let error = results[0].error().unwrap();
        assert_eq!(error.kind, FailureKind::Panic);
        assert!(error.message.contains("scanner state corrupted"));
    }
}
