// Wed Oct 14 2026 - Alex

use indexmap::IndexMap;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};

use crate::engine::{CancelToken, Deadline};
use crate::events::{EventSink, ScanEvent};
use crate::modules::{ModuleFailure, ModuleResult, Outcome};
use crate::utils::format_duration;

type Completion = (usize, ModuleResult);

/// Write-once handle for one module's result. Completing it consumes it.
pub struct ResultSlot {
    index: usize,
    module: String,
    sender: Sender<Completion>,
}

impl ResultSlot {
    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn complete(self, outcome: Outcome) {
        let result = ModuleResult::new(self.module, outcome);
        // the collector may already have given up on this slot
        let _ = self.sender.send((self.index, result));
    }
}

/// Fan-in side of a run: knows which slots are still outstanding.
pub struct ResultCollector {
    receiver: Receiver<Completion>,
    pending: IndexMap<usize, String>,
}

impl ResultCollector {
    pub fn open<I, S>(modules: I) -> (Self, Vec<ResultSlot>)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let (sender, receiver) = mpsc::channel();
        let mut pending = IndexMap::new();
        let mut slots = Vec::new();

        for (index, module) in modules.into_iter().enumerate() {
            let module = module.into();
            pending.insert(index, module.clone());
            slots.push(ResultSlot {
                index,
                module,
                sender: sender.clone(),
            });
        }

        (Self { receiver, pending }, slots)
    }

    pub fn outstanding(&self) -> usize {
        self.pending.len()
    }

    /// Blocks until every slot is accounted for or the deadline passes.
    ///
    /// Always returns one result per opened slot. Slots still outstanding at the deadline
    /// are cancelled and recorded as timeouts; slots dropped without completing are
    /// recorded as never started.
    pub fn wait(mut self, deadline: Deadline, cancel: &CancelToken, sink: &dyn EventSink) -> Vec<ModuleResult> {
        let mut results = Vec::with_capacity(self.pending.len());

        while !self.pending.is_empty() {
            match self.receiver.recv_timeout(deadline.remaining()) {
                Ok((index, result)) => {
                    if self.pending.shift_remove(&index).is_some() {
                        results.push(result);
                    }
                }
                Err(RecvTimeoutError::Timeout) => {
                    cancel.cancel();
                    let message = format!("deadline of {} exceeded", format_duration(deadline.budget()));
                    for (_, module) in self.pending.drain(..) {
                        sink.emit(ScanEvent::ModuleTimedOut { module: module.clone() });
                        results.push(ModuleResult::failure(module, ModuleFailure::timeout(message.clone())));
                    }
                }
                Err(RecvTimeoutError::Disconnected) => {
                    for (_, module) in self.pending.drain(..) {
                        sink.emit(ScanEvent::ModuleFailed {
                            module: module.clone(),
                            error: "task exited without reporting a result".to_string(),
                        });
                        results.push(ModuleResult::failure(
                            module,
                            ModuleFailure::not_started("task exited without reporting a result"),
                        ));
                    }
                }
            }
        }

        results
    }

    /// Takes whatever has already arrived without blocking.
    pub fn drain_ready(&self) -> Vec<ModuleResult> {
        self.receiver.try_iter().map(|(_, result)| result).collect()
    }
}
