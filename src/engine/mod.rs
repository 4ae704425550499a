// Wed Oct 14 2026 - Alex

pub mod task;
pub mod worker;

pub use task::{CancelToken, Deadline};
pub use worker::{panic_message, run_module, spawn_module_task};
