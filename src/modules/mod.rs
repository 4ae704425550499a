// Mon Oct 12 2026 - Alex

pub mod builtin;
pub mod context;
pub mod dns;
pub mod error;
pub mod external;
pub mod registry;
pub mod result;

#[cfg(test)]
pub mod testing;

pub use context::ModuleContext;
pub use dns::DnsResolverModule;
pub use error::ModuleError;
pub use external::{ExternalToolModule, ToolSpec};
pub use registry::ModuleRegistry;
pub use result::{FailureKind, ModuleFailure, ModulePayload, ModuleResult, Outcome, Payload};

use crate::config::ScanConfig;

/// A unit of reconnaissance work run against a single target.
///
/// `run` reports expected failures (missing tool, unreachable host, bad target)
/// through `Err`. A panic is still contained by the orchestrator but is treated
/// as a bug in the module.
pub trait Module: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str {
        ""
    }

    fn is_enabled(&self, config: &ScanConfig) -> bool {
        config.is_module_selected(self.name())
    }

    /// External executable the module shells out to, if any.
    fn required_tool(&self) -> Option<&str> {
        None
    }

    fn run(&self, ctx: &ModuleContext) -> Result<Payload, ModuleError>;
}
