// Mon Oct 12 2026 - Alex

use std::time::Duration;
use thiserror::Error;

use crate::modules::result::{FailureKind, ModuleFailure};

#[derive(Error, Debug)]
pub enum ModuleError {
    #[error("tool not found: {0}")]
    ToolNotFound(String),

    #[error("{tool} exited with status {code}: {detail}")]
    ToolFailed { tool: String, code: i32, detail: String },

    #[error("deadline of {}s exceeded", .0.as_secs())]
    Timeout(Duration),

    #[error("cancelled")]
    Cancelled,

    #[error("invalid target: {0}")]
    InvalidTarget(String),

    #[error("resolution failed: {0}")]
    Resolution(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("counter {field} has invalid value {value}")]
    InvalidCount { field: String, value: String },

    #[error("{0}")]
    Other(String),
}

impl ModuleError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ModuleError::Timeout(_) | ModuleError::Cancelled => FailureKind::Timeout,
            _ => FailureKind::Error,
        }
    }
}

impl From<&ModuleError> for ModuleFailure {
    fn from(error: &ModuleError) -> Self {
        ModuleFailure::new(error.kind(), error.to_string())
    }
}
