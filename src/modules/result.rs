// Mon Oct 12 2026 - Alex

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

use crate::modules::error::ModuleError;

/// Implemented by typed module outputs so their headline counters are published explicitly.
pub trait ModulePayload: Serialize {
    fn counts(&self) -> Vec<(&'static str, u64)>;
}

/// What a module hands back on success: an opaque document plus the counters it chose to publish.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    pub document: Value,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub counts: BTreeMap<String, u64>,
}

impl Payload {
    pub fn new(document: Value) -> Self {
        Self {
            document,
            counts: BTreeMap::new(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Value::Object(Map::new()))
    }

    pub fn from_payload<P: ModulePayload>(payload: &P) -> Result<Self, ModuleError> {
        let mut result = Self::new(serde_json::to_value(payload)?);
        for (field, value) in payload.counts() {
            result.counts.insert(field.to_string(), value);
        }
        Ok(result)
    }

    pub fn with_count(mut self, field: &str, value: u64) -> Self {
        self.counts.insert(field.to_string(), value);
        self
    }

    /// Publishes a counter from any integer type. Negative or oversized values are rejected.
    pub fn try_with_count<V>(self, field: &str, value: V) -> Result<Self, ModuleError>
    where
        V: TryInto<u64> + fmt::Display + Copy,
    {
        let count = value.try_into().map_err(|_| ModuleError::InvalidCount {
            field: field.to_string(),
            value: value.to_string(),
        })?;
        Ok(self.with_count(field, count))
    }

    pub fn count(&self, field: &str) -> Option<u64> {
        self.counts.get(field).copied()
    }

    pub fn document(&self) -> &Value {
        &self.document
    }

    pub fn counts(&self) -> &BTreeMap<String, u64> {
        &self.counts
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Error,
    Timeout,
    Panic,
    NotStarted,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Error => "error",
            FailureKind::Timeout => "timeout",
            FailureKind::Panic => "panic",
            FailureKind::NotStarted => "not started",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleFailure {
    pub message: String,
    pub kind: FailureKind,
}

impl ModuleFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Error, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Timeout, message)
    }

    pub fn panic(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Panic, message)
    }

    pub fn not_started(message: impl Into<String>) -> Self {
        Self::new(FailureKind::NotStarted, message)
    }
}

impl fmt::Display for ModuleFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Success { payload: Payload },
    Failure { error: ModuleFailure },
}

impl From<Result<Payload, ModuleError>> for Outcome {
    fn from(result: Result<Payload, ModuleError>) -> Self {
        match result {
            Ok(payload) => Outcome::Success { payload },
            Err(e) => Outcome::Failure { error: ModuleFailure::from(&e) },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleResult {
    pub module: String,
    pub completed_at: DateTime<Utc>,
    pub outcome: Outcome,
}

impl ModuleResult {
    pub fn new(module: impl Into<String>, outcome: Outcome) -> Self {
        Self {
            module: module.into(),
            completed_at: Utc::now(),
            outcome,
        }
    }

    pub fn success(module: impl Into<String>, payload: Payload) -> Self {
        Self::new(module, Outcome::Success { payload })
    }

    pub fn failure(module: impl Into<String>, error: ModuleFailure) -> Self {
        Self::new(module, Outcome::Failure { error })
    }

    pub fn with_completed_at(mut self, completed_at: DateTime<Utc>) -> Self {
        self.completed_at = completed_at;
        self
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success { .. })
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    pub fn payload(&self) -> Option<&Payload> {
        match &self.outcome {
            Outcome::Success { payload } => Some(payload),
            Outcome::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&ModuleFailure> {
        match &self.outcome {
            Outcome::Success { .. } => None,
            Outcome::Failure { error } => Some(error),
        }
    }

    pub fn status_label(&self) -> &'static str {
        match self.outcome {
            Outcome::Success { .. } => "Completed",
            Outcome::Failure { .. } => "Failed",
        }
    }
}
