//! Structured run results.

use serde::Serialize;

use crate::core::Value;

/// Outcome of a scored run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    /// Ran without fault and produced every expected value.
    Success,
    /// Ran without fault but left expected values unproduced.
    Fail,
    /// An instruction violated its contract and aborted the run.
    ///
    /// OUTBOX faults (empty register, nothing left to output, wrong value)
    /// land here too, not in `Fail`.
    Error,
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunStatus::Success => write!(f, "success"),
            RunStatus::Fail => write!(f, "fail"),
            RunStatus::Error => write!(f, "error"),
        }
    }
}

/// Everything a harness needs to display or score a run.
///
/// Input and output are always complete copies, even for failed runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub status: RunStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Program length in instructions.
    pub instruction_count: usize,
    /// Executed commands plus taken jumps.
    pub step_count: u64,
    pub input: Vec<Value>,
    pub output: Vec<Value>,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.status == RunStatus::Success
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
