//! Snapshot - serializable view of the observable state
//!
//! A presentation layer polls the engine and renders stage, console,
//! and receipt. The snapshot is an owned, atomic copy of exactly that
//! surface: taken between `advance` calls it can never show a stage
//! without its log line, and it serializes to JSON for transport out of
//! process.

use crate::models::log::LogEntry;
use crate::models::receipt::VerificationReceipt;
use crate::models::stage::Stage;
use crate::workflow::engine::WorkflowEngine;
use serde::{Deserialize, Serialize};

/// Owned copy of everything a consumer renders.
///
/// # Example
///
/// ```rust
/// use lending_workflow_core_rs::{LoanRequest, Stage, WorkflowEngine};
/// use std::time::Duration;
///
/// let mut engine = WorkflowEngine::default();
/// engine.submit(LoanRequest::new(50_000, 65_000)).unwrap();
/// engine.advance(Duration::from_millis(2_500));
///
/// let snapshot = engine.snapshot();
/// assert_eq!(snapshot.stage, Stage::RemoteEval);
/// assert_eq!(snapshot.stage_index, 2);
/// assert!(snapshot.to_json().unwrap().contains("remote_eval"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowSnapshot {
    /// Current pipeline stage
    pub stage: Stage,

    /// Numeric pipeline position (0 through 4), for progress bars
    pub stage_index: u8,

    /// Log entries, most-recent-first
    pub logs: Vec<LogEntry>,

    /// Terminal receipt, present iff `stage` is `Verified`
    pub receipt: Option<VerificationReceipt>,

    /// Identifier of the current (or last completed) run
    pub run_id: Option<String>,

    /// Run-relative milliseconds elapsed
    pub elapsed_ms: u64,

    /// Armed steps not yet fired
    pub pending_steps: usize,
}

impl From<&WorkflowEngine> for WorkflowSnapshot {
    fn from(engine: &WorkflowEngine) -> Self {
        WorkflowSnapshot {
            stage: engine.stage(),
            stage_index: engine.stage().index(),
            logs: engine.log().entries().cloned().collect(),
            receipt: engine.receipt().cloned(),
            run_id: engine.run_id().map(|id| id.to_string()),
            elapsed_ms: engine.elapsed_ms(),
            pending_steps: engine.pending_steps(),
        }
    }
}

impl WorkflowSnapshot {
    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
