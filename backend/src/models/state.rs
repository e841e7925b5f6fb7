//! Workflow state
//!
//! The complete observable state of the lending workflow: current stage,
//! the run log, and the final receipt. One `WorkflowState` exists per
//! engine; it is mutated exclusively through the engine's submission and
//! scheduled steps, never directly by a consuming layer.
//!
//! # Critical Invariants
//!
//! 1. **Stage Monotonicity**: within a run the stage never decreases
//! 2. **Log Discipline**: the log is append-only within a run and
//!    cleared only when a new run begins
//! 3. **Receipt Pairing**: a receipt is present iff the stage is
//!    `Verified`

use crate::models::log::RunLog;
use crate::models::receipt::VerificationReceipt;
use crate::models::stage::Stage;
use serde::{Deserialize, Serialize};

/// Observable state of the workflow.
///
/// # Example
///
/// ```rust
/// use lending_workflow_core_rs::{Stage, WorkflowState};
///
/// let state = WorkflowState::new();
/// assert_eq!(state.stage(), Stage::Idle);
/// assert!(state.log().is_empty());
/// assert!(state.receipt().is_none());
/// assert!(state.is_consistent());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkflowState {
    /// Current pipeline stage
    stage: Stage,

    /// Timestamped log of the current (or last completed) run
    log: RunLog,

    /// Terminal receipt; present iff `stage == Verified`
    receipt: Option<VerificationReceipt>,
}

impl WorkflowState {
    /// Create the initial "no activity yet" state: Idle, empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Current pipeline stage
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// The run log, most-recent-first
    pub fn log(&self) -> &RunLog {
        &self.log
    }

    /// The terminal receipt, if the run has completed
    pub fn receipt(&self) -> Option<&VerificationReceipt> {
        self.receipt.as_ref()
    }

    /// Reinitialize for a fresh run: clear the log and receipt, stage
    /// back to `Idle`
    ///
    /// This is the only place the log is cleared.
    pub(crate) fn begin_run(&mut self) {
        self.log.clear();
        self.receipt = None;
        self.stage = Stage::Idle;
    }

    /// Advance to the given stage
    ///
    /// # Panics
    ///
    /// Panics if the transition would decrease the stage; within a run
    /// the stage is monotonically non-decreasing. Equal-stage calls are
    /// permitted and do nothing.
    pub(crate) fn enter_stage(&mut self, stage: Stage) {
        assert!(
            stage >= self.stage,
            "stage cannot regress within a run ({} -> {})",
            self.stage,
            stage
        );
        self.stage = stage;
    }

    /// Append a timestamped line to the run log
    pub(crate) fn append_log(&mut self, message: impl Into<String>) {
        self.log.push(message);
    }

    /// Record the terminal receipt
    ///
    /// # Panics
    ///
    /// Panics if the stage is not `Verified`; the receipt exists iff
    /// the run reached the terminal stage.
    pub(crate) fn record_receipt(&mut self, receipt: VerificationReceipt) {
        assert!(
            self.stage == Stage::Verified,
            "receipt recorded at stage {}, expected {}",
            self.stage,
            Stage::Verified
        );
        self.receipt = Some(receipt);
    }

    /// Hard reset: back to `Idle` with the receipt cleared.
    ///
    /// The log is retained; it is cleared only at the start of the next
    /// run. This is the one sanctioned back-edge in the state machine.
    pub(crate) fn reset_run(&mut self) {
        self.stage = Stage::Idle;
        self.receipt = None;
    }

    /// Check the receipt-pairing invariant: receipt present iff Verified
    pub fn is_consistent(&self) -> bool {
        self.receipt.is_some() == (self.stage == Stage::Verified)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_well_defined() {
        let state = WorkflowState::new();
        assert_eq!(state.stage(), Stage::Idle);
        assert!(state.log().is_empty());
        assert!(state.receipt().is_none());
        assert!(state.is_consistent());
    }

    #[test]
    fn test_stage_advances() {
        let mut state = WorkflowState::new();
        state.enter_stage(Stage::Encrypting);
        state.enter_stage(Stage::RemoteEval);
        assert_eq!(state.stage(), Stage::RemoteEval);
    }

    #[test]
    fn test_equal_stage_transition_is_allowed() {
        let mut state = WorkflowState::new();
        state.enter_stage(Stage::Encrypting);
        state.enter_stage(Stage::Encrypting);
        assert_eq!(state.stage(), Stage::Encrypting);
    }

    #[test]
    #[should_panic(expected = "stage cannot regress")]
    fn test_stage_regression_panics() {
        let mut state = WorkflowState::new();
        state.enter_stage(Stage::RemoteEval);
        state.enter_stage(Stage::Encrypting);
    }

    #[test]
    #[should_panic(expected = "receipt recorded at stage")]
    fn test_receipt_before_verified_panics() {
        let mut state = WorkflowState::new();
        state.enter_stage(Stage::ProofGeneration);
        state.record_receipt(VerificationReceipt::confirmed("tx"));
    }

    #[test]
    fn test_receipt_at_verified_is_consistent() {
        let mut state = WorkflowState::new();
        state.enter_stage(Stage::Verified);
        state.record_receipt(VerificationReceipt::confirmed("tx"));
        assert!(state.is_consistent());
    }

    #[test]
    fn test_begin_run_clears_log_and_receipt() {
        let mut state = WorkflowState::new();
        state.append_log("INIT");
        state.enter_stage(Stage::Verified);
        state.record_receipt(VerificationReceipt::confirmed("tx"));

        state.begin_run();
        assert_eq!(state.stage(), Stage::Idle);
        assert!(state.log().is_empty());
        assert!(state.receipt().is_none());
        assert!(state.is_consistent());
    }

    #[test]
    fn test_reset_run_retains_log() {
        let mut state = WorkflowState::new();
        state.enter_stage(Stage::RemoteEval);
        state.append_log("NET: payload sent");

        state.reset_run();
        assert_eq!(state.stage(), Stage::Idle);
        assert!(state.receipt().is_none());
        assert_eq!(state.log().len(), 1);
        assert!(state.is_consistent());
    }
}
