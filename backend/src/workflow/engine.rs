//! Workflow Engine
//!
//! Converts a single submission into a deterministic, time-ordered
//! sequence of state mutations and log lines, without performing any
//! real work:
//!
//! ```text
//! submit(request):
//! 1. Reject if a run is in flight (re-entrancy guard)
//! 2. Clear log and receipt, restart the run timer
//! 3. Stage -> Encrypting, emit the INIT line
//! 4. Arm the full step table
//!
//! advance(delta):
//! 1. Advance run-relative time
//! 2. Fire every armed step whose offset has elapsed, in offset order
//! 3. Each fired step applies its actions as one logical mutation
//! ```
//!
//! The engine is single-threaded and cooperative: nothing fires outside
//! `advance`, so accessors always observe committed state and a stage
//! transition is never visible without its log line.
//!
//! # Example
//!
//! ```rust
//! use lending_workflow_core_rs::{LoanRequest, Stage, WorkflowConfig, WorkflowEngine};
//! use std::time::Duration;
//!
//! let mut engine = WorkflowEngine::new(WorkflowConfig::default());
//! engine.submit(LoanRequest::new(50_000, 65_000)).unwrap();
//! assert_eq!(engine.stage(), Stage::Encrypting);
//!
//! let result = engine.advance(Duration::from_millis(10_000));
//! assert!(result.completed);
//! assert_eq!(engine.stage(), Stage::Verified);
//! assert!(engine.receipt().is_some());
//! ```

use crate::core::time::RunTimer;
use crate::models::request::LoanRequest;
use crate::models::stage::Stage;
use crate::models::state::WorkflowState;
use crate::models::{RunLog, VerificationReceipt};
use crate::schedule::{Schedule, ScheduledStep, StepAction};
use crate::services::{
    ChainVerifier, ComplianceProof, DigestProofGenerator, FixedRiskEvaluator,
    LtvThresholdEvaluator, ProofGenerator, RiskAssessment, RiskEvaluator, RiskPolicyConfig,
    TestnetStubVerifier,
};
use crate::workflow::snapshot::WorkflowSnapshot;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

/// First line of every run's log
pub const INIT_LOG_LINE: &str = "INIT: Starting Secure Loan Request...";

/// Logged when the proof generator is invoked
pub const PROOF_LOG_LINE: &str = "ZK: Generating Zero-Knowledge Proof of Compliance...";

/// Logged when the chain verifier accepts the proof
pub const VERIFIED_LOG_LINE: &str = "CHAIN: Proof verified on testnet.";

/// Terminal line of a completed run
pub const SUCCESS_LOG_LINE: &str = "SUCCESS: Loan Approved. Smart Contract notified.";

// ============================================================================
// Configuration Types
// ============================================================================

/// Complete engine configuration
///
/// # Fields
///
/// * `schedule` - The validated step table (defaults to the reference
///   choreography)
/// * `risk_policy` - Risk evaluator selection (defaults to the fixed
///   reference outcome)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkflowConfig {
    /// Step table fired over the course of a run
    pub schedule: Schedule,

    /// Which risk evaluator to install
    pub risk_policy: RiskPolicyConfig,
}

/// Identifier of one run, unique per accepted submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(Uuid);

impl RunId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// The underlying UUID
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Result of a single `advance` call (the engine's tick report)
#[derive(Debug, Clone, PartialEq)]
pub struct AdvanceResult {
    /// Run-relative milliseconds elapsed after this call
    pub elapsed_ms: u64,

    /// Number of scheduled steps fired by this call
    pub steps_fired: usize,

    /// Stage after this call
    pub stage: Stage,

    /// Whether the run has fired its final step
    pub completed: bool,
}

/// Workflow submission errors
#[derive(Debug, Error, PartialEq)]
pub enum WorkflowError {
    /// A run is still in flight; its schedule must finish (or be reset)
    /// before a new submission is accepted
    #[error("a run is already in flight (stage {stage})")]
    RunInFlight { stage: Stage },
}

// ============================================================================
// Engine
// ============================================================================

/// The staged timeline simulator.
///
/// Owns the [`WorkflowState`] and the armed step table, and is the only
/// mutator of either. Consumers submit once, then pump `advance` from
/// their event loop and read state through the accessors (or grab a
/// [`WorkflowSnapshot`] for serialization).
pub struct WorkflowEngine {
    /// Observable workflow state (stage, log, receipt)
    state: WorkflowState,

    /// Run-relative elapsed time
    timer: RunTimer,

    /// The configured step table, re-armed on every submission
    schedule: Schedule,

    /// Steps of the current run not yet fired, in offset order
    armed: VecDeque<ScheduledStep>,

    /// Identifier of the current (or last completed) run
    run_id: Option<RunId>,

    /// Request of the current (or last completed) run
    request: Option<LoanRequest>,

    /// Most recent risk assessment within the current run
    last_assessment: Option<RiskAssessment>,

    /// Most recent compliance proof within the current run
    last_proof: Option<ComplianceProof>,

    /// Pluggable services behind the three simulated stages
    risk_evaluator: Box<dyn RiskEvaluator>,
    proof_generator: Box<dyn ProofGenerator>,
    chain_verifier: Box<dyn ChainVerifier>,
}

impl WorkflowEngine {
    /// Create an engine with the default (fixed-outcome) services,
    /// resolving the risk evaluator from `config.risk_policy`
    pub fn new(config: WorkflowConfig) -> Self {
        let risk_evaluator: Box<dyn RiskEvaluator> = match &config.risk_policy {
            RiskPolicyConfig::Fixed { score } => Box::new(FixedRiskEvaluator::new(*score)),
            RiskPolicyConfig::LtvThreshold { max_ltv_bps } => {
                Box::new(LtvThresholdEvaluator::new(*max_ltv_bps))
            }
        };

        Self::with_services(
            config,
            risk_evaluator,
            Box::new(DigestProofGenerator),
            Box::new(TestnetStubVerifier::default()),
        )
    }

    /// Create an engine with explicitly injected services
    ///
    /// `config.risk_policy` is ignored here; the injected evaluator
    /// wins. This is the substitution seam for real integrations (and
    /// for test doubles).
    pub fn with_services(
        config: WorkflowConfig,
        risk_evaluator: Box<dyn RiskEvaluator>,
        proof_generator: Box<dyn ProofGenerator>,
        chain_verifier: Box<dyn ChainVerifier>,
    ) -> Self {
        Self {
            state: WorkflowState::new(),
            timer: RunTimer::new(),
            schedule: config.schedule,
            armed: VecDeque::new(),
            run_id: None,
            request: None,
            last_assessment: None,
            last_proof: None,
            risk_evaluator,
            proof_generator,
            chain_verifier,
        }
    }

    // ── Run lifecycle ────────────────────────────────────────────────

    /// Submit a loan request, starting a new run.
    ///
    /// Rejects with [`WorkflowError::RunInFlight`] while a previous
    /// run's steps remain armed. On accept: clears the log and receipt,
    /// moves the stage to `Encrypting`, emits the INIT line, and arms
    /// the full step table.
    pub fn submit(&mut self, request: LoanRequest) -> Result<RunId, WorkflowError> {
        if self.is_in_flight() {
            return Err(WorkflowError::RunInFlight {
                stage: self.state.stage(),
            });
        }

        let run_id = RunId::generate();

        self.state.begin_run();
        self.timer.restart();
        self.armed = self.schedule.steps().iter().cloned().collect();
        self.request = Some(request);
        self.last_assessment = None;
        self.last_proof = None;
        self.run_id = Some(run_id);

        self.state.enter_stage(Stage::Encrypting);
        self.state.append_log(INIT_LOG_LINE);

        tracing::info!(
            run_id = %run_id,
            loan_amount = request.loan_amount(),
            collateral = request.collateral(),
            "loan request accepted"
        );

        Ok(run_id)
    }

    /// Advance run-relative time and fire every due step, in offset
    /// order.
    ///
    /// Idle calls (nothing armed) only accumulate time and fire
    /// nothing. A single large delta fires all remaining steps in one
    /// call; the outcome depends only on total elapsed time, not on how
    /// the calls were sliced.
    pub fn advance(&mut self, delta: Duration) -> AdvanceResult {
        self.timer.advance(delta);

        let mut steps_fired = 0;
        while self
            .armed
            .front()
            .is_some_and(|step| step.offset_ms <= self.timer.elapsed_ms())
        {
            if let Some(step) = self.armed.pop_front() {
                self.fire_step(&step);
                steps_fired += 1;
            }
        }

        let completed = self.armed.is_empty() && self.state.stage().is_terminal();
        if steps_fired > 0 && completed {
            tracing::info!(run_id = ?self.run_id, "run completed");
        }

        AdvanceResult {
            elapsed_ms: self.timer.elapsed_ms(),
            steps_fired,
            stage: self.state.stage(),
            completed,
        }
    }

    /// Hard reset: cancel all armed steps atomically and return to
    /// `Idle`.
    ///
    /// Returns the number of cancelled steps. The log is retained until
    /// the next submission; the receipt is cleared with the stage.
    pub fn reset(&mut self) -> usize {
        let cancelled = self.armed.len();

        self.armed.clear();
        self.timer.clear();
        self.state.reset_run();
        self.request = None;
        self.last_assessment = None;
        self.last_proof = None;

        if cancelled > 0 {
            tracing::info!(run_id = ?self.run_id, cancelled, "run reset; armed steps cancelled");
        }
        self.run_id = None;

        cancelled
    }

    // ── Read accessors ───────────────────────────────────────────────

    /// The observable workflow state
    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    /// Current pipeline stage
    pub fn stage(&self) -> Stage {
        self.state.stage()
    }

    /// The run log, most-recent-first
    pub fn log(&self) -> &RunLog {
        self.state.log()
    }

    /// The terminal receipt, present iff the stage is `Verified`
    pub fn receipt(&self) -> Option<&VerificationReceipt> {
        self.state.receipt()
    }

    /// Identifier of the current (or last completed) run
    pub fn run_id(&self) -> Option<RunId> {
        self.run_id
    }

    /// Request of the current (or last completed) run
    pub fn request(&self) -> Option<LoanRequest> {
        self.request
    }

    /// Whether a run's steps remain armed
    ///
    /// Submission is accepted exactly when this is false: at `Idle`,
    /// after the final step has fired, or after a reset.
    pub fn is_in_flight(&self) -> bool {
        !self.armed.is_empty()
    }

    /// Number of armed steps not yet fired
    pub fn pending_steps(&self) -> usize {
        self.armed.len()
    }

    /// Run-relative milliseconds elapsed
    pub fn elapsed_ms(&self) -> u64 {
        self.timer.elapsed_ms()
    }

    /// The configured step table
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// An owned, serializable copy of the observable state
    pub fn snapshot(&self) -> WorkflowSnapshot {
        WorkflowSnapshot::from(self)
    }

    // ── Step execution ───────────────────────────────────────────────

    fn fire_step(&mut self, step: &ScheduledStep) {
        tracing::debug!(
            run_id = ?self.run_id,
            offset_ms = step.offset_ms,
            actions = step.actions.len(),
            "firing scheduled step"
        );

        for action in &step.actions {
            self.apply_action(action);
        }
    }

    fn apply_action(&mut self, action: &StepAction) {
        match action {
            StepAction::Note { message } => {
                self.state.append_log(message.clone());
            }

            StepAction::EnterStage { stage } => {
                tracing::debug!(stage = %stage, "stage transition");
                self.state.enter_stage(*stage);
            }

            StepAction::EvaluateRisk => {
                let request = self.current_request();
                let assessment = self.risk_evaluator.evaluate(&request);
                self.last_assessment = Some(assessment);
                self.state
                    .append_log(format!("TEE: Risk Result: {}.", assessment));
            }

            StepAction::GenerateProof => {
                let assessment = self.ensure_assessment();
                let request = self.current_request();
                let proof = self.proof_generator.prove(&request, &assessment);
                tracing::debug!(digest = %proof.digest, "compliance proof generated");
                self.last_proof = Some(proof);
                self.state.append_log(PROOF_LOG_LINE);
            }

            StepAction::VerifyOnChain => {
                let proof = self.ensure_proof();
                let receipt = self.chain_verifier.verify(&proof);
                tracing::debug!(transaction_id = receipt.transaction_id(), "proof verified");

                // The terminal stage and its receipt commit together
                self.state.enter_stage(Stage::Verified);
                self.state.record_receipt(receipt);
                self.state.append_log(VERIFIED_LOG_LINE);
                self.state.append_log(SUCCESS_LOG_LINE);
            }
        }
    }

    /// Request of the run whose step is firing
    ///
    /// Steps only fire between `submit` and completion, so a request is
    /// always present here.
    fn current_request(&self) -> LoanRequest {
        self.request
            .expect("armed steps imply a submitted request")
    }

    /// The run's assessment, evaluating on demand if the schedule never
    /// fired an explicit `EvaluateRisk`
    fn ensure_assessment(&mut self) -> RiskAssessment {
        match self.last_assessment {
            Some(assessment) => assessment,
            None => {
                let request = self.current_request();
                let assessment = self.risk_evaluator.evaluate(&request);
                self.last_assessment = Some(assessment);
                assessment
            }
        }
    }

    /// The run's proof, generating on demand if the schedule never
    /// fired an explicit `GenerateProof`
    fn ensure_proof(&mut self) -> ComplianceProof {
        if let Some(proof) = &self.last_proof {
            return proof.clone();
        }

        let assessment = self.ensure_assessment();
        let request = self.current_request();
        let proof = self.proof_generator.prove(&request, &assessment);
        self.last_proof = Some(proof.clone());
        proof
    }
}

impl Default for WorkflowEngine {
    fn default() -> Self {
        Self::new(WorkflowConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_engine_reports_no_activity() {
        let engine = WorkflowEngine::default();
        assert_eq!(engine.stage(), Stage::Idle);
        assert!(engine.log().is_empty());
        assert!(engine.receipt().is_none());
        assert!(!engine.is_in_flight());
        assert!(engine.run_id().is_none());
    }

    #[test]
    fn test_submit_enters_encrypting_with_init_line() {
        let mut engine = WorkflowEngine::default();
        engine.submit(LoanRequest::new(50_000, 65_000)).unwrap();

        assert_eq!(engine.stage(), Stage::Encrypting);
        assert_eq!(engine.log().len(), 1);
        assert_eq!(engine.log().newest().unwrap().message(), INIT_LOG_LINE);
        assert!(engine.is_in_flight());
        assert_eq!(engine.pending_steps(), 5);
    }

    #[test]
    fn test_advance_before_first_offset_fires_nothing() {
        let mut engine = WorkflowEngine::default();
        engine.submit(LoanRequest::new(50_000, 65_000)).unwrap();

        let result = engine.advance(Duration::from_millis(999));
        assert_eq!(result.steps_fired, 0);
        assert_eq!(result.stage, Stage::Encrypting);
        assert!(!result.completed);
    }

    #[test]
    fn test_advance_with_nothing_armed_is_inert() {
        let mut engine = WorkflowEngine::default();
        let result = engine.advance(Duration::from_millis(60_000));
        assert_eq!(result.steps_fired, 0);
        assert_eq!(result.stage, Stage::Idle);
        assert!(!result.completed);
        assert!(engine.log().is_empty());
    }

    #[test]
    fn test_single_large_advance_completes_the_run() {
        let mut engine = WorkflowEngine::default();
        engine.submit(LoanRequest::new(50_000, 65_000)).unwrap();

        let result = engine.advance(Duration::from_millis(10_000));
        assert_eq!(result.steps_fired, 5);
        assert!(result.completed);
        assert_eq!(engine.stage(), Stage::Verified);
        assert!(engine.receipt().is_some());
        assert_eq!(engine.log().newest().unwrap().message(), SUCCESS_LOG_LINE);
    }

    #[test]
    fn test_run_ids_are_unique_per_submission() {
        let mut engine = WorkflowEngine::default();
        let first = engine.submit(LoanRequest::new(1, 1)).unwrap();
        engine.advance(Duration::from_millis(10_000));
        let second = engine.submit(LoanRequest::new(1, 1)).unwrap();
        assert_ne!(first, second);
    }
}
