//! Lending Workflow Core - Rust Engine
//!
//! Staged timeline simulator for a mock privacy-preserving lending
//! workflow: one submission is choreographed through encryption, remote
//! risk evaluation, proof generation, and on-chain verification on a
//! fixed schedule. No real cryptography, enclave, or ledger is involved;
//! every backend is a pluggable stub with a hardcoded outcome.
//!
//! # Architecture
//!
//! - **core**: Run-relative time management
//! - **models**: Domain types (Stage, RunLog, LoanRequest, Receipt, State)
//! - **schedule**: The fixed (offset, actions) step table
//! - **services**: Pluggable risk/proof/verifier strategies and their
//!   fixed-outcome defaults
//! - **workflow**: The engine (single mutator) and its snapshot view
//!
//! # Critical Invariants
//!
//! 1. All money values are i64 (minor units)
//! 2. The stage is monotonically non-decreasing within a run
//! 3. The log is append-only within a run, newest entry first
//! 4. A receipt exists iff the stage is `Verified`
//! 5. At most one run is in flight; overlapping submissions are rejected

// Module declarations
pub mod core;
pub mod models;
pub mod schedule;
pub mod services;
pub mod workflow;

// Re-exports for convenience
pub use crate::core::time::RunTimer;
pub use models::{
    log::{LogEntry, RunLog},
    receipt::{ReceiptStatus, VerificationReceipt},
    request::LoanRequest,
    stage::Stage,
    state::WorkflowState,
};
pub use schedule::{Schedule, ScheduleError, ScheduledStep, StepAction};
pub use services::{
    ChainVerifier, ComplianceProof, ProofGenerator, RiskAssessment, RiskDecision, RiskEvaluator,
    RiskPolicyConfig,
};
pub use workflow::{
    AdvanceResult, RunId, WorkflowConfig, WorkflowEngine, WorkflowError, WorkflowSnapshot,
};
