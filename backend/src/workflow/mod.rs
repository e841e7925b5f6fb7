//! Workflow engine - the staged timeline simulator
//!
//! Owns all workflow state and the armed step table; the single mutator
//! in the system. See `engine.rs` for the run lifecycle and
//! `snapshot.rs` for the serializable hand-off view.

pub mod engine;
pub mod snapshot;

// Re-export main types for convenience
pub use engine::{
    AdvanceResult, RunId, WorkflowConfig, WorkflowEngine, WorkflowError, INIT_LOG_LINE,
    PROOF_LOG_LINE, SUCCESS_LOG_LINE, VERIFIED_LOG_LINE,
};
pub use snapshot::WorkflowSnapshot;
