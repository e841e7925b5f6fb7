//! Workflow stage model
//!
//! The workflow is a strictly linear pipeline:
//!
//! ```text
//! Idle -> Encrypting -> RemoteEval -> ProofGeneration -> Verified
//! ```
//!
//! No branching, no back-edges. Within one run the stage is monotonically
//! non-decreasing; it returns to `Idle` only through a new submission or
//! an explicit hard reset.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A discrete point in the workflow's linear progression.
///
/// Derives `Ord` so monotonicity can be asserted directly:
/// `Stage::Encrypting < Stage::RemoteEval` and so on.
///
/// # Example
/// ```
/// use lending_workflow_core_rs::Stage;
///
/// assert_eq!(Stage::Idle.index(), 0);
/// assert_eq!(Stage::Verified.index(), 4);
/// assert!(Stage::RemoteEval < Stage::ProofGeneration);
/// assert_eq!(Stage::ProofGeneration.next(), Some(Stage::Verified));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Waiting for a submission; no run in progress
    #[default]
    Idle = 0,

    /// Client-side encryption of the request payload (simulated)
    Encrypting = 1,

    /// Remote risk evaluation inside a secure enclave (simulated)
    RemoteEval = 2,

    /// Zero-knowledge compliance proof generation (simulated)
    ProofGeneration = 3,

    /// Proof verified on chain; terminal stage of a run
    Verified = 4,
}

impl Stage {
    /// Numeric position in the pipeline (0 through 4)
    pub fn index(&self) -> u8 {
        *self as u8
    }

    /// Short uppercase label for a progress pipeline display
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Idle => "IDLE",
            Stage::Encrypting => "ENCRYPT",
            Stage::RemoteEval => "RISK EVAL",
            Stage::ProofGeneration => "ZK PROOF",
            Stage::Verified => "VERIFIED",
        }
    }

    /// Whether this stage ends a run
    pub fn is_terminal(&self) -> bool {
        matches!(self, Stage::Verified)
    }

    /// The next stage in the pipeline, or `None` from `Verified`
    pub fn next(&self) -> Option<Stage> {
        match self {
            Stage::Idle => Some(Stage::Encrypting),
            Stage::Encrypting => Some(Stage::RemoteEval),
            Stage::RemoteEval => Some(Stage::ProofGeneration),
            Stage::ProofGeneration => Some(Stage::Verified),
            Stage::Verified => None,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
