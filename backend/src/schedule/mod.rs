//! The fixed step table driving a workflow run
//!
//! A run is choreography, not computation: a list of `(offset, actions)`
//! pairs applied at fixed delays from the submission instant. The table
//! is data (it is not computed from the request), and ordering between
//! steps is guaranteed solely by their offsets, so construction rejects
//! tables whose offsets are not strictly increasing.
//!
//! # Design Principles
//!
//! 1. **Determinism**: the same table always produces the same run
//! 2. **Self-contained**: each step carries everything needed to fire
//! 3. **Cancellable**: armed steps are owned by the engine and can be
//!    dropped atomically on reset or teardown

use crate::models::stage::Stage;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single mutation the timeline applies when a step fires.
///
/// Strategy-invoking actions (`EvaluateRisk`, `GenerateProof`,
/// `VerifyOnChain`) defer their outcome to the engine's pluggable
/// services; the rest are fixed log lines and stage transitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepAction {
    /// Append a fixed log line
    Note { message: String },

    /// Advance the pipeline to the given stage
    EnterStage { stage: Stage },

    /// Ask the risk evaluator for an assessment and log it
    EvaluateRisk,

    /// Ask the proof generator for a compliance proof and log it
    GenerateProof,

    /// Ask the chain verifier for a receipt, record it, and log the
    /// confirmation lines
    VerifyOnChain,
}

impl StepAction {
    /// Convenience constructor for a fixed log line
    pub fn note(message: impl Into<String>) -> Self {
        StepAction::Note {
            message: message.into(),
        }
    }
}

/// One scheduled step: a delay from submission plus the mutations to
/// apply when it elapses.
///
/// A step's actions are applied together, in order, as one logical
/// mutation; a stage transition and its log line are never observable
/// apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledStep {
    /// Milliseconds after submission at which this step fires
    pub offset_ms: u64,

    /// Mutations applied when the step fires, in order
    pub actions: Vec<StepAction>,
}

impl ScheduledStep {
    /// Create a step at the given offset
    pub fn new(offset_ms: u64, actions: Vec<StepAction>) -> Self {
        Self { offset_ms, actions }
    }
}

/// Errors from step-table validation
#[derive(Debug, Error, PartialEq)]
pub enum ScheduleError {
    #[error("schedule must contain at least one step")]
    Empty,

    #[error(
        "step offsets must be strictly increasing from the submission \
         instant (step {index} at {offset_ms}ms)"
    )]
    NonMonotonicOffset { index: usize, offset_ms: u64 },
}

/// A validated, ordered step table.
///
/// # Example
///
/// ```rust
/// use lending_workflow_core_rs::schedule::Schedule;
///
/// let schedule = Schedule::standard();
/// assert_eq!(schedule.steps().len(), 5);
/// assert_eq!(schedule.total_duration_ms(), 10_000);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    steps: Vec<ScheduledStep>,
}

impl Schedule {
    /// Build a schedule, validating that offsets are strictly
    /// increasing and strictly after the submission instant
    pub fn new(steps: Vec<ScheduledStep>) -> Result<Self, ScheduleError> {
        if steps.is_empty() {
            return Err(ScheduleError::Empty);
        }

        let mut last_offset = 0u64;
        for (index, step) in steps.iter().enumerate() {
            if step.offset_ms <= last_offset {
                return Err(ScheduleError::NonMonotonicOffset {
                    index,
                    offset_ms: step.offset_ms,
                });
            }
            last_offset = step.offset_ms;
        }

        Ok(Self { steps })
    }

    /// The reference choreography: four simulated stages over ten
    /// seconds.
    ///
    /// Submission itself (offset 0) moves the stage to `Encrypting` and
    /// emits the INIT line; the table below covers everything after.
    pub fn standard() -> Self {
        let steps = vec![
            ScheduledStep::new(
                1_000,
                vec![StepAction::note(
                    "CLIENT: Encrypting sensitive data with enclave public key...",
                )],
            ),
            ScheduledStep::new(
                2_500,
                vec![
                    StepAction::EnterStage {
                        stage: Stage::RemoteEval,
                    },
                    StepAction::note("NET: Encrypted payload sent to secure worker enclave."),
                ],
            ),
            ScheduledStep::new(
                4_000,
                vec![
                    StepAction::note("TEE: Decrypting data inside secure hardware..."),
                    StepAction::note("TEE: Running risk model..."),
                ],
            ),
            ScheduledStep::new(
                7_000,
                vec![
                    StepAction::EnterStage {
                        stage: Stage::ProofGeneration,
                    },
                    StepAction::EvaluateRisk,
                    StepAction::GenerateProof,
                ],
            ),
            ScheduledStep::new(
                10_000,
                vec![
                    StepAction::EnterStage {
                        stage: Stage::Verified,
                    },
                    StepAction::VerifyOnChain,
                ],
            ),
        ];

        Self::new(steps).expect("standard schedule is statically valid")
    }

    /// The validated steps, in firing order
    pub fn steps(&self) -> &[ScheduledStep] {
        &self.steps
    }

    /// Offset of the final step (the run's total duration)
    pub fn total_duration_ms(&self) -> u64 {
        self.steps.last().map(|s| s.offset_ms).unwrap_or(0)
    }
}

impl Default for Schedule {
    fn default() -> Self {
        Self::standard()
    }
}
