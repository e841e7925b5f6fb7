//! Property tests for the timeline invariants
//!
//! The schedule is offset-driven: outcomes depend only on total elapsed
//! time, never on how the driver slices its `advance` calls. These
//! properties pump the engine with arbitrary call patterns and check
//! the invariants after every step.

use lending_workflow_core_rs::{
    LoanRequest, Stage, WorkflowConfig, WorkflowEngine,
};
use proptest::prelude::*;
use std::time::Duration;

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

fn messages(engine: &WorkflowEngine) -> Vec<String> {
    engine
        .log()
        .entries()
        .map(|e| e.message().to_string())
        .collect()
}

proptest! {
    /// Slicing elapsed time into arbitrary deltas yields exactly the
    /// state a single equivalent advance produces.
    #[test]
    fn prop_advance_partition_is_irrelevant(
        deltas in prop::collection::vec(0u64..2_000, 1..40)
    ) {
        let request = LoanRequest::new(50_000, 65_000);

        let mut sliced = WorkflowEngine::new(WorkflowConfig::default());
        sliced.submit(request).unwrap();
        for delta in &deltas {
            sliced.advance(ms(*delta));
        }

        let mut whole = WorkflowEngine::new(WorkflowConfig::default());
        whole.submit(request).unwrap();
        whole.advance(ms(deltas.iter().sum()));

        prop_assert_eq!(sliced.stage(), whole.stage());
        prop_assert_eq!(messages(&sliced), messages(&whole));
        prop_assert_eq!(sliced.receipt(), whole.receipt());
        prop_assert_eq!(sliced.pending_steps(), whole.pending_steps());
    }

    /// The stage never decreases between a submission and the next.
    #[test]
    fn prop_stage_is_monotonic(
        deltas in prop::collection::vec(0u64..3_000, 0..32)
    ) {
        let mut engine = WorkflowEngine::new(WorkflowConfig::default());
        engine.submit(LoanRequest::new(50_000, 65_000)).unwrap();

        let mut previous = engine.stage();
        for delta in deltas {
            let result = engine.advance(ms(delta));
            prop_assert!(result.stage >= previous);
            previous = result.stage;
        }
    }

    /// A receipt exists iff the stage is Verified, at every point of
    /// every call pattern.
    #[test]
    fn prop_receipt_iff_verified(
        deltas in prop::collection::vec(0u64..3_000, 0..32)
    ) {
        let mut engine = WorkflowEngine::new(WorkflowConfig::default());
        engine.submit(LoanRequest::new(50_000, 65_000)).unwrap();

        prop_assert!(engine.state().is_consistent());
        for delta in deltas {
            engine.advance(ms(delta));
            prop_assert!(engine.state().is_consistent());
            prop_assert_eq!(
                engine.receipt().is_some(),
                engine.stage() == Stage::Verified
            );
        }
    }

    /// While steps remain armed, every submission is rejected and the
    /// log keeps exactly one INIT line.
    #[test]
    fn prop_in_flight_submissions_always_rejected(
        deltas in prop::collection::vec(0u64..1_500, 0..24)
    ) {
        let mut engine = WorkflowEngine::new(WorkflowConfig::default());
        engine.submit(LoanRequest::new(50_000, 65_000)).unwrap();

        for delta in deltas {
            engine.advance(ms(delta));
            if engine.is_in_flight() {
                prop_assert!(engine.submit(LoanRequest::new(1, 1)).is_err());
            } else {
                prop_assert_eq!(engine.stage(), Stage::Verified);
            }
            prop_assert_eq!(
                engine.log().entries_with_prefix("INIT:").len(),
                1
            );
        }
    }
}
