//! Integration tests for hard reset and cancellation
//!
//! A reset must cancel every armed step atomically so that no stale
//! mutation can fire into a later run.

use lending_workflow_core_rs::workflow::INIT_LOG_LINE;
use lending_workflow_core_rs::{LoanRequest, Stage, WorkflowConfig, WorkflowEngine};
use std::time::Duration;

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

#[test]
fn test_reset_cancels_all_armed_steps() {
    let mut engine = WorkflowEngine::new(WorkflowConfig::default());
    engine.submit(LoanRequest::new(50_000, 65_000)).unwrap();
    engine.advance(ms(3_000)); // two steps fired, three remain

    let cancelled = engine.reset();
    assert_eq!(cancelled, 3);
    assert_eq!(engine.stage(), Stage::Idle);
    assert!(engine.receipt().is_none());
    assert!(!engine.is_in_flight());
    assert!(engine.run_id().is_none());
    assert!(engine.state().is_consistent());
}

#[test]
fn test_reset_retains_the_old_log_until_next_run() {
    let mut engine = WorkflowEngine::new(WorkflowConfig::default());
    engine.submit(LoanRequest::new(50_000, 65_000)).unwrap();
    engine.advance(ms(3_000));
    let log_len = engine.log().len();

    engine.reset();
    assert_eq!(engine.log().len(), log_len);

    engine.submit(LoanRequest::new(1, 1)).unwrap();
    assert_eq!(engine.log().len(), 1);
}

#[test]
fn test_no_stale_step_fires_after_reset() {
    let mut engine = WorkflowEngine::new(WorkflowConfig::default());
    engine.submit(LoanRequest::new(50_000, 65_000)).unwrap();
    engine.advance(ms(3_000));
    engine.reset();

    // Time that would have fired the cancelled steps does nothing
    let result = engine.advance(ms(60_000));
    assert_eq!(result.steps_fired, 0);
    assert_eq!(engine.stage(), Stage::Idle);
}

#[test]
fn test_new_run_after_reset_is_unaffected_by_the_old_one() {
    let mut engine = WorkflowEngine::new(WorkflowConfig::default());
    engine.submit(LoanRequest::new(50_000, 65_000)).unwrap();
    engine.advance(ms(8_000)); // deep into the first run
    engine.reset();

    engine.submit(LoanRequest::new(70_000, 90_000)).unwrap();

    // The new run starts its schedule from zero
    assert_eq!(engine.elapsed_ms(), 0);
    assert_eq!(engine.pending_steps(), 5);

    engine.advance(ms(10_000));
    assert_eq!(engine.stage(), Stage::Verified);
    assert_eq!(engine.log().entries_with_prefix(INIT_LOG_LINE).len(), 1);
    // One risk verdict, one success line: nothing leaked across runs
    assert_eq!(engine.log().entries_with_prefix("TEE: Risk Result:").len(), 1);
    assert_eq!(engine.log().entries_with_prefix("SUCCESS:").len(), 1);
}

#[test]
fn test_reset_when_idle_is_a_no_op() {
    let mut engine = WorkflowEngine::new(WorkflowConfig::default());
    assert_eq!(engine.reset(), 0);
    assert_eq!(engine.stage(), Stage::Idle);
    assert!(engine.log().is_empty());
}

#[test]
fn test_reset_after_completion_clears_receipt_with_stage() {
    let mut engine = WorkflowEngine::new(WorkflowConfig::default());
    engine.submit(LoanRequest::new(50_000, 65_000)).unwrap();
    engine.advance(ms(10_000));
    assert!(engine.receipt().is_some());

    let cancelled = engine.reset();
    assert_eq!(cancelled, 0); // nothing armed, still resets state
    assert_eq!(engine.stage(), Stage::Idle);
    assert!(engine.receipt().is_none());
    assert!(engine.state().is_consistent());
}
