//! Time management for the workflow timeline
//!
//! The timeline operates in run-relative milliseconds: every scheduled
//! step is an offset from the submission instant. The timer never reads
//! the wall clock itself; the driver advances it explicitly, which keeps
//! the temporal logic deterministic.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tracks elapsed time within the current run, in milliseconds.
///
/// # Example
/// ```
/// use lending_workflow_core_rs::RunTimer;
/// use std::time::Duration;
///
/// let mut timer = RunTimer::new();
/// assert_eq!(timer.elapsed_ms(), 0);
///
/// timer.advance(Duration::from_millis(250));
/// assert_eq!(timer.elapsed_ms(), 250);
///
/// timer.restart();
/// assert_eq!(timer.elapsed_ms(), 0);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunTimer {
    /// Milliseconds elapsed since the current run was submitted
    elapsed_ms: u64,
}

impl RunTimer {
    /// Create a new timer at zero elapsed time
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset elapsed time to zero for a fresh run
    pub fn restart(&mut self) {
        self.elapsed_ms = 0;
    }

    /// Advance elapsed time by the given delta
    ///
    /// Saturates at `u64::MAX` milliseconds rather than wrapping.
    pub fn advance(&mut self, delta: Duration) {
        let delta_ms = u64::try_from(delta.as_millis()).unwrap_or(u64::MAX);
        self.elapsed_ms = self.elapsed_ms.saturating_add(delta_ms);
    }

    /// Get milliseconds elapsed since the current run started
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Clear the timer back to zero (run torn down or reset)
    pub fn clear(&mut self) {
        self.elapsed_ms = 0;
    }
}
