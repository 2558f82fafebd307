//! Cycle State
//!
//! Counters of the create -> wait -> sell loop. State transitions are pure so
//! the bookkeeping can be tested without any I/O.

use chrono::{DateTime, Utc};
use std::fmt;

/// Outcome of a single cycle attempt. Attempts are final, never retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Token created and sold
    Success { mint: String, sell_signature: String },
    /// Creation or sale failed
    Failure { reason: String },
}

impl CycleOutcome {
    pub fn failure(reason: impl Into<String>) -> Self {
        Self::Failure { reason: reason.into() }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// One completed cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleResult {
    /// Zero-based cycle index
    pub index: u32,
    pub outcome: CycleOutcome,
}

/// Running counters of the cycle controller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleState {
    /// Number of completed cycles
    pub completed: u32,
    pub successful: u32,
    pub failed: u32,
    /// Total cycles planned for the run
    pub total: u32,
}

impl CycleState {
    pub fn new(total: u32) -> Self {
        Self {
            total,
            ..Default::default()
        }
    }

    /// Fold one cycle result into the counters
    pub fn advance(self, result: &CycleResult) -> Self {
        let mut next = self;
        next.completed = result.index + 1;
        if result.outcome.is_success() {
            next.successful += 1;
        } else {
            next.failed += 1;
        }
        debug_assert_eq!(next.successful + next.failed, next.completed);
        next
    }

    /// Index of the next cycle to run, or `None` when the run is complete
    pub fn next_index(&self) -> Option<u32> {
        (self.completed < self.total).then_some(self.completed)
    }

    pub fn is_complete(&self) -> bool {
        self.completed >= self.total
    }

    pub fn remaining(&self) -> u32 {
        self.total.saturating_sub(self.completed)
    }

    /// Per-cycle status block
    pub fn status_report(&self) -> String {
        format!(
            "Status Report:\n\
             ------------\n\
             Current Cycle: {}/{}\n\
             Successful: {}\n\
             Failed: {}\n\
             Remaining: {}\n\
             ------------",
            self.completed,
            self.total,
            self.successful,
            self.failed,
            self.remaining()
        )
    }
}

/// Final report of a run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub total: u32,
    pub successful: u32,
    pub failed: u32,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub results: Vec<CycleResult>,
}

impl RunSummary {
    pub fn new(state: CycleState, started_at: DateTime<Utc>, results: Vec<CycleResult>) -> Self {
        Self {
            total: state.total,
            successful: state.successful,
            failed: state.failed,
            started_at,
            finished_at: Utc::now(),
            results,
        }
    }

    /// successful / total * 100
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.successful as f64 / self.total as f64 * 100.0
    }

    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Automation Completed")?;
        writeln!(f, "-------------------")?;
        writeln!(f, "Total Cycles: {}", self.total)?;
        writeln!(f, "Successful: {}", self.successful)?;
        writeln!(f, "Failed: {}", self.failed)?;
        writeln!(f, "Success Rate: {:.2}%", self.success_rate())?;
        writeln!(f, "Elapsed: {}s", self.elapsed().num_seconds())?;
        write!(f, "-------------------")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn success(index: u32) -> CycleResult {
        CycleResult {
            index,
            outcome: CycleOutcome::Success {
                mint: format!("mint{}", index),
                sell_signature: format!("sig{}", index),
            },
        }
    }

    fn failure(index: u32) -> CycleResult {
        CycleResult {
            index,
            outcome: CycleOutcome::failure("Token creation failed"),
        }
    }

    #[test]
    fn test_counters_sum_to_completed() {
        let mut state = CycleState::new(4);
        let results = [success(0), failure(1), failure(2), success(3)];

        for result in &results {
            state = state.advance(result);
            assert_eq!(state.successful + state.failed, state.completed);
            assert_eq!(state.completed, result.index + 1);
        }

        assert!(state.is_complete());
        assert_eq!(state.successful, 2);
        assert_eq!(state.failed, 2);
        assert_eq!(state.next_index(), None);
    }

    #[test]
    fn test_next_index() {
        let state = CycleState::new(2);
        assert_eq!(state.next_index(), Some(0));
        let state = state.advance(&failure(0));
        assert_eq!(state.next_index(), Some(1));
        assert_eq!(state.remaining(), 1);
    }

    #[test]
    fn test_zero_cycles_is_complete() {
        let state = CycleState::new(0);
        assert!(state.is_complete());
        assert_eq!(state.next_index(), None);
    }

    #[test]
    fn test_status_report() {
        let state = CycleState::new(3).advance(&success(0));
        let report = state.status_report();
        assert!(report.contains("Current Cycle: 1/3"));
        assert!(report.contains("Successful: 1"));
        assert!(report.contains("Remaining: 2"));
    }

    #[test]
    fn test_summary_success_rate() {
        let state = CycleState::new(2).advance(&failure(0)).advance(&success(1));
        let summary = RunSummary::new(state, Utc::now(), vec![failure(0), success(1)]);

        assert_eq!(summary.success_rate(), 50.0);
        let text = summary.to_string();
        assert!(text.contains("Success Rate: 50.00%"));
        assert!(text.contains("Failed: 1"));
    }

    #[test]
    fn test_summary_empty_run() {
        let summary = RunSummary::new(CycleState::new(0), Utc::now(), Vec::new());
        assert_eq!(summary.success_rate(), 0.0);
    }
}
