//! Running totals for a test run.
//!
//! Every test is counted exactly once, by the scheduler path that resolved it.
//! Counters only ever grow and setup blocks are never counted.

use std::cell::Cell;

use crate::outcome::TestStatus;

/// A plain snapshot of the run counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub declared: usize,
}

impl Totals {
    pub fn settled(&self) -> usize {
        self.passed + self.failed + self.skipped
    }

    pub fn remaining(&self) -> usize {
        self.declared.saturating_sub(self.settled())
    }

    /// Whether every declared test has been accounted for.
    pub fn is_complete(&self) -> bool {
        self.settled() == self.declared
    }
}

/// Live counters updated while a run is in progress.
///
/// All test bodies are driven on a single thread, so plain cells are enough
/// even when bodies interleave.
#[derive(Debug, Default)]
pub struct RunTotals {
    passed: Cell<usize>,
    failed: Cell<usize>,
    skipped: Cell<usize>,
    declared: usize,
}

impl RunTotals {
    pub fn new(declared: usize) -> Self {
        Self {
            declared,
            ..Self::default()
        }
    }

    pub fn record(&self, status: &TestStatus) {
        let counter = match status {
            TestStatus::Passed => &self.passed,
            TestStatus::Failed(_) => &self.failed,
            TestStatus::Skipped(_) => &self.skipped,
        };
        counter.set(counter.get() + 1);
    }

    pub fn snapshot(&self) -> Totals {
        Totals {
            passed: self.passed.get(),
            failed: self.failed.get(),
            skipped: self.skipped.get(),
            declared: self.declared,
        }
    }
}
