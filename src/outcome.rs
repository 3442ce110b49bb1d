use std::{
    fmt::{self, Display},
    time::Duration,
};

/// The recorded result of a single test after the scheduler resolved it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct TestOutcome {
    pub status: TestStatus,
    pub duration: Duration,
    pub stories: Vec<String>,
}

impl TestOutcome {
    pub fn skip(reason: SkipReason) -> Self {
        Self {
            status: TestStatus::Skipped(reason),
            duration: Duration::ZERO,
            stories: Vec::new(),
        }
    }

    pub fn passed(&self) -> bool {
        self.status.passed()
    }

    pub fn failed(&self) -> bool {
        self.status.failed()
    }

    pub fn skipped(&self) -> bool {
        self.status.skipped()
    }

    pub fn failure(&self) -> Option<&TestFailure> {
        match &self.status {
            TestStatus::Failed(failure) => Some(failure),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TestStatus {
    Passed,
    Failed(TestFailure),
    Skipped(SkipReason),
}

impl TestStatus {
    pub fn passed(&self) -> bool {
        matches!(self, TestStatus::Passed)
    }

    pub fn failed(&self) -> bool {
        matches!(self, TestStatus::Failed(_))
    }

    pub fn skipped(&self) -> bool {
        matches!(self, TestStatus::Skipped(_))
    }
}

impl From<Result<(), TestFailure>> for TestStatus {
    fn from(value: Result<(), TestFailure>) -> Self {
        match value {
            Ok(()) => TestStatus::Passed,
            Err(failure) => TestStatus::Failed(failure),
        }
    }
}

/// Why a test was not executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The test itself (or its group) was declared as skipped.
    Skipped,
    /// Only-mode is active and this test is not marked as only.
    NotOnly,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TestFailure {
    /// The body settled with an error, holds its message.
    Error(String),
    /// The body panicked, holds the panic payload if it was a string.
    Panicked(String),
    /// The body did not settle within the configured timeout.
    TimedOut(Duration),
}

impl Display for TestFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestFailure::Error(msg) => f.write_str(msg),
            TestFailure::Panicked(msg) => write!(f, "panicked: {msg}"),
            TestFailure::TimedOut(limit) => write!(f, "timed out after {limit:?}"),
        }
    }
}
