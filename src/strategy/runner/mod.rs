//! Test scheduling for tinytest.
//!
//! A runner walks the registry, asks the filter about every test, drives the
//! bodies and emits formatter events. Two runners exist, selected by
//! [`RunPattern`](crate::config::RunPattern) when the engine starts:
//!
//! - [`SerialRunner`] runs one item after the other and reports every test as
//!   soon as it settled.
//! - [`ParallelRunner`] launches every eligible body up front, drives them
//!   concurrently on the current thread, and reports once everything settled.
//!
//! Both resolve each test exactly once and update the run totals at the moment
//! the test settles.

use std::{borrow::Cow, future::Future, time::Instant};

use tracing::{trace, warn};

use crate::{
    aggregate::RunTotals,
    config::Config,
    context::TestContext,
    filter::{FilterDecision, TestFilter},
    formatter::{FmtEvent, FmtSender, FmtTestOutcome},
    group::Group,
    outcome::{TestOutcome, TestStatus},
    panic::capture,
    registry::Registry,
    report::GroupOutcomes,
    test::{Setup, Test},
};

mod parallel;
pub use parallel::*;

mod serial;
pub use serial::*;

/// Everything a runner borrows for the duration of a run.
#[derive(Debug)]
pub struct RunScope<'r, Filter> {
    pub registry: &'r Registry,
    pub filter: &'r Filter,
    pub totals: &'r RunTotals,
    pub config: &'r Config,
    pub(crate) events: &'r FmtSender,
}

impl<'r, Filter> Clone for RunScope<'r, Filter> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'r, Filter> Copy for RunScope<'r, Filter> {}

/// A strategy for ordering the execution of registered items.
pub trait TestRunner {
    /// Run every item of the registry and return the outcomes grouped in
    /// declaration order.
    fn run<Filter: TestFilter>(
        &self,
        scope: RunScope<'_, Filter>,
    ) -> impl Future<Output = Vec<GroupOutcomes>>;
}

impl<'r, Filter: TestFilter> RunScope<'r, Filter> {
    /// Apply the filter, counting the test as skipped if it does not run.
    pub(crate) fn skip_outcome(&self, test: &Test) -> Option<TestOutcome> {
        match self.filter.filter(&test.meta, self.registry.only_active()) {
            FilterDecision::Run => None,
            FilterDecision::Skip(reason) => {
                let outcome = TestOutcome::skip(reason);
                self.totals.record(&outcome.status);
                Some(outcome)
            }
        }
    }

    /// Execute a test body that passed the filter.
    pub(crate) async fn execute(&self, test: &Test) -> TestOutcome {
        let console = (!self.config.suppress_console).then(|| self.events.clone());
        let ctx = TestContext::new(test.name.clone(), console);

        // The body is called inside the guarded future, so panics raised before
        // its first await are captured too.
        let body_ctx = ctx.clone();
        let body = async move { test.call(body_ctx).await };

        let now = Instant::now();
        let status = TestStatus::from(capture(body, self.config.timeout).await);
        let duration = now.elapsed();

        self.totals.record(&status);
        trace!(test = %test.name, ?status, ?duration, "test settled");
        TestOutcome {
            status,
            duration,
            stories: ctx.take_stories(),
        }
    }

    /// Run a setup block. Its failures are logged and otherwise ignored.
    pub(crate) async fn setup(&self, group: &Group, setup: &Setup) {
        if let Err(failure) = capture(async { setup.call().await }, self.config.timeout).await {
            warn!(group = %group.name, %failure, "setup block failed");
        }
    }

    pub(crate) fn emit(&self, event: FmtEvent) {
        // If the formatter thread is gone, there is nobody left to render the event.
        let _ = self.events.send(event);
    }

    pub(crate) fn emit_outcome(&self, name: &Cow<'static, str>, outcome: &TestOutcome) {
        self.emit(FmtEvent::TestOutcome(FmtTestOutcome {
            name: name.clone(),
            outcome: outcome.clone(),
        }));
    }
}
