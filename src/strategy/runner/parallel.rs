use std::time::Duration;

use futures::{
    FutureExt,
    future::{self, LocalBoxFuture},
};
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::debug;

use crate::{
    filter::TestFilter,
    formatter::{FmtEvent, FmtGroupEnd, FmtGroupStart, FmtProgress},
    group::Item,
    outcome::TestOutcome,
    report::GroupOutcomes,
    runner::{RunScope, TestRunner},
};

/// Launches every eligible body at once and drives them concurrently on the
/// current thread.
///
/// Bodies are launched in declaration order, but may settle in any order.
/// While work is outstanding a progress event is emitted every
/// [`progress_interval`](crate::config::Config::progress_interval). Groups and
/// outcomes are reported in declaration order once everything settled.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ParallelRunner;

const MIN_PROGRESS_INTERVAL: Duration = Duration::from_millis(10);

type Launch<'r> = LocalBoxFuture<'r, Option<(usize, TestOutcome)>>;

impl TestRunner for ParallelRunner {
    async fn run<Filter: TestFilter>(&self, scope: RunScope<'_, Filter>) -> Vec<GroupOutcomes> {
        let mut launches: Vec<Launch<'_>> = Vec::new();
        for (index, group) in scope.registry.groups().iter().enumerate() {
            for item in group.items() {
                launches.push(match item {
                    Item::Setup(setup) => async move {
                        scope.setup(group, setup).await;
                        None::<(usize, TestOutcome)>
                    }
                    .boxed_local(),
                    Item::Test(test) => match scope.skip_outcome(test) {
                        Some(skipped) => future::ready(Some((index, skipped))).boxed_local(),
                        None => async move { Some((index, scope.execute(test).await)) }
                            .boxed_local(),
                    },
                });
            }
        }
        debug!(launched = launches.len(), "launched all items");

        let all = future::join_all(launches);
        tokio::pin!(all);

        let period = scope.config.progress_interval.max(MIN_PROGRESS_INTERVAL);
        let mut progress = time::interval_at(Instant::now() + period, period);
        progress.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let settled = loop {
            tokio::select! {
                settled = &mut all => break settled,
                _ = progress.tick() => scope.emit(FmtEvent::Progress(FmtProgress {
                    totals: scope.totals.snapshot(),
                })),
            }
        };

        let mut settled = settled.into_iter().flatten().peekable();
        let mut groups = Vec::with_capacity(scope.registry.groups().len());
        for (index, group) in scope.registry.groups().iter().enumerate() {
            scope.emit(FmtEvent::GroupStart(FmtGroupStart {
                name: group.name.clone(),
                tests: group.test_count(),
            }));

            let mut outcomes = Vec::with_capacity(group.test_count());
            for test in group.tests() {
                let Some((_, outcome)) = settled.next_if(|(group, _)| *group == index) else {
                    unreachable!("every test of group {index} settled");
                };
                scope.emit_outcome(&test.name, &outcome);
                outcomes.push((test.name.clone(), outcome));
            }

            scope.emit(FmtEvent::GroupEnd(FmtGroupEnd {
                name: group.name.clone(),
            }));
            groups.push(GroupOutcomes {
                name: group.name.clone(),
                outcomes,
            });
        }
        groups
    }
}
