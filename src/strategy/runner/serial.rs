use tracing::debug;

use crate::{
    filter::TestFilter,
    formatter::{FmtEvent, FmtGroupEnd, FmtGroupStart},
    group::Item,
    report::GroupOutcomes,
    runner::{RunScope, TestRunner},
};

/// Runs every item in declaration order, one after another.
///
/// A test only starts once the previous item settled, and its outcome is
/// reported before the next item starts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SerialRunner;

impl TestRunner for SerialRunner {
    async fn run<Filter: TestFilter>(&self, scope: RunScope<'_, Filter>) -> Vec<GroupOutcomes> {
        let mut groups = Vec::with_capacity(scope.registry.groups().len());
        for group in scope.registry.groups() {
            debug!(group = %group.name, "running group");
            scope.emit(FmtEvent::GroupStart(FmtGroupStart {
                name: group.name.clone(),
                tests: group.test_count(),
            }));

            let mut outcomes = Vec::with_capacity(group.test_count());
            for item in group.items() {
                match item {
                    Item::Setup(setup) => scope.setup(group, setup).await,
                    Item::Test(test) => {
                        let outcome = match scope.skip_outcome(test) {
                            Some(skipped) => skipped,
                            None => scope.execute(test).await,
                        };
                        scope.emit_outcome(&test.name, &outcome);
                        outcomes.push((test.name.clone(), outcome));
                    }
                }
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
