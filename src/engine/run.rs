use std::{thread, time::Instant};

use tracing::debug;

use crate::{
    Engine,
    aggregate::RunTotals,
    config::RunPattern,
    error::RunError,
    filter::TestFilter,
    formatter::{
        FmtEndListing, FmtErrors, FmtEvent, FmtGroupStart, FmtListTest, FmtRunOutcomes, FmtRunStart,
        TestFormatter, named_fmt,
    },
    panic::PanicSilencer,
    report::{self, RunReport},
    runner::{ParallelRunner, RunScope, SerialRunner, TestRunner},
};

const EVENT_BUFFER: usize = 64;

impl<Filter, Formatter> Engine<Filter, Formatter>
where
    Filter: TestFilter,
    Formatter: TestFormatter + Send,
    Formatter::Error: Send,
{
    /// Finish registration and run every declared item.
    ///
    /// Test failures never make this fail, they end up in the returned
    /// [`RunReport`]. Only usage errors, like an unknown run pattern, are
    /// returned as errors, before any test body ran.
    pub fn run(self) -> Result<RunReport<Formatter::Error>, RunError> {
        let run_pattern = self.config.run_pattern()?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()?;

        let now = Instant::now();
        let Engine {
            registry,
            config,
            filter,
            mut formatter,
        } = self;

        let mut fmt_errors: Vec<(&'static str, Formatter::Error)> = Vec::new();
        fmt_errors.push_on_error(named_fmt!(
            formatter.fmt_run_start(FmtRunStart {
                groups: registry.groups().len(),
                declared: registry.declared(),
                run_pattern,
            })
        ));
        debug!(
            %run_pattern,
            groups = registry.groups().len(),
            declared = registry.declared(),
            only_active = registry.only_active(),
            "starting run"
        );

        let totals = RunTotals::new(registry.declared());
        let _silencer = config.suppress_console.then(PanicSilencer::install);

        let (groups, mut formatter, mut fmt_errors) = thread::scope(|scope| {
            let (ftx, frx) = crossbeam_channel::bounded::<FmtEvent>(EVENT_BUFFER);
            let fmt_thread = scope.spawn(move || {
                while let Ok(event) = frx.recv() {
                    fmt_errors.push_on_error(event.dispatch(&mut formatter));
                }
                (formatter, fmt_errors)
            });

            let run_scope = RunScope {
                registry: &registry,
                filter: &filter,
                totals: &totals,
                config: &config,
                events: &ftx,
            };
            let groups = runtime.block_on(async {
                match run_pattern {
                    RunPattern::Serial => SerialRunner.run(run_scope).await,
                    RunPattern::Parallel => ParallelRunner.run(run_scope).await,
                }
            });

            drop(ftx);
            let (formatter, fmt_errors) = fmt_thread
                .join()
                .expect("format thread should join without issues");

            (groups, formatter, fmt_errors)
        });

        let duration = now.elapsed();
        let totals = totals.snapshot();
        debug!(?totals, ?duration, "run finished");

        fmt_errors.push_on_error(named_fmt!(
            formatter.fmt_run_outcomes(FmtRunOutcomes {
                totals,
                duration,
                failures: report::failures(&groups).collect(),
            })
        ));

        Ok(RunReport {
            groups,
            totals,
            duration,
            fmt_errors,
        })
    }

    /// Render the declared groups and tests without running anything.
    pub fn list(self) -> Vec<(&'static str, Formatter::Error)> {
        let Engine {
            registry,
            filter,
            mut formatter,
            ..
        } = self;

        let mut fmt_errors: Vec<(&'static str, Formatter::Error)> = Vec::new();
        let mut active = 0;
        let mut skipped = 0;
        for group in registry.groups() {
            fmt_errors.push_on_error(named_fmt!(
                formatter.fmt_list_group(FmtGroupStart {
                    name: group.name.clone(),
                    tests: group.test_count(),
                })
            ));

            for test in group.tests() {
                let decision = filter.filter(&test.meta, registry.only_active());
                match decision.runs() {
                    true => active += 1,
                    false => skipped += 1,
                }
                fmt_errors.push_on_error(named_fmt!(
                    formatter.fmt_list_test(FmtListTest {
                        name: &test.name,
                        decision,
                    })
                ));
            }
        }

        fmt_errors.push_on_error(named_fmt!(
            formatter.fmt_end_listing(FmtEndListing { active, skipped })
        ));
        fmt_errors
    }
}
