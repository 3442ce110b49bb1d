use std::{process::ExitCode, time::Duration};

use pretty_assertions::assert_eq;
use tinytest::{Config, RunError, RunPattern, UsageError, config::RUN_PATTERN_VAR};

mod lib;
use lib::*;

const EXPECTED: &str = "\
Math
  ✓ adds   <ms>
      ↳ one plus one is two
  ✗ divides   <ms>
  - later

Strings
  ✓ concat   <ms>
  ✓ rejects   <ms>


_________
| ERRORS
|
| Test: divides
| Error: division by zero
|
_________

Total Tests Passed:  3
Total Tests Failed:  1
Total Tests Skipped: 1
Total Time: <time>

----------
- FAILED -
----------
";

fn run_with(run_pattern: RunPattern) -> String {
    let (buffer, mut engine) = buffered_engine();
    engine.set_options(Config::default().with_run_pattern(run_pattern));
    declare_math(&mut engine);

    let report = engine.run().unwrap();
    assert_eq!(report.exit_code(), ExitCode::FAILURE);
    assert_eq!(
        (report.totals.passed, report.totals.failed, report.totals.skipped),
        (3, 1, 1)
    );
    assert!(report.fmt_errors.is_empty());

    sanitize_durations(&buffer.try_to_string().unwrap())
}

#[test]
fn serial_output() {
    assert_eq!(run_with(RunPattern::Serial), EXPECTED);
}

#[test]
fn parallel_output_matches_serial() {
    assert_eq!(run_with(RunPattern::Parallel), EXPECTED);
}

#[test]
fn all_skipped_is_a_success() {
    let (buffer, mut engine) = buffered_engine();
    engine.skip_group("Nothing", |g| {
        g.test("a", |_| async {}).test("b", |_| async {});
    });

    let report = engine.run().unwrap();
    assert_eq!(report.exit_code(), ExitCode::SUCCESS);
    assert_eq!(
        sanitize_durations(&buffer.try_to_string().unwrap()),
        "\
Nothing
  - a
  - b


Total Tests Passed:  0
Total Tests Failed:  0
Total Tests Skipped: 2
Total Time: <time>
-----------
- SUCCESS -
-----------
"
    );
}

#[test]
fn only_group_narrows_the_run() {
    let (_, mut engine) = buffered_engine();
    declare_math(&mut engine);
    engine.only_group("Focus", |g| {
        g.test("focused", |_| async {});
    });

    let report = engine.run().unwrap();
    assert_eq!(report.exit_code(), ExitCode::SUCCESS);
    assert_eq!(
        (report.totals.passed, report.totals.failed, report.totals.skipped),
        (1, 0, 5)
    );
}

#[test]
fn environment_run_pattern_is_validated_at_start() {
    let (buffer, mut engine) = buffered_engine();
    let config = Config::from_vars(|var| match var {
        RUN_PATTERN_VAR => Some(String::from("random")),
        _ => None,
    })
    .unwrap();
    engine.set_options(config.with_timeout(Duration::from_secs(1)));
    declare_math(&mut engine);

    match engine.run() {
        Err(RunError::Usage(UsageError::UnknownRunPattern(raw))) => assert_eq!(raw, "random"),
        other => panic!("expected an unknown run pattern, got {other:?}"),
    }
    assert_eq!(buffer.try_to_string().unwrap(), "");
}
