//! Serial scheduling with an only test.
//!
//! Every test settles before the next one starts and is reported right away.
//! Because `Focused` is declared with `only`, all other tests are skipped.

use std::{process::ExitCode, time::Duration};

use tinytest::{Config, RunPattern, TestContext};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let mut engine = tinytest::engine();
    engine.set_options(
        Config::default()
            .with_run_pattern(RunPattern::Serial)
            .with_timeout(Duration::from_secs(2)),
    );

    engine.group("Should do x", |g| {
        g.test("Test1", |_| async {}).only(
            "Focused",
            |ctx: TestContext| async move {
                tokio::time::sleep(Duration::from_millis(300)).await;
                ctx.story("waited without timing out", true)
            },
        );
    });

    engine.group("Should do Yo", |g| {
        g.test("Test1", |_| tokio::time::sleep(Duration::from_secs(3)))
            .test("Test2", |_| async {});
    });

    match engine.run() {
        Ok(report) => report.exit_code(),
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
