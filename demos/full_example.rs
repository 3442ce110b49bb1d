//! A tour of the registration API.
//!
//! Run with `cargo run --example full_example`. Set `RUST_LOG=tinytest=debug`
//! to see the scheduler's own logging on stderr.

use std::{process::ExitCode, time::Duration};

use tinytest::{AssertionError, Config, TestContext, expect_reject};
use tracing_subscriber::EnvFilter;

const EXAMPLE_ERROR_MESSAGE: &str = "EXAMPLE_ERROR_MESSAGE";

async fn sleep(millis: u64) {
    tokio::time::sleep(Duration::from_millis(millis)).await;
}

async fn fetch_failing() -> Result<(), String> {
    sleep(50).await;
    Err(EXAMPLE_ERROR_MESSAGE.into())
}

fn main() -> ExitCode {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let mut engine = tinytest::engine();
    engine.set_options(config.with_suppress_console(false));

    engine.group("Group 1", |g| {
        g.setup(|| async {
            // prepare shared state here
        })
        .test("Sync Example", |ctx: TestContext| async move {
            ctx.story("Strings should match", "hello" == "hello")?;
            ctx.check("world" == "world", "L9s1unY6L")
        })
        .setup(|| sleep(300))
        .test("Async Example", |_| sleep(500))
        .test(
            "Async Example with Expected Error",
            |ctx: TestContext| async move {
                expect_reject("RW_IV4dSz", fetch_failing(), |err| {
                    ctx.check(err == EXAMPLE_ERROR_MESSAGE, "h7gNKWkPS")
                })
                .await
            },
        )
        .test("Example Error", |_| async {
            match 5 == 10 {
                true => Ok(()),
                false => Err(AssertionError::Failed {
                    label: String::from("5 == 10"),
                }),
            }
        })
        .skip("Example Test Being Skipped", |_| async {});
    });

    engine.group("Group 2", |g| {
        g.setup(|| async {
            println!("Run block in group 2");
        })
        .test("Logs while running", |ctx: TestContext| async move {
            ctx.log("Start await");
            sleep(1500).await;
            ctx.log("End");
        })
        .test("Quick one", |_| async {});
    });

    engine.skip_group("Group 3", |g| {
        g.test("Never runs", |_| async {
            if true {
                unreachable!("skipped groups never run their tests")
            }
        });
    });

    match engine.run() {
        Ok(report) => report.exit_code(),
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
