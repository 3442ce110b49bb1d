use std::time::Duration;

use tinytest::{Engine, TestContext, filter::DefaultFilter, formatter::pretty::PrettyFormatter};

use super::Buffer;

pub fn buffered_engine() -> (Buffer, Engine<DefaultFilter, PrettyFormatter<Buffer>>) {
    let buffer = Buffer::default();
    let engine =
        Engine::new().with_formatter(PrettyFormatter::default().with_target(buffer.clone()));
    (buffer, engine)
}

async fn divide(a: u32, b: u32) -> Result<u32, String> {
    tokio::time::sleep(Duration::from_millis(5)).await;
    a.checked_div(b).ok_or_else(|| String::from("division by zero"))
}

/// Two groups covering a pass with a story, a failure, a skip and an
/// `expect_reject` check.
pub fn declare_math<F, W>(engine: &mut Engine<F, W>) {
    engine.group("Math", |g| {
        g.test("adds", |ctx: TestContext| async move {
            ctx.story("one plus one is two", 1 + 1 == 2)
        })
        .test("divides", |ctx: TestContext| async move {
            let quotient = divide(1, 0).await?;
            ctx.check(quotient == 0, "quotient")?;
            Ok::<(), Box<dyn std::error::Error>>(())
        })
        .skip("later", |_| async {});
    });

    engine.group("Strings", |g| {
        g.test("concat", |ctx: TestContext| async move {
            let joined = ["tiny", "test"].concat();
            ctx.check(joined == "tinytest", "joined")
        })
        .test("rejects", |_| async {
            tinytest::expect_reject("divide by zero", divide(4, 0), |err| {
                match err == "division by zero" {
                    true => Ok(()),
                    false => Err(tinytest::AssertionError::Failed {
                        label: format!("unexpected error {err}"),
                    }),
                }
            })
            .await
        });
    });
}
