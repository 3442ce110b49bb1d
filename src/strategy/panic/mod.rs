//! Failure capture for test and setup bodies.
//!
//! A body fails when it settles with an error, when it panics, or when it does
//! not settle within the configured timeout. All three end up as a
//! [`TestFailure`] and never escape the engine.

use std::{
    any::Any,
    cell::Cell,
    future::Future,
    panic::{self, AssertUnwindSafe},
    sync::Once,
    time::Duration,
};

use futures::FutureExt;

use crate::{outcome::TestFailure, test::TestResult};

/// Drive `fut` to completion, turning errors, panics and timeouts into a
/// [`TestFailure`].
pub async fn capture<Fut>(fut: Fut, timeout: Option<Duration>) -> Result<(), TestFailure>
where
    Fut: Future<Output = TestResult>,
{
    let guarded = AssertUnwindSafe(fut).catch_unwind();
    let settled = match timeout {
        None => guarded.await,
        Some(limit) => match tokio::time::timeout(limit, guarded).await {
            Ok(settled) => settled,
            Err(_) => return Err(TestFailure::TimedOut(limit)),
        },
    };

    match settled {
        Ok(TestResult(result)) => result.map_err(TestFailure::Error),
        Err(payload) => Err(TestFailure::Panicked(payload_as_string(payload))),
    }
}

/// Convert a panic payload into a string.
///
/// This matches the common payload types produced by `panic!` (`&'static str` and `String`).
/// Other payload types are formatted as a generic placeholder.
pub fn payload_as_string(err: Box<dyn Any + Send + 'static>) -> String {
    err.downcast::<&'static str>()
        .map(|s| s.to_string())
        .or_else(|err| err.downcast::<String>().map(|s| *s))
        .unwrap_or_else(|_| String::from("Box<dyn Any>"))
}

thread_local! {
    static SILENCE_PANICS: Cell<bool> = const { Cell::new(false) };
}

static CHAIN_HOOK: Once = Once::new();

/// Keeps the panic hook quiet on the current thread while alive.
///
/// Panics of test bodies are still captured as failures, only the default
/// stderr message is dropped. Other threads keep the previous hook behavior.
#[derive(Debug)]
pub struct PanicSilencer {
    previous: bool,
}

impl PanicSilencer {
    pub fn install() -> Self {
        CHAIN_HOOK.call_once(|| {
            let previous_hook = panic::take_hook();
            panic::set_hook(Box::new(move |info| {
                if !SILENCE_PANICS.with(Cell::get) {
                    previous_hook(info);
                }
            }));
        });

        Self {
            previous: SILENCE_PANICS.replace(true),
        }
    }
}

impl Drop for PanicSilencer {
    fn drop(&mut self) {
        SILENCE_PANICS.set(self.previous);
    }
}
