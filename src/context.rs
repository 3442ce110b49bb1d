//! The handle a running test body receives.
//!
//! Every test gets its own [`TestContext`]. Story annotations and console lines
//! are attached to the test owning the context, so concurrently running tests
//! never see each other's annotations.

use std::{borrow::Cow, cell::RefCell, fmt::Display, future::Future, mem, rc::Rc};

use thiserror::Error;

use crate::formatter::{FmtConsole, FmtEvent, FmtSender};

/// A failed check from one of the assertion helpers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AssertionError {
    #[error("assertion failed: {label}")]
    Failed { label: String },

    #[error("expected a rejection but it resolved: {label}")]
    NotRejected { label: String },
}

#[derive(Debug, Clone)]
pub struct TestContext {
    inner: Rc<ContextInner>,
}

#[derive(Debug)]
struct ContextInner {
    name: Cow<'static, str>,
    stories: RefCell<Vec<String>>,
    console: Option<FmtSender>,
}

impl TestContext {
    pub(crate) fn new(name: Cow<'static, str>, console: Option<FmtSender>) -> Self {
        Self {
            inner: Rc::new(ContextInner {
                name,
                stories: RefCell::default(),
                console,
            }),
        }
    }

    /// Name of the test this context belongs to.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Fail with `label` unless `cond` holds.
    pub fn check(&self, cond: bool, label: impl Into<String>) -> Result<(), AssertionError> {
        match cond {
            true => Ok(()),
            false => Err(AssertionError::Failed {
                label: label.into(),
            }),
        }
    }

    /// Like [`check`](Self::check), but on success `description` is recorded as
    /// a story annotation of this test.
    pub fn story(
        &self,
        description: impl Into<String>,
        cond: bool,
    ) -> Result<(), AssertionError> {
        let description = description.into();
        match cond {
            true => {
                self.inner.stories.borrow_mut().push(description);
                Ok(())
            }
            false => Err(AssertionError::Failed { label: description }),
        }
    }

    /// Write a console line for this test.
    ///
    /// Dropped when the run suppresses console output.
    pub fn log(&self, line: impl Display) {
        if let Some(console) = &self.inner.console {
            let _ = console.send(FmtEvent::Console(FmtConsole {
                test: self.inner.name.clone(),
                line: line.to_string(),
            }));
        }
    }

    pub(crate) fn take_stories(&self) -> Vec<String> {
        mem::take(&mut *self.inner.stories.borrow_mut())
    }
}

/// Expect `fut` to settle with an error, then hand that error to `validate`.
///
/// Fails with [`AssertionError::NotRejected`] when `fut` resolves to `Ok`.
pub async fn expect_reject<Fut, T, E, V>(
    label: impl Into<String>,
    fut: Fut,
    validate: V,
) -> Result<(), AssertionError>
where
    Fut: Future<Output = Result<T, E>>,
    V: FnOnce(E) -> Result<(), AssertionError>,
{
    match fut.await {
        Ok(_) => Err(AssertionError::NotRejected {
            label: label.into(),
        }),
        Err(err) => validate(err),
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn stories_are_recorded_on_success_only() {
        let ctx = TestContext::new("story".into(), None);
        assert_eq!(ctx.story("strings match", "a" == "a"), Ok(()));
        assert_eq!(
            ctx.story("numbers match", 1 == 2),
            Err(AssertionError::Failed {
                label: "numbers match".into()
            })
        );
        assert_eq!(ctx.take_stories(), vec![String::from("strings match")]);
        assert!(ctx.take_stories().is_empty());
    }

    #[test]
    fn clones_share_annotations() {
        let ctx = TestContext::new("shared".into(), None);
        let clone = ctx.clone();
        clone.story("from clone", true).unwrap();
        assert_eq!(ctx.take_stories(), vec![String::from("from clone")]);
    }

    #[test]
    fn check_reports_label() {
        let ctx = TestContext::new("check".into(), None);
        let err = ctx.check(false, "L9s1unY6L").unwrap_err();
        assert_eq!(err.to_string(), "assertion failed: L9s1unY6L");
    }

    #[test]
    fn log_goes_to_console_sender() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let ctx = TestContext::new("logger".into(), Some(tx));
        ctx.log("hello");
        match rx.try_recv() {
            Ok(FmtEvent::Console(FmtConsole { test, line })) => {
                assert_eq!(test, "logger");
                assert_eq!(line, "hello");
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn expect_reject_validates_errors() {
        let rejected = block_on(expect_reject(
            "RW_IV4dSz",
            async { Err::<(), _>("EXAMPLE_ERROR_MESSAGE") },
            |msg| {
                TestContext::new("validate".into(), None)
                    .check(msg == "EXAMPLE_ERROR_MESSAGE", "h7gNKWkPS")
            },
        ));
        assert_eq!(rejected, Ok(()));

        let resolved = block_on(expect_reject(
            "resolves",
            async { Ok::<_, &str>(5) },
            |_| Ok(()),
        ));
        assert_eq!(
            resolved,
            Err(AssertionError::NotRejected {
                label: "resolves".into()
            })
        );
    }
}
