use std::{borrow::Cow, future::Future};

use crate::{
    context::TestContext,
    registry::Registry,
    test::{Setup, Test, TestFnHandle, TestMeta, TestOptions, TestResult},
};

/// Declares the items of a single group.
///
/// Handed to the body passed to [`Engine::group`](crate::Engine::group). The body
/// is a plain closure, group declaration never suspends.
#[derive(Debug)]
pub struct GroupBuilder<'r> {
    registry: &'r mut Registry,
    group: usize,
}

impl<'r> GroupBuilder<'r> {
    pub(crate) fn new(registry: &'r mut Registry, group: usize) -> Self {
        Self { registry, group }
    }

    pub fn test<F, Fut>(&mut self, name: impl Into<Cow<'static, str>>, f: F) -> &mut Self
    where
        F: Fn(TestContext) -> Fut + 'static,
        Fut: Future + 'static,
        Fut::Output: Into<TestResult>,
    {
        self.test_with(name, f, TestOptions::default())
    }

    /// Declare a test that is never executed and always counted as skipped.
    pub fn skip<F, Fut>(&mut self, name: impl Into<Cow<'static, str>>, f: F) -> &mut Self
    where
        F: Fn(TestContext) -> Fut + 'static,
        Fut: Future + 'static,
        Fut::Output: Into<TestResult>,
    {
        self.test_with(name, f, TestOptions::SKIP)
    }

    /// Declare an only test. From now on, every test of the run that is not
    /// marked as only is skipped, including those declared earlier.
    ///
    /// Inside a [`skip_group`](crate::Engine::skip_group) the test is skipped
    /// and does not activate only-mode.
    pub fn only<F, Fut>(&mut self, name: impl Into<Cow<'static, str>>, f: F) -> &mut Self
    where
        F: Fn(TestContext) -> Fut + 'static,
        Fut: Future + 'static,
        Fut::Output: Into<TestResult>,
    {
        self.test_with(name, f, TestOptions::ONLY)
    }

    pub fn test_with<F, Fut>(
        &mut self,
        name: impl Into<Cow<'static, str>>,
        f: F,
        options: TestOptions,
    ) -> &mut Self
    where
        F: Fn(TestContext) -> Fut + 'static,
        Fut: Future + 'static,
        Fut::Output: Into<TestResult>,
    {
        let meta = TestMeta {
            name: name.into(),
            skip: options.skip,
            only: options.only,
        };
        self.registry
            .push_test(self.group, Test::new(TestFnHandle::new(f), meta));
        self
    }

    /// Declare a setup block. It runs in declaration order relative to the
    /// group's tests, has no outcome, and its failures are only logged.
    pub fn setup<F, Fut>(&mut self, f: F) -> &mut Self
    where
        F: Fn() -> Fut + 'static,
        Fut: Future + 'static,
        Fut::Output: Into<TestResult>,
    {
        self.registry.push_setup(self.group, Setup::new(f));
        self
    }
}
