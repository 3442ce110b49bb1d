//! The engine: registration API and run entry point.
//!
//! An [`Engine`] owns everything a run needs: the registry of declared groups,
//! the configuration snapshot, the filter and the formatter. Tests are declared
//! first, then [`Engine::run`] consumes the engine, so nothing can be declared
//! or reconfigured once scheduling began.
//!
//! ```no_run
//! use std::process::ExitCode;
//!
//! fn main() -> ExitCode {
//!     let mut engine = tinytest::engine();
//!     engine.group("math", |g| {
//!         g.test("adds", |ctx| async move { ctx.check(1 + 1 == 2, "sum") });
//!         g.skip("not yet", |_| async {});
//!     });
//!
//!     match engine.run() {
//!         Ok(report) => report.exit_code(),
//!         Err(err) => {
//!             eprintln!("{err}");
//!             ExitCode::FAILURE
//!         }
//!     }
//! }
//! ```

use std::{borrow::Cow, future::Future, io};

use crate::{
    config::Config,
    context::TestContext,
    error::UsageError,
    filter::{DefaultFilter, TestFilter},
    formatter::{TestFormatter, pretty::PrettyFormatter},
    group::GroupMode,
    registry::Registry,
    test::{Setup, Test, TestFnHandle, TestMeta, TestOptions, TestResult},
};

mod builder;
pub use builder::GroupBuilder;

mod run;

pub struct Engine<Filter = DefaultFilter, Formatter = PrettyFormatter<io::Stdout>> {
    pub(crate) registry: Registry,
    pub(crate) config: Config,
    pub(crate) filter: Filter,
    pub(crate) formatter: Formatter,
}

/// An engine with the default filter, rendering to stdout.
pub fn engine() -> Engine {
    Engine::default()
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            registry: Registry::default(),
            config: Config::default(),
            filter: DefaultFilter,
            formatter: PrettyFormatter::default(),
        }
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<Filter, Formatter> Engine<Filter, Formatter> {
    /// Declare a group. `body` runs immediately and declares the group's items.
    pub fn group<B>(&mut self, name: impl Into<Cow<'static, str>>, body: B) -> &mut Self
    where
        B: FnOnce(&mut GroupBuilder<'_>),
    {
        self.declare_group(name, GroupMode::Normal, body)
    }

    /// Declare a group where every test is skipped.
    pub fn skip_group<B>(&mut self, name: impl Into<Cow<'static, str>>, body: B) -> &mut Self
    where
        B: FnOnce(&mut GroupBuilder<'_>),
    {
        self.declare_group(name, GroupMode::Skip, body)
    }

    /// Declare a group where every test is marked as only.
    pub fn only_group<B>(&mut self, name: impl Into<Cow<'static, str>>, body: B) -> &mut Self
    where
        B: FnOnce(&mut GroupBuilder<'_>),
    {
        self.declare_group(name, GroupMode::Only, body)
    }

    fn declare_group<B>(
        &mut self,
        name: impl Into<Cow<'static, str>>,
        mode: GroupMode,
        body: B,
    ) -> &mut Self
    where
        B: FnOnce(&mut GroupBuilder<'_>),
    {
        let group = self.registry.push_group(name, mode);
        body(&mut GroupBuilder::new(&mut self.registry, group));
        self
    }

    /// Declare a test in the most recently declared group.
    pub fn test<F, Fut>(
        &mut self,
        name: impl Into<Cow<'static, str>>,
        f: F,
    ) -> Result<&mut Self, UsageError>
    where
        F: Fn(TestContext) -> Fut + 'static,
        Fut: Future + 'static,
        Fut::Output: Into<TestResult>,
    {
        self.test_with(name, f, TestOptions::default())
    }

    /// Declare a skipped test in the most recently declared group.
    pub fn skip<F, Fut>(
        &mut self,
        name: impl Into<Cow<'static, str>>,
        f: F,
    ) -> Result<&mut Self, UsageError>
    where
        F: Fn(TestContext) -> Fut + 'static,
        Fut: Future + 'static,
        Fut::Output: Into<TestResult>,
    {
        self.test_with(name, f, TestOptions::SKIP)
    }

    /// Declare an only test in the most recently declared group.
    ///
    /// This activates only-mode for the whole run, unless the group is a
    /// skipped group.
    pub fn only<F, Fut>(
        &mut self,
        name: impl Into<Cow<'static, str>>,
        f: F,
    ) -> Result<&mut Self, UsageError>
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
    ) -> Result<&mut Self, UsageError>
    where
        F: Fn(TestContext) -> Fut + 'static,
        Fut: Future + 'static,
        Fut::Output: Into<TestResult>,
    {
        let group = self
            .registry
            .current_group()
            .ok_or(UsageError::NoActiveGroup { what: "a test" })?;
        self.registry.push_test(
            group,
            Test::new(
                TestFnHandle::new(f),
                TestMeta {
                    name: name.into(),
                    skip: options.skip,
                    only: options.only,
                },
            ),
        );
        Ok(self)
    }

    /// Declare a setup block in the most recently declared group.
    pub fn setup<F, Fut>(&mut self, f: F) -> Result<&mut Self, UsageError>
    where
        F: Fn() -> Fut + 'static,
        Fut: Future + 'static,
        Fut::Output: Into<TestResult>,
    {
        let group = self
            .registry
            .current_group()
            .ok_or(UsageError::NoActiveGroup { what: "a setup block" })?;
        self.registry.push_setup(group, Setup::new(f));
        Ok(self)
    }

    /// Replace the configuration snapshot.
    pub fn set_options(&mut self, config: Config) -> &mut Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn with_config(self, config: Config) -> Self {
        Self { config, ..self }
    }

    pub fn with_filter<WithFilter: TestFilter>(
        self,
        filter: WithFilter,
    ) -> Engine<WithFilter, Formatter> {
        Engine {
            registry: self.registry,
            config: self.config,
            filter,
            formatter: self.formatter,
        }
    }

    pub fn with_formatter<WithFormatter: TestFormatter>(
        self,
        formatter: WithFormatter,
    ) -> Engine<Filter, WithFormatter> {
        Engine {
            registry: self.registry,
            config: self.config,
            filter: self.filter,
            formatter,
        }
    }
}
