//! A tiny async test harness.
//!
//! Tests are declared in named groups on an [`Engine`], optionally skipped or
//! exclusively selected, and then run either one after another or concurrently
//! on a single thread. The engine keeps pass, fail and skip counts, renders a
//! report through a formatter and hands back a [`RunReport`] whose
//! [`exit_code`](RunReport::exit_code) is the process-level result.

pub mod aggregate;
pub mod config;
pub mod context;
pub mod error;
pub mod formatter;
pub mod group;
pub mod outcome;
pub mod registry;

mod strategy;
pub use strategy::*;

mod engine;
pub use engine::*;

mod report;
pub use report::*;

pub use config::{Config, RunPattern};
pub use context::{AssertionError, TestContext, expect_reject};
pub use error::{RunError, UsageError};

#[cfg(test)]
mod test_support;
