//! Test selection for tinytest.
//!
//! A filter decides per test whether it runs or is skipped. Skipped tests stay
//! part of the run: they are counted as skipped and still show up in the report,
//! they just never have their body invoked.
//!
//! The default behavior implements skip and only semantics, see
//! [`DefaultFilter`]. Implement [`TestFilter`] (or pass a closure) to select
//! tests differently.

use crate::{outcome::SkipReason, test::TestMeta};

mod default;
pub use default::*;

/// The decision a [`TestFilter`] made for a single test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDecision {
    Run,
    Skip(SkipReason),
}

impl FilterDecision {
    pub fn runs(&self) -> bool {
        matches!(self, FilterDecision::Run)
    }
}

/// A strategy for deciding whether a test body is executed.
///
/// `only_active` is true once any test of the run was declared with only-mode,
/// regardless of whether it was declared before or after `meta`.
pub trait TestFilter {
    fn filter(&self, meta: &TestMeta, only_active: bool) -> FilterDecision;
}

impl<F> TestFilter for F
where
    F: Fn(&TestMeta, bool) -> FilterDecision,
{
    fn filter(&self, meta: &TestMeta, only_active: bool) -> FilterDecision {
        self(meta, only_active)
    }
}
