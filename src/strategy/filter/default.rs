use crate::{
    filter::{FilterDecision, TestFilter},
    outcome::SkipReason,
    test::TestMeta,
};

/// Skip tests declared as skipped, and, once only-mode is active, every test
/// that is not marked as only.
///
/// An explicit skip wins over only.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DefaultFilter;

impl TestFilter for DefaultFilter {
    fn filter(&self, meta: &TestMeta, only_active: bool) -> FilterDecision {
        match (meta.skip, only_active, meta.only) {
            (true, _, _) => FilterDecision::Skip(SkipReason::Skipped),
            (false, true, false) => FilterDecision::Skip(SkipReason::NotOnly),
            _ => FilterDecision::Run,
        }
    }
}
