use std::{borrow::Cow, process::ExitCode, time::Duration};

use crate::{
    aggregate::Totals,
    outcome::{TestFailure, TestOutcome},
};

/// The outcomes of one group, in declaration order.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct GroupOutcomes {
    pub name: Cow<'static, str>,
    pub outcomes: Vec<(Cow<'static, str>, TestOutcome)>,
}

pub type GroupedTestOutcomes = Vec<GroupOutcomes>;

/// A failed test, borrowed from a report.
#[derive(Debug, Clone, Copy)]
pub struct Failure<'o> {
    pub group: &'o str,
    pub name: &'o str,
    pub failure: &'o TestFailure,
}

#[derive(Debug)]
#[non_exhaustive]
pub struct RunReport<FmtError> {
    pub groups: GroupedTestOutcomes,
    pub totals: Totals,
    pub duration: Duration,
    pub fmt_errors: Vec<(&'static str, FmtError)>,
}

impl<FmtError> RunReport<FmtError> {
    pub fn success(&self) -> bool {
        self.totals.failed == 0
    }

    /// `0` when no test failed, `1` otherwise.
    pub fn exit_code(&self) -> ExitCode {
        match self.success() {
            true => ExitCode::SUCCESS,
            false => ExitCode::FAILURE,
        }
    }

    pub fn failures(&self) -> impl Iterator<Item = Failure<'_>> {
        failures(&self.groups)
    }

    /// Look up the outcome of a test by group and test name.
    pub fn outcome(&self, group: &str, name: &str) -> Option<&TestOutcome> {
        self.groups
            .iter()
            .filter(|outcomes| outcomes.name == group)
            .flat_map(|outcomes| outcomes.outcomes.iter())
            .find(|(test, _)| test == name)
            .map(|(_, outcome)| outcome)
    }
}

pub(crate) fn failures(groups: &[GroupOutcomes]) -> impl Iterator<Item = Failure<'_>> {
    groups.iter().flat_map(|group| {
        group.outcomes.iter().filter_map(move |(name, outcome)| {
            outcome.failure().map(|failure| Failure {
                group: group.name.as_ref(),
                name: name.as_ref(),
                failure,
            })
        })
    })
}
