//! The ordered collection of everything declared before a run.

use std::borrow::Cow;

use crate::{
    group::{Group, GroupMode, Item},
    test::{Setup, Test},
};

/// Groups in declaration order.
///
/// The registry only grows while tests are declared and is read only once the
/// engine runs. It also tracks the number of declared tests and whether any test
/// was declared with only-mode, which stays active for the rest of the run.
#[derive(Debug, Default)]
pub struct Registry {
    groups: Vec<Group>,
    declared: usize,
    only_active: bool,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_group(&mut self, name: impl Into<Cow<'static, str>>, mode: GroupMode) -> usize {
        self.groups.push(Group::new(name, mode));
        self.groups.len() - 1
    }

    /// Append a test to the group at `group`, applying the group mode.
    pub fn push_test(&mut self, group: usize, mut test: Test) {
        let group = &mut self.groups[group];
        match group.mode {
            GroupMode::Normal => (),
            GroupMode::Skip => test.meta.skip = true,
            GroupMode::Only => test.meta.only = true,
        }

        // A skipped test never runs, so it cannot narrow the run either.
        if test.meta.only && !test.meta.skip {
            self.only_active = true;
        }
        self.declared += 1;
        group.items.push(Item::Test(test));
    }

    pub fn push_setup(&mut self, group: usize, setup: Setup) {
        self.groups[group].items.push(Item::Setup(setup));
    }

    /// Index of the most recently declared group.
    pub fn current_group(&self) -> Option<usize> {
        self.groups.len().checked_sub(1)
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn declared(&self) -> usize {
        self.declared
    }

    pub fn only_active(&self) -> bool {
        self.only_active
    }
}
