use std::borrow::Cow;

use crate::test::{Setup, Test};

/// Selection mode inherited by every test declared in a group.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum GroupMode {
    #[default]
    Normal,
    Skip,
    Only,
}

#[derive(Debug)]
pub enum Item {
    Setup(Setup),
    Test(Test),
}

impl Item {
    pub fn as_test(&self) -> Option<&Test> {
        match self {
            Item::Test(test) => Some(test),
            Item::Setup(_) => None,
        }
    }
}

/// A named collection of items, reported together under one header.
#[derive(Debug)]
pub struct Group {
    pub name: Cow<'static, str>,
    pub mode: GroupMode,
    pub(crate) items: Vec<Item>,
}

impl Group {
    pub fn new(name: impl Into<Cow<'static, str>>, mode: GroupMode) -> Self {
        Self {
            name: name.into(),
            mode,
            items: Vec::new(),
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn tests(&self) -> impl Iterator<Item = &Test> {
        self.items.iter().filter_map(Item::as_test)
    }

    pub fn test_count(&self) -> usize {
        self.tests().count()
    }
}
