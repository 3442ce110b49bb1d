//! Output formatting for tinytest.
//!
//! The engine never writes to the console itself. It produces formatter events
//! and hands them to a [`TestFormatter`], which decides how (and whether) they
//! are rendered. Suppressing output is therefore a choice of formatter, see
//! [`NoFormatter`](no::NoFormatter).
//!
//! During a run the events are streamed over a channel to a dedicated formatter
//! thread. Only the final [`FmtRunOutcomes`] is delivered on the calling thread,
//! after every test settled.

use std::{borrow::Cow, time::Duration};

use crate::{
    aggregate::Totals, config::RunPattern, outcome::TestOutcome, report::Failure,
    strategy::filter::FilterDecision,
};

/// Tag a formatter call's error with the name of the formatter method.
macro_rules! named_fmt {
    ($formatter:ident.$method:ident($data:expr)) => {
        $formatter
            .$method($data)
            .map_err(|err| (stringify!($method), err))
    };
}

pub(crate) use named_fmt;

pub mod common;
pub mod no;
pub mod pretty;

#[derive(Debug, Clone)]
pub struct FmtRunStart {
    pub groups: usize,
    pub declared: usize,
    pub run_pattern: RunPattern,
}

#[derive(Debug, Clone)]
pub struct FmtGroupStart {
    pub name: Cow<'static, str>,
    pub tests: usize,
}

#[derive(Debug, Clone)]
pub struct FmtGroupEnd {
    pub name: Cow<'static, str>,
}

#[derive(Debug, Clone)]
pub struct FmtTestOutcome {
    pub name: Cow<'static, str>,
    pub outcome: TestOutcome,
}

/// Live counters, emitted periodically while parallel work is outstanding.
#[derive(Debug, Clone, Copy)]
pub struct FmtProgress {
    pub totals: Totals,
}

/// A line logged by a running test through its context.
#[derive(Debug, Clone)]
pub struct FmtConsole {
    pub test: Cow<'static, str>,
    pub line: String,
}

#[derive(Debug, Clone)]
pub struct FmtRunOutcomes<'o> {
    pub totals: Totals,
    pub duration: Duration,
    pub failures: Vec<Failure<'o>>,
}

#[derive(Debug, Clone)]
pub struct FmtListTest<'t> {
    pub name: &'t str,
    pub decision: FilterDecision,
}

#[derive(Debug, Clone, Copy)]
pub struct FmtEndListing {
    pub active: usize,
    pub skipped: usize,
}

/// Receives the events of a run and renders them.
///
/// Every method has a no-op default so a formatter only implements what it
/// cares about.
pub trait TestFormatter {
    type Error;

    fn fmt_run_start(&mut self, data: FmtRunStart) -> Result<(), Self::Error> {
        let _ = data;
        Ok(())
    }

    fn fmt_group_start(&mut self, data: FmtGroupStart) -> Result<(), Self::Error> {
        let _ = data;
        Ok(())
    }

    fn fmt_group_end(&mut self, data: FmtGroupEnd) -> Result<(), Self::Error> {
        let _ = data;
        Ok(())
    }

    fn fmt_test_outcome(&mut self, data: FmtTestOutcome) -> Result<(), Self::Error> {
        let _ = data;
        Ok(())
    }

    fn fmt_progress(&mut self, data: FmtProgress) -> Result<(), Self::Error> {
        let _ = data;
        Ok(())
    }

    fn fmt_console(&mut self, data: FmtConsole) -> Result<(), Self::Error> {
        let _ = data;
        Ok(())
    }

    fn fmt_run_outcomes(&mut self, data: FmtRunOutcomes<'_>) -> Result<(), Self::Error> {
        let _ = data;
        Ok(())
    }

    fn fmt_list_group(&mut self, data: FmtGroupStart) -> Result<(), Self::Error> {
        let _ = data;
        Ok(())
    }

    fn fmt_list_test(&mut self, data: FmtListTest<'_>) -> Result<(), Self::Error> {
        let _ = data;
        Ok(())
    }

    fn fmt_end_listing(&mut self, data: FmtEndListing) -> Result<(), Self::Error> {
        let _ = data;
        Ok(())
    }
}

/// Formatter events sent from the scheduler to the formatter thread.
#[derive(Debug, Clone)]
pub(crate) enum FmtEvent {
    GroupStart(FmtGroupStart),
    GroupEnd(FmtGroupEnd),
    TestOutcome(FmtTestOutcome),
    Progress(FmtProgress),
    Console(FmtConsole),
}

pub(crate) type FmtSender = crossbeam_channel::Sender<FmtEvent>;

impl FmtEvent {
    pub(crate) fn dispatch<F: TestFormatter>(
        self,
        formatter: &mut F,
    ) -> Result<(), (&'static str, F::Error)> {
        match self {
            FmtEvent::GroupStart(data) => named_fmt!(formatter.fmt_group_start(data)),
            FmtEvent::GroupEnd(data) => named_fmt!(formatter.fmt_group_end(data)),
            FmtEvent::TestOutcome(data) => named_fmt!(formatter.fmt_test_outcome(data)),
            FmtEvent::Progress(data) => named_fmt!(formatter.fmt_progress(data)),
            FmtEvent::Console(data) => named_fmt!(formatter.fmt_console(data)),
        }
    }
}

pub(crate) trait FmtErrors<E> {
    fn push_on_error(&mut self, result: Result<(), (&'static str, E)>);
}

impl<E> FmtErrors<E> for Vec<(&'static str, E)> {
    fn push_on_error(&mut self, result: Result<(), (&'static str, E)>) {
        if let Err(err) = result {
            self.push(err);
        }
    }
}
