use std::io;

use thiserror::Error;

/// Misuse of the registration or configuration API.
///
/// These are fatal: they are reported before any test body runs.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum UsageError {
    #[error("cannot declare {what} outside of a group, declare a group first")]
    NoActiveGroup { what: &'static str },

    #[error("unknown run pattern {0:?}, expected \"serial\" or \"parallel\"")]
    UnknownRunPattern(String),

    #[error("invalid value {value:?} for {var}, expected \"true\" or \"false\"")]
    InvalidFlag { var: &'static str, value: String },
}

/// Errors that stop [`Engine::run`](crate::Engine::run) before it produces a report.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RunError {
    #[error(transparent)]
    Usage(#[from] UsageError),

    #[error("failed to start the async runtime: {0}")]
    Runtime(#[from] io::Error),
}
