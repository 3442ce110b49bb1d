//! Run configuration.
//!
//! A [`Config`] is a snapshot taken when the engine starts running. Setting it
//! again through [`Engine::set_options`](crate::Engine::set_options) replaces the
//! whole snapshot.

use std::{env, fmt::Display, str::FromStr, time::Duration};

use crate::error::UsageError;

pub const RUN_PATTERN_VAR: &str = "TINYTEST_RUN_PATTERN";
pub const SUPPRESS_CONSOLE_VAR: &str = "TINYTEST_SUPPRESS_CONSOLE";

/// How the scheduler orders test execution.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum RunPattern {
    /// One item after another, each test is reported as soon as it settled.
    Serial,
    /// Every eligible body is launched up front and driven concurrently on one
    /// thread, reporting happens once all of them settled.
    #[default]
    Parallel,
}

impl RunPattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunPattern::Serial => "serial",
            RunPattern::Parallel => "parallel",
        }
    }
}

impl Display for RunPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RunPattern {
    type Err = UsageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "serial" => Ok(RunPattern::Serial),
            "parallel" => Ok(RunPattern::Parallel),
            _ => Err(UsageError::UnknownRunPattern(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PatternSource {
    Known(RunPattern),
    Raw(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    run_pattern: PatternSource,
    pub suppress_console: bool,
    pub progress_interval: Duration,
    pub timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            run_pattern: PatternSource::Known(RunPattern::default()),
            suppress_console: true,
            progress_interval: Duration::from_secs(1),
            timeout: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the configuration from `TINYTEST_*` environment variables.
    ///
    /// Unset variables keep their defaults. The run pattern is only validated
    /// once the engine starts scheduling.
    pub fn from_env() -> Result<Self, UsageError> {
        Self::from_vars(|var| env::var(var).ok())
    }

    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, UsageError> {
        let mut config = Self::default();
        if let Some(raw) = lookup(RUN_PATTERN_VAR) {
            config.run_pattern = PatternSource::Raw(raw);
        }
        if let Some(raw) = lookup(SUPPRESS_CONSOLE_VAR) {
            config.suppress_console = parse_flag(SUPPRESS_CONSOLE_VAR, &raw)?;
        }
        Ok(config)
    }

    pub fn with_run_pattern(self, run_pattern: RunPattern) -> Self {
        Self {
            run_pattern: PatternSource::Known(run_pattern),
            ..self
        }
    }

    pub fn with_suppress_console(self, suppress_console: bool) -> Self {
        Self {
            suppress_console,
            ..self
        }
    }

    pub fn with_progress_interval(self, progress_interval: Duration) -> Self {
        Self {
            progress_interval,
            ..self
        }
    }

    pub fn with_timeout(self, timeout: impl Into<Option<Duration>>) -> Self {
        Self {
            timeout: timeout.into(),
            ..self
        }
    }

    /// Resolve the configured run pattern.
    pub fn run_pattern(&self) -> Result<RunPattern, UsageError> {
        match &self.run_pattern {
            PatternSource::Known(pattern) => Ok(*pattern),
            PatternSource::Raw(raw) => raw.parse(),
        }
    }
}

fn parse_flag(var: &'static str, raw: &str) -> Result<bool, UsageError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(UsageError::InvalidFlag {
            var,
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn defaults_match_the_documented_values() {
        let config = Config::default();
        assert_eq!(config.run_pattern(), Ok(RunPattern::Parallel));
        assert!(config.suppress_console);
        assert_eq!(config.progress_interval, Duration::from_secs(1));
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn run_pattern_parses_case_insensitive() {
        assert_eq!("Serial".parse(), Ok(RunPattern::Serial));
        assert_eq!(" parallel ".parse(), Ok(RunPattern::Parallel));
        assert_eq!(
            "random".parse::<RunPattern>(),
            Err(UsageError::UnknownRunPattern("random".into()))
        );
    }

    #[test]
    fn env_values_are_read() {
        let config = Config::from_vars(vars(&[
            (RUN_PATTERN_VAR, "serial"),
            (SUPPRESS_CONSOLE_VAR, "false"),
        ]))
        .unwrap();
        assert_eq!(config.run_pattern(), Ok(RunPattern::Serial));
        assert!(!config.suppress_console);
    }

    #[test]
    fn unknown_env_pattern_fails_on_resolve_only() {
        let config = Config::from_vars(vars(&[(RUN_PATTERN_VAR, "shuffled")])).unwrap();
        assert_eq!(
            config.run_pattern(),
            Err(UsageError::UnknownRunPattern("shuffled".into()))
        );
    }

    #[test]
    fn invalid_flag_is_rejected() {
        let err = Config::from_vars(vars(&[(SUPPRESS_CONSOLE_VAR, "maybe")])).unwrap_err();
        assert_eq!(
            err,
            UsageError::InvalidFlag {
                var: SUPPRESS_CONSOLE_VAR,
                value: "maybe".into()
            }
        );
    }
}
