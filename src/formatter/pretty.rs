use std::io;

use crate::{
    aggregate::Totals,
    filter::FilterDecision,
    formatter::{
        common::{
            SPINNER,
            color::{ColorSetting, SupportsColor, colors::*, paint},
        },
        *,
    },
    outcome::TestStatus,
};

/// The default formatter.
///
/// Prints a cyan header per group, one line per test with its duration and
/// stories, an error block listing every failure and the final totals followed
/// by a `SUCCESS` or `FAILED` banner.
#[derive(Debug)]
pub struct PrettyFormatter<W: io::Write> {
    target: W,
    color_setting: ColorSetting,
    spinner: usize,
    progress_line: bool,
}

impl Default for PrettyFormatter<io::Stdout> {
    fn default() -> Self {
        Self {
            target: io::stdout(),
            color_setting: Default::default(),
            spinner: 0,
            progress_line: false,
        }
    }
}

impl<W: io::Write> PrettyFormatter<W> {
    pub fn with_target<WithTarget: io::Write>(
        self,
        with_target: WithTarget,
    ) -> PrettyFormatter<WithTarget> {
        PrettyFormatter {
            target: with_target,
            color_setting: self.color_setting,
            spinner: self.spinner,
            progress_line: self.progress_line,
        }
    }

    pub fn with_color_setting(self, color_setting: impl Into<ColorSetting>) -> Self {
        PrettyFormatter {
            color_setting: color_setting.into(),
            ..self
        }
    }
}

impl<W: io::Write + SupportsColor> PrettyFormatter<W> {
    /// Return whether this formatter will currently emit colored output.
    pub fn use_color(&self) -> bool {
        match self.color_setting {
            ColorSetting::Automatic => self.target.supports_color(),
            ColorSetting::Always => true,
            ColorSetting::Never => false,
        }
    }

    /// Terminate a pending progress line so the next output starts clean.
    fn finish_progress(&mut self) -> io::Result<()> {
        if std::mem::take(&mut self.progress_line) {
            writeln!(self.target)?;
        }
        Ok(())
    }

    fn status_line(&self, totals: Totals) -> String {
        let color = self.use_color();
        format!(
            "STATUS passed: {}   failed: {}   skipped: {}   remaining: {}",
            paint(color, GREEN, totals.passed),
            paint(color, RED, totals.failed),
            paint(color, YELLOW, totals.skipped),
            totals.remaining(),
        )
    }
}

impl<W: io::Write + SupportsColor + Send> TestFormatter for PrettyFormatter<W> {
    type Error = io::Error;

    fn fmt_group_start(&mut self, data: FmtGroupStart) -> Result<(), Self::Error> {
        self.finish_progress()?;
        let color = self.use_color();
        writeln!(self.target, "{}", paint(color, CYAN, &data.name))
    }

    fn fmt_group_end(&mut self, _: FmtGroupEnd) -> Result<(), Self::Error> {
        writeln!(self.target)
    }

    fn fmt_test_outcome(&mut self, data: FmtTestOutcome) -> Result<(), Self::Error> {
        self.finish_progress()?;
        let color = self.use_color();
        let millis = data.outcome.duration.as_millis();
        match data.outcome.status {
            TestStatus::Passed => {
                writeln!(
                    self.target,
                    "{}   {millis}ms",
                    paint(color, GREEN, format_args!("  ✓ {}", data.name))
                )?;
                for story in data.outcome.stories {
                    writeln!(self.target, "      ↳ {story}")?;
                }
            }
            TestStatus::Failed(_) => writeln!(
                self.target,
                "{}   {millis}ms",
                paint(color, RED, format_args!("  ✗ {}", data.name))
            )?,
            TestStatus::Skipped(_) => writeln!(
                self.target,
                "{}",
                paint(color, GRAY, format_args!("  - {}", data.name))
            )?,
        }
        Ok(())
    }

    fn fmt_progress(&mut self, data: FmtProgress) -> Result<(), Self::Error> {
        let spin = SPINNER[self.spinner % SPINNER.len()];
        self.spinner += 1;
        let line = self.status_line(data.totals);

        // Redraw in place on a terminal, elsewhere every update is its own line.
        match self.target.supports_color() {
            true => {
                write!(self.target, "\r\x1b[2K{spin} {line}")?;
                self.progress_line = true;
                self.target.flush()
            }
            false => writeln!(self.target, "{spin} {line}"),
        }
    }

    fn fmt_console(&mut self, data: FmtConsole) -> Result<(), Self::Error> {
        self.finish_progress()?;
        writeln!(self.target, "{}", data.line)
    }

    fn fmt_run_outcomes(&mut self, data: FmtRunOutcomes<'_>) -> Result<(), Self::Error> {
        self.finish_progress()?;
        let color = self.use_color();
        let red = |text: &dyn std::fmt::Display| paint(color, RED, text);

        if !data.failures.is_empty() {
            writeln!(self.target)?;
            writeln!(self.target, "{}", red(&"_________"))?;
            writeln!(self.target, "{}", red(&"| ERRORS"))?;
            writeln!(self.target, "{}", red(&"|"))?;
            for failure in data.failures.iter() {
                writeln!(self.target, "{}", red(&format_args!("| Test: {}", failure.name)))?;
                writeln!(
                    self.target,
                    "{}",
                    red(&format_args!("| Error: {}", failure.failure))
                )?;
                writeln!(self.target, "{}", red(&"|"))?;
            }
            writeln!(self.target, "{}", red(&"_________"))?;
        }

        let Totals {
            passed,
            failed,
            skipped,
            ..
        } = data.totals;
        writeln!(self.target)?;
        writeln!(self.target, "Total Tests Passed:  {}", paint(color, GREEN, passed))?;
        writeln!(self.target, "Total Tests Failed:  {}", red(&failed))?;
        writeln!(self.target, "Total Tests Skipped: {}", paint(color, YELLOW, skipped))?;
        writeln!(self.target, "Total Time: {:.2}s", data.duration.as_secs_f64())?;

        match failed {
            0 => {
                writeln!(self.target, "{}", paint(color, GREEN, "-----------"))?;
                writeln!(self.target, "{}", paint(color, GREEN, "- SUCCESS -"))?;
                writeln!(self.target, "{}", paint(color, GREEN, "-----------"))
            }
            _ => {
                writeln!(self.target)?;
                writeln!(self.target, "{}", red(&"----------"))?;
                writeln!(self.target, "{}", red(&"- FAILED -"))?;
                writeln!(self.target, "{}", red(&"----------"))
            }
        }
    }

    fn fmt_list_group(&mut self, data: FmtGroupStart) -> Result<(), Self::Error> {
        let color = self.use_color();
        writeln!(self.target, "{}", paint(color, CYAN, &data.name))
    }

    fn fmt_list_test(&mut self, data: FmtListTest<'_>) -> Result<(), Self::Error> {
        match data.decision {
            FilterDecision::Run => writeln!(self.target, "  {}: test", data.name),
            FilterDecision::Skip(_) => writeln!(self.target, "  {}: test (skipped)", data.name),
        }
    }

    fn fmt_end_listing(&mut self, data: FmtEndListing) -> Result<(), Self::Error> {
        writeln!(
            self.target,
            "\n{} tests, {} skipped",
            data.active + data.skipped,
            data.skipped
        )
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        outcome::{SkipReason, TestFailure, TestOutcome},
        report::Failure,
        test_support::Buffer,
    };

    fn formatter() -> (Buffer, PrettyFormatter<Buffer>) {
        let buffer = Buffer::default();
        let formatter = PrettyFormatter::default().with_target(buffer.clone());
        (buffer, formatter)
    }

    fn outcome(status: TestStatus, millis: u64, stories: &[&str]) -> TestOutcome {
        TestOutcome {
            status,
            duration: Duration::from_millis(millis),
            stories: stories.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn renders_test_lines() {
        let (buffer, mut formatter) = formatter();
        formatter
            .fmt_group_start(FmtGroupStart {
                name: "G".into(),
                tests: 3,
            })
            .unwrap();
        for (name, status, stories) in [
            ("A", TestStatus::Passed, &["it works"][..]),
            (
                "B",
                TestStatus::Failed(TestFailure::Error("boom".into())),
                &["checked before the failure"][..],
            ),
            ("C", TestStatus::Skipped(SkipReason::NotOnly), &[][..]),
        ] {
            formatter
                .fmt_test_outcome(FmtTestOutcome {
                    name: name.into(),
                    outcome: outcome(status, 3, stories),
                })
                .unwrap();
        }
        formatter.fmt_group_end(FmtGroupEnd { name: "G".into() }).unwrap();

        assert_eq!(
            buffer.try_to_string().unwrap(),
            "G\n  ✓ A   3ms\n      ↳ it works\n  ✗ B   3ms\n  - C\n\n"
        );
    }

    #[test]
    fn progress_lines_are_full_lines_off_terminal() {
        let (buffer, mut formatter) = formatter();
        let totals = Totals {
            passed: 1,
            failed: 0,
            skipped: 1,
            declared: 4,
        };
        formatter.fmt_progress(FmtProgress { totals }).unwrap();
        formatter.fmt_progress(FmtProgress { totals }).unwrap();

        assert_eq!(
            buffer.try_to_string().unwrap(),
            "- STATUS passed: 1   failed: 0   skipped: 1   remaining: 2\n\
             \\ STATUS passed: 1   failed: 0   skipped: 1   remaining: 2\n"
        );
    }

    #[test]
    fn summary_lists_failures() {
        let (buffer, mut formatter) = formatter();
        let failure = TestFailure::Panicked("oh no".into());
        formatter
            .fmt_run_outcomes(FmtRunOutcomes {
                totals: Totals {
                    passed: 2,
                    failed: 1,
                    skipped: 0,
                    declared: 3,
                },
                duration: Duration::from_millis(1500),
                failures: vec![Failure {
                    group: "G",
                    name: "B",
                    failure: &failure,
                }],
            })
            .unwrap();

        assert_eq!(
            buffer.try_to_string().unwrap(),
            "\n_________\n| ERRORS\n|\n| Test: B\n| Error: panicked: oh no\n|\n_________\n\
             \nTotal Tests Passed:  2\nTotal Tests Failed:  1\nTotal Tests Skipped: 0\n\
             Total Time: 1.50s\n\n----------\n- FAILED -\n----------\n"
        );
    }

    #[test]
    fn colors_can_be_forced() {
        let (buffer, formatter) = formatter();
        let mut formatter = formatter.with_color_setting(true);
        assert!(formatter.use_color());
        formatter
            .fmt_group_start(FmtGroupStart {
                name: "G".into(),
                tests: 0,
            })
            .unwrap();
        assert_eq!(buffer.try_to_string().unwrap(), "\x1b[36mG\x1b[0m\n");
    }
}
