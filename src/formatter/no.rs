use crate::formatter::TestFormatter;

/// A formatter that produces no output.
///
/// `NoFormatter` accepts every event and discards it. Useful when the
/// [`RunReport`](crate::RunReport) is all that matters, for example when a
/// tinytest run is embedded in another tool that does its own reporting.
#[derive(Debug, Default, Clone)]
pub struct NoFormatter;

impl TestFormatter for NoFormatter {
    type Error = ();
}
