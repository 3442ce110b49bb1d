use std::sync::LazyLock;

use regex::Regex;

static MILLIS_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Matches the duration column of a test line: `   12ms`
    Regex::new(r"   \d+ms").unwrap()
});

static TOTAL_TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Total Time: \d+\.\d{2}s").unwrap());

pub fn sanitize_durations(input: &str) -> String {
    let tmp = MILLIS_RE.replace_all(input, "   <ms>");
    let tmp = TOTAL_TIME_RE.replace_all(tmp.as_ref(), "Total Time: <time>");
    tmp.to_string()
}
