//! Common helpers for formatter implementations.

pub mod color;

/// Frames of the spinner drawn in front of progress lines.
pub const SPINNER: [char; 4] = ['-', '\\', '|', '/'];

