//! Pluggable pieces of the engine: filtering, scheduling and failure capture.

pub mod filter;
pub mod panic;
pub mod runner;
