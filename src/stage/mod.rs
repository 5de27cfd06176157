//! Stage abstraction shared by every mapper and reducer
//!
//! A stage is a single-pass line consumer. The runner feeds it one trimmed
//! line at a time and calls [`Stage::finish`] once at end-of-stream so
//! reducers can flush whatever they are still holding.
//!
//! Reducers assume the sort-and-shuffle contract: equal keys arrive
//! contiguously and in ascending order. They do not re-sort.

mod runner;

pub use runner::{run, Emitter, RunSummary};

use crate::error::Result;

/// What a stage did with one input line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    /// The line was consumed (it may or may not have produced output)
    Consumed,
    /// The line did not have the expected shape and was ignored
    Skipped,
}

pub trait Stage {
    /// Name used in logs and run summaries
    fn name(&self) -> &'static str;

    /// Process one line with terminal whitespace already trimmed.
    fn process_line(&mut self, line: &str, out: &mut Emitter<'_>) -> Result<LineOutcome>;

    /// Called once after the last line.
    fn finish(&mut self, _out: &mut Emitter<'_>) -> Result<()> {
        Ok(())
    }
}
