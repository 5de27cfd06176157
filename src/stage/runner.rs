//! Drives a [`Stage`] over a line stream

use super::{LineOutcome, Stage};
use crate::error::Result;
use crate::record::KeyedFact;
use serde::Serialize;
use std::io::{BufRead, Write};
use tracing::{debug, trace};

/// Counters for one completed run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub stage: String,
    pub lines_read: u64,
    pub lines_emitted: u64,
    pub lines_skipped: u64,
}

/// Output handle given to stages. Every write is one line.
pub struct Emitter<'a> {
    out: &'a mut dyn Write,
    emitted: u64,
}

impl<'a> Emitter<'a> {
    pub fn new(out: &'a mut dyn Write) -> Self {
        Self { out, emitted: 0 }
    }

    pub fn emit(&mut self, fact: &KeyedFact) -> Result<()> {
        writeln!(self.out, "{fact}")?;
        self.emitted += 1;
        Ok(())
    }

    /// Emit a `left\tright` line without allocating a fact
    pub fn emit_pair(&mut self, left: &str, right: &str) -> Result<()> {
        writeln!(self.out, "{left}\t{right}")?;
        self.emitted += 1;
        Ok(())
    }

    pub fn emitted(&self) -> u64 {
        self.emitted
    }
}

/// Run `stage` over every line of `input`, writing to `output`.
///
/// Lines are trimmed before the stage sees them. The first error aborts the
/// run; lines already written stay written.
pub fn run<S, R, W>(stage: &mut S, input: R, mut output: W) -> Result<RunSummary>
where
    S: Stage + ?Sized,
    R: BufRead,
    W: Write,
{
    debug!("Starting stage {}", stage.name());

    let mut summary = RunSummary {
        stage: stage.name().to_string(),
        ..RunSummary::default()
    };

    let mut emitter = Emitter::new(&mut output);
    for line in input.lines() {
        let line = line?;
        summary.lines_read += 1;

        let outcome = stage
            .process_line(line.trim(), &mut emitter)
            .map_err(|e| e.at_line(summary.lines_read))?;

        if outcome == LineOutcome::Skipped {
            trace!(line = summary.lines_read, "Ignoring line with unexpected shape");
            summary.lines_skipped += 1;
        }
    }

    stage.finish(&mut emitter)?;
    summary.lines_emitted = emitter.emitted();
    output.flush()?;

    debug!(
        "Stage {} finished: {} read, {} emitted, {} skipped",
        summary.stage, summary.lines_read, summary.lines_emitted, summary.lines_skipped
    );
    Ok(summary)
}
