//! Sort-independent counter
//!
//! Buffers one total per distinct key and emits them in ascending key order
//! at end-of-stream, so input order does not matter. Memory grows with the
//! number of distinct keys.

use super::run_length::parse_count_line;
use crate::error::{Result, StageError};
use crate::stage::{Emitter, LineOutcome, Stage};
use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct HashGroupedCounter {
    totals: BTreeMap<String, i64>,
}

impl HashGroupedCounter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Stage for HashGroupedCounter {
    fn name(&self) -> &'static str {
        "count-hash-grouped"
    }

    fn process_line(&mut self, line: &str, _out: &mut Emitter<'_>) -> Result<LineOutcome> {
        let (key, count) = parse_count_line(line)?;
        let total = self.totals.entry(key.to_string()).or_default();
        *total = total
            .checked_add(count)
            .ok_or_else(|| StageError::CountOverflow {
                key: key.to_string(),
            })?;
        Ok(LineOutcome::Consumed)
    }

    fn finish(&mut self, out: &mut Emitter<'_>) -> Result<()> {
        for (key, total) in std::mem::take(&mut self.totals) {
            out.emit_pair(&key, &total.to_string())?;
        }
        Ok(())
    }
}
