//! Inner equi-join of two tagged datasets
//!
//! Consumes a key-sorted stream of `joinKey\tcontent\tdatasetTag`. Each run
//! of equal keys is buffered into a [`JoinBucket`]; when the key changes, or
//! the stream ends, the bucket must hold exactly two dataset tags and their
//! cross product is emitted as `left\tright`, first tag major.

use crate::error::{Result, StageError};
use crate::record::split_fact;
use crate::stage::{Emitter, LineOutcome, Stage};
use tracing::trace;

/// Content lines of one join key, grouped by dataset tag in arrival order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoinBucket {
    sides: Vec<(String, Vec<String>)>,
}

impl JoinBucket {
    pub fn push(&mut self, tag: &str, content: &str) {
        match self.sides.iter_mut().find(|(t, _)| t == tag) {
            Some((_, contents)) => contents.push(content.to_string()),
            None => self.sides.push((tag.to_string(), vec![content.to_string()])),
        }
    }

    /// Distinct tags in first-seen order
    pub fn tags(&self) -> Vec<String> {
        self.sides.iter().map(|(tag, _)| tag.clone()).collect()
    }

    /// The two sides of the join, failing unless exactly two tags were seen.
    pub fn pair(&self, key: &str) -> Result<(&[String], &[String])> {
        match self.sides.as_slice() {
            [(_, left), (_, right)] => Ok((left.as_slice(), right.as_slice())),
            _ => Err(StageError::JoinArity {
                key: key.to_string(),
                tags: self.tags(),
            }),
        }
    }
}

#[derive(Debug, Default)]
pub struct TwoWayInnerJoiner {
    current_key: Option<String>,
    bucket: JoinBucket,
}

impl TwoWayInnerJoiner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit the cross product for the buffered key and reset.
    fn flush(&mut self, out: &mut Emitter<'_>) -> Result<()> {
        let Some(key) = self.current_key.take() else {
            return Ok(());
        };
        let bucket = std::mem::take(&mut self.bucket);
        let (left, right) = bucket.pair(&key)?;

        trace!(key = %key, left = left.len(), right = right.len(), "Joining key group");
        for l in left {
            for r in right {
                out.emit_pair(l, r)?;
            }
        }
        Ok(())
    }
}

impl Stage for TwoWayInnerJoiner {
    fn name(&self) -> &'static str {
        "join"
    }

    fn process_line(&mut self, line: &str, out: &mut Emitter<'_>) -> Result<LineOutcome> {
        let fields = split_fact(line);
        let [key, content, tag] = fields[..] else {
            return Ok(LineOutcome::Skipped);
        };

        if self.current_key.as_deref() != Some(key) {
            self.flush(out)?;
            self.current_key = Some(key.to_string());
        }
        self.bucket.push(tag.trim(), content.trim());
        Ok(LineOutcome::Consumed)
    }

    fn finish(&mut self, out: &mut Emitter<'_>) -> Result<()> {
        self.flush(out)
    }
}
