//! Tags each record of one join side with its join key
//!
//! Unlike [`FieldMatchFilter`](super::FieldMatchFilter), records too short to
//! hold the join column are dropped silently rather than aborting the run.

use crate::error::Result;
use crate::record::{Record, FACT_SEPARATOR};
use crate::stage::{Emitter, LineOutcome, Stage};

pub const DEFAULT_DATASET_TAG: &str = "d1";

#[derive(Debug, Clone)]
pub struct JoinKeyExtractor {
    join_column: usize,
    dataset_tag: String,
}

impl JoinKeyExtractor {
    pub fn new(join_column: usize, dataset_tag: impl Into<String>) -> Self {
        Self {
            join_column,
            dataset_tag: dataset_tag.into(),
        }
    }
}

impl Stage for JoinKeyExtractor {
    fn name(&self) -> &'static str {
        "join-key"
    }

    fn process_line(&mut self, line: &str, out: &mut Emitter<'_>) -> Result<LineOutcome> {
        let record = Record::parse(line);
        let Some(join_key) = record.get(self.join_column) else {
            return Ok(LineOutcome::Skipped);
        };

        let content = format!("{line}{FACT_SEPARATOR}{}", self.dataset_tag);
        out.emit_pair(join_key.trim(), &content)?;
        Ok(LineOutcome::Consumed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::run;

    #[test]
    fn test_emits_key_line_and_tag() {
        let mut stage = JoinKeyExtractor::new(1, "d2");
        let mut out = Vec::new();
        run(&mut stage, "7, k1 ,x\n8,k2\n".as_bytes(), &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "k1\t7, k1 ,x\td2\nk2\t8,k2\td2\n"
        );
    }

    #[test]
    fn test_short_records_skipped_silently() {
        let mut stage = JoinKeyExtractor::new(2, DEFAULT_DATASET_TAG);
        let mut out = Vec::new();
        let summary = run(&mut stage, "a,b\na,b,c\n\n".as_bytes(), &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "c\ta,b,c\td1\n");
        assert_eq!(summary.lines_skipped, 2);
        assert_eq!(summary.lines_emitted, 1);
    }
}
