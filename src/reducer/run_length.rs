//! Sums counts over contiguous runs of equal keys
//!
//! Correct only for key-sorted input: a key that reappears after another key
//! starts a new run and is emitted twice.

use crate::error::{Result, StageError};
use crate::record::{parse_count, FACT_SEPARATOR};
use crate::stage::{Emitter, LineOutcome, Stage};

/// Key assigned to a one-column `count` line
pub const EMPTY_KEY_LABEL: &str = "EmptyString";

/// Parse `key\tcount`, or a bare `count` meaning [`EMPTY_KEY_LABEL`].
pub fn parse_count_line(line: &str) -> Result<(&str, i64)> {
    match line.split_once(FACT_SEPARATOR) {
        None => Ok((EMPTY_KEY_LABEL, parse_count(line)?)),
        Some((key, rest)) => {
            let count = rest.split(FACT_SEPARATOR).next().unwrap_or(rest);
            Ok((key, parse_count(count)?))
        }
    }
}

/// Running accumulator for the current key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountState {
    pub current_key: Option<String>,
    pub current_count: i64,
}

impl CountState {
    /// Fold one `(key, count)` into the state, returning the finished run
    /// when `key` starts a new one.
    pub fn advance(&mut self, key: &str, count: i64) -> Result<Option<(String, i64)>> {
        if self.current_key.as_deref() == Some(key) {
            self.current_count = self.current_count.checked_add(count).ok_or_else(|| {
                StageError::CountOverflow {
                    key: key.to_string(),
                }
            })?;
            return Ok(None);
        }

        let finished = self.take();
        self.current_key = Some(key.to_string());
        self.current_count = count;
        Ok(finished)
    }

    /// Take the current run, leaving the state empty.
    pub fn take(&mut self) -> Option<(String, i64)> {
        let count = std::mem::take(&mut self.current_count);
        self.current_key.take().map(|key| (key, count))
    }
}

#[derive(Debug, Default)]
pub struct RunLengthCounter {
    state: CountState,
}

impl RunLengthCounter {
    pub fn new() -> Self {
        Self::default()
    }

    fn flush(run: Option<(String, i64)>, out: &mut Emitter<'_>) -> Result<()> {
        match run {
            // an empty key is never written out
            Some((key, count)) if !key.is_empty() => out.emit_pair(&key, &count.to_string()),
            _ => Ok(()),
        }
    }
}

impl Stage for RunLengthCounter {
    fn name(&self) -> &'static str {
        "count"
    }

    fn process_line(&mut self, line: &str, out: &mut Emitter<'_>) -> Result<LineOutcome> {
        let (key, count) = parse_count_line(line)?;
        let finished = self.state.advance(key, count)?;
        Self::flush(finished, out)?;
        Ok(LineOutcome::Consumed)
    }

    fn finish(&mut self, out: &mut Emitter<'_>) -> Result<()> {
        let last = self.state.take();
        Self::flush(last, out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::run;
    use proptest::prelude::*;

    fn count(input: &str) -> Result<String> {
        let mut out = Vec::new();
        run(&mut RunLengthCounter::new(), input.as_bytes(), &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_sums_contiguous_runs() {
        assert_eq!(count("a\t2\na\t3\nb\t1\n").unwrap(), "a\t5\nb\t1\n");
    }

    #[test]
    fn test_single_column_line_is_empty_string_key() {
        assert_eq!(count("7\n").unwrap(), "EmptyString\t7\n");
    }

    #[test]
    fn test_unsorted_input_fragments_groups() {
        assert_eq!(count("a\t1\nb\t1\na\t1\n").unwrap(), "a\t1\nb\t1\na\t1\n");
    }

    #[test]
    fn test_leading_tab_trims_to_empty_string_key() {
        assert_eq!(count("\t4\n\t1\n").unwrap(), "EmptyString\t5\n");
    }

    #[test]
    fn test_empty_key_run_is_dropped() {
        let mut stage = RunLengthCounter::new();
        let mut buf = Vec::new();
        let mut out = Emitter::new(&mut buf);

        stage.process_line("\t4", &mut out).unwrap();
        stage.process_line("b\t2", &mut out).unwrap();
        stage.process_line("\t1", &mut out).unwrap();
        stage.finish(&mut out).unwrap();

        assert_eq!(out.emitted(), 1);
        assert_eq!(String::from_utf8(buf).unwrap(), "b\t2\n");
    }

    #[test]
    fn test_non_numeric_count_is_fatal() {
        let err = count("a\t1\na\tmany\n").unwrap_err();
        assert!(matches!(err, StageError::AtLine { line: 2, .. }));
        assert!(matches!(err.root(), StageError::InvalidCount { .. }));
    }

    #[test]
    fn test_empty_input_emits_nothing() {
        assert_eq!(count("").unwrap(), "");
    }

    #[test]
    fn test_count_state_advance() {
        let mut state = CountState::default();
        assert_eq!(state.advance("a", 1).unwrap(), None);
        assert_eq!(state.advance("a", 2).unwrap(), None);
        assert_eq!(state.advance("b", 5).unwrap(), Some(("a".to_string(), 3)));
        assert_eq!(state.take(), Some(("b".to_string(), 5)));
        assert_eq!(state, CountState::default());
    }

    #[test]
    fn test_run_total_past_i64_max_is_fatal() {
        let err = count("a\t9223372036854775807\na\t1\n").unwrap_err();
        assert!(matches!(err, StageError::AtLine { line: 2, .. }));
        assert!(matches!(err.root(), StageError::CountOverflow { key } if key == "a"));
    }

    #[test]
    fn test_count_state_keeps_total_on_overflow() {
        let mut state = CountState::default();
        state.advance("a", i64::MAX).unwrap();
        assert!(state.advance("a", 1).is_err());
        assert_eq!(state.take(), Some(("a".to_string(), i64::MAX)));
    }

    fn totals(output: &str) -> Vec<(String, i64)> {
        output
            .lines()
            .map(|l| {
                let (k, v) = l.split_once('\t').unwrap();
                (k.to_string(), v.parse().unwrap())
            })
            .collect()
    }

    fn render(facts: &[(String, i64)]) -> String {
        let mut sorted = facts.to_vec();
        sorted.sort_by(|a, b| a.0.cmp(&b.0));
        sorted.iter().map(|(k, c)| format!("{k}\t{c}\n")).collect()
    }

    proptest! {
        #[test]
        fn prop_totals_invariant_under_chunking(
            facts in prop::collection::vec(("[a-d]{1,2}", 0i64..50), 0..60),
            chunks in 1usize..6,
        ) {
            let single_pass = totals(&count(&render(&facts)).unwrap());

            // each mapper chunk is pre-counted, then the partial totals are
            // shuffled together and counted again
            let chunk_len = facts.len().div_ceil(chunks).max(1);
            let partials: Vec<(String, i64)> = facts
                .chunks(chunk_len)
                .flat_map(|chunk| totals(&count(&render(chunk)).unwrap()))
                .collect();
            let merged = totals(&count(&render(&partials)).unwrap());

            prop_assert_eq!(&single_pass, &merged);

            let emitted: i64 = single_pass.iter().map(|(_, c)| c).sum();
            let expected: i64 = facts.iter().map(|(_, c)| c).sum();
            prop_assert_eq!(emitted, expected);
        }
    }
}
