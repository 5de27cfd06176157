//! Converts per-detection counts into shares of the grand total
//!
//! Input lines are `dummyKey\tdetection\tcount`; anything else is ignored.
//! Nothing is emitted until end-of-stream because every percentage needs the
//! final total.

use crate::error::{Result, StageError};
use crate::record::{parse_count, split_fact};
use crate::stage::{Emitter, LineOutcome, Stage};
use std::collections::HashMap;

/// Detection counts in first-seen order plus their running total
#[derive(Debug, Clone, Default)]
pub struct PercentageTable {
    order: Vec<(String, i64)>,
    index: HashMap<String, usize>,
    total: i64,
}

impl PercentageTable {
    /// Add `count` to `detection` and to the grand total.
    ///
    /// Fails with [`StageError::CountOverflow`] if either sum leaves the
    /// `i64` range; the table is unchanged in that case.
    pub fn add(&mut self, detection: &str, count: i64) -> Result<()> {
        let overflow = || StageError::CountOverflow {
            key: detection.to_string(),
        };
        let total = self.total.checked_add(count).ok_or_else(overflow)?;

        match self.index.get(detection) {
            Some(&i) => {
                self.order[i].1 = self.order[i].1.checked_add(count).ok_or_else(overflow)?;
            }
            None => {
                self.index.insert(detection.to_string(), self.order.len());
                self.order.push((detection.to_string(), count));
            }
        }
        self.total = total;
        Ok(())
    }

    pub fn total(&self) -> i64 {
        self.total
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// `(detection, percentage)` in first-insertion order.
    pub fn percentages(&self) -> Result<Vec<(&str, f64)>> {
        if self.order.is_empty() || self.total == 0 {
            return Err(StageError::DivideByZero);
        }
        let total = self.total as f64;
        Ok(self
            .order
            .iter()
            .map(|(detection, count)| (detection.as_str(), *count as f64 / total * 100.0))
            .collect())
    }
}

/// Plain decimal with at least one fractional digit: `50.0`, `0.000001`.
pub fn format_percentage(percentage: f64) -> String {
    if percentage.fract() == 0.0 {
        format!("{percentage:.1}")
    } else {
        format!("{percentage}")
    }
}

#[derive(Debug, Default)]
pub struct PercentageAggregator {
    table: PercentageTable,
}

impl PercentageAggregator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Stage for PercentageAggregator {
    fn name(&self) -> &'static str {
        "percentage"
    }

    fn process_line(&mut self, line: &str, _out: &mut Emitter<'_>) -> Result<LineOutcome> {
        let fields = split_fact(line);
        let [_, detection, count] = fields[..] else {
            return Ok(LineOutcome::Skipped);
        };
        self.table.add(detection, parse_count(count)?)?;
        Ok(LineOutcome::Consumed)
    }

    fn finish(&mut self, out: &mut Emitter<'_>) -> Result<()> {
        for (detection, percentage) in self.table.percentages()? {
            out.emit_pair(detection, &format!("{}%", format_percentage(percentage)))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::run;
    use proptest::prelude::*;

    fn aggregate(input: &str) -> Result<String> {
        let mut out = Vec::new();
        run(&mut PercentageAggregator::new(), input.as_bytes(), &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_percentages_in_first_seen_order() {
        let input = "x\tRadar\t1\nx\tLoop\t2\nx\tVideo\t1\n";
        assert_eq!(
            aggregate(input).unwrap(),
            "Radar\t25.0%\nLoop\t50.0%\nVideo\t25.0%\n"
        );
    }

    #[test]
    fn test_repeated_detection_accumulates() {
        let input = "x\tLoop\t1\nx\tRadar\t1\nx\tLoop\t1\n";
        assert_eq!(
            aggregate(input).unwrap(),
            "Loop\t66.66666666666666%\nRadar\t33.33333333333333%\n"
        );
    }

    #[test]
    fn test_other_shapes_ignored() {
        let input = "Loop\t3\nx\tLoop\t1\na\tb\tc\td\n\n";
        assert_eq!(aggregate(input).unwrap(), "Loop\t100.0%\n");
    }

    #[test]
    fn test_no_valid_lines_is_divide_by_zero() {
        let err = aggregate("only\ttwo\n").unwrap_err();
        assert!(matches!(err, StageError::DivideByZero));
        assert!(matches!(aggregate(""), Err(StageError::DivideByZero)));
    }

    #[test]
    fn test_zero_total_is_divide_by_zero() {
        assert!(matches!(
            aggregate("x\tLoop\t0\n"),
            Err(StageError::DivideByZero)
        ));
    }

    #[test]
    fn test_bad_count_is_fatal() {
        let err = aggregate("x\tLoop\tlots\n").unwrap_err();
        assert!(matches!(err.root(), StageError::InvalidCount { .. }));
    }

    #[test]
    fn test_tiny_share_is_not_scientific() {
        let input = "x\tLoop\t1\nx\tVideo\t99999999\n";
        assert_eq!(
            aggregate(input).unwrap(),
            "Loop\t0.000001%\nVideo\t99.99999899999999%\n"
        );
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(100.0), "100.0");
        assert_eq!(format_percentage(0.0), "0.0");
        assert_eq!(format_percentage(25.5), "25.5");
        assert_eq!(format_percentage(1e-7), "0.0000001");
    }

    #[test]
    fn test_total_past_i64_max_is_fatal() {
        let err = aggregate("x\tLoop\t9223372036854775807\nx\tRadar\t1\n").unwrap_err();
        assert!(matches!(err, StageError::AtLine { line: 2, .. }));
        assert!(matches!(err.root(), StageError::CountOverflow { key } if key == "Radar"));
    }

    #[test]
    fn test_table_unchanged_after_overflow() {
        let mut table = PercentageTable::default();
        table.add("Loop", i64::MAX).unwrap();
        assert!(table.add("Loop", 1).is_err());
        assert_eq!(table.total(), i64::MAX);
        assert_eq!(table.percentages().unwrap(), vec![("Loop", 100.0)]);
    }

    proptest! {
        #[test]
        fn prop_percentages_sum_to_100(
            rows in prop::collection::vec(("[A-Za-z]{1,6}", 1i64..1000), 1..40),
        ) {
            let mut table = PercentageTable::default();
            for (detection, count) in &rows {
                table.add(detection, *count).unwrap();
            }
            let sum: f64 = table.percentages().unwrap().iter().map(|(_, p)| p).sum();
            prop_assert!((sum - 100.0).abs() < 1e-9);
            prop_assert_eq!(table.total(), rows.iter().map(|(_, c)| c).sum::<i64>());
        }
    }
}
