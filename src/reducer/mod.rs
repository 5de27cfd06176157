//! Reducer stages
//!
//! [`RunLengthCounter`] and [`TwoWayInnerJoiner`] rely on key-sorted input
//! and hold at most one key group. [`PercentageAggregator`] and
//! [`HashGroupedCounter`] buffer across the whole stream.

mod hash_grouped;
mod join;
mod percentage;
mod run_length;

pub use hash_grouped::HashGroupedCounter;
pub use join::{JoinBucket, TwoWayInnerJoiner};
pub use percentage::{format_percentage, PercentageAggregator, PercentageTable};
pub use run_length::{parse_count_line, CountState, RunLengthCounter, EMPTY_KEY_LABEL};
