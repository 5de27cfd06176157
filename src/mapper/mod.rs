//! Mapper stages: one record in, zero or more keyed facts out, O(1) state

mod field_filter;
mod join_key;
mod pattern_tagger;

pub use field_filter::{
    ColumnRef, FieldMatchFilter, DEFAULT_MATCH_COLUMN, DEFAULT_PROJECT_COLUMN, HEADER_TOKEN,
};
pub use join_key::{JoinKeyExtractor, DEFAULT_DATASET_TAG};
pub use pattern_tagger::{PatternTagger, DEFAULT_PATTERN, TAG_KEY};
