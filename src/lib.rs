//! # keyshuffle
//!
//! Single-pass mapper and reducer stages for line-oriented sort-and-shuffle
//! pipelines. Mappers turn comma-delimited records into `key\tvalue` facts;
//! an external runtime sorts and groups those facts by key; reducers fold
//! each contiguous key group into counts, percentages or join output.
//!
//! ## Usage
//!
//! ```bash
//! interconn=ATT keyshuffle field-filter < records.csv | sort | keyshuffle count
//! d2_col=0 keyshuffle join-key --tag d1 < left.csv
//! ```
//!
//! ## Modules
//!
//! - `cli` - Argument parsing and command routing
//! - `config` - Environment-derived stage configuration
//! - `env` - Environment variable abstraction for testing
//! - `error` - Stage error type
//! - `mapper` - Field filter, pattern tagger and join key extractor
//! - `record` - Positional records and keyed facts
//! - `reducer` - Counters, percentage aggregation and the two-way joiner
//! - `stage` - The stage trait and the line-stream runner
pub mod cli;
pub mod config;
pub mod env;
pub mod error;
pub mod mapper;
pub mod record;
pub mod reducer;
pub mod stage;

pub use error::{Result, StageError};
