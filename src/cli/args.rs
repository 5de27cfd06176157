//! CLI argument structures
//!
//! One subcommand per stage. Stages read stdin and write stdout; environment
//! configuration (`interconn`, `d2_col`) is resolved separately.

use crate::config::JOIN_COLUMN_VAR;
use crate::mapper::{
    DEFAULT_DATASET_TAG, DEFAULT_MATCH_COLUMN, DEFAULT_PATTERN, DEFAULT_PROJECT_COLUMN,
};
use clap::{Parser, Subcommand};

/// Run one mapper or reducer stage over stdin
#[derive(Parser, Debug)]
#[command(name = "keyshuffle")]
#[command(about = "keyshuffle - Streaming mapper and reducer stages for sort-and-shuffle pipelines", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Write a JSON run summary to stderr on success
    #[arg(long, global = true)]
    pub summary: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Emit `detection\t1` for records whose match column equals $interconn
    #[command(name = "field-filter")]
    FieldFilter {
        /// Column compared against the target
        #[arg(long, default_value_t = DEFAULT_MATCH_COLUMN)]
        match_column: usize,

        /// Column emitted as the key on a match
        #[arg(long, default_value_t = DEFAULT_PROJECT_COLUMN)]
        project_column: usize,

        /// Locate the match column by its name in the header row
        #[arg(long, conflicts_with = "match_column")]
        match_header: Option<String>,

        /// Locate the projected column by its name in the header row
        #[arg(long, conflicts_with = "project_column")]
        project_header: Option<String>,
    },

    /// Sum `key\tcount` lines per key (input must be key-sorted)
    #[command(name = "count")]
    Count {
        /// Group by key in memory instead of relying on sorted input
        #[arg(long)]
        hash_grouped: bool,
    },

    /// Turn `dummy\tdetection\tcount` lines into percentages of the total
    #[command(name = "percentage")]
    Percentage,

    /// Emit `1\tline` for lines matching a pattern
    #[command(name = "pattern-tag")]
    PatternTag {
        /// Regular expression to search for
        #[arg(long, default_value = DEFAULT_PATTERN)]
        pattern: String,

        /// Only search this comma-separated field
        #[arg(long)]
        field: Option<usize>,
    },

    /// Emit `joinKey\tline\ttag` for one side of a join
    #[command(name = "join-key")]
    JoinKey {
        /// Dataset tag appended to every emitted line
        #[arg(long, default_value = DEFAULT_DATASET_TAG)]
        tag: String,

        /// Environment variable holding the join column index
        #[arg(long, default_value = JOIN_COLUMN_VAR)]
        column_var: String,
    },

    /// Inner-join `joinKey\tcontent\ttag` lines from two datasets (input must be key-sorted)
    #[command(name = "join")]
    Join,
}

impl Commands {
    /// Subcommand name as typed on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Commands::FieldFilter { .. } => "field-filter",
            Commands::Count { .. } => "count",
            Commands::Percentage => "percentage",
            Commands::PatternTag { .. } => "pattern-tag",
            Commands::JoinKey { .. } => "join-key",
            Commands::Join => "join",
        }
    }
}
