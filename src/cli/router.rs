//! Command routing and execution
//!
//! Builds the stage for a parsed command and runs it over the given streams.

use crate::cli::args::Commands;
use crate::config::EnvConfig;
use crate::env::VarEnv;
use crate::error::Result;
use crate::mapper::{FieldMatchFilter, JoinKeyExtractor, PatternTagger};
use crate::reducer::{
    HashGroupedCounter, PercentageAggregator, RunLengthCounter, TwoWayInnerJoiner,
};
use crate::stage::{run, RunSummary, Stage};
use std::io::{BufRead, Write};
use tracing::debug;

/// Construct the stage for `command`, resolving its environment configuration.
///
/// Configuration errors surface here, before any input is read.
pub fn build_stage<E: VarEnv>(command: &Commands, env: &E) -> Result<Box<dyn Stage>> {
    let stage: Box<dyn Stage> = match command {
        Commands::FieldFilter {
            match_column,
            project_column,
            match_header,
            project_header,
        } => {
            let config = EnvConfig::load(env);
            Box::new(
                FieldMatchFilter::new(config.filter_target(), *match_column, *project_column)
                    .with_headers(match_header.clone(), project_header.clone()),
            )
        }
        Commands::Count { hash_grouped: true } => Box::new(HashGroupedCounter::new()),
        Commands::Count {
            hash_grouped: false,
        } => Box::new(RunLengthCounter::new()),
        Commands::Percentage => Box::new(PercentageAggregator::new()),
        Commands::PatternTag { pattern, field } => Box::new(PatternTagger::new(pattern, *field)?),
        Commands::JoinKey { tag, column_var } => {
            let config = EnvConfig::load_with(env, column_var);
            let join_column = config.join_column()?;
            debug!("Join column {} read from {}", join_column, column_var);
            Box::new(JoinKeyExtractor::new(join_column, tag.clone()))
        }
        Commands::Join => Box::new(TwoWayInnerJoiner::new()),
    };
    Ok(stage)
}

/// Execute a CLI command over `input`, writing data lines to `output`
pub fn execute_command<E, R, W>(
    command: &Commands,
    env: &E,
    input: R,
    output: W,
) -> Result<RunSummary>
where
    E: VarEnv,
    R: BufRead,
    W: Write,
{
    let mut stage = build_stage(command, env)?;
    run(stage.as_mut(), input, output)
}
