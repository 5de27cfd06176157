//! Stage configuration resolved from the process environment.
//!
//! Values are read once at startup into an [`EnvConfig`] and handed to the
//! stage that needs them. Nothing here is process-global.

use crate::env::VarEnv;
use crate::error::{Result, StageError};
use serde::Serialize;

/// Environment variable holding the FieldMatchFilter equality value
pub const INTERCONN_VAR: &str = "interconn";

/// Default environment variable holding the join column index
pub const JOIN_COLUMN_VAR: &str = "d2_col";

/// Fallback for unset variables. Not a valid join column.
pub const DEFAULT_VALUE: &str = "default";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvConfig {
    /// Trimmed equality target for the field filter
    pub interconn: String,
    /// Name of the variable the join column was read from
    pub join_column_var: String,
    /// Raw, unparsed join column value
    pub join_column_raw: String,
}

impl EnvConfig {
    /// Load using the default join column variable (`d2_col`).
    pub fn load<E: VarEnv>(env: &E) -> Self {
        Self::load_with(env, JOIN_COLUMN_VAR)
    }

    /// Load reading the join column from `join_column_var`.
    pub fn load_with<E: VarEnv>(env: &E, join_column_var: &str) -> Self {
        let interconn = env
            .var(INTERCONN_VAR)
            .unwrap_or_else(|| DEFAULT_VALUE.to_string())
            .trim()
            .to_string();
        let join_column_raw = env
            .var(join_column_var)
            .unwrap_or_else(|| DEFAULT_VALUE.to_string());

        Self {
            interconn,
            join_column_var: join_column_var.to_string(),
            join_column_raw,
        }
    }

    /// Equality target for the field filter
    pub fn filter_target(&self) -> &str {
        &self.interconn
    }

    /// Join column index parsed from the configured variable.
    pub fn join_column(&self) -> Result<usize> {
        self.join_column_raw.trim().parse::<usize>().map_err(|e| {
            StageError::Configuration(format!(
                "{} must be a non-negative column index, got '{}': {}",
                self.join_column_var, self.join_column_raw, e
            ))
        })
    }
}
