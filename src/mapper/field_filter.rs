//! Equality filter that projects one column into a count fact
//!
//! Emits `detection\t1` for every record whose match column equals the
//! configured target. Records containing the header token as a field are
//! dropped wherever they appear in the stream. Columns are fixed indices
//! unless given by name, in which case each header row resolves them.

use crate::error::{Result, StageError};
use crate::record::{KeyedFact, Record};
use crate::stage::{Emitter, LineOutcome, Stage};
use tracing::{debug, info};

/// Any record with a field equal to this is treated as a header row
pub const HEADER_TOKEN: &str = "Interconne";

pub const DEFAULT_MATCH_COLUMN: usize = 10;
pub const DEFAULT_PROJECT_COLUMN: usize = 9;

/// A column addressed by position or by its name in the header row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnRef {
    Index(usize),
    Header {
        name: String,
        resolved: Option<usize>,
    },
}

impl ColumnRef {
    pub fn named(name: impl Into<String>) -> Self {
        ColumnRef::Header {
            name: name.into(),
            resolved: None,
        }
    }

    fn resolve(&mut self, header: &Record<'_>) -> Result<()> {
        if let ColumnRef::Header { name, resolved } = self {
            let index = header.position(name).ok_or_else(|| {
                StageError::Configuration(format!(
                    "column '{}' not found in header '{}'",
                    name,
                    header.line()
                ))
            })?;
            debug!("Column '{}' resolved to index {}", name, index);
            *resolved = Some(index);
        }
        Ok(())
    }

    fn index(&self) -> Result<usize> {
        match self {
            ColumnRef::Index(index) => Ok(*index),
            ColumnRef::Header {
                resolved: Some(index),
                ..
            } => Ok(*index),
            ColumnRef::Header {
                name,
                resolved: None,
            } => Err(StageError::Configuration(format!(
                "column '{name}' requested by name but no header row precedes the data"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FieldMatchFilter {
    target: String,
    match_column: ColumnRef,
    project_column: ColumnRef,
}

impl FieldMatchFilter {
    pub fn new(target: impl Into<String>, match_column: usize, project_column: usize) -> Self {
        let target = target.into();
        info!("The value of interconn_value is: {}", target);
        Self {
            target,
            match_column: ColumnRef::Index(match_column),
            project_column: ColumnRef::Index(project_column),
        }
    }

    /// Look up the given columns by header name instead of by index.
    pub fn with_headers(
        mut self,
        match_header: Option<String>,
        project_header: Option<String>,
    ) -> Self {
        if let Some(name) = match_header {
            self.match_column = ColumnRef::named(name);
        }
        if let Some(name) = project_header {
            self.project_column = ColumnRef::named(name);
        }
        self
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

impl Stage for FieldMatchFilter {
    fn name(&self) -> &'static str {
        "field-filter"
    }

    fn process_line(&mut self, line: &str, out: &mut Emitter<'_>) -> Result<LineOutcome> {
        let record = Record::parse(line);
        if record.contains_field(HEADER_TOKEN) {
            self.match_column.resolve(&record)?;
            self.project_column.resolve(&record)?;
            return Ok(LineOutcome::Consumed);
        }

        let match_column = self.match_column.index()?;
        let project_column = self.project_column.index()?;
        record.require(&[match_column, project_column])?;

        if record.field(match_column)?.trim() != self.target {
            return Ok(LineOutcome::Consumed);
        }

        let detection = record.field(project_column)?;
        let key = if detection.trim().is_empty() {
            format!("'{detection}'")
        } else {
            detection.to_string()
        };

        out.emit(&KeyedFact::new(key, "1"))?;
        Ok(LineOutcome::Consumed)
    }
}
