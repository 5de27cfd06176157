use thiserror::Error;

#[derive(Error, Debug)]
pub enum StageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Malformed record: field {index} requested but record has {fields} field(s)")]
    MalformedRecord { index: usize, fields: usize },

    #[error("Invalid count '{value}'")]
    InvalidCount {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("Join arity error: key '{key}' has {} distinct dataset tag(s) {tags:?}, expected 2", .tags.len())]
    JoinArity { key: String, tags: Vec<String> },

    #[error("Division by zero: no counted records to compute percentages from")]
    DivideByZero,

    #[error("Count overflow: total for key '{key}' exceeds the supported range")]
    CountOverflow { key: String },

    #[error("line {line}")]
    AtLine {
        line: u64,
        #[source]
        source: Box<StageError>,
    },
}

impl StageError {
    /// Attach the 1-based input line number to a record-level error.
    pub fn at_line(self, line: u64) -> Self {
        match self {
            // IO failures are about the stream, not the record
            StageError::Io(_) | StageError::AtLine { .. } => self,
            other => StageError::AtLine {
                line,
                source: Box::new(other),
            },
        }
    }

    /// The error with any line context stripped.
    pub fn root(&self) -> &StageError {
        match self {
            StageError::AtLine { source, .. } => source.root(),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, StageError>;
