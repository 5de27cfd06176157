//! Raw records and keyed facts
//!
//! Raw input lines are comma-delimited with no declared schema; fields are
//! reached by position and a missing field is a [`StageError::MalformedRecord`].
//! Intermediate facts between stages are tab-delimited `key\tvalue` lines.

use crate::error::{Result, StageError};
use std::fmt;

pub const FIELD_SEPARATOR: char = ',';
pub const FACT_SEPARATOR: char = '\t';

/// One comma-delimited input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record<'a> {
    line: &'a str,
    fields: Vec<&'a str>,
}

impl<'a> Record<'a> {
    pub fn parse(line: &'a str) -> Self {
        Self {
            line,
            fields: line.split(FIELD_SEPARATOR).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The line this record was parsed from
    pub fn line(&self) -> &'a str {
        self.line
    }

    /// Field at `index`, or `None` past the end
    pub fn get(&self, index: usize) -> Option<&'a str> {
        self.fields.get(index).copied()
    }

    /// Field at `index`, failing when the record is too short
    pub fn field(&self, index: usize) -> Result<&'a str> {
        self.get(index).ok_or(StageError::MalformedRecord {
            index,
            fields: self.fields.len(),
        })
    }

    /// Fails unless every index in `indices` is present
    pub fn require(&self, indices: &[usize]) -> Result<()> {
        match indices.iter().max() {
            Some(&max) => self.field(max).map(|_| ()),
            None => Ok(()),
        }
    }

    /// Whether any field equals `token` exactly
    pub fn contains_field(&self, token: &str) -> bool {
        self.fields.iter().any(|f| *f == token)
    }

    /// Index of the first field whose trimmed value is `name`
    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.trim() == name)
    }
}

/// A `(key, value)` pair emitted by a mapper
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyedFact {
    pub key: String,
    pub value: String,
}

impl KeyedFact {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for KeyedFact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.key, FACT_SEPARATOR, self.value)
    }
}

/// Split an intermediate line into its tab-separated fields
pub fn split_fact(line: &str) -> Vec<&str> {
    line.split(FACT_SEPARATOR).collect()
}

/// Parse a signed integer count, reporting the offending text on failure
pub fn parse_count(value: &str) -> Result<i64> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|source| StageError::InvalidCount {
            value: value.to_string(),
            source,
        })
}
